use std::path::PathBuf;

use oxiblast_engine::{
    GridPos, HighScoreStore, MemoryHighScoreStore, Round, RoundSeed, RoundStats,
};
use rand::{Rng, seq::IndexedRandom as _};
use serde::Serialize;

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Number of rounds to play
    #[clap(long, default_value_t = 100)]
    rounds: usize,
    /// Master seed (32 hex characters) the round seeds are derived from
    #[clap(long)]
    seed: Option<RoundSeed>,
    /// How the bot picks placements
    #[clap(long, value_enum, default_value_t = Strategy::FirstFit)]
    strategy: Strategy,
    /// Stop a round after this many placements
    #[clap(long, default_value_t = 10_000)]
    max_placements: usize,
    /// Output file path (stdout if omitted)
    #[clap(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum Strategy {
    /// First piece in slot order at its first valid origin (row-major)
    FirstFit,
    /// Uniformly random valid (piece, origin) pair
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum RoundOutcome {
    /// No offered piece fits anywhere.
    NoMoves,
    /// The generator could not deal a new set.
    GeneratorExhausted,
    /// The placement limit was reached first.
    PlacementLimit,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct RoundReport {
    seed: RoundSeed,
    score: u64,
    outcome: RoundOutcome,
    stats: RoundStats,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SimulationReport {
    seed: RoundSeed,
    strategy: Strategy,
    rounds: Vec<RoundReport>,
    mean_score: f64,
    max_score: u64,
    high_score: u64,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let report = simulate(arg)?;
    eprintln!(
        "Played {} rounds: mean score {:.1}, max score {}",
        report.rounds.len(),
        report.mean_score,
        report.max_score
    );
    util::save_json(&report, arg.output.as_deref())?;
    if let Some(path) = &arg.output {
        eprintln!("Report saved to {}", path.display());
    }
    Ok(())
}

fn simulate(arg: &SimulateArg) -> anyhow::Result<SimulationReport> {
    let SimulateArg {
        rounds,
        seed,
        strategy,
        max_placements,
        output: _,
    } = arg;

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let mut master = seed.rng();
    let mut store = MemoryHighScoreStore::default();
    let mut reports = Vec::with_capacity(*rounds);

    for i in 0..*rounds {
        let round_seed: RoundSeed = master.random();
        let mut bot_rng = master.random::<RoundSeed>().rng();
        let mut round = Round::with_seed(&mut store, round_seed)?;
        let outcome = play_round(&mut round, *strategy, *max_placements, &mut bot_rng);

        let score = round.score_snapshot().score;
        tracing::info!(round = i, %round_seed, score, ?outcome, "round finished");
        if (i + 1) % 10 == 0 {
            eprintln!("Simulated {}/{} rounds", i + 1, rounds);
        }
        reports.push(RoundReport {
            seed: round_seed,
            score,
            outcome,
            stats: round.stats().clone(),
        });
    }

    let max_score = reports.iter().map(|r| r.score).max().unwrap_or(0);
    #[expect(clippy::cast_precision_loss)]
    let mean_score = if reports.is_empty() {
        0.0
    } else {
        reports.iter().map(|r| r.score as f64).sum::<f64>() / reports.len() as f64
    };

    Ok(SimulationReport {
        seed,
        strategy: *strategy,
        rounds: reports,
        mean_score,
        max_score,
        high_score: store.value(),
    })
}

fn play_round<S, R>(
    round: &mut Round<S>,
    strategy: Strategy,
    max_placements: usize,
    rng: &mut R,
) -> RoundOutcome
where
    S: HighScoreStore,
    R: Rng + ?Sized,
{
    for _ in 0..max_placements {
        if round.is_game_over() {
            return RoundOutcome::NoMoves;
        }
        let Some((slot, origin)) = choose_move(round, strategy, rng) else {
            return RoundOutcome::NoMoves;
        };
        match round.place(slot, origin) {
            Ok(result) => debug_assert!(result.accepted),
            Err(e) => {
                tracing::debug!(error = %e, "generator exhausted");
                return RoundOutcome::GeneratorExhausted;
            }
        }
        round.drain_events();
    }
    if round.is_game_over() {
        RoundOutcome::NoMoves
    } else {
        RoundOutcome::PlacementLimit
    }
}

fn choose_move<S, R>(round: &Round<S>, strategy: Strategy, rng: &mut R) -> Option<(usize, GridPos)>
where
    S: HighScoreStore,
    R: Rng + ?Sized,
{
    let board = round.board();
    match strategy {
        Strategy::FirstFit => round.active_pieces().iter().find_map(|piece| {
            board
                .first_valid_origin(piece.definition().shape())
                .map(|origin| (piece.slot(), origin))
        }),
        Strategy::Random => {
            let candidates: Vec<_> = round
                .active_pieces()
                .iter()
                .flat_map(|piece| {
                    board
                        .valid_origins(piece.definition().shape())
                        .map(move |origin| (piece.slot(), origin))
                })
                .collect();
            candidates.choose(rng).copied()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arg(strategy: Strategy) -> SimulateArg {
        SimulateArg {
            rounds: 3,
            seed: Some(RoundSeed::from_bytes([42; 16])),
            strategy,
            max_placements: 10_000,
            output: None,
        }
    }

    #[test]
    fn test_rounds_play_to_completion() {
        for strategy in [Strategy::FirstFit, Strategy::Random] {
            let report = simulate(&arg(strategy)).unwrap();
            assert_eq!(report.rounds.len(), 3);
            for round in &report.rounds {
                assert_ne!(round.outcome, RoundOutcome::PlacementLimit);
                assert!(round.stats.pieces_placed() > 0);
                assert!(round.score >= round.stats.cells_placed() as u64);
            }
            assert_eq!(report.high_score, report.max_score);
        }
    }

    #[test]
    fn test_same_seed_same_report() {
        let a = simulate(&arg(Strategy::Random)).unwrap();
        let b = simulate(&arg(Strategy::Random)).unwrap();
        assert_eq!(
            serde_json::to_value(&a).unwrap(),
            serde_json::to_value(&b).unwrap()
        );
    }

    #[test]
    fn test_placement_limit() {
        let report = simulate(&SimulateArg {
            rounds: 1,
            max_placements: 2,
            ..arg(Strategy::FirstFit)
        })
        .unwrap();
        let round = &report.rounds[0];
        assert_eq!(round.outcome, RoundOutcome::PlacementLimit);
        assert_eq!(round.stats.pieces_placed(), 2);
    }

    #[test]
    fn test_report_format() {
        let report = simulate(&SimulateArg {
            rounds: 1,
            ..arg(Strategy::FirstFit)
        })
        .unwrap();
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["strategy"], "first-fit");
        assert_eq!(value["seed"], "2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a");
        assert!(value["rounds"][0]["stats"]["pieces_placed"].is_u64());
    }
}
