use std::path::PathBuf;

use anyhow::Context as _;
use oxiblast_engine::{Round, RoundSeed};

use self::app::PlayApp;
use crate::{store::JsonFileHighScoreStore, tui::Runtime};

mod app;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Seed for the piece generator (32 hex characters); random if omitted
    #[clap(long)]
    seed: Option<RoundSeed>,
    /// Directory holding the persisted high score
    #[clap(long, default_value = "./data")]
    data_dir: PathBuf,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            seed: None,
            data_dir: PathBuf::from("./data"),
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { seed, data_dir } = arg;

    let store = JsonFileHighScoreStore::new(data_dir);
    tracing::debug!(path = %store.path().display(), "using high score file");
    let round = match seed {
        Some(seed) => Round::with_seed(store, *seed),
        None => Round::new(store),
    }
    .context("Failed to deal the first piece set")?;
    tracing::info!(seed = %round.seed(), "round started");

    let mut app = PlayApp::new(round);
    Runtime::new().run(&mut app)?;

    let snapshot = app.round().score_snapshot();
    eprintln!(
        "Final score: {} (high score: {})",
        snapshot.score, snapshot.high_score
    );
    Ok(())
}
