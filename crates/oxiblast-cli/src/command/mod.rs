use std::path::PathBuf;

use clap::{Parser, Subcommand};

use self::{play::PlayArg, simulate::SimulateArg};
use crate::logging;

mod play;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v = INFO, -vv = DEBUG, -vvv = TRACE)
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal
    Play(#[clap(flatten)] PlayArg),
    /// Play rounds headlessly with a bot and report the results as JSON
    Simulate(#[clap(flatten)] SimulateArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    logging::init(args.verbose, args.log_file.as_deref())?;
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_default_mode_is_play() {
        let args = CommandArgs::try_parse_from(["oxiblast"]).unwrap();
        assert!(args.mode.is_none());
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args =
            CommandArgs::try_parse_from(["oxiblast", "simulate", "-vv", "--rounds", "3"]).unwrap();
        assert_eq!(args.verbose, 2);
        assert!(matches!(args.mode, Some(Mode::Simulate(_))));
    }
}
