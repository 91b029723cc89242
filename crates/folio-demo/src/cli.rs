use std::io::{self, Write};

use clap::{Parser, Subcommand};

use crate::direction::{DirectionArgs, run_direction};
use crate::error::Result;
use crate::layout::{LayoutArgs, run_layout};
use crate::scroll::{ScrollArgs, run_scroll};
use crate::show_config::{ConfigArgs, run_config};

#[derive(Debug, Parser)]
#[command(
    name = "folio",
    about = "Classify pointer entries, simulate scroll-linked scenes, and inspect motion configuration",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Report which edge a pointer entered a box from.
    Direction(DirectionArgs),

    /// Drive a scroll-linked scene through a simulated pass and print its styles.
    Scroll(ScrollArgs),

    /// Print the seeded background layout.
    Layout(LayoutArgs),

    /// Print the effective motion configuration.
    Config(ConfigArgs),
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli, &mut out)?;
    out.flush()?;
    Ok(())
}

pub fn run(cli: Cli, out: &mut dyn Write) -> Result<()> {
    match cli.command {
        Commands::Direction(args) => run_direction(&args, out),
        Commands::Scroll(args) => run_scroll(&args, out),
        Commands::Layout(args) => run_layout(&args, out),
        Commands::Config(args) => run_config(&args, out),
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, run};

    fn run_args(args: &[&str]) -> String {
        let cli = Cli::try_parse_from(args).unwrap();
        let mut out = Vec::new();
        run(cli, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn direction_command_dispatches() {
        let out = run_args(&[
            "folio",
            "direction",
            "--rect",
            "0,0,400,200",
            "--pointer",
            "-3,100",
        ]);
        assert_eq!(out, "left\n");
    }

    #[test]
    fn scroll_command_parses_scene() {
        let cli = Cli::try_parse_from(["folio", "scroll", "--scene", "timeline", "--frames", "3"])
            .unwrap();
        let Commands::Scroll(args) = &cli.command else {
            panic!("expected scroll command");
        };
        assert_eq!(args.frames, 3);
        assert_eq!(args.viewport, 800.0);
        let mut out = Vec::new();
        run(cli, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out)
                .unwrap()
                .lines()
                .filter(|l| l.starts_with("frame "))
                .count(),
            3
        );
    }

    #[test]
    fn zero_frames_is_rejected_by_the_parser() {
        let parsed =
            Cli::try_parse_from(["folio", "scroll", "--scene", "skills", "--frames", "0"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn layout_and_config_dispatch() {
        assert!(run_args(&["folio", "layout", "--seed", "9"]).starts_with("seed 9\n"));
        assert!(run_args(&["folio", "config"]).contains("[smoothing]"));
    }

    #[test]
    fn malformed_rect_is_a_parse_error() {
        assert!(
            Cli::try_parse_from(["folio", "direction", "--rect", "1,2", "--pointer", "0,0"])
                .is_err()
        );
    }
}
