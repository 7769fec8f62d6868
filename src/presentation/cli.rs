//! CLI Argument Parsing
//!
//! Hoist is a single interactive command; the flags only pick the path
//! (deploy or teardown) and tune output.

use std::path::PathBuf;

use clap::Parser;

use crate::config::ColorMode;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

impl From<ColorWhen> for ColorMode {
    fn from(value: ColorWhen) -> Self {
        match value {
            ColorWhen::Auto => ColorMode::Auto,
            ColorWhen::Always => ColorMode::Always,
            ColorWhen::Never => ColorMode::Never,
        }
    }
}

/// Hoist - deploy a git repository to a Linux host behind nginx
#[derive(Parser, Debug)]
#[command(name = "hoist")]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "Run 'hoist' and answer the prompts. A run log (hoist-YYYYMMDD-HHMMSS.log) is written to the current directory."
)]
pub struct Cli {
    /// Remove a previous deployment (container, image, nginx site, remote directory)
    #[arg(long)]
    pub teardown: bool,

    /// Settings file (default: ./hoist.toml, then the user config directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Color output mode
    #[arg(long, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_invocation_deploys() {
        let cli = Cli::try_parse_from(["hoist"]).unwrap();
        assert!(!cli.teardown);
        assert_eq!(cli.verbose, 0);
        assert!(cli.config.is_none());
    }

    #[test]
    fn parses_teardown_and_flags() {
        let cli = Cli::try_parse_from([
            "hoist",
            "--teardown",
            "--config",
            "ops/hoist.toml",
            "--color",
            "never",
            "-vv",
        ])
        .unwrap();
        assert!(cli.teardown);
        assert_eq!(cli.config, Some(PathBuf::from("ops/hoist.toml")));
        assert_eq!(cli.color, Some(ColorWhen::Never));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn rejects_unknown_color() {
        assert!(Cli::try_parse_from(["hoist", "--color", "sometimes"]).is_err());
    }
}
