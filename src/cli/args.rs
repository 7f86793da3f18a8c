//! Command-line interface definitions.

use clap::{ColorChoice, Parser};
use std::path::PathBuf;

/// Build an SVG symbol sprite and a preview page from a directory of icons
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: iconsprite.toml, searched upward)
    #[arg(short = 'C', long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Icon directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub icons: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Write preview.html next to the sprite
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub preview: Option<bool>,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,

    /// Hide the progress line
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["iconsprite"]);
        assert!(cli.config.is_none());
        assert!(cli.icons.is_none());
        assert!(cli.preview.is_none());
        assert!(!cli.verbose && !cli.quiet);
    }

    #[test]
    fn test_preview_values() {
        assert_eq!(Cli::parse_from(["iconsprite", "-p"]).preview, Some(true));
        assert_eq!(Cli::parse_from(["iconsprite", "--preview=false"]).preview, Some(false));
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::parse_from(["iconsprite", "-C", "conf.toml", "-v", "-q", "-o", "out"]);
        assert_eq!(cli.config, Some(PathBuf::from("conf.toml")));
        assert_eq!(cli.output, Some(PathBuf::from("out")));
        assert!(cli.verbose && cli.quiet);
    }

    #[test]
    fn test_version_flag_is_free() {
        let err = Cli::try_parse_from(["iconsprite", "-V"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }
}
