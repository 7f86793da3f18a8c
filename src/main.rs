//! iconsprite - Combine a directory of SVG icons into one symbol sprite.

mod cli;
mod config;
mod icon;
mod logger;
mod output;
mod sprite;
mod utils;

use anyhow::{Context, Result, bail};
use clap::{ColorChoice, Parser};
use cli::{Cli, build::build_sprite};
use config::SpriteConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = SpriteConfig::load(&cli)?;
    match &config.config_path {
        Some(path) => debug!("config"; "loaded {}", path.display()),
        None => debug!("config"; "no config file, using defaults"),
    }
    debug!("config"; "root {}", config.get_root().display());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let report = runtime.block_on(build_sprite(&config))?;
    debug!(
        "build";
        "{} from {}, {} skipped",
        utils::plural_count(report.sprite.len(), "artifact"),
        utils::plural_count(report.ids.len(), "icon"),
        report.sprite.skipped().len()
    );

    if !report.writes.is_ok() {
        bail!(
            "{} of {} could not be written",
            utils::plural_count(report.writes.failed.len(), "output file"),
            report.writes.failed.len() + report.writes.written.len()
        );
    }
    Ok(())
}
