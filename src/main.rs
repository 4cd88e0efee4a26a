//! Pipit - prepare the pipi sprite set for shipping.

mod cli;
mod config;
mod image;
mod logger;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::PipitConfig;

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = PipitConfig::load(cli)?;

    match &cli.command {
        Commands::Shrink { .. } => cli::shrink::run(&config),
        Commands::Nobg { .. } => cli::nobg::run(&config),
    }
}
