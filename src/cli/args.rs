//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Pipit sprite preparation CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Sprite directory (overrides [assets].dir)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub dir: Option<PathBuf>,

    /// Config file path (default: pipit.toml)
    #[arg(short = 'C', long, default_value = "pipit.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Downscale oversized sprites to the bounding dimension, in place
    #[command(visible_alias = "s")]
    Shrink {
        /// Maximum bounding dimension in pixels (overrides [shrink].max_size)
        #[arg(short, long)]
        max_size: Option<u32>,
    },

    /// Key out near-white sprite backgrounds, in place
    #[command(visible_alias = "n")]
    Nobg {
        /// Files to process, relative to the sprite directory
        /// (overrides [nobg].files)
        #[arg(value_name = "FILE")]
        files: Vec<String>,

        /// Whiteness threshold, 0-255 (overrides [nobg].threshold)
        #[arg(short, long)]
        threshold: Option<u8>,
    },
}

#[allow(unused)]
impl Cli {
    pub const fn is_shrink(&self) -> bool {
        matches!(self.command, Commands::Shrink { .. })
    }
    pub const fn is_nobg(&self) -> bool {
        matches!(self.command, Commands::Nobg { .. })
    }
}
