//! Command-line interface module.

mod args;
pub mod nobg;
pub mod shrink;

pub use args::{Cli, Commands};
