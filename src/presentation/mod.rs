//! Presentation Layer
//!
//! - `cli` - command line surface (clap)
//! - `factory` - wires infrastructure adapters into the pipeline

pub mod cli;
pub mod factory;

pub use cli::{Cli, ColorWhen};
pub use factory::{create_connector, create_redactor, RunLog};
