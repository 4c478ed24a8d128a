//! Library side of the `salient` binary: argument definitions and command
//! handlers, kept here so they can be driven from tests.

pub mod cli;
pub mod commands;

pub use cli::{Cli, Command};
pub use commands::{load_config, load_documents, parse_documents, run};
