//! Tooling & Integration Layer
//!
//! Command-line host for the shell: option parsing, store selection and the
//! interactive read loop.

pub mod cli;

pub use cli::{Cli, CliContext};
