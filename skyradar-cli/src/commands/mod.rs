//! CLI command handlers.
//!
//! Each command lives in its own module with a `run` entry point; argument
//! resolution shared between commands is in `common`.

pub mod common;
pub mod config;
pub mod lookup;
pub mod track;
