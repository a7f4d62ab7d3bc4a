//! Interactive presentation layer over the bookkeeping core.

pub mod commands;
pub mod forms;
pub mod io;
pub mod output;
mod shell;

pub use shell::run_cli;

use thiserror::Error;

use crate::errors::BooksError;

/// Error type for shell commands. Core failures pass through with their
/// literal user-facing messages intact.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Books(#[from] BooksError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("Uso: {0}")]
    Usage(String),
}
