//! CLI error type.

use routelens::RouteError;
use thiserror::Error;

/// Errors surfaced by the command-line interface.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid command-line input.
    #[error("{0}")]
    Input(String),

    /// Configuration problem.
    #[error("{0}")]
    Config(String),

    /// Failure from the route planning core.
    #[error("{0}")]
    Route(#[from] RouteError),
}
