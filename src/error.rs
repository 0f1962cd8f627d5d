//! Error types for topology queries and CLI dispatch.

use thiserror::Error;

/// Result type alias for xininfo operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort the invocation.
///
/// Absent extensions and failed per-output queries are not errors; they
/// degrade to fallbacks or sentinel output.
#[derive(Debug, Error)]
pub enum Error {
    /// Could not open a connection to the display server.
    #[error("cannot open display")]
    ConnectionFailed,

    /// All adapters ran and still no monitor exists.
    #[error("no monitors found")]
    EmptyTopology,

    /// `-monitor` index outside the discovered topology.
    #[error("Invalid monitor: {index} (0 <= {index} < {count} failed)")]
    InvalidMonitor { index: i64, count: usize },

    /// A flag was given without its required trailing argument.
    #[error("flag {0} requires an argument")]
    MissingArgument(&'static str),

    /// A trailing argument did not parse.
    #[error("invalid argument for {flag}: {value}")]
    InvalidArgument { flag: &'static str, value: String },

    /// Writing query output failed.
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}
