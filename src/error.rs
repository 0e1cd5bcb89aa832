use thiserror::Error;

/// Crate-wide error type. Every failure that can reach the CLI boundary
/// is represented here — there are no `panic!`/`unwrap()` paths on
/// untrusted input.
#[derive(Debug, Error)]
pub enum Error {
    #[error("could not read input: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse input JSON: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("failed to serialize output JSON: {0}")]
    SerializationError(serde_json::Error),

    #[error("invalid schedule input: {0}")]
    Construction(String),
}

pub type Result<T> = std::result::Result<T, Error>;
