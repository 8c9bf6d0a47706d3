use thiserror::Error;

/// Result type for overlay operations
pub type Result<T> = std::result::Result<T, OverlayError>;

/// Errors surfaced by the overlay layer.
///
/// Header parsing is total and never errors; lifecycle misuse (calling into a
/// detached controller) is a programming error and panics instead of landing
/// here.
#[derive(Error, Debug)]
pub enum OverlayError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No overlay is anchored at the given row
    #[error("No chunk overlay anchored at row {row}")]
    UnknownChunk { row: usize },
}

impl OverlayError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an unknown chunk error
    #[must_use]
    pub const fn unknown_chunk(row: usize) -> Self {
        Self::UnknownChunk { row }
    }
}
