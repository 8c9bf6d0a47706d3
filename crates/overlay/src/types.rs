use serde::{Deserialize, Serialize};

/// A location in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Row (0-indexed)
    pub row: usize,

    /// Column (0-indexed)
    pub column: usize,
}

impl Position {
    /// Create a position
    #[must_use]
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Position at the start of a row; chunks are identified by their
    /// header row with column 0
    #[must_use]
    pub const fn at_row(row: usize) -> Self {
        Self::new(row, 0)
    }
}

/// Toolbar interaction state for one chunk.
///
/// Beyond the three states the overlay renders distinctly, the execution
/// engine may report additional status codes; these are handed through as
/// [`ChunkState::Other`] for display, never interpreted locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChunkState {
    /// Not queued and not running
    Idle,

    /// Pending execution behind other chunks
    Queued,

    /// Currently executing
    Running,

    /// Engine-defined status code with no local meaning
    Other(i32),
}

impl ChunkState {
    /// Map a raw engine status code onto a chunk state
    #[must_use]
    pub const fn from_engine_code(code: i32) -> Self {
        match code {
            0 => Self::Queued,
            1 => Self::Running,
            2 => Self::Idle,
            other => Self::Other(other),
        }
    }

    /// State name for display and logging
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Queued => "queued",
            Self::Running => "running",
            Self::Other(_) => "other",
        }
    }
}

/// Construction-time render inputs for a chunk's toolbar widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolbarSpec {
    /// Options toggle is offered (setup chunks hide it)
    pub options_enabled: bool,

    /// Run action is offered (non-runnable engines disable it)
    pub run_enabled: bool,

    /// Render for a dark editor theme
    pub dark: bool,
}

/// Opaque id naming one attached line widget.
///
/// Issued by the [`OverlayHost`](crate::OverlayHost) on attach and used for
/// later state updates, removal, and external layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineWidgetHandle(u64);

impl LineWidgetHandle {
    /// Create a handle from a host-issued id
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The host-issued id
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Severity/kind of a confirmation dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    Info,
    Warning,
    Error,
    Question,
}

/// A two-button (optionally three-button) confirmation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmRequest {
    pub kind: MessageKind,
    pub title: String,
    pub message: String,

    /// Offer a third cancel button
    pub include_cancel: bool,

    pub yes_label: String,
    pub no_label: String,

    /// Put the initial focus on the negative button
    pub default_to_no: bool,
}
