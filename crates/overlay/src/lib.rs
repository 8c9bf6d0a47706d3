//! # Notebook Overlay
//!
//! Inline, per-chunk control overlays for a notebook-style source editor.
//! Each executable chunk gets one toolbar overlay pinned to its header line;
//! the overlay stays attached as the document is edited, reflects the
//! chunk's execution-queue status, and forwards user actions (run, run
//! previous, options, interrupt, cancel pending) to the editor's
//! collaborators.
//!
//! ## Architecture
//!
//! ```text
//! Document edits ──> LineAnchor (document-owned row remapping)
//!                          │
//! Queue status  ──> ChunkOverlayController ──> OverlayHost (toolbar render)
//!                          │
//! User actions  ──────────┤
//!                          ├──> EditingTarget   (execute / dequeue)
//!                          ├──> ExecutionEngine (interrupt)
//!                          ├──> DialogService   (confirmations)
//!                          └──> OptionsPanelFactory (chunk options popup)
//! ```
//!
//! `OverlayManager` reconciles the set of controllers against the chunk
//! headers currently present in the document, keeping the one-overlay-per-
//! chunk invariant.
//!
//! All collaborators are injected at construction. The crate performs no
//! rendering, no document mutation, and no I/O of its own.

mod collaborators;
mod config;
mod controller;
mod error;
mod manager;
mod types;

pub use notebook_chunk_header::Classification;

pub use collaborators::{
    DialogContinuation, DialogService, EditingTarget, ExecutionEngine, LineAnchor, OptionsPanel,
    OptionsPanelFactory, OptionsPanelVariant, OverlayHost, OverlayServices,
};
pub use config::OverlayConfig;
pub use controller::ChunkOverlayController;
pub use error::{OverlayError, Result};
pub use manager::OverlayManager;
pub use types::{ChunkState, ConfirmRequest, LineWidgetHandle, MessageKind, Position, ToolbarSpec};
