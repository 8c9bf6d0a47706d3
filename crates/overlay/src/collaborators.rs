//! Contracts for the editor subsystems the overlay delegates to.
//!
//! The overlay core performs no rendering, document mutation, or execution
//! itself; everything observable goes through one of these traits. All of
//! them are single-threaded (`Rc`, not `Arc`) because the overlay lives on
//! the editor's UI dispatch thread.

use std::rc::Rc;

use crate::types::{ChunkState, ConfirmRequest, LineWidgetHandle, Position, ToolbarSpec};

/// Continuation fired when a dialog button is chosen.
pub type DialogContinuation = Box<dyn FnOnce()>;

/// A document-owned handle tracking one logical line across edits.
///
/// The document, not the overlay, owns the row remapping: after lines are
/// inserted or deleted above the tracked line, `current_row` reflects the
/// new numbering before the next overlay call runs.
pub trait LineAnchor {
    /// The tracked line's current row
    fn current_row(&self) -> usize;

    /// Stop tracking. Idempotent; `current_row` must not be called after.
    fn release(&self);
}

/// The document being edited, plus its execution queue entry points.
pub trait EditingTarget {
    /// Text of the given row; empty string for out-of-range rows
    fn line_text(&self, row: usize) -> String;

    /// Number of lines in the document
    fn line_count(&self) -> usize;

    /// Full document text, used for chunk discovery
    fn document_text(&self) -> String;

    /// Create an anchor tracking `row`
    fn create_anchor(&self, row: usize) -> Rc<dyn LineAnchor>;

    /// Schedule the chunk at `position` for execution
    fn execute_chunk(&self, position: Position);

    /// Schedule every chunk before `position` for execution
    fn execute_previous_chunks(&self, position: Position);

    /// Remove the chunk at `row` from the pending-execution queue
    fn dequeue_chunk(&self, row: usize);
}

/// The execution engine, as far as the overlay needs it.
pub trait ExecutionEngine {
    /// Interrupt execution; `None` interrupts whatever is currently running
    fn interrupt(&self, target: Option<Position>);
}

/// Modal confirmation dialogs.
pub trait DialogService {
    /// Show a confirmation. Exactly one of the provided continuations fires,
    /// exactly once; a missing continuation for the chosen button (or for a
    /// close-box dismissal) means no action.
    fn confirm(
        &self,
        request: ConfirmRequest,
        on_yes: Option<DialogContinuation>,
        on_no: Option<DialogContinuation>,
        on_cancel: Option<DialogContinuation>,
    );
}

/// Which options-panel variant to present for a chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsPanelVariant {
    /// Setup chunks get the reduced panel
    Setup,

    /// Every other chunk gets the full panel
    Default,
}

/// The chunk-options popup. Fire and forget: the overlay initializes,
/// shows, positions, and focuses it, then retains nothing.
pub trait OptionsPanel {
    /// Bind the panel to the chunk at `position`
    fn init(&mut self, target: Rc<dyn EditingTarget>, position: Position);

    fn show(&mut self);

    fn focus(&mut self);

    /// Place the panel at screen coordinates with a fixed pixel inset
    fn set_position(&mut self, x: i32, y: i32, inset_px: u32);
}

/// Creates options panels by variant.
pub trait OptionsPanelFactory {
    fn create(&self, variant: OptionsPanelVariant) -> Box<dyn OptionsPanel>;
}

/// The rendering side of the overlay: owns toolbar widgets pinned to
/// document lines. Widgets attach in the idle state.
pub trait OverlayHost {
    /// Attach a toolbar widget to `row`, returning its handle
    fn attach_line_widget(&self, row: usize, toolbar: ToolbarSpec) -> LineWidgetHandle;

    /// Update the displayed state of an attached widget
    fn set_widget_state(&self, widget: &LineWidgetHandle, state: ChunkState);

    /// Remove an attached widget
    fn remove_line_widget(&self, widget: &LineWidgetHandle);
}

/// The injected service bundle shared by every overlay of a document.
///
/// Passed in at construction rather than fetched from a process-wide
/// registry, so tests and embedders can swap any collaborator.
#[derive(Clone)]
pub struct OverlayServices {
    pub engine: Rc<dyn ExecutionEngine>,
    pub dialogs: Rc<dyn DialogService>,
    pub panels: Rc<dyn OptionsPanelFactory>,
}

impl OverlayServices {
    /// Bundle the three service collaborators
    pub fn new(
        engine: Rc<dyn ExecutionEngine>,
        dialogs: Rc<dyn DialogService>,
        panels: Rc<dyn OptionsPanelFactory>,
    ) -> Self {
        Self {
            engine,
            dialogs,
            panels,
        }
    }
}
