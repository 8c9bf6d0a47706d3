use std::cell::Cell;
use std::rc::Rc;

use notebook_chunk_header::{classify, is_setup_chunk, Classification};

use crate::collaborators::{
    EditingTarget, LineAnchor, OptionsPanelVariant, OverlayHost, OverlayServices,
};
use crate::config::OverlayConfig;
use crate::error::Result;
use crate::types::{ChunkState, ConfirmRequest, LineWidgetHandle, MessageKind, Position, ToolbarSpec};

const DEQUEUE_TITLE: &str = "Chunk Pending Execution";
const DEQUEUE_MESSAGE: &str = "The code in this chunk is scheduled to run later, \
                               when other chunks have finished executing.";

/// One control overlay bound to one chunk's header line.
///
/// The controller owns its line anchor and widget handle exclusively and
/// holds shared references to the document and services. It never mutates
/// the document; edits reach it only through the anchor's row remapping.
///
/// After [`detach`](Self::detach) the controller is dead: any further call
/// is a programming error and panics. The one exception is a dialog
/// continuation still in flight when the overlay is detached, which is
/// silently dropped.
pub struct ChunkOverlayController {
    target: Rc<dyn EditingTarget>,
    services: OverlayServices,
    host: Rc<dyn OverlayHost>,
    anchor: Rc<dyn LineAnchor>,
    widget: LineWidgetHandle,
    classification: Classification,
    state: Cell<ChunkState>,
    config: OverlayConfig,
    // Shared with pending dialog continuations so they can tell that the
    // overlay died while the dialog was open.
    detached: Rc<Cell<bool>>,
}

impl ChunkOverlayController {
    /// Bind a new overlay to the chunk whose header is at `header_row`.
    ///
    /// Classifies the header once, attaches the toolbar widget (idle, with
    /// action enablement derived from the classification), and anchors the
    /// row. Fails only on invalid configuration.
    pub fn new(
        target: Rc<dyn EditingTarget>,
        services: OverlayServices,
        host: Rc<dyn OverlayHost>,
        header_row: usize,
        config: OverlayConfig,
    ) -> Result<Self> {
        config.validate()?;

        let header = clip_header(target.line_text(header_row), config.max_header_len);
        let classification = classify(&header);

        let toolbar = ToolbarSpec {
            options_enabled: !classification.is_setup,
            run_enabled: classification.is_runnable,
            dark: config.dark,
        };
        let widget = host.attach_line_widget(header_row, toolbar);
        let anchor = target.create_anchor(header_row);

        log::debug!(
            "attached chunk overlay at row {header_row} (setup: {}, runnable: {})",
            classification.is_setup,
            classification.is_runnable
        );

        Ok(Self {
            target,
            services,
            host,
            anchor,
            widget,
            classification,
            state: Cell::new(ChunkState::Idle),
            config,
            detached: Rc::new(Cell::new(false)),
        })
    }

    /// The chunk header's current row, post-edit-adjusted by the anchor
    #[must_use]
    pub fn anchored_row(&self) -> usize {
        self.ensure_attached();
        self.anchor.current_row()
    }

    /// The classification computed from the header at construction time
    #[must_use]
    pub fn classification(&self) -> Classification {
        self.ensure_attached();
        self.classification
    }

    /// Current toolbar state
    #[must_use]
    pub fn state(&self) -> ChunkState {
        self.ensure_attached();
        self.state.get()
    }

    /// Sync the toolbar display to a new state.
    ///
    /// A display sync point, not a state-machine guard: any state may be set
    /// at any time, as dictated by the execution queue.
    pub fn set_state(&self, state: ChunkState) {
        self.ensure_attached();
        self.state.set(state);
        self.host.set_widget_state(&self.widget, state);
        log::trace!(
            "chunk overlay at row {} now {}",
            self.anchor.current_row(),
            state.as_str()
        );
    }

    /// Handle of the attached line widget, for external layout
    #[must_use]
    pub fn line_widget(&self) -> LineWidgetHandle {
        self.ensure_attached();
        self.widget
    }

    /// Release the anchor and remove the widget. The controller is invalid
    /// afterward; any further call panics.
    pub fn detach(&self) {
        self.ensure_attached();
        let row = self.anchor.current_row();
        self.anchor.release();
        self.host.remove_line_widget(&self.widget);
        self.detached.set(true);
        log::debug!("detached chunk overlay from row {row}");
    }

    /// Forward "execute every chunk before this one"
    pub fn run_previous_chunks(&self) {
        self.ensure_attached();
        self.target.execute_previous_chunks(self.chunk_position());
    }

    /// Forward "execute this chunk"
    pub fn run_chunk(&self) {
        self.ensure_attached();
        self.target.execute_chunk(self.chunk_position());
    }

    /// Pop up the chunk-options panel at screen coordinates `(x, y)`.
    ///
    /// Setup-ness is re-read from the header's current text, not the cached
    /// classification: the header may have been edited since construction,
    /// and the setup panel differs from the default one. Runnability stays
    /// cached; it only feeds the construction-time toolbar.
    pub fn show_options(&self, x: i32, y: i32) {
        self.ensure_attached();
        let position = self.chunk_position();
        let header = clip_header(self.target.line_text(position.row), self.config.max_header_len);
        let variant = if is_setup_chunk(&header) {
            OptionsPanelVariant::Setup
        } else {
            OptionsPanelVariant::Default
        };

        let mut panel = self.services.panels.create(variant);
        panel.init(Rc::clone(&self.target), position);
        panel.show();
        panel.focus();
        panel.set_position(x, y, self.config.popup_inset_px);
    }

    /// Forward an interrupt request to the execution engine. Local state is
    /// untouched; the resulting status update arrives later via
    /// [`set_state`](Self::set_state).
    pub fn interrupt_chunk(&self) {
        self.ensure_attached();
        self.services.engine.interrupt(None);
    }

    /// Ask whether the pending chunk should be removed from the queue.
    ///
    /// Two buttons, no cancel, focus on "Don't Run". Only an explicit
    /// "Don't Run" dequeues, using the row current when the answer arrives,
    /// not when the dialog opened. A dismissal or "OK" does nothing, and an
    /// answer arriving after detach is ignored.
    pub fn dequeue_chunk(&self) {
        self.ensure_attached();

        let detached = Rc::clone(&self.detached);
        let anchor = Rc::clone(&self.anchor);
        let target = Rc::clone(&self.target);
        let on_no = Box::new(move || {
            if detached.get() {
                log::debug!("dropping dequeue confirmation for a detached overlay");
                return;
            }
            target.dequeue_chunk(anchor.current_row());
        });

        self.services.dialogs.confirm(
            ConfirmRequest {
                kind: MessageKind::Question,
                title: DEQUEUE_TITLE.to_string(),
                message: DEQUEUE_MESSAGE.to_string(),
                include_cancel: false,
                yes_label: "OK".to_string(),
                no_label: "Don't Run".to_string(),
                default_to_no: true,
            },
            None,
            Some(on_no),
            None,
        );
    }

    fn chunk_position(&self) -> Position {
        Position::at_row(self.anchor.current_row())
    }

    fn ensure_attached(&self) {
        assert!(
            !self.detached.get(),
            "chunk overlay controller used after detach"
        );
    }
}

impl Drop for ChunkOverlayController {
    fn drop(&mut self) {
        // Dropping an attached controller releases its resources the same
        // way detach does; pending continuations see the flag flip.
        if !self.detached.get() {
            self.anchor.release();
            self.host.remove_line_widget(&self.widget);
            self.detached.set(true);
        }
    }
}

/// Cap the header prefix handed to the classifier, on a char boundary.
fn clip_header(mut line: String, max: usize) -> String {
    if let Some((idx, _)) = line.char_indices().nth(max) {
        line.truncate(idx);
        log::warn!("chunk header clipped to {max} chars for classification");
    }
    line
}
