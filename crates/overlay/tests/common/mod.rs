#![allow(dead_code)]

//! In-memory fakes for the overlay's collaborator traits.
//!
//! `FakeDocument` implements the document side of the contract for real:
//! anchors it hands out are remapped when lines are inserted or removed, the
//! way the editor's own edit pipeline would.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use notebook_overlay::{
    ChunkOverlayController, ChunkState, ConfirmRequest, DialogContinuation, DialogService,
    EditingTarget, ExecutionEngine, LineAnchor, LineWidgetHandle, OptionsPanel,
    OptionsPanelFactory, OptionsPanelVariant, OverlayConfig, OverlayHost, OverlayManager,
    OverlayServices, Position, ToolbarSpec,
};

pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ---------------------------------------------------------------------------
// Document

pub struct FakeAnchor {
    row: Cell<usize>,
    released: Cell<bool>,
}

impl LineAnchor for FakeAnchor {
    fn current_row(&self) -> usize {
        assert!(!self.released.get(), "anchor queried after release");
        self.row.get()
    }

    fn release(&self) {
        self.released.set(true);
    }
}

#[derive(Default)]
struct DocInner {
    lines: Vec<String>,
    anchors: Vec<Rc<FakeAnchor>>,
    executed: Vec<Position>,
    executed_previous: Vec<Position>,
    dequeued: Vec<usize>,
}

#[derive(Clone, Default)]
pub struct FakeDocument {
    inner: Rc<RefCell<DocInner>>,
}

impl FakeDocument {
    pub fn new(text: &str) -> Self {
        let doc = Self::default();
        doc.inner.borrow_mut().lines = text.lines().map(String::from).collect();
        doc
    }

    /// Insert `count` blank lines before `at`, remapping live anchors
    pub fn insert_lines(&self, at: usize, count: usize) {
        let mut inner = self.inner.borrow_mut();
        for _ in 0..count {
            inner.lines.insert(at, String::new());
        }
        for anchor in &inner.anchors {
            if !anchor.released.get() && anchor.row.get() >= at {
                anchor.row.set(anchor.row.get() + count);
            }
        }
    }

    /// Remove `count` lines starting at `at`, remapping live anchors.
    /// Anchors inside the removed range collapse onto `at`.
    pub fn remove_lines(&self, at: usize, count: usize) {
        let mut inner = self.inner.borrow_mut();
        for _ in 0..count {
            if at < inner.lines.len() {
                inner.lines.remove(at);
            }
        }
        for anchor in &inner.anchors {
            if anchor.released.get() {
                continue;
            }
            let row = anchor.row.get();
            if row >= at + count {
                anchor.row.set(row - count);
            } else if row >= at {
                anchor.row.set(at);
            }
        }
    }

    pub fn set_line(&self, row: usize, text: &str) {
        self.inner.borrow_mut().lines[row] = text.to_string();
    }

    pub fn executed(&self) -> Vec<Position> {
        self.inner.borrow().executed.clone()
    }

    pub fn executed_previous(&self) -> Vec<Position> {
        self.inner.borrow().executed_previous.clone()
    }

    pub fn dequeued(&self) -> Vec<usize> {
        self.inner.borrow().dequeued.clone()
    }

    pub fn released_anchor_count(&self) -> usize {
        self.inner
            .borrow()
            .anchors
            .iter()
            .filter(|a| a.released.get())
            .count()
    }

    pub fn anchor_count(&self) -> usize {
        self.inner.borrow().anchors.len()
    }
}

impl EditingTarget for FakeDocument {
    fn line_text(&self, row: usize) -> String {
        self.inner.borrow().lines.get(row).cloned().unwrap_or_default()
    }

    fn line_count(&self) -> usize {
        self.inner.borrow().lines.len()
    }

    fn document_text(&self) -> String {
        self.inner.borrow().lines.join("\n")
    }

    fn create_anchor(&self, row: usize) -> Rc<dyn LineAnchor> {
        let anchor = Rc::new(FakeAnchor {
            row: Cell::new(row),
            released: Cell::new(false),
        });
        self.inner.borrow_mut().anchors.push(Rc::clone(&anchor));
        anchor
    }

    fn execute_chunk(&self, position: Position) {
        self.inner.borrow_mut().executed.push(position);
    }

    fn execute_previous_chunks(&self, position: Position) {
        self.inner.borrow_mut().executed_previous.push(position);
    }

    fn dequeue_chunk(&self, row: usize) {
        self.inner.borrow_mut().dequeued.push(row);
    }
}

// ---------------------------------------------------------------------------
// Overlay host

#[derive(Debug, Clone, Copy)]
pub struct WidgetRecord {
    pub handle: LineWidgetHandle,
    pub row: usize,
    pub toolbar: ToolbarSpec,
    pub state: ChunkState,
    pub removed: bool,
}

#[derive(Default)]
struct HostInner {
    next_id: u64,
    widgets: Vec<WidgetRecord>,
}

#[derive(Clone, Default)]
pub struct FakeHost {
    inner: Rc<RefCell<HostInner>>,
}

impl FakeHost {
    pub fn widget(&self, handle: LineWidgetHandle) -> WidgetRecord {
        *self
            .inner
            .borrow()
            .widgets
            .iter()
            .find(|w| w.handle == handle)
            .expect("unknown widget handle")
    }

    pub fn attached_count(&self) -> usize {
        self.inner.borrow().widgets.iter().filter(|w| !w.removed).count()
    }
}

impl OverlayHost for FakeHost {
    fn attach_line_widget(&self, row: usize, toolbar: ToolbarSpec) -> LineWidgetHandle {
        let mut inner = self.inner.borrow_mut();
        let handle = LineWidgetHandle::new(inner.next_id);
        inner.next_id += 1;
        inner.widgets.push(WidgetRecord {
            handle,
            row,
            toolbar,
            state: ChunkState::Idle,
            removed: false,
        });
        handle
    }

    fn set_widget_state(&self, widget: &LineWidgetHandle, state: ChunkState) {
        let mut inner = self.inner.borrow_mut();
        let record = inner
            .widgets
            .iter_mut()
            .find(|w| w.handle == *widget)
            .expect("unknown widget handle");
        record.state = state;
    }

    fn remove_line_widget(&self, widget: &LineWidgetHandle) {
        let mut inner = self.inner.borrow_mut();
        let record = inner
            .widgets
            .iter_mut()
            .find(|w| w.handle == *widget)
            .expect("unknown widget handle");
        record.removed = true;
    }
}

// ---------------------------------------------------------------------------
// Execution engine

#[derive(Clone, Default)]
pub struct FakeEngine {
    interrupts: Rc<RefCell<Vec<Option<Position>>>>,
}

impl FakeEngine {
    pub fn interrupts(&self) -> Vec<Option<Position>> {
        self.interrupts.borrow().clone()
    }
}

impl ExecutionEngine for FakeEngine {
    fn interrupt(&self, target: Option<Position>) {
        self.interrupts.borrow_mut().push(target);
    }
}

// ---------------------------------------------------------------------------
// Dialogs

pub struct PendingConfirm {
    pub request: ConfirmRequest,
    pub on_yes: Option<DialogContinuation>,
    pub on_no: Option<DialogContinuation>,
    pub on_cancel: Option<DialogContinuation>,
}

#[derive(Clone, Default)]
pub struct FakeDialog {
    pending: Rc<RefCell<Vec<PendingConfirm>>>,
}

impl FakeDialog {
    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Pop the most recent confirmation so the test can answer it later
    pub fn take_last(&self) -> PendingConfirm {
        self.pending
            .borrow_mut()
            .pop()
            .expect("no pending confirmation")
    }
}

impl DialogService for FakeDialog {
    fn confirm(
        &self,
        request: ConfirmRequest,
        on_yes: Option<DialogContinuation>,
        on_no: Option<DialogContinuation>,
        on_cancel: Option<DialogContinuation>,
    ) {
        self.pending.borrow_mut().push(PendingConfirm {
            request,
            on_yes,
            on_no,
            on_cancel,
        });
    }
}

// ---------------------------------------------------------------------------
// Options panels

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    Created(OptionsPanelVariant),
    Init(Position),
    Shown,
    Focused,
    Positioned { x: i32, y: i32, inset_px: u32 },
}

#[derive(Clone, Default)]
pub struct FakePanels {
    events: Rc<RefCell<Vec<PanelEvent>>>,
}

impl FakePanels {
    pub fn events(&self) -> Vec<PanelEvent> {
        self.events.borrow().clone()
    }
}

struct FakePanel {
    events: Rc<RefCell<Vec<PanelEvent>>>,
}

impl OptionsPanel for FakePanel {
    fn init(&mut self, _target: Rc<dyn EditingTarget>, position: Position) {
        self.events.borrow_mut().push(PanelEvent::Init(position));
    }

    fn show(&mut self) {
        self.events.borrow_mut().push(PanelEvent::Shown);
    }

    fn focus(&mut self) {
        self.events.borrow_mut().push(PanelEvent::Focused);
    }

    fn set_position(&mut self, x: i32, y: i32, inset_px: u32) {
        self.events
            .borrow_mut()
            .push(PanelEvent::Positioned { x, y, inset_px });
    }
}

impl OptionsPanelFactory for FakePanels {
    fn create(&self, variant: OptionsPanelVariant) -> Box<dyn OptionsPanel> {
        self.events.borrow_mut().push(PanelEvent::Created(variant));
        Box::new(FakePanel {
            events: Rc::clone(&self.events),
        })
    }
}

// ---------------------------------------------------------------------------
// Harness

/// One document plus fakes for every collaborator
pub struct Harness {
    pub doc: FakeDocument,
    pub host: FakeHost,
    pub engine: FakeEngine,
    pub dialogs: FakeDialog,
    pub panels: FakePanels,
}

impl Harness {
    pub fn new(text: &str) -> Self {
        init_logs();
        Self {
            doc: FakeDocument::new(text),
            host: FakeHost::default(),
            engine: FakeEngine::default(),
            dialogs: FakeDialog::default(),
            panels: FakePanels::default(),
        }
    }

    pub fn target(&self) -> Rc<dyn EditingTarget> {
        Rc::new(self.doc.clone())
    }

    pub fn services(&self) -> OverlayServices {
        OverlayServices::new(
            Rc::new(self.engine.clone()),
            Rc::new(self.dialogs.clone()),
            Rc::new(self.panels.clone()),
        )
    }

    pub fn controller_at(&self, row: usize) -> ChunkOverlayController {
        self.controller_with_config(row, OverlayConfig::default())
    }

    pub fn controller_with_config(&self, row: usize, config: OverlayConfig) -> ChunkOverlayController {
        ChunkOverlayController::new(
            self.target(),
            self.services(),
            Rc::new(self.host.clone()),
            row,
            config,
        )
        .expect("config is valid")
    }

    pub fn manager(&self) -> OverlayManager {
        OverlayManager::new(
            self.target(),
            self.services(),
            Rc::new(self.host.clone()),
            OverlayConfig::default(),
        )
        .expect("config is valid")
    }
}
