use std::collections::HashSet;
use std::rc::Rc;

use notebook_chunk_header::scan_chunk_headers;

use crate::collaborators::{EditingTarget, OverlayHost, OverlayServices};
use crate::config::OverlayConfig;
use crate::controller::ChunkOverlayController;
use crate::error::{OverlayError, Result};
use crate::types::ChunkState;

/// Keeps one overlay controller per chunk of one document.
///
/// `sync` reconciles the live controllers against the chunk headers
/// currently present in the document text: new chunks gain an overlay,
/// removed chunks lose theirs. Between syncs, controllers follow their own
/// anchors, so edits that merely move chunks need no reconciliation.
pub struct OverlayManager {
    target: Rc<dyn EditingTarget>,
    services: OverlayServices,
    host: Rc<dyn OverlayHost>,
    config: OverlayConfig,
    overlays: Vec<ChunkOverlayController>,
}

impl OverlayManager {
    /// Create a manager for one document
    pub fn new(
        target: Rc<dyn EditingTarget>,
        services: OverlayServices,
        host: Rc<dyn OverlayHost>,
        config: OverlayConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            target,
            services,
            host,
            config,
            overlays: Vec::new(),
        })
    }

    /// Reconcile overlays against the chunk headers in the document.
    ///
    /// Idempotent: syncing an unchanged document is a no-op.
    pub fn sync(&mut self) {
        let headers = scan_chunk_headers(&self.target.document_text());
        let header_rows: HashSet<usize> = headers.iter().map(|h| h.row).collect();

        // A deletion can collapse a removed chunk's anchor onto the next
        // chunk's header row. Each row is claimed by at most one retained
        // controller (the first); the rest are detached.
        let mut claimed: HashSet<usize> = HashSet::new();
        let before = self.overlays.len();
        self.overlays.retain(|overlay| {
            let row = overlay.anchored_row();
            let keep = header_rows.contains(&row) && claimed.insert(row);
            if !keep {
                overlay.detach();
            }
            keep
        });
        let removed = before - self.overlays.len();

        let mut created = 0;
        for header in &headers {
            if claimed.contains(&header.row) {
                continue;
            }
            match ChunkOverlayController::new(
                Rc::clone(&self.target),
                self.services.clone(),
                Rc::clone(&self.host),
                header.row,
                self.config.clone(),
            ) {
                Ok(overlay) => {
                    self.overlays.push(overlay);
                    created += 1;
                }
                Err(e) => log::warn!("skipping overlay at row {}: {e}", header.row),
            }
        }

        log::debug!(
            "overlay sync: {created} created, {removed} removed, {} total",
            self.overlays.len()
        );
    }

    /// Route a queue-status update to the overlay anchored at `row`
    pub fn set_chunk_state(&self, row: usize, state: ChunkState) -> Result<()> {
        match self.overlay_at(row) {
            Some(overlay) => {
                overlay.set_state(state);
                Ok(())
            }
            None => Err(OverlayError::unknown_chunk(row)),
        }
    }

    /// The overlay currently anchored at `row`, if any
    #[must_use]
    pub fn overlay_at(&self, row: usize) -> Option<&ChunkOverlayController> {
        self.overlays.iter().find(|o| o.anchored_row() == row)
    }

    /// All live overlays
    #[must_use]
    pub fn overlays(&self) -> &[ChunkOverlayController] {
        &self.overlays
    }

    /// Number of live overlays
    #[must_use]
    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    /// Whether no overlays are live
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    /// Detach every overlay; called when the document closes
    pub fn detach_all(&mut self) {
        log::debug!("detaching all {} overlays", self.overlays.len());
        for overlay in self.overlays.drain(..) {
            overlay.detach();
        }
    }
}
