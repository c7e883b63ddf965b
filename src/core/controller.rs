//! Batch state machine
//!
//! ```text
//! AwaitingImage -> SessionActive -> Committing -> AwaitingImage | Terminated
//! ```
//!
//! One image is on screen at a time. Committing writes every crop, then
//! moves the original, and only then drops it from the queue, so a failure
//! at any step leaves the image pending instead of silently lost.

use anyhow::{Context, Result};

use crate::domain::{DisplayBounds, Point};
use crate::lot::queue::ImageQueue;
use crate::lot::workspace::LotWorkspace;
use crate::render::image::PreviewWriter;
use crate::session::messages::{SessionEvent, SessionHandler};
use crate::session::state::DisplaySession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// Looking for the next acceptable image
    AwaitingImage,
    /// An image is loaded and accepting gestures
    SessionActive,
    /// Crops are being written for the current image
    Committing,
    /// The queue is exhausted
    Terminated,
}

/// Counters reported when the batch ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub images_archived: usize,
    pub crops_written: usize,
    pub files_skipped: usize,
}

pub struct BatchController {
    workspace: LotWorkspace,
    queue: ImageQueue,
    bounds: DisplayBounds,
    preview: Option<PreviewWriter>,
    session: Option<DisplaySession>,
    state: ControllerState,
    summary: BatchSummary,
}

impl BatchController {
    pub fn new(workspace: LotWorkspace, queue: ImageQueue, bounds: DisplayBounds) -> Self {
        Self {
            workspace,
            queue,
            bounds,
            preview: None,
            session: None,
            state: ControllerState::AwaitingImage,
            summary: BatchSummary::default(),
        }
    }

    /// Render the preview to a file after every visible change
    pub fn with_preview(mut self, preview: PreviewWriter) -> Self {
        self.preview = Some(preview);
        self
    }

    /// Load the first acceptable image
    pub fn start(&mut self) -> Result<ControllerState> {
        if self.state == ControllerState::AwaitingImage {
            self.load_next()?;
        }
        Ok(self.state)
    }

    pub fn handle(&mut self, event: SessionEvent) -> Result<ControllerState> {
        event.dispatch(self)
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn session(&self) -> Option<&DisplaySession> {
        self.session.as_ref()
    }

    pub fn summary(&self) -> BatchSummary {
        self.summary
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn workspace(&self) -> &LotWorkspace {
        &self.workspace
    }

    fn load_next(&mut self) -> Result<()> {
        self.session = None;

        loop {
            let Some(file_name) = self.queue.peek() else {
                log::info!(
                    "Queue exhausted: {} images archived, {} crops written, {} files skipped",
                    self.summary.images_archived,
                    self.summary.crops_written,
                    self.summary.files_skipped
                );
                self.state = ControllerState::Terminated;
                return Ok(());
            };

            if !ImageQueue::is_acceptable(file_name) {
                let ext = std::path::Path::new(file_name)
                    .extension()
                    .map(|e| format!(".{}", e.to_string_lossy()))
                    .unwrap_or_default();
                log::info!("Bypassing {file_name}; {ext:?} is not an accepted file type");
                self.queue.drop_head();
                self.summary.files_skipped += 1;
                continue;
            }

            let file_name = file_name.to_string();
            log::info!(
                "Processing {}",
                self.workspace.source_dir.join(&file_name).display()
            );
            let session = DisplaySession::open(
                &self.workspace.source_dir,
                &file_name,
                self.bounds,
                self.preview.is_some(),
            )?;

            self.session = Some(session);
            self.state = ControllerState::SessionActive;
            self.refresh_preview();
            return Ok(());
        }
    }

    fn commit(&mut self) -> Result<()> {
        if self.session.is_none() {
            return Ok(());
        }
        self.state = ControllerState::Committing;

        if let Err(err) = self.write_outputs() {
            self.state = ControllerState::SessionActive;
            return Err(err);
        }

        self.queue.drop_head();
        if let Some(session) = self.session.as_mut() {
            session.tracker.commit();
            session.active = None;
        }

        self.state = ControllerState::AwaitingImage;
        self.load_next()
    }

    /// Export every region, then archive the original
    fn write_outputs(&mut self) -> Result<()> {
        let Some(session) = self.session.as_ref() else {
            return Ok(());
        };

        // A clash here means the crops of an earlier run share our names
        self.workspace.archive_target(session.path())?;

        // Export from a snapshot; the tracker is only drained once every
        // crop is on disk.
        let rects = session.tracker.rects();
        for (index, rect) in rects.iter().enumerate() {
            self.workspace
                .export_crop(session.path(), index + 1, *rect, session.scale())
                .with_context(|| {
                    format!(
                        "Failed to export region {} of {}",
                        index + 1,
                        session.file_name
                    )
                })?;
            self.summary.crops_written += 1;
        }

        if rects.is_empty() {
            log::info!(
                "No regions marked on {}, archiving without crops",
                session.file_name
            );
        }
        self.workspace.archive_original(session.path())?;
        self.summary.images_archived += 1;
        Ok(())
    }

    fn refresh_preview(&self) {
        let (Some(preview), Some(session)) = (&self.preview, &self.session) else {
            return;
        };
        if let Err(err) = preview.write(session) {
            log::warn!("Preview not updated: {:?}", err);
        }
    }
}

impl SessionHandler for BatchController {
    type Output = ControllerState;
    type Error = anyhow::Error;

    fn on_pointer_down(&mut self, point: Point) -> Result<ControllerState> {
        let Some(session) = self.session.as_mut() else {
            return Ok(self.state);
        };

        if let Some(control) = session.controls.hit(point) {
            log::debug!("{:?} control pressed at {:?}", control, point);
            return self.handle(control.into());
        }

        let handle = session.tracker.begin(point);
        session.active = Some(handle);
        log::trace!("Region {:?} anchored at {:?}", handle, point);
        Ok(self.state)
    }

    fn on_pointer_drag(&mut self, point: Point) -> Result<ControllerState> {
        let Some(session) = self.session.as_mut() else {
            return Ok(self.state);
        };
        let Some(handle) = session.active else {
            return Ok(self.state);
        };

        if let Some(rect) = session.tracker.update_region(handle, point) {
            log::trace!("Region {:?} now {:?}", handle, rect);
        }
        Ok(self.state)
    }

    fn on_pointer_up(&mut self, point: Point) -> Result<ControllerState> {
        let Some(session) = self.session.as_mut() else {
            return Ok(self.state);
        };
        let Some(handle) = session.active.take() else {
            return Ok(self.state);
        };

        session.tracker.update_region(handle, point);
        let finished = session
            .tracker
            .get(handle)
            .map(|region| (region.is_untouched(), region.rect));
        match finished {
            // A press and release without movement marks nothing
            Some((true, _)) => {
                session.tracker.remove(handle);
                log::debug!("Click at {:?} discarded", point);
            }
            Some((false, r)) => {
                log::info!(
                    "Region located at: {}, {}, {}, {}",
                    r.left,
                    r.top,
                    r.right,
                    r.bottom
                );
            }
            None => {}
        }
        self.refresh_preview();
        Ok(self.state)
    }

    fn on_advance(&mut self) -> Result<ControllerState> {
        if self.state == ControllerState::SessionActive {
            self.commit()?;
        }
        Ok(self.state)
    }

    fn on_undo(&mut self) -> Result<ControllerState> {
        let Some(session) = self.session.as_mut() else {
            return Ok(self.state);
        };

        match session.tracker.undo_last() {
            Some(region) => {
                if session.active == Some(region.handle) {
                    session.active = None;
                }
                log::info!("Removed region at {:?}", region.rect);
            }
            None => log::debug!("Nothing to undo"),
        }
        self.refresh_preview();
        Ok(self.state)
    }
}
