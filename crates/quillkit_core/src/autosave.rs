//! Debounced autosave controller.
//!
//! State machine: `Idle -> (change) -> Pending -> (debounce elapses) ->
//! Saving -> Saved | Error`. A change while `Pending` resets the debounce
//! window (last-write-wins); a change while `Saving` is recorded and re-arms
//! a new cycle once the in-flight save acknowledges. The controller never
//! retries a failed save on its own; the next change restarts the cycle.
//!
//! Saves are split-phase: [`AutoSaveController::begin_save`] hands out a
//! ticket that a host (or worker) completes via
//! [`AutoSaveController::complete_save`]. The inline [`AutoSaveController::tick`]
//! and [`AutoSaveController::save_now`] paths run the configured strategy
//! directly. Completions carrying a stale ticket are ignored, so a save that
//! resolves after teardown of the owning shell cannot corrupt state.

use crate::error::EditorError;
use crate::storage::StorageStrategy;
use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Lifecycle state of the controller, surfaced in the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    /// No unsaved changes and nothing was ever saved this mount.
    Idle,
    /// Changes recorded; the debounce window is open.
    Pending,
    /// A save is in flight.
    Saving,
    /// The latest save completed and content is unchanged since.
    Saved,
    /// The latest save failed; the next change restarts the cycle.
    Error,
}

impl SaveStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Pending => "Unsaved",
            Self::Saving => "Saving...",
            Self::Saved => "Saved",
            Self::Error => "Save failed",
        }
    }
}

/// Outcome of one dispatched save attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveEvent {
    /// The strategy accepted the write.
    Saved { content: String },
    /// Content was byte-identical to the last successful save; no write.
    Skipped,
    /// The strategy rejected the write; non-fatal and retryable.
    Failed { message: String },
}

/// In-flight save handle produced by [`AutoSaveController::begin_save`].
#[derive(Debug)]
pub struct SaveTicket {
    revision: u64,
    content: String,
}

impl SaveTicket {
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Debounced, strategy-backed save controller for one editor mount.
pub struct AutoSaveController {
    strategy: Box<dyn StorageStrategy>,
    key: String,
    delay: Duration,
    enabled: bool,
    status: SaveStatus,
    revision: u64,
    last_edit_at: Option<Instant>,
    in_flight: Option<u64>,
    last_saved_content: Option<String>,
    last_saved_at: Option<DateTime<Utc>>,
    last_error: Option<String>,
}

impl AutoSaveController {
    pub fn new(
        strategy: Box<dyn StorageStrategy>,
        key: impl Into<String>,
        delay: Duration,
        enabled: bool,
    ) -> Self {
        Self {
            strategy,
            key: key.into(),
            delay,
            enabled,
            status: SaveStatus::Idle,
            revision: 0,
            last_edit_at: None,
            in_flight: None,
            last_saved_content: None,
            last_saved_at: None,
            last_error: None,
        }
    }

    pub fn status(&self) -> SaveStatus {
        self.status
    }

    pub fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        self.last_saved_at
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The backing strategy, shared with adjacent persistence (theme mode).
    pub fn strategy(&self) -> &dyn StorageStrategy {
        self.strategy.as_ref()
    }

    /// Record a document change and reset the debounce window.
    ///
    /// A change during an in-flight save does not cancel it; the stale
    /// acknowledgement re-arms `Pending` instead.
    pub fn note_change(&mut self) {
        self.revision = self.revision.wrapping_add(1);
        self.last_edit_at = Some(Instant::now());
        if self.in_flight.is_none() {
            self.status = SaveStatus::Pending;
        }
    }

    /// Whether the debounce window has elapsed and a save should fire.
    pub fn due(&self) -> bool {
        if !self.enabled || self.in_flight.is_some() || self.status != SaveStatus::Pending {
            return false;
        }
        match self.last_edit_at {
            Some(last_edit) => last_edit.elapsed() >= self.delay,
            None => false,
        }
    }

    /// Start a save for `content`, skipping redundant writes.
    ///
    /// # Returns
    /// `None` when a save is already in flight or the content is
    /// byte-identical to the last successful save (the skip leaves the
    /// controller in `Saved`/`Idle`).
    pub fn begin_save(&mut self, content: &str) -> Option<SaveTicket> {
        if self.in_flight.is_some() {
            return None;
        }
        if self.last_saved_content.as_deref() == Some(content) {
            self.status = if self.last_saved_at.is_some() {
                SaveStatus::Saved
            } else {
                SaveStatus::Idle
            };
            self.last_edit_at = None;
            return None;
        }
        self.in_flight = Some(self.revision);
        self.status = SaveStatus::Saving;
        Some(SaveTicket {
            revision: self.revision,
            content: content.to_string(),
        })
    }

    /// Acknowledge a dispatched save.
    ///
    /// Stale tickets (superseded or post-teardown completions) return `None`
    /// and leave state untouched.
    pub fn complete_save(
        &mut self,
        ticket: SaveTicket,
        result: Result<(), EditorError>,
    ) -> Option<SaveEvent> {
        if self.in_flight != Some(ticket.revision) {
            debug!("Ignoring stale save acknowledgement");
            return None;
        }
        self.in_flight = None;
        match result {
            Ok(()) => {
                debug!(key = %self.key, bytes = ticket.content.len(), "Save acknowledged");
                self.last_saved_at = Some(Utc::now());
                self.last_error = None;
                if self.revision > ticket.revision {
                    // Newer local edits arrived while the save was in flight:
                    // keep the controller armed for another cycle.
                    self.status = SaveStatus::Pending;
                    if self.last_edit_at.is_none() {
                        self.last_edit_at = Some(Instant::now());
                    }
                } else {
                    self.status = SaveStatus::Saved;
                    self.last_edit_at = None;
                }
                let SaveTicket { content, .. } = ticket;
                self.last_saved_content = Some(content.clone());
                Some(SaveEvent::Saved { content })
            }
            Err(err) => {
                let message = err.to_string();
                warn!("Autosave failed: {}", message);
                self.last_error = Some(message.clone());
                if self.revision > ticket.revision {
                    // Edits recorded while the failed save was in flight still
                    // owe a save of their own; keep the controller armed.
                    self.status = SaveStatus::Pending;
                    if self.last_edit_at.is_none() {
                        self.last_edit_at = Some(Instant::now());
                    }
                } else {
                    self.status = SaveStatus::Error;
                }
                Some(SaveEvent::Failed { message })
            }
        }
    }

    /// Fire a due save through the configured strategy.
    ///
    /// # Returns
    /// `None` while the debounce window is still open; otherwise the outcome
    /// of the dispatched (or skipped) save.
    pub fn tick(&mut self, content: &str) -> Option<SaveEvent> {
        if !self.due() {
            return None;
        }
        Some(self.dispatch(content))
    }

    /// Save immediately, bypassing the debounce and the enabled flag.
    ///
    /// Identical content is still skipped, so manual saves never produce
    /// redundant writes.
    pub fn save_now(&mut self, content: &str) -> SaveEvent {
        self.dispatch(content)
    }

    fn dispatch(&mut self, content: &str) -> SaveEvent {
        let Some(ticket) = self.begin_save(content) else {
            return SaveEvent::Skipped;
        };
        let result = self.strategy.save(&self.key, ticket.content());
        self.complete_save(ticket, result)
            .unwrap_or(SaveEvent::Skipped)
    }

    /// Read back the last persisted content for this controller's key.
    ///
    /// # Errors
    /// Propagates storage failures; a missing value is `Ok(None)`.
    pub fn restore(&self) -> Result<Option<String>, EditorError> {
        self.strategy.restore(&self.key)
    }

    /// Remove persisted content and reset last-saved bookkeeping.
    ///
    /// # Errors
    /// Propagates storage failures.
    pub fn clear(&mut self) -> Result<(), EditorError> {
        self.strategy.clear(&self.key)?;
        self.last_saved_content = None;
        self.last_saved_at = None;
        self.last_error = None;
        self.status = SaveStatus::Idle;
        self.last_edit_at = None;
        Ok(())
    }

    #[cfg(test)]
    fn backdate_last_edit(&mut self, by: Duration) {
        if let Some(at) = self.last_edit_at.as_mut() {
            *at = at.checked_sub(by).expect("backdated instant");
        }
    }
}
