//! Rich editor shell: engine lifecycle, stats/autosave wiring, and theme.
//!
//! The shell owns the engine instance and drains its event channel each tick
//! (hosts call [`EditorShell::tick`] once per frame). Stats recompute
//! synchronously per update event, in delivery order; the autosave controller
//! observes the same events independently. Teardown detaches every callback
//! and drops the engine, so nothing fires after unmount even when a
//! previously-dispatched save acknowledges later.

use crate::autosave::{AutoSaveController, SaveEvent, SaveStatus};
use crate::config::EditorOptions;
use crate::engine::{EditorEngine, EngineEvent};
use crate::error::EditorError;
use crate::stats::EditorStats;
use crate::storage::StorageStrategy;
use crate::theme::{self, ResolvedTheme, SchemeSource, ThemeMode};
use chrono::{DateTime, Utc};
use crossbeam_channel::Receiver;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// Rendered phase of the shell. `Initializing` and `Failed` are distinct
/// non-content states; neither renders toolbar, menus, or status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellPhase {
    Initializing,
    Ready,
    Failed(String),
}

/// Lifecycle callback set: the engine's callbacks plus the two derived ones
/// (`on_change` per update, `on_save` per completed save).
#[derive(Default)]
pub struct ShellCallbacks {
    pub on_create: Option<Box<dyn FnMut()>>,
    pub on_update: Option<Box<dyn FnMut(&str)>>,
    pub on_selection_update: Option<Box<dyn FnMut(bool)>>,
    pub on_transaction: Option<Box<dyn FnMut()>>,
    pub on_focus: Option<Box<dyn FnMut()>>,
    pub on_blur: Option<Box<dyn FnMut()>>,
    pub on_destroy: Option<Box<dyn FnMut()>>,
    pub on_change: Option<Box<dyn FnMut(&str)>>,
    pub on_save: Option<Box<dyn FnMut(&str)>>,
}

/// Composition root around one wrapped engine instance.
pub struct EditorShell<E: EditorEngine> {
    phase: ShellPhase,
    engine: Option<E>,
    events: Option<Receiver<EngineEvent>>,
    options: EditorOptions,
    stats: EditorStats,
    scheme: Box<dyn SchemeSource>,
    theme: ResolvedTheme,
    autosave: AutoSaveController,
    callbacks: ShellCallbacks,
    alive: bool,
}

impl<E: EditorEngine> EditorShell<E> {
    /// Build a shell in the `Initializing` phase.
    ///
    /// `strategy` backs both autosave persistence and the optional theme-mode
    /// persistence; `scheme` answers `Auto` theme resolution.
    pub fn new(
        options: EditorOptions,
        strategy: Box<dyn StorageStrategy>,
        scheme: Box<dyn SchemeSource>,
    ) -> Self {
        let theme = theme::resolve(options.theme_mode, scheme.as_ref());
        let autosave = AutoSaveController::new(
            strategy,
            options.autosave_key.clone(),
            options.autosave_delay,
            options.autosave_enabled,
        );
        Self {
            phase: ShellPhase::Initializing,
            engine: None,
            events: None,
            options,
            stats: EditorStats::default(),
            scheme,
            theme,
            autosave,
            callbacks: ShellCallbacks::default(),
            alive: true,
        }
    }

    /// Attach the engine creation result, moving to `Ready` or `Failed`.
    ///
    /// On success the initial content is loaded (identity-guarded), the
    /// editability flags are applied, stats are computed for the mount, and
    /// `on_create` fires. Mount-time loading does not arm the autosave
    /// debounce.
    pub fn initialize(&mut self, engine: Result<E, EditorError>) {
        match engine {
            Ok(mut engine) => {
                engine.set_editable(self.options.effective_editable());
                if !self.options.initial_content.is_empty()
                    && engine.content_html() != self.options.initial_content
                {
                    let initial = self.options.initial_content.clone();
                    engine.set_content(&initial);
                }
                self.stats = EditorStats::from_text(&engine.content_text());
                let events = engine.events();
                // Creation and initial-load events are not user edits.
                while events.try_recv().is_ok() {}
                self.events = Some(events);
                self.engine = Some(engine);
                self.phase = ShellPhase::Ready;
                info!("Editor shell ready");
                if let Some(on_create) = self.callbacks.on_create.as_mut() {
                    on_create();
                }
            }
            Err(err) => {
                error!("Engine initialization failed: {}", err);
                self.phase = ShellPhase::Failed(err.to_string());
            }
        }
    }

    pub fn phase(&self) -> &ShellPhase {
        &self.phase
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.phase, ShellPhase::Ready)
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn stats(&self) -> EditorStats {
        self.stats
    }

    pub fn theme(&self) -> &ResolvedTheme {
        &self.theme
    }

    pub fn save_status(&self) -> SaveStatus {
        self.autosave.status()
    }

    pub fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        self.autosave.last_saved_at()
    }

    pub fn last_save_error(&self) -> Option<&str> {
        self.autosave.last_error()
    }

    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    /// Mutable engine access for host widgets feeding text edits through.
    pub fn engine_mut(&mut self) -> Option<&mut E> {
        self.engine.as_mut()
    }

    pub fn callbacks_mut(&mut self) -> &mut ShellCallbacks {
        &mut self.callbacks
    }

    /// Drain engine events and fire callbacks in delivery order.
    ///
    /// Stats recompute synchronously per update event before the next event
    /// is processed, so displayed counts are never out of order.
    pub fn pump(&mut self) {
        if !self.alive {
            return;
        }
        let mut queued = Vec::new();
        if let Some(events) = &self.events {
            while let Ok(event) = events.try_recv() {
                queued.push(event);
            }
        }
        for event in queued {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Updated => {
                let Some(engine) = &self.engine else {
                    return;
                };
                let html = engine.content_html();
                self.stats = EditorStats::from_text(&engine.content_text());
                self.autosave.note_change();
                if let Some(on_update) = self.callbacks.on_update.as_mut() {
                    on_update(&html);
                }
                if let Some(on_change) = self.callbacks.on_change.as_mut() {
                    on_change(&html);
                }
            }
            EngineEvent::SelectionChanged { has_selection } => {
                if let Some(on_selection) = self.callbacks.on_selection_update.as_mut() {
                    on_selection(has_selection);
                }
            }
            EngineEvent::Transaction => {
                if let Some(on_transaction) = self.callbacks.on_transaction.as_mut() {
                    on_transaction();
                }
            }
            EngineEvent::Created => {
                if let Some(on_create) = self.callbacks.on_create.as_mut() {
                    on_create();
                }
            }
            EngineEvent::Focused => {
                if let Some(on_focus) = self.callbacks.on_focus.as_mut() {
                    on_focus();
                }
            }
            EngineEvent::Blurred => {
                if let Some(on_blur) = self.callbacks.on_blur.as_mut() {
                    on_blur();
                }
            }
            EngineEvent::Destroyed => {
                if let Some(on_destroy) = self.callbacks.on_destroy.as_mut() {
                    on_destroy();
                }
            }
        }
    }

    /// Per-frame driver: pump events, then fire a due autosave.
    ///
    /// # Returns
    /// The save outcome when the debounce window closed this tick.
    pub fn tick(&mut self) -> Option<SaveEvent> {
        self.pump();
        if !self.alive {
            return None;
        }
        let html = self.engine.as_ref()?.content_html();
        let event = self.autosave.tick(&html)?;
        self.report_save(&event);
        Some(event)
    }

    /// Manual save: bypasses the debounce and works with autosave disabled.
    pub fn save_now(&mut self) -> Option<SaveEvent> {
        if !self.alive {
            return None;
        }
        let html = self.engine.as_ref()?.content_html();
        let event = self.autosave.save_now(&html);
        self.report_save(&event);
        Some(event)
    }

    fn report_save(&mut self, event: &SaveEvent) {
        if let SaveEvent::Saved { content } = event {
            if let Some(on_save) = self.callbacks.on_save.as_mut() {
                on_save(content);
            }
        }
    }

    /// Controlled-content sync: update the engine only when `html` differs
    /// from its current serialization, so in-progress edits are not fought.
    pub fn set_content(&mut self, html: &str) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        if engine.content_html() == html {
            return;
        }
        engine.set_content(html);
    }

    /// Read back the last persisted content for this shell's key.
    ///
    /// # Errors
    /// Propagates storage failures; no prior save is `Ok(None)`.
    pub fn restore_content(&self) -> Result<Option<String>, EditorError> {
        self.autosave.restore()
    }

    /// Remove persisted content and reset save bookkeeping.
    ///
    /// # Errors
    /// Propagates storage failures.
    pub fn clear_saved_content(&mut self) -> Result<(), EditorError> {
        self.autosave.clear()
    }

    pub fn set_autosave_enabled(&mut self, enabled: bool) {
        self.options.autosave_enabled = enabled;
        self.autosave.set_enabled(enabled);
    }

    pub fn set_editable(&mut self, editable: bool) {
        self.options.editable = editable;
        self.apply_editability();
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.options.disabled = disabled;
        self.apply_editability();
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.options.read_only = read_only;
        self.apply_editability();
    }

    fn apply_editability(&mut self) {
        let effective = self.options.effective_editable();
        if let Some(engine) = self.engine.as_mut() {
            engine.set_editable(effective);
        }
    }

    /// Switch the theme mode, re-resolve, and persist explicit choices.
    pub fn set_theme_mode(&mut self, mode: ThemeMode) {
        self.options.theme_mode = mode;
        self.refresh_theme();
        if let Err(err) = theme::persist_mode(self.autosave.strategy(), mode) {
            warn!("Failed to persist theme mode: {}", err);
        }
    }

    /// Apply a previously persisted explicit mode, if one exists.
    ///
    /// # Returns
    /// `true` when a stored mode was found and applied.
    pub fn restore_theme_mode(&mut self) -> bool {
        let Some(mode) = theme::load_persisted_mode(self.autosave.strategy()) else {
            return false;
        };
        self.options.theme_mode = mode;
        self.refresh_theme();
        true
    }

    /// Re-resolve the theme; call when the host scheme preference changes
    /// while mode is `Auto`.
    pub fn refresh_theme(&mut self) {
        self.theme = theme::resolve(self.options.theme_mode, self.scheme.as_ref());
    }

    pub fn set_scheme_source(&mut self, scheme: Box<dyn SchemeSource>) {
        self.scheme = scheme;
        self.refresh_theme();
    }

    /// Best-effort drain of a dirty buffer before teardown, bounded by
    /// `limit`. Older acknowledgements can leave the controller armed again
    /// when newer edits exist, hence the loop.
    pub fn flush_pending_save(&mut self, limit: Duration) {
        let deadline = Instant::now() + limit;
        loop {
            self.pump();
            match self.save_status() {
                SaveStatus::Pending | SaveStatus::Saving => {
                    if self.save_now().is_none() {
                        break;
                    }
                }
                _ => break,
            }
            if Instant::now() >= deadline {
                warn!("Shutdown flush deadline reached with unsaved content");
                break;
            }
        }
    }

    /// Tear down: fire `on_destroy`, detach every callback, and drop the
    /// engine and its event subscription. Idempotent; after this no callback
    /// can fire and any still-pending debounce is inert.
    pub fn teardown(&mut self) {
        if !self.alive {
            return;
        }
        self.alive = false;
        if let Some(on_destroy) = self.callbacks.on_destroy.as_mut() {
            on_destroy();
        }
        self.callbacks = ShellCallbacks::default();
        self.events = None;
        self.engine = None;
    }
}

impl<E: EditorEngine> Drop for EditorShell<E> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::BufferEngine;
    use crate::storage::{CallbackStore, SessionStore};
    use crate::theme::FixedScheme;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn immediate_options() -> EditorOptions {
        EditorOptions {
            autosave_delay: Duration::ZERO,
            ..EditorOptions::default()
        }
    }

    fn ready_shell(options: EditorOptions) -> EditorShell<BufferEngine> {
        let initial = options.initial_content.clone();
        let mut shell = EditorShell::new(
            options,
            Box::new(SessionStore::default()),
            Box::new(FixedScheme(false)),
        );
        shell.initialize(Ok(BufferEngine::new(&initial)));
        shell
    }

    fn recording_strategy() -> (Box<CallbackStore>, Arc<Mutex<Vec<String>>>) {
        let writes: Arc<Mutex<Vec<String>>> = Arc::default();
        let writes_in = Arc::clone(&writes);
        let strategy = CallbackStore::new(
            move |_key, content| {
                writes_in.lock().unwrap().push(content.to_string());
                Ok(())
            },
            |_key| Ok(None),
            |_key| Ok(()),
        );
        (Box::new(strategy), writes)
    }

    #[test]
    fn failed_initialization_is_a_distinct_phase() {
        let mut shell: EditorShell<BufferEngine> = EditorShell::new(
            EditorOptions::default(),
            Box::new(SessionStore::default()),
            Box::new(FixedScheme(false)),
        );
        assert_eq!(*shell.phase(), ShellPhase::Initializing);

        shell.initialize(Err(EditorError::EngineInit("no engine".to_string())));
        assert!(matches!(shell.phase(), ShellPhase::Failed(reason) if reason.contains("no engine")));
        assert!(shell.engine().is_none());
        assert_eq!(shell.save_now(), None, "no engine, no save");
    }

    #[test]
    fn mount_computes_stats_without_arming_autosave() {
        let shell = ready_shell(EditorOptions {
            initial_content: "<p>Hello world. Bye!</p>".to_string(),
            ..immediate_options()
        });
        assert_eq!(shell.stats().words, 3);
        assert_eq!(shell.stats().sentences, 2);
        assert_eq!(shell.save_status(), SaveStatus::Idle);
    }

    #[test]
    fn update_events_drive_stats_change_callback_and_autosave() {
        let (strategy, writes) = recording_strategy();
        let mut shell = EditorShell::new(
            immediate_options(),
            strategy,
            Box::new(FixedScheme(false)),
        );
        shell.initialize(Ok(BufferEngine::new("")));

        let changes: Arc<Mutex<Vec<String>>> = Arc::default();
        let changes_in = Arc::clone(&changes);
        shell.callbacks_mut().on_change =
            Some(Box::new(move |html: &str| {
                changes_in.lock().unwrap().push(html.to_string())
            }));

        shell.engine_mut().unwrap().insert_text("Typed text");
        let outcome = shell.tick();
        assert!(matches!(outcome, Some(SaveEvent::Saved { .. })));
        assert_eq!(shell.stats().words, 2);
        assert_eq!(changes.lock().unwrap().as_slice(), &["<p>Typed text</p>"]);
        assert_eq!(writes.lock().unwrap().as_slice(), &["<p>Typed text</p>"]);
        assert_eq!(shell.save_status(), SaveStatus::Saved);
    }

    #[test]
    fn controlled_content_sync_mutates_engine_exactly_once() {
        let mut shell = ready_shell(EditorOptions {
            initial_content: "<p>original</p>".to_string(),
            ..EditorOptions::default()
        });
        assert_eq!(shell.engine().unwrap().revision(), 0);

        shell.set_content("<p>replaced</p>");
        assert_eq!(shell.engine().unwrap().revision(), 1);

        // Same serialization again: no engine mutation call.
        let current = shell.engine().unwrap().content_html();
        shell.set_content(&current);
        assert_eq!(shell.engine().unwrap().revision(), 1);
    }

    #[test]
    fn manual_save_works_with_autosave_disabled() {
        let (strategy, writes) = recording_strategy();
        let mut shell = EditorShell::new(
            EditorOptions {
                autosave_enabled: false,
                ..immediate_options()
            },
            strategy,
            Box::new(FixedScheme(false)),
        );
        shell.initialize(Ok(BufferEngine::new("")));

        shell.engine_mut().unwrap().insert_text("manual");
        assert_eq!(shell.tick(), None, "autosave disabled");
        assert!(matches!(shell.save_now(), Some(SaveEvent::Saved { .. })));
        assert_eq!(writes.lock().unwrap().len(), 1);
    }

    #[test]
    fn teardown_cancels_pending_saves_and_callbacks() {
        let (strategy, writes) = recording_strategy();
        let mut shell = EditorShell::new(
            immediate_options(),
            strategy,
            Box::new(FixedScheme(false)),
        );
        shell.initialize(Ok(BufferEngine::new("")));

        let saved: Arc<Mutex<Vec<String>>> = Arc::default();
        let saved_in = Arc::clone(&saved);
        shell.callbacks_mut().on_save = Some(Box::new(move |content: &str| {
            saved_in.lock().unwrap().push(content.to_string())
        }));
        let destroyed = Arc::new(Mutex::new(0usize));
        let destroyed_in = Arc::clone(&destroyed);
        shell.callbacks_mut().on_destroy =
            Some(Box::new(move || *destroyed_in.lock().unwrap() += 1));

        shell.engine_mut().unwrap().insert_text("unsaved");
        shell.pump();
        assert_eq!(shell.save_status(), SaveStatus::Pending);

        shell.teardown();
        assert_eq!(*destroyed.lock().unwrap(), 1);

        // Debounce window has long elapsed; nothing may fire after teardown.
        assert_eq!(shell.tick(), None);
        assert_eq!(shell.save_now(), None);
        assert!(writes.lock().unwrap().is_empty());
        assert!(saved.lock().unwrap().is_empty());

        shell.teardown();
        assert_eq!(*destroyed.lock().unwrap(), 1, "teardown is idempotent");
    }

    #[test]
    fn editability_flags_combine_with_and_semantics() {
        let mut shell = ready_shell(EditorOptions::default());
        assert!(shell.engine().unwrap().is_editable());

        shell.set_read_only(true);
        assert!(!shell.engine().unwrap().is_editable());
        shell.set_read_only(false);
        assert!(shell.engine().unwrap().is_editable());

        shell.set_disabled(true);
        assert!(!shell.engine().unwrap().is_editable());
        shell.set_disabled(false);
        shell.set_editable(false);
        assert!(!shell.engine().unwrap().is_editable());
    }

    #[test]
    fn theme_mode_persists_across_shell_instances() {
        let store = Arc::new(SessionStore::default());
        let store_a = Arc::clone(&store);
        let store_b = Arc::clone(&store);
        let store_c = Arc::clone(&store);
        let strategy = || {
            let save = Arc::clone(&store_a);
            let restore = Arc::clone(&store_b);
            let clear = Arc::clone(&store_c);
            CallbackStore::new(
                move |key, content| save.save(key, content),
                move |key| restore.restore(key),
                move |key| clear.clear(key),
            )
        };

        let mut first = EditorShell::new(
            EditorOptions::default(),
            Box::new(strategy()),
            Box::new(FixedScheme(false)),
        );
        first.initialize(Ok(BufferEngine::new("")));
        first.set_theme_mode(ThemeMode::Dark);
        assert_eq!(first.theme().theme.name, "dark");
        drop(first);

        let mut second: EditorShell<BufferEngine> = EditorShell::new(
            EditorOptions::default(),
            Box::new(strategy()),
            Box::new(FixedScheme(false)),
        );
        assert_eq!(second.theme().theme.name, "light");
        assert!(second.restore_theme_mode());
        assert_eq!(second.theme().theme.name, "dark");
    }

    #[test]
    fn auto_theme_reresolves_when_scheme_source_changes() {
        let mut shell = ready_shell(EditorOptions {
            theme_mode: ThemeMode::Auto,
            ..EditorOptions::default()
        });
        assert_eq!(shell.theme().theme.name, "light");
        shell.set_scheme_source(Box::new(FixedScheme(true)));
        assert_eq!(shell.theme().theme.name, "dark");
    }

    #[test]
    fn flush_pending_save_drains_dirty_buffer() {
        let (strategy, writes) = recording_strategy();
        let mut shell = EditorShell::new(
            EditorOptions {
                // A long delay: flush must not wait for the debounce.
                autosave_delay: Duration::from_secs(60),
                ..EditorOptions::default()
            },
            strategy,
            Box::new(FixedScheme(false)),
        );
        shell.initialize(Ok(BufferEngine::new("")));

        shell.engine_mut().unwrap().insert_text("almost lost");
        shell.flush_pending_save(Duration::from_secs(1));
        assert_eq!(writes.lock().unwrap().len(), 1);
        assert_eq!(shell.save_status(), SaveStatus::Saved);
    }
}
