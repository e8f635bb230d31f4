//! Composable rich-text editor toolkit.
//!
//! The headless composition layer (stats, themes, autosave, toolbar trees,
//! and the shell that wires them to a pluggable engine) lives in
//! `quillkit_core` and is re-exported here. With the `gui` feature the egui
//! rendering layer and a `run` helper for the demo app are available too.

pub use quillkit_core::{
    autosave, buffer, config, engine, markup, shell, stats, storage, theme, toolbar,
};
pub use quillkit_core::{
    AutoSaveController, BufferEngine, CallbackStore, ContextMenu, EditorEngine, EditorError,
    EditorOptions, EditorShell, EditorStats, EditorTheme, EngineCommand, EngineEvent, FixedScheme,
    LocalStore, MenuVisibility, ResolvedTheme, SaveEvent, SaveStatus, SaveTicket, SchemeSource,
    SessionStore, ShellCallbacks, ShellPhase, StorageStrategy, ThemeMode, ToolbarConfig,
    ToolbarItem,
};

#[cfg(feature = "gui")]
pub use quillkit_egui::{apply_theme, themed_visuals, RichEditorView};

#[cfg(feature = "gui")]
mod demo_app;

#[cfg(feature = "gui")]
pub use demo_app::run;
