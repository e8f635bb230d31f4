//! Headless composition layer for rich text editors (stats, themes,
//! autosave, toolbar/menu trees, and the shell that wires them to an engine).

/// Debounced autosave state machine.
pub mod autosave;
/// Reference engine over a plain text buffer.
pub mod buffer;
/// Editor options, defaults, and environment overrides.
pub mod config;
/// Engine trait, commands, and lifecycle events.
pub mod engine;
/// Error types (storage/engine).
pub mod error;
/// Markup-to-plain-text projection.
pub mod markup;
/// Composition root owning one engine instance.
pub mod shell;
/// Document statistics derived from plain text.
pub mod stats;
/// Pluggable persistence strategies.
pub mod storage;
/// Theme records and mode resolution.
pub mod theme;
/// Declarative toolbar and context menus.
pub mod toolbar;

pub use autosave::{AutoSaveController, SaveEvent, SaveStatus, SaveTicket};
pub use buffer::BufferEngine;
pub use config::EditorOptions;
pub use engine::{EditorEngine, EngineCommand, EngineEvent};
pub use error::EditorError;
pub use shell::{EditorShell, ShellCallbacks, ShellPhase};
pub use stats::EditorStats;
pub use storage::{CallbackStore, LocalStore, SessionStore, StorageStrategy};
pub use theme::{EditorTheme, FixedScheme, ResolvedTheme, SchemeSource, ThemeMode};
pub use toolbar::{ContextMenu, MenuVisibility, ToolbarConfig, ToolbarItem};
