//! Engine integration surface.
//!
//! The document model, cursor/selection transformation, and undo history all
//! belong to the wrapped editor engine; this crate only consumes serialized
//! snapshots and dispatches commands. Engines report lifecycle through a
//! crossbeam channel the shell drains each tick, the same way a UI thread
//! polls a backend worker.

use crossbeam_channel::Receiver;
use serde::{Deserialize, Serialize};

/// Imperative commands dispatched into the engine by toolbar/menu items.
///
/// The declarative toolbar tree stays closure-free by carrying these values;
/// behavior is resolved at dispatch time against the live engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "kebab-case")]
pub enum EngineCommand {
    ToggleBold,
    ToggleItalic,
    ToggleUnderline,
    ToggleStrike,
    ToggleCode,
    SetParagraph,
    SetHeading { level: u8 },
    ToggleBulletList,
    ToggleOrderedList,
    ToggleBlockquote,
    ToggleCodeBlock,
    InsertHorizontalRule,
    InsertTable { rows: usize, cols: usize },
    SetLink { href: String },
    Unlink,
    InsertImage { src: String },
    Undo,
    Redo,
    ClearFormatting,
}

impl EngineCommand {
    /// Stable name used for logging and command lookup tables.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ToggleBold => "toggle-bold",
            Self::ToggleItalic => "toggle-italic",
            Self::ToggleUnderline => "toggle-underline",
            Self::ToggleStrike => "toggle-strike",
            Self::ToggleCode => "toggle-code",
            Self::SetParagraph => "set-paragraph",
            Self::SetHeading { .. } => "set-heading",
            Self::ToggleBulletList => "toggle-bullet-list",
            Self::ToggleOrderedList => "toggle-ordered-list",
            Self::ToggleBlockquote => "toggle-blockquote",
            Self::ToggleCodeBlock => "toggle-code-block",
            Self::InsertHorizontalRule => "insert-horizontal-rule",
            Self::InsertTable { .. } => "insert-table",
            Self::SetLink { .. } => "set-link",
            Self::Unlink => "unlink",
            Self::InsertImage { .. } => "insert-image",
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::ClearFormatting => "clear-formatting",
        }
    }
}

/// Lifecycle events emitted by an engine and polled by the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The engine instance finished constructing.
    Created,
    /// The document changed (keystroke or command).
    Updated,
    /// The selection moved or its emptiness changed.
    SelectionChanged { has_selection: bool },
    /// A transaction was applied, whether or not the document changed.
    Transaction,
    Focused,
    Blurred,
    Destroyed,
}

/// Surface the composition layer consumes from a wrapped editor engine.
///
/// Implementations own the document; this trait only exposes serialized
/// snapshots, an editability flag, command dispatch/query, and the event
/// stream.
pub trait EditorEngine {
    /// Serialize the current document to HTML.
    fn content_html(&self) -> String;

    /// Plain-text projection of the current document.
    fn content_text(&self) -> String;

    /// Replace the document from serialized HTML. Emits `Updated`.
    fn set_content(&mut self, html: &str);

    /// Replace the document from a plain-text editing surface (host text
    /// widgets feed keystrokes through this). Emits `Updated`.
    fn replace_text(&mut self, text: &str);

    fn set_editable(&mut self, editable: bool);

    fn is_editable(&self) -> bool;

    /// Host widgets report selection emptiness here. Emits
    /// `SelectionChanged` when it actually changes.
    fn set_selection(&mut self, has_selection: bool);

    /// Host widgets report focus transitions here. Emits `Focused`/`Blurred`
    /// on change.
    fn set_focused(&mut self, focused: bool);

    /// Whether the document has no visible content.
    fn is_empty(&self) -> bool;

    /// Whether the current selection is non-empty.
    fn has_selection(&self) -> bool;

    /// Dispatch a command.
    ///
    /// # Returns
    /// `true` when the engine applied it.
    fn execute(&mut self, command: &EngineCommand) -> bool;

    /// Whether the command's formatting is active at the selection.
    fn is_active(&self, command: &EngineCommand) -> bool;

    /// Whether the command could currently be applied.
    fn can_execute(&self, command: &EngineCommand) -> bool;

    /// Event stream for this engine instance.
    ///
    /// Receivers share one queue; the shell holds exactly one and drains it
    /// each tick.
    fn events(&self) -> Receiver<EngineEvent>;
}
