//! egui rendering layer for quillkit shells.

/// Context-sensitive menu rendering.
pub mod menus;
/// Status bar panel.
pub mod status_bar;
/// Theme-to-visuals projection.
pub mod style;
/// Toolbar rendering and command dispatch.
pub mod toolbar;
/// The editor widget tying the panels together.
pub mod widget;

pub use style::{apply_theme, themed_visuals};
pub use widget::RichEditorView;
