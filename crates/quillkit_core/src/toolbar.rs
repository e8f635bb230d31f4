//! Declarative toolbar and context-menu composition.
//!
//! The tree is data only: labels, icons, and [`EngineCommand`] values, never
//! closures. Configurations serialize cleanly and swap engines without
//! rebuilding. Active/disabled state is a stateless projection of the live
//! engine, re-evaluated on render.

use crate::engine::{EditorEngine, EngineCommand};
use serde::{Deserialize, Serialize};

/// One leaf control in a toolbar group or context menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolbarItem {
    Button(ToolbarButton),
    Dropdown(ToolbarDropdown),
    Divider,
}

/// Command button with a short glyph and a hover label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolbarButton {
    pub label: String,
    pub icon: String,
    pub command: EngineCommand,
}

impl ToolbarButton {
    pub fn new(label: &str, icon: &str, command: EngineCommand) -> Self {
        Self {
            label: label.to_string(),
            icon: icon.to_string(),
            command,
        }
    }
}

/// Small enumerated option set; selecting an option dispatches its command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolbarDropdown {
    pub label: String,
    pub options: Vec<DropdownOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownOption {
    pub label: String,
    pub command: EngineCommand,
}

/// Items rendered together, separated from neighboring groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolbarGroup {
    pub items: Vec<ToolbarItem>,
}

/// Caller-suppliable toolbar configuration. Built once; re-evaluated, not
/// re-built, at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolbarConfig {
    pub enabled: bool,
    /// Keep the toolbar pinned while the editor scrolls.
    pub sticky: bool,
    pub groups: Vec<ToolbarGroup>,
    /// Caller extensions appended after the built-in groups, following the
    /// same item contract.
    pub custom_items: Vec<ToolbarItem>,
}

impl Default for ToolbarConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl ToolbarConfig {
    /// The default grouped command set.
    pub fn standard() -> Self {
        let block_dropdown = ToolbarDropdown {
            label: "Style".to_string(),
            options: vec![
                DropdownOption {
                    label: "Paragraph".to_string(),
                    command: EngineCommand::SetParagraph,
                },
                DropdownOption {
                    label: "Heading 1".to_string(),
                    command: EngineCommand::SetHeading { level: 1 },
                },
                DropdownOption {
                    label: "Heading 2".to_string(),
                    command: EngineCommand::SetHeading { level: 2 },
                },
                DropdownOption {
                    label: "Heading 3".to_string(),
                    command: EngineCommand::SetHeading { level: 3 },
                },
            ],
        };

        Self {
            enabled: true,
            sticky: true,
            groups: vec![
                ToolbarGroup {
                    items: vec![
                        ToolbarItem::Button(ToolbarButton::new(
                            "Bold",
                            "B",
                            EngineCommand::ToggleBold,
                        )),
                        ToolbarItem::Button(ToolbarButton::new(
                            "Italic",
                            "I",
                            EngineCommand::ToggleItalic,
                        )),
                        ToolbarItem::Button(ToolbarButton::new(
                            "Underline",
                            "U",
                            EngineCommand::ToggleUnderline,
                        )),
                        ToolbarItem::Button(ToolbarButton::new(
                            "Strikethrough",
                            "S",
                            EngineCommand::ToggleStrike,
                        )),
                        ToolbarItem::Button(ToolbarButton::new(
                            "Inline code",
                            "</>",
                            EngineCommand::ToggleCode,
                        )),
                    ],
                },
                ToolbarGroup {
                    items: vec![ToolbarItem::Dropdown(block_dropdown)],
                },
                ToolbarGroup {
                    items: vec![
                        ToolbarItem::Button(ToolbarButton::new(
                            "Bullet list",
                            "•",
                            EngineCommand::ToggleBulletList,
                        )),
                        ToolbarItem::Button(ToolbarButton::new(
                            "Ordered list",
                            "1.",
                            EngineCommand::ToggleOrderedList,
                        )),
                        ToolbarItem::Button(ToolbarButton::new(
                            "Blockquote",
                            "❝",
                            EngineCommand::ToggleBlockquote,
                        )),
                        ToolbarItem::Button(ToolbarButton::new(
                            "Code block",
                            "{}",
                            EngineCommand::ToggleCodeBlock,
                        )),
                    ],
                },
                ToolbarGroup {
                    items: vec![
                        ToolbarItem::Button(ToolbarButton::new(
                            "Horizontal rule",
                            "—",
                            EngineCommand::InsertHorizontalRule,
                        )),
                        ToolbarItem::Button(ToolbarButton::new(
                            "Table",
                            "⊞",
                            EngineCommand::InsertTable { rows: 3, cols: 3 },
                        )),
                        ToolbarItem::Button(ToolbarButton::new(
                            "Image",
                            "🖼",
                            EngineCommand::InsertImage { src: String::new() },
                        )),
                    ],
                },
                ToolbarGroup {
                    items: vec![
                        ToolbarItem::Button(ToolbarButton::new("Undo", "↩", EngineCommand::Undo)),
                        ToolbarItem::Button(ToolbarButton::new("Redo", "↪", EngineCommand::Redo)),
                    ],
                },
            ],
            custom_items: Vec::new(),
        }
    }

    /// Append a caller-supplied item after the built-in groups.
    pub fn with_custom_item(mut self, item: ToolbarItem) -> Self {
        self.custom_items.push(item);
        self
    }
}

/// Visibility predicate for context-sensitive menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuVisibility {
    /// Show only while the selection is non-empty (bubble menu default).
    SelectionNotEmpty,
    /// Show only while the document is empty (floating menu default).
    DocumentEmpty,
    /// Always show; callers computing their own predicate use this.
    Always,
}

impl MenuVisibility {
    pub fn is_visible(&self, engine: &dyn EditorEngine) -> bool {
        match self {
            Self::SelectionNotEmpty => engine.has_selection(),
            Self::DocumentEmpty => engine.is_empty(),
            Self::Always => true,
        }
    }
}

/// Context-sensitive menu sharing the toolbar item contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextMenu {
    pub visibility: MenuVisibility,
    pub items: Vec<ToolbarItem>,
}

impl ContextMenu {
    /// Selection-scoped formatting menu.
    pub fn bubble() -> Self {
        Self {
            visibility: MenuVisibility::SelectionNotEmpty,
            items: vec![
                ToolbarItem::Button(ToolbarButton::new("Bold", "B", EngineCommand::ToggleBold)),
                ToolbarItem::Button(ToolbarButton::new(
                    "Italic",
                    "I",
                    EngineCommand::ToggleItalic,
                )),
                ToolbarItem::Button(ToolbarButton::new(
                    "Strikethrough",
                    "S",
                    EngineCommand::ToggleStrike,
                )),
            ],
        }
    }

    /// Empty-document block menu.
    pub fn floating() -> Self {
        Self {
            visibility: MenuVisibility::DocumentEmpty,
            items: vec![
                ToolbarItem::Button(ToolbarButton::new(
                    "Heading 1",
                    "H1",
                    EngineCommand::SetHeading { level: 1 },
                )),
                ToolbarItem::Button(ToolbarButton::new(
                    "Heading 2",
                    "H2",
                    EngineCommand::SetHeading { level: 2 },
                )),
                ToolbarItem::Button(ToolbarButton::new(
                    "Bullet list",
                    "•",
                    EngineCommand::ToggleBulletList,
                )),
            ],
        }
    }
}
