//! Reference engine over a plain text buffer.
//!
//! `BufferEngine` is the stand-in engine used by tests and the demo: a plain
//! buffer plus a set of active marks and a current block kind. It is not a
//! document model (inline marks apply at the "cursor" only and serialization
//! wraps blank-line paragraphs in `<p>` tags), but it honors the full
//! [`EditorEngine`] contract, including revision-aware identity checks and
//! the event stream.

use crate::engine::{EditorEngine, EngineCommand, EngineEvent};
use crate::markup;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Paragraph,
    Heading(u8),
    BulletList,
    OrderedList,
    Blockquote,
    CodeBlock,
}

/// In-memory engine implementation backing tests and the demo binary.
pub struct BufferEngine {
    text: String,
    marks: BTreeSet<&'static str>,
    block: Block,
    editable: bool,
    selection: bool,
    focused: bool,
    revision: u64,
    tx: Sender<EngineEvent>,
    rx: Receiver<EngineEvent>,
}

impl BufferEngine {
    /// Construct from serialized HTML and emit `Created`.
    pub fn new(initial_html: &str) -> Self {
        let (tx, rx) = unbounded();
        let engine = Self {
            text: markup::plain_text(initial_html),
            marks: BTreeSet::new(),
            block: Block::Paragraph,
            editable: true,
            selection: false,
            focused: false,
            revision: 0,
            tx,
            rx,
        };
        let _ = engine.tx.send(EngineEvent::Created);
        engine
    }

    /// Monotonic revision bumped on every document mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Append text at the end of the document, as a typed edit would.
    pub fn insert_text(&mut self, text: &str) {
        if !self.editable || text.is_empty() {
            return;
        }
        self.text.push_str(text);
        self.touch();
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
        let _ = self.tx.send(EngineEvent::Updated);
        let _ = self.tx.send(EngineEvent::Transaction);
    }

    fn mark_name(command: &EngineCommand) -> Option<&'static str> {
        match command {
            EngineCommand::ToggleBold => Some("bold"),
            EngineCommand::ToggleItalic => Some("italic"),
            EngineCommand::ToggleUnderline => Some("underline"),
            EngineCommand::ToggleStrike => Some("strike"),
            EngineCommand::ToggleCode => Some("code"),
            _ => None,
        }
    }
}

impl EditorEngine for BufferEngine {
    fn content_html(&self) -> String {
        let mut out = String::with_capacity(self.text.len() + 16);
        let mut paragraphs = self
            .text
            .split("\n\n")
            .filter(|segment| !segment.trim().is_empty())
            .peekable();
        if paragraphs.peek().is_none() {
            return "<p></p>".to_string();
        }
        for (index, segment) in paragraphs.enumerate() {
            let escaped = segment
                .replace('&', "&amp;")
                .replace('<', "&lt;")
                .replace('>', "&gt;")
                .replace('\n', "<br>");
            match (index, self.block) {
                (0, Block::Heading(level)) => {
                    let level = level.clamp(1, 6);
                    out.push_str(&format!("<h{level}>{escaped}</h{level}>"));
                }
                _ => out.push_str(&format!("<p>{escaped}</p>")),
            }
        }
        out
    }

    fn content_text(&self) -> String {
        self.text.clone()
    }

    fn set_content(&mut self, html: &str) {
        let text = markup::plain_text(html);
        if text == self.text {
            return;
        }
        self.text = text;
        self.touch();
    }

    fn replace_text(&mut self, text: &str) {
        if text == self.text {
            return;
        }
        self.text = text.to_string();
        self.touch();
    }

    fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    fn is_editable(&self) -> bool {
        self.editable
    }

    fn set_selection(&mut self, has_selection: bool) {
        if self.selection == has_selection {
            return;
        }
        self.selection = has_selection;
        let _ = self.tx.send(EngineEvent::SelectionChanged { has_selection });
    }

    fn set_focused(&mut self, focused: bool) {
        if self.focused == focused {
            return;
        }
        self.focused = focused;
        let _ = self.tx.send(if focused {
            EngineEvent::Focused
        } else {
            EngineEvent::Blurred
        });
    }

    fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    fn has_selection(&self) -> bool {
        self.selection
    }

    fn execute(&mut self, command: &EngineCommand) -> bool {
        if !self.can_execute(command) {
            return false;
        }
        if let Some(mark) = Self::mark_name(command) {
            if !self.marks.remove(mark) {
                self.marks.insert(mark);
            }
            self.touch();
            return true;
        }
        match command {
            EngineCommand::SetParagraph => self.block = Block::Paragraph,
            EngineCommand::SetHeading { level } => self.block = Block::Heading(*level),
            EngineCommand::ToggleBulletList => {
                self.block = toggle_block(self.block, Block::BulletList)
            }
            EngineCommand::ToggleOrderedList => {
                self.block = toggle_block(self.block, Block::OrderedList)
            }
            EngineCommand::ToggleBlockquote => {
                self.block = toggle_block(self.block, Block::Blockquote)
            }
            EngineCommand::ToggleCodeBlock => {
                self.block = toggle_block(self.block, Block::CodeBlock)
            }
            EngineCommand::InsertHorizontalRule => {
                self.text.push_str("\n\n---\n\n");
            }
            EngineCommand::InsertTable { rows, cols } => {
                self.text
                    .push_str(&format!("\n\n[table {rows}x{cols}]\n\n"));
            }
            EngineCommand::SetLink { href } => {
                self.marks.insert("link");
                self.text.push_str(&format!(" [{href}]"));
            }
            EngineCommand::Unlink => {
                self.marks.remove("link");
            }
            EngineCommand::InsertImage { src } => {
                self.text.push_str(&format!("\n\n[image {src}]\n\n"));
            }
            EngineCommand::ClearFormatting => {
                self.marks.clear();
                self.block = Block::Paragraph;
            }
            EngineCommand::Undo | EngineCommand::Redo => return false,
            _ => return false,
        }
        self.touch();
        true
    }

    fn is_active(&self, command: &EngineCommand) -> bool {
        if let Some(mark) = Self::mark_name(command) {
            return self.marks.contains(mark);
        }
        match command {
            EngineCommand::SetParagraph => self.block == Block::Paragraph,
            EngineCommand::SetHeading { level } => self.block == Block::Heading(*level),
            EngineCommand::ToggleBulletList => self.block == Block::BulletList,
            EngineCommand::ToggleOrderedList => self.block == Block::OrderedList,
            EngineCommand::ToggleBlockquote => self.block == Block::Blockquote,
            EngineCommand::ToggleCodeBlock => self.block == Block::CodeBlock,
            EngineCommand::SetLink { .. } | EngineCommand::Unlink => {
                self.marks.contains("link")
            }
            _ => false,
        }
    }

    fn can_execute(&self, command: &EngineCommand) -> bool {
        match command {
            // No history in the reference engine.
            EngineCommand::Undo | EngineCommand::Redo => false,
            _ => self.editable,
        }
    }

    fn events(&self) -> Receiver<EngineEvent> {
        self.rx.clone()
    }
}

fn toggle_block(current: Block, target: Block) -> Block {
    if current == target {
        Block::Paragraph
    } else {
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(rx: &Receiver<EngineEvent>) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[test]
    fn emits_created_then_updates() {
        let mut engine = BufferEngine::new("<p>hello</p>");
        let rx = engine.events();
        assert_eq!(drain(&rx), vec![EngineEvent::Created]);

        engine.insert_text(" world");
        assert_eq!(
            drain(&rx),
            vec![EngineEvent::Updated, EngineEvent::Transaction]
        );
        assert_eq!(engine.content_text(), "hello world");
    }

    #[test]
    fn set_content_with_identical_text_is_a_no_op() {
        let mut engine = BufferEngine::new("<p>stable</p>");
        let rx = engine.events();
        let _ = drain(&rx);

        engine.set_content("<p>stable</p>");
        assert!(drain(&rx).is_empty());
        assert_eq!(engine.revision(), 0);
    }

    #[test]
    fn mark_commands_toggle_and_report_active() {
        let mut engine = BufferEngine::new("");
        assert!(!engine.is_active(&EngineCommand::ToggleBold));
        assert!(engine.execute(&EngineCommand::ToggleBold));
        assert!(engine.is_active(&EngineCommand::ToggleBold));
        assert!(engine.execute(&EngineCommand::ToggleBold));
        assert!(!engine.is_active(&EngineCommand::ToggleBold));
    }

    #[test]
    fn heading_block_round_trips_through_html() {
        let mut engine = BufferEngine::new("<p>Title</p>");
        engine.execute(&EngineCommand::SetHeading { level: 2 });
        assert!(engine.content_html().starts_with("<h2>"));
        assert!(engine.is_active(&EngineCommand::SetHeading { level: 2 }));

        engine.execute(&EngineCommand::SetParagraph);
        assert!(engine.content_html().starts_with("<p>"));
    }

    #[test]
    fn non_editable_engine_rejects_commands_and_edits() {
        let mut engine = BufferEngine::new("<p>locked</p>");
        engine.set_editable(false);
        assert!(!engine.execute(&EngineCommand::ToggleItalic));
        engine.insert_text("nope");
        assert_eq!(engine.content_text(), "locked");
    }

    #[test]
    fn selection_changes_emit_events_once() {
        let mut engine = BufferEngine::new("");
        let rx = engine.events();
        let _ = drain(&rx);

        engine.set_selection(true);
        engine.set_selection(true);
        assert_eq!(
            drain(&rx),
            vec![EngineEvent::SelectionChanged {
                has_selection: true
            }]
        );
    }

    #[test]
    fn empty_document_serializes_to_empty_paragraph() {
        let engine = BufferEngine::new("");
        assert!(engine.is_empty());
        assert_eq!(engine.content_html(), "<p></p>");
    }
}
