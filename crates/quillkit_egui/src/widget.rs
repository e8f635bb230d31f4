//! The rich editor widget: panels, text surface, shortcuts, and menus.

use crate::menus::context_menu_ui;
use crate::status_bar::status_bar;
use crate::style::apply_theme;
use crate::toolbar::toolbar_ui;
use egui::{Key, Modifiers, RichText, TextEdit};
use quillkit_core::engine::EditorEngine;
use quillkit_core::shell::{EditorShell, ShellPhase};
use quillkit_core::toolbar::ContextMenu;
use std::time::Duration;

/// Repaint cadence while a debounce window is open, so the save fires without
/// waiting for the next input event.
const PENDING_REPAINT_INTERVAL: Duration = Duration::from_millis(200);

/// Whether modifiers form a plain command chord (no Shift/Alt).
fn is_plain_command_chord(modifiers: Modifiers) -> bool {
    modifiers.command && !modifiers.shift && !modifiers.alt
}

/// Immediate-mode view over an [`EditorShell`].
///
/// Holds only render-local state (menus, theme cache, autofocus bookkeeping);
/// all document and composition state lives in the shell.
pub struct RichEditorView {
    bubble: Option<ContextMenu>,
    floating: Option<ContextMenu>,
    applied_theme: Option<&'static str>,
    focus_requested: bool,
}

impl Default for RichEditorView {
    fn default() -> Self {
        Self {
            bubble: Some(ContextMenu::bubble()),
            floating: Some(ContextMenu::floating()),
            applied_theme: None,
            focus_requested: false,
        }
    }
}

impl RichEditorView {
    pub fn new() -> Self {
        Self::default()
    }

    /// View without bubble/floating menus.
    pub fn without_menus() -> Self {
        Self {
            bubble: None,
            floating: None,
            ..Self::default()
        }
    }

    pub fn set_bubble_menu(&mut self, menu: Option<ContextMenu>) {
        self.bubble = menu;
    }

    pub fn set_floating_menu(&mut self, menu: Option<ContextMenu>) {
        self.floating = menu;
    }

    /// Render one frame and drive the shell (events, autosave).
    pub fn show<E: EditorEngine>(&mut self, ctx: &egui::Context, shell: &mut EditorShell<E>) {
        self.ensure_theme(ctx, shell);
        shell.tick();

        match shell.phase() {
            ShellPhase::Initializing => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label("Preparing editor...");
                        });
                    });
                });
                return;
            }
            ShellPhase::Failed(reason) => {
                let reason = reason.clone();
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.label(
                            RichText::new(format!("Editor failed to start: {reason}"))
                                .color(egui::Color32::RED),
                        );
                    });
                });
                return;
            }
            ShellPhase::Ready => {}
        }

        let save_chord = ctx.input(|input| {
            is_plain_command_chord(input.modifiers) && input.key_pressed(Key::S)
        });
        if save_chord {
            shell.save_now();
        }

        let toolbar = shell.options().toolbar.clone();
        if toolbar.enabled {
            egui::TopBottomPanel::top("quillkit_toolbar").show(ctx, |ui| {
                if let Some(engine) = shell.engine_mut() {
                    toolbar_ui(ui, &toolbar, engine);
                }
            });
        }

        status_bar(ctx, shell);

        let placeholder = shell.options().placeholder.clone();
        let min_height = shell.options().min_height;
        let max_height = shell.options().max_height;
        let autofocus = shell.options().autofocus;

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(engine) = shell.engine_mut() else {
                return;
            };
            let mut scroll = egui::ScrollArea::vertical().min_scrolled_height(min_height);
            if let Some(max_height) = max_height {
                scroll = scroll.max_height(max_height);
            }
            scroll.show(ui, |ui| {
                let mut text = engine.content_text();
                let output = TextEdit::multiline(&mut text)
                    .font(egui::TextStyle::Body)
                    .desired_width(f32::INFINITY)
                    .desired_rows(10)
                    .lock_focus(true)
                    .hint_text(&placeholder)
                    .interactive(engine.is_editable())
                    .show(ui);

                if output.response.changed() {
                    engine.replace_text(&text);
                }
                if let Some(range) = output.cursor_range {
                    engine.set_selection(range.primary.index != range.secondary.index);
                }
                if output.response.gained_focus() {
                    engine.set_focused(true);
                } else if output.response.lost_focus() {
                    engine.set_focused(false);
                }
                if autofocus && !self.focus_requested {
                    output.response.request_focus();
                    self.focus_requested = true;
                }

                let anchor = output.response.rect.left_top() + egui::vec2(8.0, 8.0);
                if let Some(bubble) = &self.bubble {
                    context_menu_ui(ui.ctx(), "quillkit_bubble_menu", bubble, anchor, engine);
                }
                if let Some(floating) = &self.floating {
                    context_menu_ui(ui.ctx(), "quillkit_floating_menu", floating, anchor, engine);
                }
            });
        });

        if matches!(
            shell.save_status(),
            quillkit_core::autosave::SaveStatus::Pending
                | quillkit_core::autosave::SaveStatus::Saving
        ) {
            ctx.request_repaint_after(PENDING_REPAINT_INTERVAL);
        }
    }

    fn ensure_theme<E: EditorEngine>(&mut self, ctx: &egui::Context, shell: &EditorShell<E>) {
        let name = shell.theme().theme.name;
        if self.applied_theme == Some(name) {
            return;
        }
        apply_theme(ctx, &shell.theme().theme);
        self.applied_theme = Some(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_command_chord_excludes_shift_and_alt() {
        assert!(is_plain_command_chord(Modifiers::COMMAND));
        assert!(!is_plain_command_chord(Modifiers::COMMAND | Modifiers::SHIFT));
        assert!(!is_plain_command_chord(Modifiers::COMMAND | Modifiers::ALT));
        assert!(!is_plain_command_chord(Modifiers::NONE));
    }
}
