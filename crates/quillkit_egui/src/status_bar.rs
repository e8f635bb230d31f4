//! Bottom status bar: save state, document statistics, last-saved time.

use crate::style::hex_color;
use egui::{Color32, RichText};
use quillkit_core::autosave::SaveStatus;
use quillkit_core::engine::EditorEngine;
use quillkit_core::shell::EditorShell;

/// Render the status bar panel. Only meaningful in the `Ready` phase; the
/// widget skips it otherwise.
pub fn status_bar<E: EditorEngine>(ctx: &egui::Context, shell: &EditorShell<E>) {
    let theme = &shell.theme().theme;
    let text_muted = hex_color(theme.color_text_muted);
    let text = hex_color(theme.color_text);

    egui::TopBottomPanel::bottom("quillkit_status")
        .resizable(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let status = shell.save_status();
                let color = match status {
                    SaveStatus::Saved => text,
                    SaveStatus::Pending => Color32::YELLOW,
                    SaveStatus::Saving => text_muted,
                    SaveStatus::Idle => text_muted,
                    SaveStatus::Error => Color32::RED,
                };
                ui.label(RichText::new(status.label()).color(color));
                if status == SaveStatus::Error {
                    if let Some(message) = shell.last_save_error() {
                        ui.label(RichText::new(message).small().color(Color32::RED));
                    }
                }
                ui.separator();

                let stats = shell.stats();
                ui.label(
                    RichText::new(format!(
                        "{} words · {} chars · {} sentences",
                        stats.words, stats.characters, stats.sentences
                    ))
                    .small()
                    .color(text_muted),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(saved_at) = shell.last_saved_at() {
                        ui.label(
                            RichText::new(format!(
                                "saved {}",
                                saved_at.format("%H:%M:%S")
                            ))
                            .small()
                            .color(text_muted),
                        );
                        ui.separator();
                    }
                    ui.label(
                        RichText::new(format!("{} min read", stats.reading_time_minutes))
                            .small()
                            .color(text_muted),
                    );
                });
            });
        });
}
