//! Context-sensitive menus (bubble and floating) drawn as foreground areas.

use crate::toolbar::item_ui;
use egui::{Area, Frame, Order, Pos2};
use quillkit_core::engine::EditorEngine;
use quillkit_core::toolbar::ContextMenu;

/// Render a context menu anchored at `anchor` when its visibility predicate
/// holds against the engine.
///
/// # Returns
/// `true` when the menu was shown this frame.
pub fn context_menu_ui(
    ctx: &egui::Context,
    id: &str,
    menu: &ContextMenu,
    anchor: Pos2,
    engine: &mut dyn EditorEngine,
) -> bool {
    if !menu.visibility.is_visible(engine) {
        return false;
    }
    Area::new(egui::Id::new(id))
        .order(Order::Foreground)
        .fixed_pos(anchor)
        .show(ctx, |ui| {
            Frame::popup(ui.style()).show(ui, |ui| {
                ui.horizontal(|ui| {
                    for item in &menu.items {
                        item_ui(ui, item, engine);
                    }
                });
            });
        });
    true
}
