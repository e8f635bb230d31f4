//! Toolbar rendering: project the declarative item tree onto egui widgets.

use egui::{ComboBox, RichText, SelectableLabel};
use quillkit_core::engine::EditorEngine;
use quillkit_core::toolbar::{ToolbarConfig, ToolbarDropdown, ToolbarItem};
use tracing::debug;

/// Render one toolbar row and dispatch clicked commands into the engine.
///
/// Active/disabled state is queried from the live engine per frame, so the
/// same config tree works unchanged across engines.
///
/// # Returns
/// The number of commands dispatched this frame.
pub fn toolbar_ui(
    ui: &mut egui::Ui,
    config: &ToolbarConfig,
    engine: &mut dyn EditorEngine,
) -> usize {
    if !config.enabled {
        return 0;
    }
    let mut dispatched = 0;
    ui.horizontal_wrapped(|ui| {
        for (index, group) in config.groups.iter().enumerate() {
            if index > 0 {
                ui.separator();
            }
            for item in &group.items {
                dispatched += item_ui(ui, item, engine);
            }
        }
        if !config.custom_items.is_empty() {
            ui.separator();
            for item in &config.custom_items {
                dispatched += item_ui(ui, item, engine);
            }
        }
    });
    dispatched
}

/// Render a single item; shared by the toolbar and context menus.
pub(crate) fn item_ui(
    ui: &mut egui::Ui,
    item: &ToolbarItem,
    engine: &mut dyn EditorEngine,
) -> usize {
    match item {
        ToolbarItem::Divider => {
            ui.separator();
            0
        }
        ToolbarItem::Button(button) => {
            let response = ui
                .add_enabled(
                    engine.can_execute(&button.command),
                    SelectableLabel::new(
                        engine.is_active(&button.command),
                        RichText::new(&button.icon),
                    ),
                )
                .on_hover_text(&button.label);
            if response.clicked() {
                debug!(command = button.command.name(), "Toolbar dispatch");
                engine.execute(&button.command);
                return 1;
            }
            0
        }
        ToolbarItem::Dropdown(dropdown) => dropdown_ui(ui, dropdown, engine),
    }
}

fn dropdown_ui(ui: &mut egui::Ui, dropdown: &ToolbarDropdown, engine: &mut dyn EditorEngine) -> usize {
    let selected = dropdown
        .options
        .iter()
        .find(|option| engine.is_active(&option.command))
        .map(|option| option.label.clone())
        .unwrap_or_else(|| dropdown.label.clone());

    let mut dispatched = 0;
    ComboBox::from_id_salt(&dropdown.label)
        .selected_text(selected)
        .show_ui(ui, |ui| {
            for option in &dropdown.options {
                let active = engine.is_active(&option.command);
                if ui.selectable_label(active, &option.label).clicked() && !active {
                    debug!(command = option.command.name(), "Toolbar dispatch");
                    engine.execute(&option.command);
                    dispatched += 1;
                }
            }
        });
    dispatched
}
