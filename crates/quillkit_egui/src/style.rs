//! Theme application for the egui widgets.
//!
//! [`EditorTheme`] carries web-style hex colors; this module parses them into
//! `Color32` and projects the palette onto an egui `Style` so the editor
//! matches hosts that consume the same theme record elsewhere.

use egui::style::WidgetVisuals;
use egui::{Color32, CornerRadius, Stroke, Visuals};
use quillkit_core::theme::EditorTheme;
use tracing::warn;

const SELECTION_FILL_ALPHA: u8 = 0x55;

/// Parse a `#rrggbb` hex color. Unparseable values fall back to gray rather
/// than failing a render pass.
pub fn hex_color(value: &str) -> Color32 {
    parse_hex(value).unwrap_or_else(|| {
        warn!("Unparseable theme color '{}'", value);
        Color32::GRAY
    })
}

fn parse_hex(value: &str) -> Option<Color32> {
    let digits = value.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some(Color32::from_rgb(r, g, b))
}

fn selection_fill(theme: &EditorTheme) -> Color32 {
    let base = hex_color(theme.color_selection);
    Color32::from_rgba_unmultiplied(base.r(), base.g(), base.b(), SELECTION_FILL_ALPHA)
}

/// Build egui visuals from a theme record.
pub fn themed_visuals(theme: &EditorTheme) -> Visuals {
    let background = hex_color(theme.color_background);
    let surface = hex_color(theme.color_surface);
    let text = hex_color(theme.color_text);
    let text_muted = hex_color(theme.color_text_muted);
    let accent = hex_color(theme.color_accent);
    let border = hex_color(theme.color_border);
    let radius = CornerRadius::same(theme.radius_px.min(u8::MAX as u16) as u8);

    let mut visuals = if theme.name == "dark" {
        Visuals::dark()
    } else {
        Visuals::light()
    };
    visuals.override_text_color = Some(text);
    visuals.window_fill = background;
    visuals.panel_fill = surface;
    visuals.extreme_bg_color = background;
    visuals.faint_bg_color = surface;
    visuals.window_stroke = Stroke::new(1.0, border);
    visuals.hyperlink_color = accent;
    visuals.selection.bg_fill = selection_fill(theme);
    visuals.selection.stroke = Stroke::new(1.0, hex_color(theme.color_selection));
    visuals.text_edit_bg_color = Some(background);

    visuals.widgets.noninteractive = WidgetVisuals {
        bg_fill: surface,
        weak_bg_fill: surface,
        bg_stroke: Stroke::new(1.0, border),
        corner_radius: radius,
        fg_stroke: Stroke::new(1.0, text_muted),
        expansion: 0.0,
    };
    visuals.widgets.inactive = WidgetVisuals {
        bg_fill: surface,
        weak_bg_fill: surface,
        bg_stroke: Stroke::new(1.0, border),
        corner_radius: radius,
        fg_stroke: Stroke::new(1.0, text),
        expansion: 0.0,
    };
    visuals.widgets.hovered = WidgetVisuals {
        bg_fill: accent,
        weak_bg_fill: accent,
        bg_stroke: Stroke::new(1.0, accent),
        corner_radius: radius,
        fg_stroke: Stroke::new(1.0, Color32::WHITE),
        expansion: 0.5,
    };
    visuals.widgets.active = WidgetVisuals {
        bg_fill: accent,
        weak_bg_fill: accent,
        bg_stroke: Stroke::new(1.0, accent),
        corner_radius: radius,
        fg_stroke: Stroke::new(1.0, Color32::WHITE),
        expansion: 0.5,
    };
    visuals.widgets.open = WidgetVisuals {
        bg_fill: accent,
        weak_bg_fill: accent,
        bg_stroke: Stroke::new(1.0, accent),
        corner_radius: radius,
        fg_stroke: Stroke::new(1.0, Color32::WHITE),
        expansion: 0.0,
    };
    visuals
}

/// Apply a theme to the whole context, spacing included.
pub fn apply_theme(ctx: &egui::Context, theme: &EditorTheme) {
    let mut style = (*ctx.style()).clone();
    style.visuals = themed_visuals(theme);
    style.spacing.window_margin = egui::Margin::same(theme.spacing_px.min(u8::MAX as u16) as i8);
    style.spacing.button_padding = egui::vec2(10.0, 6.0);
    style.spacing.item_spacing = egui::vec2(6.0, 6.0);
    ctx.set_style(style);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lowercase_and_uppercase_hex() {
        assert_eq!(hex_color("#0d1117"), Color32::from_rgb(0x0d, 0x11, 0x17));
        assert_eq!(hex_color("#E57000"), Color32::from_rgb(0xe5, 0x70, 0x00));
    }

    #[test]
    fn malformed_colors_fall_back_to_gray() {
        assert_eq!(hex_color("red"), Color32::GRAY);
        assert_eq!(hex_color("#12345"), Color32::GRAY);
        assert_eq!(hex_color("#gg0000"), Color32::GRAY);
    }

    #[test]
    fn visuals_track_the_palette() {
        let theme = EditorTheme::dark();
        let visuals = themed_visuals(&theme);
        assert_eq!(visuals.window_fill, hex_color(theme.color_background));
        assert_eq!(visuals.panel_fill, hex_color(theme.color_surface));
        assert_eq!(visuals.hyperlink_color, hex_color(theme.color_accent));
    }
}
