//! Theme records and mode resolution.
//!
//! Themes are immutable named palettes selected (never mutated) by a mode.
//! `Auto` defers to the host's reported color-scheme preference at resolution
//! time; callers re-resolve when their [`SchemeSource`] reports a change
//! rather than polling.

use crate::error::EditorError;
use crate::storage::StorageStrategy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::warn;

/// Storage key used when persisting the last explicit (non-auto) mode.
pub const THEME_MODE_KEY: &str = "quillkit.theme-mode";

/// Requested theme mode. Unknown string values fall back to `Light`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
    Auto,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Auto => "auto",
        }
    }
}

impl FromStr for ThemeMode {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value.trim().to_ascii_lowercase().as_str() {
            "dark" => Self::Dark,
            "auto" => Self::Auto,
            "light" => Self::Light,
            other => {
                warn!("Unknown theme mode '{}'; falling back to light", other);
                Self::Light
            }
        })
    }
}

/// Host color-scheme preference, consulted only by `Auto` mode.
pub trait SchemeSource {
    fn prefers_dark(&self) -> bool;
}

/// Fixed scheme preference, useful for tests and headless hosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedScheme(pub bool);

impl SchemeSource for FixedScheme {
    fn prefers_dark(&self) -> bool {
        self.0
    }
}

/// Immutable palette/typography/spacing record.
///
/// Value equality is deliberate: resolving the same mode twice yields
/// value-equal records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorTheme {
    pub name: &'static str,
    pub color_background: &'static str,
    pub color_surface: &'static str,
    pub color_text: &'static str,
    pub color_text_muted: &'static str,
    pub color_accent: &'static str,
    pub color_border: &'static str,
    pub color_selection: &'static str,
    pub font_family: &'static str,
    pub font_family_mono: &'static str,
    pub font_size_px: u16,
    pub spacing_px: u16,
    pub radius_px: u16,
    pub shadow: &'static str,
}

impl EditorTheme {
    pub fn light() -> Self {
        Self {
            name: "light",
            color_background: "#ffffff",
            color_surface: "#f6f8fa",
            color_text: "#1f2328",
            color_text_muted: "#6e7681",
            color_accent: "#e57000",
            color_border: "#d0d7de",
            color_selection: "#3b82f6",
            font_family: "system-ui, sans-serif",
            font_family_mono: "ui-monospace, monospace",
            font_size_px: 15,
            spacing_px: 12,
            radius_px: 6,
            shadow: "0 1px 3px rgba(0, 0, 0, 0.12)",
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            color_background: "#0d1117",
            color_surface: "#161b22",
            color_text: "#c9d1d9",
            color_text_muted: "#6e7681",
            color_accent: "#e57000",
            color_border: "#30363d",
            color_selection: "#3b82f6",
            font_family: "system-ui, sans-serif",
            font_family_mono: "ui-monospace, monospace",
            font_size_px: 15,
            spacing_px: 12,
            radius_px: 6,
            shadow: "0 1px 3px rgba(0, 0, 0, 0.6)",
        }
    }

    /// Flat key/value projection suitable for style variables on the editor's
    /// own container. Scoped application keeps independent editors with
    /// different themes from clashing.
    pub fn css_variables(&self) -> BTreeMap<String, String> {
        let mut vars = BTreeMap::new();
        let mut push = |key: &str, value: String| {
            vars.insert(format!("--qk-{key}"), value);
        };
        push("color-background", self.color_background.to_string());
        push("color-surface", self.color_surface.to_string());
        push("color-text", self.color_text.to_string());
        push("color-text-muted", self.color_text_muted.to_string());
        push("color-accent", self.color_accent.to_string());
        push("color-border", self.color_border.to_string());
        push("color-selection", self.color_selection.to_string());
        push("font-family", self.font_family.to_string());
        push("font-family-mono", self.font_family_mono.to_string());
        push("font-size", format!("{}px", self.font_size_px));
        push("spacing", format!("{}px", self.spacing_px));
        push("radius", format!("{}px", self.radius_px));
        push("shadow", self.shadow.to_string());
        vars
    }
}

/// Result of resolving a mode against the host scheme preference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTheme {
    pub mode: ThemeMode,
    pub theme: EditorTheme,
    pub css_variables: BTreeMap<String, String>,
}

/// Resolve `mode` to a concrete theme.
///
/// `Auto` queries `scheme` now; the caller re-resolves when the host
/// preference changes.
pub fn resolve(mode: ThemeMode, scheme: &dyn SchemeSource) -> ResolvedTheme {
    let theme = match mode {
        ThemeMode::Light => EditorTheme::light(),
        ThemeMode::Dark => EditorTheme::dark(),
        ThemeMode::Auto => {
            if scheme.prefers_dark() {
                EditorTheme::dark()
            } else {
                EditorTheme::light()
            }
        }
    };
    let css_variables = theme.css_variables();
    ResolvedTheme {
        mode,
        theme,
        css_variables,
    }
}

/// Persist the last explicit mode choice so it survives remount.
///
/// `Auto` is not an explicit choice and is ignored.
///
/// # Errors
/// Propagates storage-strategy failures.
pub fn persist_mode(
    strategy: &dyn StorageStrategy,
    mode: ThemeMode,
) -> Result<(), EditorError> {
    if mode == ThemeMode::Auto {
        return Ok(());
    }
    strategy.save(THEME_MODE_KEY, mode.as_str())
}

/// Read back a previously persisted mode, if any.
pub fn load_persisted_mode(strategy: &dyn StorageStrategy) -> Option<ThemeMode> {
    match strategy.restore(THEME_MODE_KEY) {
        Ok(Some(value)) => value.parse().ok(),
        Ok(None) => None,
        Err(err) => {
            warn!("Failed to read persisted theme mode: {}", err);
            None
        }
    }
}
