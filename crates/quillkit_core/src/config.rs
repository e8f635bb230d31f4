//! Editor configuration surface and environment-flag helpers.

use crate::theme::ThemeMode;
use crate::toolbar::ToolbarConfig;
use std::env;
use std::time::Duration;

/// Default trailing-edge autosave debounce.
pub const DEFAULT_AUTOSAVE_DELAY: Duration = Duration::from_millis(2000);

/// Default storage key when the caller does not scope the document.
pub const DEFAULT_AUTOSAVE_KEY: &str = "quillkit.document";

/// Caller-supplied editor configuration.
///
/// Everything here is recognized up front at mount time; toolbar groups are
/// re-evaluated against the engine on render, never rebuilt.
#[derive(Debug, Clone)]
pub struct EditorOptions {
    /// Serialized markup loaded into the engine on creation.
    pub initial_content: String,
    /// Hint text shown while the document is empty.
    pub placeholder: String,
    pub editable: bool,
    pub disabled: bool,
    pub read_only: bool,
    pub autofocus: bool,
    pub spellcheck: bool,
    /// Minimum editor viewport height in logical pixels.
    pub min_height: f32,
    /// Optional maximum height; content scrolls beyond it.
    pub max_height: Option<f32>,
    pub theme_mode: ThemeMode,
    pub toolbar: ToolbarConfig,
    pub autosave_enabled: bool,
    /// The save fires this long after the *last* change, not on a cadence.
    pub autosave_delay: Duration,
    /// Storage key for persisted content. Callers sharing one key across
    /// concurrent editors get undefined behavior; keep keys unique.
    pub autosave_key: String,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            initial_content: String::new(),
            placeholder: "Start typing...".to_string(),
            editable: true,
            disabled: false,
            read_only: false,
            autofocus: false,
            spellcheck: true,
            min_height: 200.0,
            max_height: None,
            theme_mode: ThemeMode::Light,
            toolbar: ToolbarConfig::standard(),
            autosave_enabled: true,
            autosave_delay: DEFAULT_AUTOSAVE_DELAY,
            autosave_key: DEFAULT_AUTOSAVE_KEY.to_string(),
        }
    }
}

impl EditorOptions {
    /// Effective editability: all three flags combined with AND semantics.
    pub fn effective_editable(&self) -> bool {
        self.editable && !self.disabled && !self.read_only
    }

    /// Apply `QUILLKIT_AUTOSAVE` / `QUILLKIT_AUTOSAVE_DELAY_MS` overrides.
    ///
    /// # Returns
    /// The options with any recognized environment overrides applied.
    pub fn apply_env_overrides(mut self) -> Self {
        if let Ok(value) = env::var("QUILLKIT_AUTOSAVE") {
            if let Some(enabled) = parse_env_flag(&value) {
                self.autosave_enabled = enabled;
            }
        }
        if let Some(ms) = env::var("QUILLKIT_AUTOSAVE_DELAY_MS")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
        {
            self.autosave_delay = Duration::from_millis(ms);
        }
        self
    }
}

/// Parse a boolean-like environment flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Returns
/// `Some(bool)` when the value is recognized, otherwise `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_env_flag_accepts_truthy_values() {
        for value in ["1", "true", "TRUE", " yes ", "on"] {
            assert_eq!(parse_env_flag(value), Some(true), "value: {}", value);
        }
    }

    #[test]
    fn parse_env_flag_accepts_falsy_values() {
        for value in ["", "0", "false", "FALSE", " no ", "off"] {
            assert_eq!(parse_env_flag(value), Some(false), "value: {}", value);
        }
    }

    #[test]
    fn parse_env_flag_rejects_unknown_values() {
        assert_eq!(parse_env_flag("maybe"), None);
        assert_eq!(parse_env_flag("enabled"), None);
    }

    #[test]
    fn editability_is_and_of_all_three_flags() {
        let mut options = EditorOptions::default();
        assert!(options.effective_editable());
        options.read_only = true;
        assert!(!options.effective_editable());
        options.read_only = false;
        options.disabled = true;
        assert!(!options.effective_editable());
        options.disabled = false;
        options.editable = false;
        assert!(!options.effective_editable());
    }
}
