//! Configuration value types.

use serde::{Deserialize, Serialize};

// ============================================================================
// Keybinding Types
// ============================================================================

/// A keybinding configuration entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    /// Whitespace-separated key combinations, e.g., "space enter" or "ctrl+shift+a:keyup"
    pub key: String,
    /// Handler name invoked when one of the combinations matches, e.g., "_keyHandler"
    pub handler: String,
}

impl KeyBinding {
    pub fn new(key: impl Into<String>, handler: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            handler: handler.into(),
        }
    }
}

/// A reusable, named bundle of key bindings that elements (and other
/// behaviors) compose.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorConfig {
    pub name: String,
    /// Behaviors composed into this one; their bindings come first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub behaviors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_bindings: Vec<KeyBinding>,
}

/// An element that owns a binding table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementConfig {
    pub name: String,
    /// Composed behaviors, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub behaviors: Vec<String>,
    /// Bindings declared directly on the element
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_bindings: Vec<KeyBinding>,
    /// Stop the keyboard event from propagating past this element
    #[serde(default)]
    pub stop_keyboard_event_propagation: bool,
}

// ============================================================================
// Logging
// ============================================================================

/// Log level for diagnostic output.
///
/// Environment variable `RUST_LOG` and the `--log-level` CLI flag take precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    /// Warnings and errors
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}
