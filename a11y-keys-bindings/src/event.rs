//! Keyboard event descriptors.
//!
//! [`KeyboardEvent`] carries only the fields the matcher reads. It
//! deserializes from the camelCase JSON shape browsers use, so recorded
//! events can be replayed:
//!
//! ```json
//! {"type": "keydown", "key": "a", "ctrlKey": true, "shiftKey": true}
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase of a keyboard event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    #[default]
    Keydown,
    Keyup,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Keydown => "keydown",
            EventType::Keyup => "keyup",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `code` field of an event.
///
/// Browsers report the physical key name (`"KeyA"`), while older engines and
/// synthetic events put the same number as `keyCode` there.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventCode {
    Numeric(u32),
    Physical(String),
}

/// A single physical key event as reported by the host environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KeyboardEvent {
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Browser key name, possibly a legacy alias ("spacebar", "Up")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Legacy key identifier ("U+0041", "Enter")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_identifier: Option<String>,
    /// Legacy numeric key code (65 for 'a', 32 for space)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_code: Option<u32>,
    /// Physical key code ("KeyA", "Space") or a numeric key code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<EventCode>,
    pub shift_key: bool,
    pub ctrl_key: bool,
    pub alt_key: bool,
    pub meta_key: bool,
}

impl KeyboardEvent {
    /// Create an event of the given type with no key information.
    pub fn new(event_type: EventType) -> Self {
        Self {
            event_type,
            ..Self::default()
        }
    }

    pub fn keydown() -> Self {
        Self::new(EventType::Keydown)
    }

    pub fn keyup() -> Self {
        Self::new(EventType::Keyup)
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_key_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.key_identifier = Some(identifier.into());
        self
    }

    pub fn with_key_code(mut self, key_code: u32) -> Self {
        self.key_code = Some(key_code);
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(EventCode::Physical(code.into()));
        self
    }

    pub fn with_numeric_code(mut self, code: u32) -> Self {
        self.code = Some(EventCode::Numeric(code));
        self
    }

    pub fn with_shift(mut self, pressed: bool) -> Self {
        self.shift_key = pressed;
        self
    }

    pub fn with_ctrl(mut self, pressed: bool) -> Self {
        self.ctrl_key = pressed;
        self
    }

    pub fn with_alt(mut self, pressed: bool) -> Self {
        self.alt_key = pressed;
        self
    }

    pub fn with_meta(mut self, pressed: bool) -> Self {
        self.meta_key = pressed;
        self
    }
}

/// Anything that carries a keyboard event: the raw event itself, or a
/// handler payload wrapping the event that triggered it.
pub trait KeyboardEventSource {
    fn keyboard_event(&self) -> &KeyboardEvent;
}

impl KeyboardEventSource for KeyboardEvent {
    fn keyboard_event(&self) -> &KeyboardEvent {
        self
    }
}
