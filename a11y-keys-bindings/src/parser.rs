//! Key combination parser.
//!
//! Parses declarative key strings like `"ctrl+shift+a"` or `"space:keyup"`
//! into [`KeyCombo`] values. A key list such as `"space enter"` holds several
//! combinations separated by whitespace.

use crate::event::EventType;
use crate::platform;
use std::fmt;
use thiserror::Error;

/// Error type for key parsing failures.
///
/// Every variant is a configuration error: it is reported when a binding is
/// registered, never deferred to match time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The combination string (or key list) was empty.
    #[error("Empty key combination")]
    EmptyCombination,

    /// No base key followed the modifiers.
    #[error("No key specified in '{0}'")]
    EmptyKey(String),

    /// A token before the base key is not a known modifier.
    #[error("Unknown modifier '{modifier}' in '{combo}'")]
    UnknownModifier { modifier: String, combo: String },

    /// The `:eventType` suffix is neither `keydown` nor `keyup`.
    #[error("Unknown event type '{event_type}' in '{combo}' (expected keydown or keyup)")]
    UnknownEventType { event_type: String, combo: String },
}

/// One of the four modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Shift,
    Ctrl,
    Alt,
    Meta,
}

/// Required modifier state of a key combination.
///
/// A `false` flag means the modifier must NOT be held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn set(&mut self, modifier: Modifier) {
        match modifier {
            Modifier::Shift => self.shift = true,
            Modifier::Ctrl => self.ctrl = true,
            Modifier::Alt => self.alt = true,
            Modifier::Meta => self.meta = true,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.shift || self.ctrl || self.alt || self.meta)
    }
}

/// Canonical names for non-printable keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    Space,
    Enter,
    Tab,
    Esc,
    Backspace,
    Del,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
}

impl NamedKey {
    /// Canonical lower-case name, as accepted by [`parse_key_combo`].
    pub fn as_str(&self) -> &'static str {
        match self {
            NamedKey::Space => "space",
            NamedKey::Enter => "enter",
            NamedKey::Tab => "tab",
            NamedKey::Esc => "esc",
            NamedKey::Backspace => "backspace",
            NamedKey::Del => "del",
            NamedKey::Insert => "insert",
            NamedKey::Home => "home",
            NamedKey::End => "end",
            NamedKey::PageUp => "pageup",
            NamedKey::PageDown => "pagedown",
            NamedKey::Up => "up",
            NamedKey::Down => "down",
            NamedKey::Left => "left",
            NamedKey::Right => "right",
            NamedKey::F1 => "f1",
            NamedKey::F2 => "f2",
            NamedKey::F3 => "f3",
            NamedKey::F4 => "f4",
            NamedKey::F5 => "f5",
            NamedKey::F6 => "f6",
            NamedKey::F7 => "f7",
            NamedKey::F8 => "f8",
            NamedKey::F9 => "f9",
            NamedKey::F10 => "f10",
            NamedKey::F11 => "f11",
            NamedKey::F12 => "f12",
        }
    }
}

/// The normalized base key of a combination or event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParsedKey {
    /// A single printable character, lower-cased (e.g., 'a', '1', '/')
    Character(char),
    /// A key with a canonical name (e.g., space, up, enter)
    Named(NamedKey),
    /// Any other key name, lower-cased (e.g., "pause", "capslock")
    Other(String),
}

impl fmt::Display for ParsedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsedKey::Character(c) => write!(f, "{}", c),
            ParsedKey::Named(named) => f.write_str(named.as_str()),
            ParsedKey::Other(name) => f.write_str(name),
        }
    }
}

/// A parsed key combination (event phase + modifiers + key).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub event_type: EventType,
    pub modifiers: Modifiers,
    pub key: ParsedKey,
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();

        if self.modifiers.shift {
            parts.push("shift".to_string());
        }
        if self.modifiers.ctrl {
            parts.push("ctrl".to_string());
        }
        if self.modifiers.alt {
            parts.push("alt".to_string());
        }
        if self.modifiers.meta {
            parts.push("meta".to_string());
        }
        parts.push(self.key.to_string());

        write!(f, "{}", parts.join("+"))?;
        if self.event_type != EventType::Keydown {
            write!(f, ":{}", self.event_type)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for KeyCombo {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_key_combo(s)
    }
}

/// Parse a key combination string into a KeyCombo.
///
/// Supported format: `"modifier+modifier+key[:eventType]"`
///
/// Modifiers (case-insensitive):
/// - `shift`
/// - `ctrl`, `control`
/// - `alt`, `option`
/// - `meta`, `cmd`, `command`, `win`, `super`
///
/// Event types: `keydown` (default) or `keyup`.
///
/// Keys are lower-cased; aliases such as `spacebar`, `arrowup` or `return`
/// collapse onto their canonical names (`space`, `up`, `enter`).
pub fn parse_key_combo(s: &str) -> Result<KeyCombo, ParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ParseError::EmptyCombination);
    }

    let (combo_part, event_type) = match s.split_once(':') {
        Some((combo, event)) => (combo, parse_event_type(event, s)?),
        None => (s, EventType::default()),
    };

    let parts: Vec<&str> = combo_part.split('+').map(str::trim).collect();
    let Some((key_part, modifier_parts)) = parts.split_last() else {
        return Err(ParseError::EmptyKey(s.to_string()));
    };

    let mut modifiers = Modifiers::default();
    for part in modifier_parts {
        let modifier =
            platform::modifier_from_alias(part).ok_or_else(|| ParseError::UnknownModifier {
                modifier: part.to_string(),
                combo: s.to_string(),
            })?;
        modifiers.set(modifier);
    }

    let key = platform::normalize_key_name(key_part)
        .ok_or_else(|| ParseError::EmptyKey(s.to_string()))?;

    Ok(KeyCombo {
        event_type,
        modifiers,
        key,
    })
}

fn parse_event_type(event: &str, combo: &str) -> Result<EventType, ParseError> {
    match event.trim().to_lowercase().as_str() {
        "keydown" => Ok(EventType::Keydown),
        "keyup" => Ok(EventType::Keyup),
        _ => Err(ParseError::UnknownEventType {
            event_type: event.to_string(),
            combo: combo.to_string(),
        }),
    }
}

/// Parse a whitespace-separated key list into its combinations.
///
/// Each entry keeps the source token it was parsed from.
///
/// Example: `"space enter"` → two combos, `"ctrl+a:keyup"` → one combo
pub fn parse_key_list(keys: &str) -> Result<Vec<(String, KeyCombo)>, ParseError> {
    let parts: Vec<&str> = keys.split_whitespace().collect();
    if parts.is_empty() {
        return Err(ParseError::EmptyCombination);
    }

    parts
        .into_iter()
        .map(|part| parse_key_combo(part).map(|combo| (part.to_string(), combo)))
        .collect()
}
