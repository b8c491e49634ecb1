//! Key event matching.
//!
//! Matches [`KeyboardEvent`]s against parsed [`KeyCombo`]s. The event's key is
//! resolved from the richest field available: `key` first, then the legacy
//! `keyIdentifier` and `keyCode` fields, then the physical `code`.

use crate::event::{EventCode, EventType, KeyboardEvent, KeyboardEventSource};
use crate::parser::{KeyCombo, Modifiers, ParseError, ParsedKey, parse_key_list};
use crate::platform;

/// Browser placeholder for keys it cannot name.
const UNIDENTIFIED_KEY: &str = "unidentified";

/// Matcher for comparing keyboard events against keybindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeybindingMatcher {
    /// Phase of the event
    event_type: EventType,
    /// Active modifiers from the event
    modifiers: Modifiers,
    /// Normalized key, `None` when the event carries no usable key field
    key: Option<ParsedKey>,
}

impl KeybindingMatcher {
    /// Create a matcher from a keyboard event.
    pub fn from_event(event: &KeyboardEvent) -> Self {
        let modifiers = Modifiers {
            shift: event.shift_key,
            ctrl: event.ctrl_key,
            alt: event.alt_key,
            meta: event.meta_key,
        };

        Self {
            event_type: event.event_type,
            modifiers,
            key: resolve_event_key(event),
        }
    }

    /// The normalized key of the event, if one could be derived.
    pub fn key(&self) -> Option<&ParsedKey> {
        self.key.as_ref()
    }

    /// Check if this event matches the given key combo.
    ///
    /// Modifiers must match exactly: an event with an extra modifier held
    /// down does not match a combo that omits it.
    pub fn matches(&self, combo: &KeyCombo) -> bool {
        if self.event_type != combo.event_type {
            return false;
        }

        if self.modifiers != combo.modifiers {
            return false;
        }

        self.key.as_ref() == Some(&combo.key)
    }
}

/// Derive the normalized key of an event.
fn resolve_event_key(event: &KeyboardEvent) -> Option<ParsedKey> {
    event
        .key
        .as_deref()
        .filter(|key| !key.is_empty() && !key.eq_ignore_ascii_case(UNIDENTIFIED_KEY))
        .and_then(platform::normalize_key_name)
        .or_else(|| {
            event
                .key_identifier
                .as_deref()
                .and_then(platform::key_from_identifier)
        })
        .or_else(|| event.key_code.and_then(platform::key_from_key_code))
        .or_else(|| event.code.as_ref().and_then(key_from_event_code))
}

fn key_from_event_code(code: &EventCode) -> Option<ParsedKey> {
    match code {
        EventCode::Numeric(code) => platform::key_from_key_code(*code),
        EventCode::Physical(code) => platform::key_from_physical_code(code),
    }
}

/// Check whether a keyboard event satisfies a key combo.
pub fn matches(event: &KeyboardEvent, combo: &KeyCombo) -> bool {
    KeybindingMatcher::from_event(event).matches(combo)
}

/// Check whether an event matches any combination in a whitespace-separated
/// key list such as `"space enter"`.
///
/// Accepts the raw event or a handler payload wrapping it. A malformed key
/// list is an error rather than a non-match.
pub fn keyboard_event_matches_keys<E>(event: &E, keys: &str) -> Result<bool, ParseError>
where
    E: KeyboardEventSource + ?Sized,
{
    let combos = parse_key_list(keys)?;
    let matcher = KeybindingMatcher::from_event(event.keyboard_event());
    Ok(combos.iter().any(|(_, combo)| matcher.matches(combo)))
}
