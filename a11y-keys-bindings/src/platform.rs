//! Key name normalization tables.
//!
//! Contains:
//! - Modifier alias table (string → [`Modifier`])
//! - Named key alias table (string → [`NamedKey`]), shared by the parser and
//!   the event side so `"spacebar"`, `"ArrowUp"` and `"Return"` land on the
//!   same canonical names as `"space"`, `"up"` and `"enter"`
//! - Legacy numeric `keyCode` table
//! - Legacy `keyIdentifier` table (`"U+0041"`, `"Up"`)
//! - Physical `code` table (`"KeyA"`, `"Digit1"`, `"ArrowUp"`)

use crate::parser::{Modifier, NamedKey, ParsedKey};

/// Resolve a modifier token (case-insensitive).
pub fn modifier_from_alias(s: &str) -> Option<Modifier> {
    match s.to_lowercase().as_str() {
        "shift" => Some(Modifier::Shift),
        "ctrl" | "control" => Some(Modifier::Ctrl),
        "alt" | "option" => Some(Modifier::Alt),
        "meta" | "cmd" | "command" | "win" | "super" => Some(Modifier::Meta),
        _ => None,
    }
}

/// Resolve a named key alias (case-insensitive) into its canonical key.
pub fn named_key_from_alias(s: &str) -> Option<NamedKey> {
    match s.to_lowercase().as_str() {
        "space" | "spacebar" => Some(NamedKey::Space),
        "enter" | "return" => Some(NamedKey::Enter),
        "tab" => Some(NamedKey::Tab),
        "esc" | "escape" => Some(NamedKey::Esc),
        "backspace" => Some(NamedKey::Backspace),
        "del" | "delete" => Some(NamedKey::Del),
        "insert" | "ins" => Some(NamedKey::Insert),
        "home" => Some(NamedKey::Home),
        "end" => Some(NamedKey::End),
        "pageup" | "pgup" => Some(NamedKey::PageUp),
        "pagedown" | "pgdn" => Some(NamedKey::PageDown),

        // Arrow keys
        "up" | "arrowup" => Some(NamedKey::Up),
        "down" | "arrowdown" => Some(NamedKey::Down),
        "left" | "arrowleft" => Some(NamedKey::Left),
        "right" | "arrowright" => Some(NamedKey::Right),

        // Function keys
        "f1" => Some(NamedKey::F1),
        "f2" => Some(NamedKey::F2),
        "f3" => Some(NamedKey::F3),
        "f4" => Some(NamedKey::F4),
        "f5" => Some(NamedKey::F5),
        "f6" => Some(NamedKey::F6),
        "f7" => Some(NamedKey::F7),
        "f8" => Some(NamedKey::F8),
        "f9" => Some(NamedKey::F9),
        "f10" => Some(NamedKey::F10),
        "f11" => Some(NamedKey::F11),
        "f12" => Some(NamedKey::F12),

        _ => None,
    }
}

/// Normalize a key name into a [`ParsedKey`].
///
/// - `" "` is the space key
/// - any other single character is stored lower-cased
/// - known aliases map to their [`NamedKey`]
/// - remaining names are kept as an opaque lower-case identifier
///
/// Returns `None` for an empty (or all-whitespace) name.
pub fn normalize_key_name(s: &str) -> Option<ParsedKey> {
    if s == " " {
        return Some(ParsedKey::Named(NamedKey::Space));
    }

    let trimmed = s.trim();
    let mut chars = trimmed.chars();
    match (chars.next(), chars.next()) {
        (None, _) => None,
        (Some(c), None) => Some(ParsedKey::Character(lower_char(c))),
        _ => Some(match named_key_from_alias(trimmed) {
            Some(named) => ParsedKey::Named(named),
            None => ParsedKey::Other(trimmed.to_lowercase()),
        }),
    }
}

/// Map a legacy numeric `keyCode` to its key.
pub fn key_from_key_code(code: u32) -> Option<ParsedKey> {
    let named = match code {
        8 => NamedKey::Backspace,
        9 => NamedKey::Tab,
        13 => NamedKey::Enter,
        27 => NamedKey::Esc,
        32 => NamedKey::Space,
        33 => NamedKey::PageUp,
        34 => NamedKey::PageDown,
        35 => NamedKey::End,
        36 => NamedKey::Home,
        37 => NamedKey::Left,
        38 => NamedKey::Up,
        39 => NamedKey::Right,
        40 => NamedKey::Down,
        45 => NamedKey::Insert,
        46 => NamedKey::Del,
        112..=123 => return function_key(code - 111).map(ParsedKey::Named),
        // Digit row and letters share their ASCII codes
        48..=57 | 65..=90 => {
            return char::from_u32(code).map(|c| ParsedKey::Character(c.to_ascii_lowercase()));
        }
        _ => return None,
    };
    Some(ParsedKey::Named(named))
}

/// Map a legacy `keyIdentifier` (`"U+0041"`, `"Up"`, `"Enter"`) to its key.
pub fn key_from_identifier(identifier: &str) -> Option<ParsedKey> {
    let Some(hex) = identifier
        .strip_prefix("U+")
        .or_else(|| identifier.strip_prefix("u+"))
    else {
        return normalize_key_name(identifier);
    };

    let code = u32::from_str_radix(hex, 16).ok()?;
    let named = match code {
        0x08 => NamedKey::Backspace,
        0x09 => NamedKey::Tab,
        0x1b => NamedKey::Esc,
        0x20 => NamedKey::Space,
        0x7f => NamedKey::Del,
        _ => {
            let c = char::from_u32(code)?;
            if c.is_control() {
                return None;
            }
            return Some(ParsedKey::Character(lower_char(c)));
        }
    };
    Some(ParsedKey::Named(named))
}

/// Map a physical key `code` (`"KeyA"`, `"Digit1"`, `"ArrowUp"`) to the key it
/// produces on a US QWERTY layout.
pub fn key_from_physical_code(code: &str) -> Option<ParsedKey> {
    let lower = code.to_lowercase();

    let single = |rest: &str, accept: fn(&char) -> bool| {
        let mut chars = rest.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if accept(&c) => Some(ParsedKey::Character(c)),
            _ => None,
        }
    };

    if let Some(rest) = lower.strip_prefix("key") {
        return single(rest, char::is_ascii_lowercase);
    }
    if let Some(rest) = lower.strip_prefix("digit") {
        return single(rest, char::is_ascii_digit);
    }

    match lower.as_str() {
        "minus" => Some(ParsedKey::Character('-')),
        "equal" => Some(ParsedKey::Character('=')),
        "bracketleft" => Some(ParsedKey::Character('[')),
        "bracketright" => Some(ParsedKey::Character(']')),
        "backslash" => Some(ParsedKey::Character('\\')),
        "semicolon" => Some(ParsedKey::Character(';')),
        "quote" => Some(ParsedKey::Character('\'')),
        "backquote" => Some(ParsedKey::Character('`')),
        "comma" => Some(ParsedKey::Character(',')),
        "period" => Some(ParsedKey::Character('.')),
        "slash" => Some(ParsedKey::Character('/')),
        "numpadenter" => Some(ParsedKey::Named(NamedKey::Enter)),
        _ => named_key_from_alias(&lower).map(ParsedKey::Named),
    }
}

fn function_key(n: u32) -> Option<NamedKey> {
    match n {
        1 => Some(NamedKey::F1),
        2 => Some(NamedKey::F2),
        3 => Some(NamedKey::F3),
        4 => Some(NamedKey::F4),
        5 => Some(NamedKey::F5),
        6 => Some(NamedKey::F6),
        7 => Some(NamedKey::F7),
        8 => Some(NamedKey::F8),
        9 => Some(NamedKey::F9),
        10 => Some(NamedKey::F10),
        11 => Some(NamedKey::F11),
        12 => Some(NamedKey::F12),
        _ => None,
    }
}

fn lower_char(c: char) -> char {
    // Only take the lowercase form when it is a single char (e.g. not 'İ')
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}
