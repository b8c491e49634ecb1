//! Keybinding system for a11y-keys.
//!
//! This crate matches keyboard events against declarative key combinations
//! and dispatches matches to named handlers.
//!
//! Features:
//! - Key combination strings (`ctrl+shift+a`, `space:keyup`, `space enter`)
//! - Legacy key name normalization (`spacebar`, `ArrowUp`, numeric key codes)
//! - Exact modifier matching
//! - Per-element binding tables with behavior composition

mod behavior;
pub mod error;
pub mod event;
mod host;
pub mod matcher;
pub mod parser;
pub mod platform;

pub use behavior::BehaviorResolver;
pub use error::BindingError;
pub use event::{EventCode, EventType, KeyboardEvent, KeyboardEventSource};
pub use host::{
    BindingOrigin, DispatchOutcome, KeyBindingEvent, KeyBindingHost, KeyHandler,
    RegisteredBinding,
};
pub use matcher::{KeybindingMatcher, keyboard_event_matches_keys, matches};
pub use parser::{
    KeyCombo, Modifier, Modifiers, NamedKey, ParseError, ParsedKey, parse_key_combo,
    parse_key_list,
};

use a11y_keys_config::Config;

/// Build the binding table of every element in a config.
///
/// Fails on the first element whose bindings cannot be registered.
pub fn hosts_from_config(config: &Config) -> Result<Vec<KeyBindingHost>, BindingError> {
    log::info!(
        "Building key binding hosts for {} elements",
        config.elements.len()
    );
    config
        .elements
        .iter()
        .map(|element| KeyBindingHost::from_config(element, &config.behaviors))
        .collect()
}
