//! Per-element binding tables.
//!
//! A [`KeyBindingHost`] holds the `{combination, handler}` pairs of one
//! element in registration order:
//!
//! 1. bindings contributed by composed behaviors (see [`BehaviorResolver`])
//! 2. bindings declared on the element
//! 3. bindings added imperatively with [`KeyBindingHost::add_own_key_binding`]
//!
//! Dispatch invokes every matching binding in that order.

use crate::behavior::BehaviorResolver;
use crate::error::BindingError;
use crate::event::{KeyboardEvent, KeyboardEventSource};
use crate::matcher::{self, KeybindingMatcher};
use crate::parser::{KeyCombo, ParseError, ParsedKey, parse_key_list};
use a11y_keys_config::{BehaviorConfig, ElementConfig, KeyBinding};
use std::fmt;

/// Where a registered binding came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingOrigin {
    /// Contributed by the named behavior
    Behavior(String),
    /// Declared on the host element
    Declared,
    /// Added imperatively at runtime
    Own,
}

impl fmt::Display for BindingOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingOrigin::Behavior(name) => write!(f, "behavior {name}"),
            BindingOrigin::Declared => f.write_str("declared"),
            BindingOrigin::Own => f.write_str("own"),
        }
    }
}

/// One registered combination and the handler it triggers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredBinding {
    /// The combination token as written, e.g. "ctrl+shift+a"
    pub combo_source: String,
    pub combo: KeyCombo,
    pub handler: String,
    pub origin: BindingOrigin,
}

/// Payload forwarded to a handler when its binding matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindingEvent {
    /// The combination token that matched
    pub combo: String,
    /// The normalized key of the event
    pub key: ParsedKey,
    /// The original keyboard event
    pub keyboard_event: KeyboardEvent,
}

impl KeyboardEventSource for KeyBindingEvent {
    fn keyboard_event(&self) -> &KeyboardEvent {
        &self.keyboard_event
    }
}

/// Receiver of matched bindings, typically the element owning the host.
pub trait KeyHandler {
    fn handle_key(&mut self, handler: &str, event: &KeyBindingEvent);
}

impl<F> KeyHandler for F
where
    F: FnMut(&str, &KeyBindingEvent),
{
    fn handle_key(&mut self, handler: &str, event: &KeyBindingEvent) {
        (self)(handler, event)
    }
}

/// Result of dispatching one keyboard event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Number of handlers invoked
    pub handled: usize,
    /// The host asked for the event not to propagate further
    pub propagation_stopped: bool,
}

/// Binding table owned by a single element.
#[derive(Debug, Clone, Default)]
pub struct KeyBindingHost {
    name: String,
    /// Behavior and declared bindings
    bindings: Vec<RegisteredBinding>,
    /// Imperatively added bindings, always dispatched last
    own_bindings: Vec<RegisteredBinding>,
    stop_keyboard_event_propagation: bool,
}

impl KeyBindingHost {
    /// Create an empty host.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Build a host from an element config, registering the bindings of its
    /// composed behaviors first and its own declarations after.
    ///
    /// Any malformed key string, unknown behavior or composition cycle fails
    /// the whole host.
    pub fn from_config(
        element: &ElementConfig,
        behaviors: &[BehaviorConfig],
    ) -> Result<Self, BindingError> {
        let mut host = Self::new(&element.name);
        host.stop_keyboard_event_propagation = element.stop_keyboard_event_propagation;

        let resolver = BehaviorResolver::new(behaviors);
        for behavior in resolver.flatten(&element.name, &element.behaviors)? {
            host.add_behavior_bindings(&behavior.name, &behavior.key_bindings)?;
        }
        for binding in &element.key_bindings {
            host.add_key_binding(&binding.key, &binding.handler)?;
        }

        log::debug!(
            "Built key binding host '{}' with {} bindings",
            host.name,
            host.len()
        );
        Ok(host)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stop_keyboard_event_propagation(&self) -> bool {
        self.stop_keyboard_event_propagation
    }

    pub fn set_stop_keyboard_event_propagation(&mut self, stop: bool) {
        self.stop_keyboard_event_propagation = stop;
    }

    /// Register the bindings a behavior contributes.
    pub fn add_behavior_bindings(
        &mut self,
        behavior: &str,
        bindings: &[KeyBinding],
    ) -> Result<(), BindingError> {
        // Parse everything first so a bad entry installs nothing
        let mut parsed = Vec::new();
        for binding in bindings {
            parsed.extend(
                registered(
                    &binding.key,
                    &binding.handler,
                    BindingOrigin::Behavior(behavior.to_string()),
                )
                .map_err(|source| invalid(behavior, &binding.key, &binding.handler, source))?,
            );
        }
        self.bindings.extend(parsed);
        Ok(())
    }

    /// Register a binding declared on the element itself.
    pub fn add_key_binding(&mut self, keys: &str, handler: &str) -> Result<(), BindingError> {
        let parsed = registered(keys, handler, BindingOrigin::Declared)
            .map_err(|source| invalid(&self.name, keys, handler, source))?;
        self.bindings.extend(parsed);
        Ok(())
    }

    /// Imperatively add a binding. It fires after every declared binding.
    ///
    /// On error the table is left unchanged.
    pub fn add_own_key_binding(&mut self, keys: &str, handler: &str) -> Result<(), ParseError> {
        let parsed = registered(keys, handler, BindingOrigin::Own)?;
        log::debug!(
            "Host '{}': added own key binding '{}' -> {}",
            self.name,
            keys,
            handler
        );
        self.own_bindings.extend(parsed);
        Ok(())
    }

    /// Remove every imperatively added binding. Declared and behavior
    /// bindings are kept.
    pub fn remove_own_key_bindings(&mut self) {
        log::debug!(
            "Host '{}': removing {} own key bindings",
            self.name,
            self.own_bindings.len()
        );
        self.own_bindings.clear();
    }

    /// All registered bindings in dispatch order.
    pub fn bindings(&self) -> impl Iterator<Item = &RegisteredBinding> {
        self.bindings.iter().chain(self.own_bindings.iter())
    }

    pub fn len(&self) -> usize {
        self.bindings.len() + self.own_bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Collect the handler invocations an event triggers, in dispatch order.
    pub fn matching(&self, event: &KeyboardEvent) -> Vec<(&str, KeyBindingEvent)> {
        let matcher = KeybindingMatcher::from_event(event);
        let Some(key) = matcher.key() else {
            log::trace!("Host '{}': event has no key information", self.name);
            return Vec::new();
        };

        self.bindings()
            .filter(|binding| matcher.matches(&binding.combo))
            .map(|binding| {
                (
                    binding.handler.as_str(),
                    KeyBindingEvent {
                        combo: binding.combo_source.clone(),
                        key: key.clone(),
                        keyboard_event: event.clone(),
                    },
                )
            })
            .collect()
    }

    /// Invoke the handler of every binding the event matches.
    pub fn dispatch<H>(&self, event: &KeyboardEvent, target: &mut H) -> DispatchOutcome
    where
        H: KeyHandler + ?Sized,
    {
        let invocations = self.matching(event);
        for (handler, payload) in &invocations {
            log::debug!(
                "Host '{}': '{}' matched, invoking {}",
                self.name,
                payload.combo,
                handler
            );
            target.handle_key(handler, payload);
        }

        DispatchOutcome {
            handled: invocations.len(),
            propagation_stopped: self.stop_keyboard_event_propagation,
        }
    }

    /// Check an event (or handler payload) against a key list.
    pub fn keyboard_event_matches_keys<E>(&self, event: &E, keys: &str) -> Result<bool, ParseError>
    where
        E: KeyboardEventSource + ?Sized,
    {
        matcher::keyboard_event_matches_keys(event, keys)
    }
}

fn registered(
    keys: &str,
    handler: &str,
    origin: BindingOrigin,
) -> Result<Vec<RegisteredBinding>, ParseError> {
    Ok(parse_key_list(keys)?
        .into_iter()
        .map(|(combo_source, combo)| RegisteredBinding {
            combo_source,
            combo,
            handler: handler.to_string(),
            origin: origin.clone(),
        })
        .collect())
}

fn invalid(owner: &str, keys: &str, handler: &str, source: ParseError) -> BindingError {
    log::warn!(
        "Invalid keybinding '{}' for handler '{}' on '{}': {}",
        keys,
        handler,
        owner,
        source
    );
    BindingError::InvalidKeys {
        owner: owner.to_string(),
        keys: keys.to_string(),
        handler: handler.to_string(),
        source,
    }
}
