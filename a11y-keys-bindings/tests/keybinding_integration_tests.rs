//! Integration tests for a11y-keys-bindings.
//!
//! These tests exercise the full parse → host → dispatch pipeline the way an
//! element uses it: bindings declared in config, composed behaviors, and
//! bindings added at runtime.

use a11y_keys_bindings::{
    BindingError, EventType, KeyBindingEvent, KeyBindingHost, KeyHandler, KeyboardEvent,
    KeyboardEventSource, NamedKey, ParseError, ParsedKey, hosts_from_config,
    keyboard_event_matches_keys, matches, parse_key_combo,
};
use a11y_keys_config::{BehaviorConfig, Config, ElementConfig, KeyBinding};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Element that counts handler invocations, like a test fixture would.
#[derive(Default)]
struct KeysTestElement {
    key_count: usize,
    calls: Vec<String>,
    last_event: Option<KeyBindingEvent>,
}

impl KeyHandler for KeysTestElement {
    fn handle_key(&mut self, handler: &str, event: &KeyBindingEvent) {
        self.key_count += 1;
        self.calls.push(handler.to_string());
        self.last_event = Some(event.clone());
    }
}

fn keys_test_behavior() -> BehaviorConfig {
    BehaviorConfig {
        name: "keys-test".to_string(),
        ..BehaviorConfig::default()
    }
}

fn element(name: &str, behaviors: &[&str], bindings: &[(&str, &str)]) -> ElementConfig {
    ElementConfig {
        name: name.to_string(),
        behaviors: behaviors.iter().map(|b| b.to_string()).collect(),
        key_bindings: bindings
            .iter()
            .map(|(key, handler)| KeyBinding::new(*key, *handler))
            .collect(),
        stop_keyboard_event_propagation: false,
    }
}

fn host(name: &str, bindings: &[(&str, &str)]) -> KeyBindingHost {
    KeyBindingHost::from_config(
        &element(name, &["keys-test"], bindings),
        &[keys_test_behavior()],
    )
    .unwrap()
}

/// Key down then key up, as a physical press produces.
fn press_and_release(host: &KeyBindingHost, target: &mut KeysTestElement, key_code: u32) {
    host.dispatch(&KeyboardEvent::keydown().with_key_code(key_code), target);
    host.dispatch(&KeyboardEvent::keyup().with_key_code(key_code), target);
}

fn press_space(host: &KeyBindingHost, target: &mut KeysTestElement) {
    press_and_release(host, target, 32);
}

fn press_enter(host: &KeyBindingHost, target: &mut KeysTestElement) {
    press_and_release(host, target, 13);
}

// ---------------------------------------------------------------------------
// Basic keys
// ---------------------------------------------------------------------------

#[test]
fn basic_handler_fires_for_bound_key() {
    let keys = host("x-a11y-basic-keys", &[("space", "_keyHandler")]);
    let mut el = KeysTestElement::default();

    press_space(&keys, &mut el);
    assert_eq!(el.key_count, 1);
}

#[test]
fn basic_handler_ignores_other_keys() {
    let keys = host("x-a11y-basic-keys", &[("space", "_keyHandler")]);
    let mut el = KeysTestElement::default();

    press_enter(&keys, &mut el);
    assert_eq!(el.key_count, 0);
}

#[test]
fn bindings_can_be_added_imperatively() {
    let mut keys = host("x-a11y-basic-keys", &[("space", "_keyHandler")]);
    let mut el = KeysTestElement::default();

    keys.add_own_key_binding("enter", "_keyHandler").unwrap();

    press_enter(&keys, &mut el);
    assert_eq!(el.key_count, 1);

    press_space(&keys, &mut el);
    assert_eq!(el.key_count, 2);
}

#[test]
fn imperatively_added_bindings_can_be_removed() {
    let mut keys = host("x-a11y-basic-keys", &[("space", "_keyHandler")]);
    let mut el = KeysTestElement::default();

    keys.add_own_key_binding("enter", "_keyHandler").unwrap();
    keys.remove_own_key_bindings();

    press_enter(&keys, &mut el);
    assert_eq!(el.key_count, 0);

    press_space(&keys, &mut el);
    assert_eq!(el.key_count, 1);
}

#[test]
fn spacebar_is_the_same_as_space() {
    let event = KeyboardEvent::keydown().with_key("spacebar");
    assert_eq!(keyboard_event_matches_keys(&event, "space"), Ok(true));
}

#[test]
fn matching_can_be_done_imperatively() {
    let event = KeyboardEvent::keydown().with_key_code(65);
    assert_eq!(keyboard_event_matches_keys(&event, "a"), Ok(true));
}

#[test]
fn matching_accepts_handler_payload() {
    let keys = host("x-a11y-basic-keys", &[("space", "_keyHandler")]);
    let mut el = KeysTestElement::default();

    press_space(&keys, &mut el);
    let payload = el.last_event.expect("handler should have run");

    assert_eq!(payload.keyboard_event().event_type, EventType::Keydown);
    assert_eq!(payload.combo, "space");
    assert_eq!(payload.key, ParsedKey::Named(NamedKey::Space));
    assert_eq!(keyboard_event_matches_keys(&payload, "space"), Ok(true));
}

#[test]
fn arrow_key_name_variations() {
    let mut event = KeyboardEvent::keydown().with_key("up");
    assert_eq!(keyboard_event_matches_keys(&event, "up"), Ok(true));
    event.key = Some("ArrowUp".to_string());
    assert_eq!(keyboard_event_matches_keys(&event, "up"), Ok(true));
}

// ---------------------------------------------------------------------------
// Combo keys
// ---------------------------------------------------------------------------

#[test]
fn combo_fires_when_pressed() {
    let keys = host("x-a11y-combo-keys", &[("ctrl+shift+a", "_keyHandler")]);
    let mut el = KeysTestElement::default();

    let event = KeyboardEvent::keydown()
        .with_ctrl(true)
        .with_shift(true)
        .with_key_code(65)
        .with_numeric_code(65);
    keys.dispatch(&event, &mut el);

    assert_eq!(el.key_count, 1);
}

#[test]
fn combo_fires_from_code_alone() {
    let keys = host("x-a11y-combo-keys", &[("ctrl+shift+a", "_keyHandler")]);
    let mut el = KeysTestElement::default();

    let event = KeyboardEvent::keydown()
        .with_ctrl(true)
        .with_shift(true)
        .with_numeric_code(65);
    keys.dispatch(&event, &mut el);

    assert_eq!(el.key_count, 1);
    let payload = el.last_event.unwrap();
    assert_eq!(payload.key, ParsedKey::Character('a'));
}

#[test]
fn combo_requires_exact_modifiers() {
    let keys = host("x-a11y-combo-keys", &[("ctrl+shift+a", "_keyHandler")]);
    let mut el = KeysTestElement::default();

    let extra_alt = KeyboardEvent::keydown()
        .with_ctrl(true)
        .with_shift(true)
        .with_alt(true)
        .with_key("a");
    keys.dispatch(&extra_alt, &mut el);

    let missing_shift = KeyboardEvent::keydown().with_ctrl(true).with_key("a");
    keys.dispatch(&missing_shift, &mut el);

    assert_eq!(el.key_count, 0);
}

// ---------------------------------------------------------------------------
// Alternative event keys
// ---------------------------------------------------------------------------

#[test]
fn alternative_event_type_fires_on_keyup_only() {
    let keys = host("x-a11y-alternate-event-keys", &[("space:keyup", "_keyHandler")]);
    let mut el = KeysTestElement::default();

    keys.dispatch(&KeyboardEvent::keydown().with_key_code(32), &mut el);
    assert_eq!(el.key_count, 0);

    keys.dispatch(&KeyboardEvent::keyup().with_key_code(32), &mut el);
    assert_eq!(el.key_count, 1);
}

// ---------------------------------------------------------------------------
// Behavior keys
// ---------------------------------------------------------------------------

#[test]
fn bindings_in_behaviors_are_transitive() {
    let behaviors = vec![
        keys_test_behavior(),
        BehaviorConfig {
            name: "a11y-enter".to_string(),
            behaviors: Vec::new(),
            key_bindings: vec![KeyBinding::new("enter", "_keyHandler")],
        },
    ];
    let keys = KeyBindingHost::from_config(
        &element(
            "x-a11y-behavior-keys",
            &["keys-test", "a11y-enter"],
            &[("space", "_keyHandler")],
        ),
        &behaviors,
    )
    .unwrap();
    let mut el = KeysTestElement::default();

    press_enter(&keys, &mut el);
    press_space(&keys, &mut el);

    assert_eq!(el.key_count, 2);
}

#[test]
fn overlapping_bindings_fire_behaviors_first_then_registration_order() {
    let behaviors = vec![
        BehaviorConfig {
            name: "base".to_string(),
            behaviors: Vec::new(),
            key_bindings: vec![KeyBinding::new("space", "b0")],
        },
        BehaviorConfig {
            name: "composed".to_string(),
            behaviors: vec!["base".to_string()],
            key_bindings: Vec::new(),
        },
    ];
    let mut keys = KeyBindingHost::from_config(
        &element("x-overlap", &["composed"], &[("space", "b1"), ("Spacebar", "b2")]),
        &behaviors,
    )
    .unwrap();
    keys.add_own_key_binding("space", "b3").unwrap();

    let mut el = KeysTestElement::default();
    let outcome = keys.dispatch(&KeyboardEvent::keydown().with_key(" "), &mut el);

    assert_eq!(outcome.handled, 4);
    assert_eq!(el.calls, vec!["b0", "b1", "b2", "b3"]);
}

#[test]
fn composition_cycle_is_a_configuration_error() {
    let behaviors = vec![
        BehaviorConfig {
            name: "a".to_string(),
            behaviors: vec!["b".to_string()],
            key_bindings: Vec::new(),
        },
        BehaviorConfig {
            name: "b".to_string(),
            behaviors: vec!["a".to_string()],
            key_bindings: Vec::new(),
        },
    ];
    let result = KeyBindingHost::from_config(&element("x-cycle", &["a"], &[]), &behaviors);
    assert!(matches!(result, Err(BindingError::CompositionCycle { .. })));
}

// ---------------------------------------------------------------------------
// Parsing properties
// ---------------------------------------------------------------------------

#[test]
fn parsing_is_deterministic() {
    for spec in ["space", "ctrl+shift+a", "shift+up:keyup", "meta+k", "alt+Pause"] {
        assert_eq!(parse_key_combo(spec), parse_key_combo(spec));
    }
}

#[test]
fn malformed_specs_fail() {
    assert_eq!(parse_key_combo(""), Err(ParseError::EmptyCombination));
    assert!(matches!(
        parse_key_combo(":keyup"),
        Err(ParseError::EmptyKey(_))
    ));
    assert!(matches!(
        parse_key_combo("ctrl+unknownmod+a"),
        Err(ParseError::UnknownModifier { .. })
    ));
}

#[test]
fn space_combo_respects_event_type() {
    let space = parse_key_combo("space").unwrap();
    assert!(matches(&KeyboardEvent::keydown().with_key("space"), &space));
    assert!(!matches(&KeyboardEvent::keyup().with_key("space"), &space));
}

#[test]
fn event_without_key_information_does_not_match() {
    let keys = host("x-a11y-basic-keys", &[("space", "_keyHandler")]);
    let mut el = KeysTestElement::default();

    let outcome = keys.dispatch(&KeyboardEvent::keydown().with_key_code(255), &mut el);
    assert_eq!(outcome.handled, 0);
    assert_eq!(el.key_count, 0);
}

// ---------------------------------------------------------------------------
// Config pipeline
// ---------------------------------------------------------------------------

#[test]
fn hosts_built_from_yaml_dispatch_independently() {
    let config = Config::from_yaml_str(
        r#"
behaviors:
  - name: a11y-enter
    key_bindings:
      - { key: enter, handler: _activate }
elements:
  - name: x-button
    behaviors: [a11y-enter]
    stop_keyboard_event_propagation: true
    key_bindings:
      - { key: "space:keyup", handler: _activate }
  - name: x-list
    key_bindings:
      - { key: "up down", handler: _move }
"#,
    )
    .unwrap();
    let mut hosts = hosts_from_config(&config).unwrap();

    let mut button = KeysTestElement::default();
    let outcome = hosts[0].dispatch(&KeyboardEvent::keydown().with_key("Enter"), &mut button);
    assert_eq!(outcome.handled, 1);
    assert!(outcome.propagation_stopped);

    let mut list = KeysTestElement::default();
    hosts[1].dispatch(&KeyboardEvent::keydown().with_key("ArrowDown"), &mut list);
    hosts[1].dispatch(&KeyboardEvent::keydown().with_key("Enter"), &mut list);
    assert_eq!(list.calls, vec!["_move"]);

    // Runtime bindings on one host do not leak into another
    hosts[1].add_own_key_binding("enter", "_select").unwrap();
    let mut button_again = KeysTestElement::default();
    hosts[0].dispatch(&KeyboardEvent::keydown().with_key("Enter"), &mut button_again);
    assert_eq!(button_again.calls, vec!["_activate"]);
}
