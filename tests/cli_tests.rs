//! Integration tests for the a11y-keys subcommands.

use a11y_keys::cli::commands::{load_config, run_check, run_dispatch, run_match};
use std::io::{Cursor, Write};

const CONFIG: &str = r#"
log_level: warn
behaviors:
  - name: keys-test
  - name: a11y-enter
    behaviors: [keys-test]
    key_bindings:
      - { key: enter, handler: _enterHandler }
elements:
  - name: x-a11y-behavior-keys
    behaviors: [a11y-enter]
    key_bindings:
      - { key: "space", handler: _spaceHandler }
      - { key: "ctrl+shift+a", handler: _comboHandler }
  - name: x-a11y-alternate-event-keys
    key_bindings:
      - { key: "space:keyup", handler: _keyHandler }
"#;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn check_reports_binding_counts() {
    let file = write_config(CONFIG);
    let config = load_config(Some(file.path())).unwrap();

    let mut out: Vec<u8> = Vec::new();
    run_check(&config, &mut out).unwrap();
    let report = String::from_utf8(out).unwrap();

    assert!(report.contains("x-a11y-behavior-keys: 3 bindings"));
    assert!(report.contains("x-a11y-alternate-event-keys: 1 bindings"));
    assert!(report.contains("OK: 2 behaviors, 2 elements"));
}

#[test]
fn check_lists_bindings_in_dispatch_order() {
    let file = write_config(CONFIG);
    let config = load_config(Some(file.path())).unwrap();

    let mut out: Vec<u8> = Vec::new();
    run_check(&config, &mut out).unwrap();
    let report = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = report.lines().collect();

    assert_eq!(
        &lines[..4],
        &[
            "x-a11y-behavior-keys: 3 bindings",
            "  enter -> _enterHandler [behavior a11y-enter]",
            "  space -> _spaceHandler [declared]",
            "  ctrl+shift+a -> _comboHandler [declared]",
        ]
    );
}

#[test]
fn check_rejects_malformed_binding() {
    let file = write_config(
        r#"
elements:
  - name: x-bad
    key_bindings:
      - { key: "ctrl+unknownmod+a", handler: _h }
"#,
    );
    let config = load_config(Some(file.path())).unwrap();

    let err = run_check(&config, &mut std::io::sink()).unwrap_err();
    assert!(format!("{err:#}").contains("unknownmod"));
}

#[test]
fn load_config_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_config(Some(&dir.path().join("nope.yaml"))).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to load config"));
}

#[test]
fn dispatch_prints_invocations_in_order() {
    let file = write_config(CONFIG);
    let config = load_config(Some(file.path())).unwrap();

    let events = [
        r#"{"type":"keydown","keyCode":13}"#,
        r#"{"type":"keyup","keyCode":13}"#,
        "",
        r#"{"type":"keydown","key":"spacebar"}"#,
        r#"{"type":"keydown","key":"A","ctrlKey":true,"shiftKey":true}"#,
        r#"{"type":"keydown","key":"A","ctrlKey":true,"shiftKey":true,"altKey":true}"#,
    ]
    .join("\n");

    let mut out: Vec<u8> = Vec::new();
    let total = run_dispatch(
        &config,
        "x-a11y-behavior-keys",
        Cursor::new(events),
        &mut out,
    )
    .unwrap();

    assert_eq!(total, 3);
    let lines: Vec<String> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();
    assert_eq!(
        lines,
        vec![
            "x-a11y-behavior-keys: _enterHandler (enter, key=enter)",
            "x-a11y-behavior-keys: _spaceHandler (space, key=space)",
            "x-a11y-behavior-keys: _comboHandler (ctrl+shift+a, key=a)",
        ]
    );
}

#[test]
fn dispatch_respects_event_type() {
    let file = write_config(CONFIG);
    let config = load_config(Some(file.path())).unwrap();

    let events = "{\"type\":\"keydown\",\"keyCode\":32}\n{\"type\":\"keyup\",\"keyCode\":32}\n";
    let mut out: Vec<u8> = Vec::new();
    let total = run_dispatch(
        &config,
        "x-a11y-alternate-event-keys",
        Cursor::new(events),
        &mut out,
    )
    .unwrap();
    assert_eq!(total, 1);
}

#[test]
fn dispatch_unknown_element_fails() {
    let file = write_config(CONFIG);
    let config = load_config(Some(file.path())).unwrap();

    let err = run_dispatch(&config, "x-missing", Cursor::new(""), &mut std::io::sink()).unwrap_err();
    assert!(err.to_string().contains("x-missing"));
}

#[test]
fn dispatch_reports_bad_event_line() {
    let file = write_config(CONFIG);
    let config = load_config(Some(file.path())).unwrap();

    let events = "{\"type\":\"keydown\",\"keyCode\":13}\nnot json\n";
    let err = run_dispatch(
        &config,
        "x-a11y-behavior-keys",
        Cursor::new(events),
        &mut std::io::sink(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("line 2"));
}

#[test]
fn match_prints_result() {
    let mut out: Vec<u8> = Vec::new();
    let matched = run_match("space enter", r#"{"type":"keydown","key":"Return"}"#, &mut out).unwrap();
    assert!(matched);
    assert_eq!(String::from_utf8(out).unwrap(), "true\n");

    let mut out: Vec<u8> = Vec::new();
    let matched = run_match("up", r#"{"type":"keyup","key":"ArrowUp"}"#, &mut out).unwrap();
    assert!(!matched);
    assert_eq!(String::from_utf8(out).unwrap(), "false\n");
}

#[test]
fn match_accepts_numeric_code() {
    let mut out: Vec<u8> = Vec::new();
    let matched = run_match(
        "ctrl+shift+a",
        r#"{"type":"keydown","ctrlKey":true,"shiftKey":true,"keyCode":65,"code":65}"#,
        &mut out,
    )
    .unwrap();
    assert!(matched);

    let matched = run_match(
        "space:keyup",
        r#"{"type":"keyup","code":32}"#,
        &mut std::io::sink(),
    )
    .unwrap();
    assert!(matched);
}

#[test]
fn cli_reports_crate_version() {
    use clap::CommandFactory;
    let command = a11y_keys::cli::Cli::command();
    assert_eq!(command.get_version(), Some(a11y_keys::VERSION));
}

#[test]
fn match_rejects_malformed_key_list() {
    let err = run_match("shift+", r#"{"key":"a"}"#, &mut std::io::sink()).unwrap_err();
    assert!(format!("{err:#}").contains("Invalid key list"));
}
