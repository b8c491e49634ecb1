//! Subcommand implementations.
//!
//! Each command writes its report to the given writer so it can be driven
//! from tests as well as from `main`.

use a11y_keys_bindings::{
    KeyBindingEvent, KeyBindingHost, KeyboardEvent, hosts_from_config,
    keyboard_event_matches_keys,
};
use a11y_keys_config::Config;
use anyhow::{Context, Result, bail};
use std::io::{BufRead, Write};
use std::path::Path;

/// Load the config from `path`, or from the default location.
///
/// The config's log level is applied unless the CLI or `RUST_LOG` set one.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load().context("Failed to load config")?,
    };
    crate::debug::apply_config_level(config.log_level.to_level_filter());
    Ok(config)
}

/// Build every element's binding table and report each binding in
/// dispatch order, tagged with where it came from.
pub fn run_check(config: &Config, out: &mut impl Write) -> Result<()> {
    let hosts = hosts_from_config(config).context("Invalid key bindings")?;

    for host in &hosts {
        writeln!(out, "{}: {} bindings", host.name(), host.len())?;
        for binding in host.bindings() {
            writeln!(
                out,
                "  {} -> {} [{}]",
                binding.combo_source, binding.handler, binding.origin
            )?;
        }
    }
    writeln!(
        out,
        "OK: {} behaviors, {} elements",
        config.behaviors.len(),
        hosts.len()
    )?;
    Ok(())
}

/// Replay JSON-lines keyboard events against one element.
///
/// Prints one line per handler invocation and returns the total number of
/// invocations. Blank lines are skipped.
pub fn run_dispatch(
    config: &Config,
    element: &str,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<usize> {
    let Some(element_config) = config.element(element) else {
        bail!("Unknown element '{element}'");
    };
    let host = KeyBindingHost::from_config(element_config, &config.behaviors)
        .with_context(|| format!("Invalid key bindings for '{element}'"))?;
    log::info!(
        "Dispatching events to '{}' ({} bindings)",
        host.name(),
        host.len()
    );

    let mut total = 0;
    for (index, line) in input.lines().enumerate() {
        let line = line.context("Failed to read events")?;
        if line.trim().is_empty() {
            continue;
        }
        let event: KeyboardEvent = serde_json::from_str(&line)
            .with_context(|| format!("Invalid keyboard event on line {}", index + 1))?;

        let mut invoked = Vec::new();
        let outcome = host.dispatch(&event, &mut |handler: &str, payload: &KeyBindingEvent| {
            invoked.push(format!(
                "{}: {} ({}, key={})",
                host.name(),
                handler,
                payload.combo,
                payload.key
            ));
        });
        for entry in &invoked {
            writeln!(out, "{entry}")?;
        }
        if outcome.propagation_stopped {
            log::debug!("'{}' stopped propagation of line {}", host.name(), index + 1);
        }
        total += outcome.handled;
    }

    Ok(total)
}

/// Check a single JSON keyboard event against a key list and print the result.
pub fn run_match(keys: &str, event_json: &str, out: &mut impl Write) -> Result<bool> {
    let event: KeyboardEvent =
        serde_json::from_str(event_json).context("Invalid keyboard event JSON")?;
    let matched = keyboard_event_matches_keys(&event, keys)
        .with_context(|| format!("Invalid key list '{keys}'"))?;
    writeln!(out, "{matched}")?;
    Ok(matched)
}
