//! a11y-keys: declarative keyboard bindings for accessible UI elements.
//!
//! The binary replays keyboard events against element binding tables loaded
//! from YAML. The matching itself lives in `a11y-keys-bindings`; this crate
//! adds the CLI and the log bridge.

/// Application version (root crate version, for use by sub-crates).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod debug;

pub use a11y_keys_bindings as keybindings;
pub use a11y_keys_config as config;
