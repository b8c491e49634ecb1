//! Configuration system for a11y-keys.
//!
//! This crate provides configuration loading and validation for key binding
//! hosts. It includes:
//!
//! - Key binding declarations (`KeyBinding`)
//! - Reusable behaviors and the elements that compose them
//! - Diagnostic log level
//! - Typed configuration errors

pub mod config;
pub mod error;
mod types;

// Re-export main types for convenience
pub use config::Config;
pub use error::ConfigError;
pub use types::{BehaviorConfig, ElementConfig, KeyBinding, LogLevel};
