//! Typed error types for binding registration.

use crate::parser::ParseError;
use thiserror::Error;

/// Errors raised while building or extending a binding table.
///
/// All of these are configuration errors: the offending binding is never
/// installed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    /// A key string declared on a host or behavior failed to parse.
    #[error("Invalid key binding '{keys}' for handler '{handler}' on '{owner}': {source}")]
    InvalidKeys {
        /// Host or behavior that declared the binding.
        owner: String,
        keys: String,
        handler: String,
        #[source]
        source: ParseError,
    },

    /// A composed behavior name is not known.
    #[error("'{owner}' composes unknown behavior '{behavior}'")]
    UnknownBehavior { owner: String, behavior: String },

    /// Behavior composition loops back on itself.
    ///
    /// The path lists the behaviors from the first repeated one back to itself.
    #[error("Behavior composition cycle: {}", path.join(" -> "))]
    CompositionCycle { path: Vec<String> },
}
