//! Behavior composition.
//!
//! Flattens the behaviors an element composes into the fixed order their
//! bindings are registered in: depth-first, in declaration order, with each
//! behavior's own composed behaviors ahead of it. A behavior reached more
//! than once contributes only at its first position.

use crate::error::BindingError;
use a11y_keys_config::BehaviorConfig;
use std::collections::{HashMap, HashSet};

/// Looks up behaviors by name and flattens composition chains.
#[derive(Debug)]
pub struct BehaviorResolver<'a> {
    by_name: HashMap<&'a str, &'a BehaviorConfig>,
}

impl<'a> BehaviorResolver<'a> {
    pub fn new(behaviors: &'a [BehaviorConfig]) -> Self {
        let by_name = behaviors.iter().map(|b| (b.name.as_str(), b)).collect();
        Self { by_name }
    }

    /// Flatten the behaviors composed by `owner` into registration order.
    pub fn flatten(
        &self,
        owner: &str,
        roots: &[String],
    ) -> Result<Vec<&'a BehaviorConfig>, BindingError> {
        let mut walk = Walk::default();
        for root in roots {
            self.visit(owner, root, &mut walk)?;
        }
        Ok(walk.ordered)
    }

    fn visit(&self, owner: &str, name: &str, walk: &mut Walk<'a>) -> Result<(), BindingError> {
        if walk.done.contains(name) {
            return Ok(());
        }

        if let Some(start) = walk.stack.iter().position(|n| *n == name) {
            let mut path: Vec<String> = walk.stack[start..].iter().map(|n| n.to_string()).collect();
            path.push(name.to_string());
            return Err(BindingError::CompositionCycle { path });
        }

        let behavior =
            self.by_name
                .get(name)
                .copied()
                .ok_or_else(|| BindingError::UnknownBehavior {
                    owner: owner.to_string(),
                    behavior: name.to_string(),
                })?;

        walk.stack.push(behavior.name.as_str());
        for child in &behavior.behaviors {
            self.visit(&behavior.name, child, walk)?;
        }
        walk.stack.pop();

        walk.done.insert(behavior.name.as_str());
        walk.ordered.push(behavior);
        Ok(())
    }
}

#[derive(Default)]
struct Walk<'a> {
    stack: Vec<&'a str>,
    done: HashSet<&'a str>,
    ordered: Vec<&'a BehaviorConfig>,
}
