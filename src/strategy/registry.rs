//! Name-keyed strategy registry

use std::collections::HashMap;

use tracing::debug;

use crate::error::Error;
use crate::strategy::{catalog, Category, StrategyDef};
use crate::Result;

/// Lookup table from display name to strategy descriptor.
///
/// Iteration order is registration order, so the same registry always
/// evaluates strategies in the same sequence.
#[derive(Debug, Clone)]
pub struct Registry {
    strategies: Vec<StrategyDef>,
    index: HashMap<&'static str, usize>,
}

impl Registry {
    /// Empty registry; useful for hosting only custom strategies.
    pub fn new() -> Self {
        Registry {
            strategies: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Registry pre-loaded with the full built-in catalogue.
    pub fn builtin() -> Self {
        let mut registry = Registry::new();
        for def in catalog::all() {
            let slot = registry.strategies.len();
            let previous = registry.index.insert(def.name, slot);
            debug_assert!(previous.is_none(), "catalogue names are unique");
            registry.strategies.push(def);
        }
        debug!("Loaded {} built-in strategies", registry.strategies.len());
        registry
    }

    /// Add a strategy. Names are unique; re-registering an existing name
    /// is rejected rather than silently replacing the earlier entry.
    pub fn register(&mut self, def: StrategyDef) -> Result<()> {
        if self.index.contains_key(def.name) {
            return Err(Error::DuplicateStrategy(def.name.to_string()));
        }
        let slot = self.strategies.len();
        self.index.insert(def.name, slot);
        self.strategies.push(def);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&StrategyDef> {
        self.index.get(name).map(|&slot| &self.strategies[slot])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.strategies.iter().map(|def| def.name)
    }

    /// All descriptors in registration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &StrategyDef> {
        self.strategies.iter()
    }

    /// Descriptors in one category, in registration order.
    pub fn by_category(&self, category: Category) -> Vec<&StrategyDef> {
        self.strategies
            .iter()
            .filter(|def| def.category == category)
            .collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::builtin()
    }
}
