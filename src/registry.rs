//! The catalog of breakpoints known to a marshaller.

use std::rc::Rc;

use indexmap::IndexMap;

use crate::{
    breakpoint::{Breakpoint, default_breakpoints, merge_by_alias, orientation_breakpoints},
    config::MediaConfig,
};

/// Immutable lookup table of [`Breakpoint`]s, ordered by descending priority.
///
/// Lookups never fail loudly: an unknown alias or query is `None`, which callers treat as
/// the base breakpoint.
#[derive(Debug, Clone)]
pub struct BreakpointRegistry {
    items: IndexMap<String, Rc<Breakpoint>>,
    base: Rc<Breakpoint>,
}

impl Default for BreakpointRegistry {
    fn default() -> Self {
        Self::new(&MediaConfig::default())
    }
}

impl BreakpointRegistry {
    pub fn new(config: &MediaConfig) -> Self {
        let mut builtin = Vec::new();
        if !config.disable_default_breakpoints {
            builtin.extend(default_breakpoints());
        }
        if config.add_orientation_breakpoints {
            builtin.extend(orientation_breakpoints());
        }
        Self::from_breakpoints(merge_by_alias(builtin, config.breakpoints.iter().cloned()))
    }

    /// Builds a registry from an explicit list. Later duplicates of an alias win.
    pub fn from_breakpoints(breakpoints: impl IntoIterator<Item = Breakpoint>) -> Self {
        let mut breakpoints: Vec<_> = breakpoints
            .into_iter()
            .filter(|bp| !bp.is_base())
            .collect();
        breakpoints.sort_by(|a, b| b.priority.cmp(&a.priority));

        let mut items = IndexMap::with_capacity(breakpoints.len());
        for bp in breakpoints {
            items.insert(bp.alias.clone(), Rc::new(bp));
        }
        Self {
            items,
            base: Rc::new(Breakpoint::base()),
        }
    }

    pub fn find_by_alias(&self, alias: &str) -> Option<&Rc<Breakpoint>> {
        if alias == self.base.alias {
            return Some(&self.base);
        }
        self.items.get(alias)
    }

    pub fn find_by_query(&self, query: &str) -> Option<&Rc<Breakpoint>> {
        if query == self.base.media_query {
            return Some(&self.base);
        }
        self.items.values().find(|bp| bp.media_query == query)
    }

    /// The synthetic breakpoint with alias `""`.
    pub fn base(&self) -> &Rc<Breakpoint> {
        &self.base
    }

    /// All breakpoints in priority order, ending with the base breakpoint.
    pub fn items(&self) -> impl Iterator<Item = &Rc<Breakpoint>> {
        self.items.values().chain(std::iter::once(&self.base))
    }

    /// The media queries to subscribe to, in priority order.
    pub fn queries(&self) -> Vec<String> {
        self.items
            .values()
            .map(|bp| bp.media_query.clone())
            .collect()
    }

    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    pub fn overlappings(&self) -> impl Iterator<Item = &Rc<Breakpoint>> {
        self.items.values().filter(|bp| bp.overlapping)
    }

    /// Number of registered breakpoints, not counting the base breakpoint.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
