use rustc_hash::FxHashMap;

use crate::{activated::ActivatedBreakpoints, breakpoint::BASE_ALIAS};

/// The values one element key takes at different breakpoints.
#[derive(Debug, Clone)]
pub struct ResponsiveValue<V> {
    values: FxHashMap<String, V>,
}

impl<V> Default for ResponsiveValue<V> {
    fn default() -> Self {
        Self {
            values: FxHashMap::default(),
        }
    }
}

impl<V> ResponsiveValue<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` for `alias`, returning the value it replaced.
    pub fn set(&mut self, alias: &str, value: V) -> Option<V> {
        self.values.insert(alias.to_string(), value)
    }

    pub fn get(&self, alias: &str) -> Option<&V> {
        self.values.get(alias)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The value that applies under `activated`: the first active alias with a value, then
    /// the base value.
    pub fn resolve(&self, activated: &ActivatedBreakpoints) -> Option<&V> {
        self.resolve_entry(activated).map(|(_, value)| value)
    }

    /// Like [`resolve`](Self::resolve), also returning the alias that supplied the value.
    pub fn resolve_entry<'a, 'b>(
        &'a self,
        activated: &'b ActivatedBreakpoints,
    ) -> Option<(&'b str, &'a V)> {
        activated
            .aliases()
            .chain(std::iter::once(BASE_ALIAS))
            .find_map(|alias| self.values.get(alias).map(|value| (alias, value)))
    }
}
