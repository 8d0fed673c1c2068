use std::rc::Rc;

use smallvec::SmallVec;

use crate::breakpoint::Breakpoint;

/// The breakpoints currently matching, most specific first.
///
/// Regular activations are kept in descending priority order and appear at most once. The
/// print hook is the only caller that places an entry out of order, at the front.
#[derive(Debug, Clone, Default)]
pub struct ActivatedBreakpoints {
    stack: SmallVec<[Rc<Breakpoint>; 4]>,
}

impl ActivatedBreakpoints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// The breakpoint consulted first.
    pub fn first(&self) -> Option<&Rc<Breakpoint>> {
        self.stack.first()
    }

    pub fn get(&self, index: usize) -> Option<&Rc<Breakpoint>> {
        self.stack.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rc<Breakpoint>> {
        self.stack.iter()
    }

    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.stack.iter().map(|bp| bp.alias.as_str())
    }

    pub fn position(&self, alias: &str) -> Option<usize> {
        self.stack.iter().position(|bp| bp.alias == alias)
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.position(alias).is_some()
    }

    /// Inserts `breakpoint` after every entry with an equal or higher priority.
    ///
    /// Returns `false`, leaving the stack untouched, if it is already active.
    pub fn activate(&mut self, breakpoint: Rc<Breakpoint>) -> bool {
        if self.contains(&breakpoint.alias) {
            return false;
        }
        let index = self
            .stack
            .iter()
            .position(|bp| bp.priority < breakpoint.priority)
            .unwrap_or(self.stack.len());
        self.stack.insert(index, breakpoint);
        true
    }

    pub fn deactivate(&mut self, alias: &str) -> Option<Rc<Breakpoint>> {
        let index = self.position(alias)?;
        Some(self.stack.remove(index))
    }

    pub fn push_front(&mut self, breakpoint: Rc<Breakpoint>) {
        self.stack.insert(0, breakpoint);
    }

    pub fn pop_front(&mut self) -> Option<Rc<Breakpoint>> {
        if self.stack.is_empty() {
            None
        } else {
            Some(self.stack.remove(0))
        }
    }

    /// Inserts at `index`, clamped to the end of the stack.
    pub fn insert(&mut self, index: usize, breakpoint: Rc<Breakpoint>) {
        let index = index.min(self.stack.len());
        self.stack.insert(index, breakpoint);
    }

    pub fn remove(&mut self, index: usize) -> Option<Rc<Breakpoint>> {
        (index < self.stack.len()).then(|| self.stack.remove(index))
    }
}
