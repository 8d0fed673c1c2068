//! Shared helpers for the integration tests.
#![allow(dead_code)]

use std::{cell::RefCell, rc::Rc};

use floem_media::{Binding, MatchMedia, MediaChange, MediaMarshaller};
use futures::{FutureExt, Stream, StreamExt};

/// A media source that only remembers what it was asked to watch.
#[derive(Debug, Default)]
pub struct FakeMatchMedia {
    pub observed: Vec<String>,
}

impl MatchMedia for FakeMatchMedia {
    fn observe(&mut self, queries: &[String]) {
        self.observed.extend_from_slice(queries);
    }
}

impl FakeMatchMedia {
    pub fn watches(&self, query: &str) -> bool {
        self.observed.iter().any(|observed| observed == query)
    }
}

/// Records every value a binding is built with, and every clear.
#[derive(Debug)]
pub struct Recorder<V> {
    values: Rc<RefCell<Vec<V>>>,
    clears: Rc<RefCell<usize>>,
}

impl<V> Clone for Recorder<V> {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
            clears: self.clears.clone(),
        }
    }
}

impl<V: Clone + 'static> Recorder<V> {
    pub fn new() -> Self {
        Self {
            values: Rc::new(RefCell::new(Vec::new())),
            clears: Rc::new(RefCell::new(0)),
        }
    }

    pub fn binding(&self) -> Binding<V> {
        let values = self.values.clone();
        let clears = self.clears.clone();
        Binding::new(move |value: &V| values.borrow_mut().push(value.clone()))
            .on_clear(move || *clears.borrow_mut() += 1)
    }

    pub fn values(&self) -> Vec<V> {
        self.values.borrow().clone()
    }

    pub fn last(&self) -> Option<V> {
        self.values.borrow().last().cloned()
    }

    pub fn count(&self) -> usize {
        self.values.borrow().len()
    }

    pub fn clears(&self) -> usize {
        *self.clears.borrow()
    }
}

/// The media query registered for `alias`.
pub fn query_of<V: Clone + PartialEq + 'static>(
    marshaller: &MediaMarshaller<V>,
    alias: &str,
) -> String {
    marshaller
        .registry()
        .find_by_alias(alias)
        .unwrap_or_else(|| panic!("no breakpoint `{alias}`"))
        .media_query
        .clone()
}

pub fn activate<V: Clone + PartialEq + 'static>(marshaller: &MediaMarshaller<V>, alias: &str) {
    marshaller.dispatch(MediaChange::activated(query_of(marshaller, alias)));
}

pub fn deactivate<V: Clone + PartialEq + 'static>(marshaller: &MediaMarshaller<V>, alias: &str) {
    marshaller.dispatch(MediaChange::deactivated(query_of(marshaller, alias)));
}

pub fn aliases<V: Clone + PartialEq + 'static>(marshaller: &MediaMarshaller<V>) -> Vec<String> {
    marshaller
        .activated_breakpoints()
        .aliases()
        .map(str::to_string)
        .collect()
}

/// Everything `stream` has buffered so far, without waiting.
pub fn drain<S: Stream + Unpin>(stream: &mut S) -> Vec<S::Item> {
    let mut items = Vec::new();
    while let Some(Some(item)) = stream.next().now_or_never() {
        items.push(item);
    }
    items
}

/// Whether `stream` has ended. Buffered items are consumed.
pub fn is_finished<S: Stream + Unpin>(stream: &mut S) -> bool {
    loop {
        match stream.next().now_or_never() {
            Some(Some(_)) => continue,
            Some(None) => return true,
            None => return false,
        }
    }
}
