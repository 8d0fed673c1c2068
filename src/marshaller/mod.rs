//! The media marshaller: breakpoint activation and responsive value resolution.
//!
//! A [`MediaMarshaller`] owns the stack of active breakpoints and, for every element key it
//! manages, the values that key takes at each breakpoint. Media events coming from a
//! [`MatchMedia`] source are run through the [`PrintHook`], applied to the stack, and every
//! key whose effective value changed is re-rendered through its [`Binding`].
//!
//! ```rust
//! use std::{cell::RefCell, rc::Rc};
//!
//! use floem_media::{Binding, MediaChange, MediaConfig, MediaMarshaller};
//!
//! let marshaller = MediaMarshaller::new(&MediaConfig::default());
//! let columns = Rc::new(RefCell::new(0));
//!
//! let grid = marshaller.create_element();
//! marshaller
//!     .init(grid, "grid-columns", Binding::new({
//!         let columns = columns.clone();
//!         move |value: &u32| *columns.borrow_mut() = *value
//!     }))
//!     .unwrap();
//! marshaller.set_value(grid, "grid-columns", 1, "").unwrap();
//! marshaller.set_value(grid, "grid-columns", 4, "gt-sm").unwrap();
//! assert_eq!(*columns.borrow(), 1);
//!
//! let gt_sm = marshaller.registry().find_by_alias("gt-sm").unwrap().media_query.clone();
//! marshaller.dispatch(MediaChange::activated(gt_sm));
//! assert_eq!(*columns.borrow(), 4);
//! ```
//!
//! # Re-entrancy
//!
//! Bindings are never run while the marshaller's state is borrowed, so a builder may call
//! back into the marshaller (to set another value, release an element, ...). Once an
//! element is released none of its bindings run again, even those already queued.

mod binding;
mod stream;
mod table;
mod value;

use std::{cell::RefCell, rc::Rc};

use tracing::{debug, warn};

pub use binding::Binding;
pub use stream::{MediaChangeStream, ValueStream};
pub use table::ElementId;
pub use value::ResponsiveValue;

use table::{MediaTable, Notification};

use crate::{
    activated::ActivatedBreakpoints,
    breakpoint::Breakpoint,
    config::MediaConfig,
    error::MediaError,
    match_media::MatchMedia,
    media_change::MediaChange,
    print_hook::{HookTarget, PrintHook},
    registry::BreakpointRegistry,
};

/// Counters describing the work a marshaller has done.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarshallerStats {
    /// Number of live elements.
    pub elements: usize,
    /// Number of `update_styles` passes, including those run by the print hook.
    pub style_passes: u64,
    /// Number of binding invocations queued, updates and clears.
    pub notifications: u64,
}

struct Inner<V> {
    hook: PrintHook,
    table: MediaTable<V>,
}

/// Resolves responsive values for elements against the active breakpoints.
///
/// This is a cheap handle; clones share the same state.
pub struct MediaMarshaller<V> {
    inner: Rc<RefCell<Inner<V>>>,
}

impl<V> Clone for MediaMarshaller<V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<V: Clone + PartialEq + 'static> MediaMarshaller<V> {
    pub fn new(config: &MediaConfig) -> Self {
        Self::with_registry(Rc::new(BreakpointRegistry::new(config)), config)
    }

    /// Uses an existing registry; only the print settings of `config` are read.
    pub fn with_registry(registry: Rc<BreakpointRegistry>, config: &MediaConfig) -> Self {
        let hook = PrintHook::new(registry.clone(), config);
        let table = MediaTable::new(registry);
        Self {
            inner: Rc::new(RefCell::new(Inner { hook, table })),
        }
    }

    /// Runs `f` against the state, then the bindings it queued.
    ///
    /// A binding whose element was released by an earlier binding of the same batch is
    /// skipped.
    fn update<R>(&self, f: impl FnOnce(&mut Inner<V>) -> R) -> R {
        let (result, pending) = {
            let mut inner = self.inner.borrow_mut();
            let result = f(&mut inner);
            (result, inner.table.take_pending())
        };
        for notification in pending {
            match notification {
                Notification::Update {
                    element,
                    binding,
                    value,
                } => {
                    if self.contains_element(element) {
                        binding.apply(&value);
                    }
                }
                Notification::Clear { element, binding } => {
                    if self.contains_element(element) {
                        binding.clear();
                    }
                }
            }
        }
        result
    }

    fn with<R>(&self, f: impl FnOnce(&Inner<V>) -> R) -> R {
        f(&self.inner.borrow())
    }

    pub fn registry(&self) -> Rc<BreakpointRegistry> {
        self.with(|inner| inner.table.registry.clone())
    }

    /// Every query a [`MatchMedia`] source has to watch, `print` included when configured.
    pub fn queries(&self) -> Vec<String> {
        self.with(|inner| inner.hook.with_print_query(inner.table.registry.queries()))
    }

    /// Subscribes `source` to [`queries`](Self::queries).
    pub fn observe_activations(&self, source: &mut impl MatchMedia) {
        let queries = self.queries();
        debug!(queries = queries.len(), "observing media queries");
        source.observe(&queries);
    }

    /// Feeds one raw event from the media source through the pipeline.
    ///
    /// The print hook sees the event first and may swallow it. Events that pass update the
    /// activation stack, then go out to [`media_changes`](Self::media_changes) observers
    /// with their alias resolved.
    pub fn dispatch(&self, event: MediaChange) {
        self.update(|inner| {
            let Inner { hook, table } = inner;
            let was_printing = hook.is_printing();
            let passed = {
                let mut intercept = hook.intercept_events(table);
                intercept(&event)
            };
            if !passed {
                return;
            }

            table.on_media_change(&event);
            table.broadcast(&hook.update_event(event));
            if was_printing && !hook.is_printing() {
                for deferred in hook.take_deferred() {
                    table.on_media_change(&deferred);
                    table.broadcast(&hook.update_event(deferred));
                }
            }
        });
    }

    /// Applies `event` to the activation stack without the print substitution of
    /// [`dispatch`](Self::dispatch).
    ///
    /// While printing the event is held back like any other and replayed once printing
    /// ends, so the print breakpoint stays in front. Returns whether the stack changed.
    pub fn on_media_change(&self, event: &MediaChange) -> bool {
        self.update(|inner| {
            if inner.hook.is_printing() {
                inner.hook.defer(event.clone());
                return false;
            }
            inner.table.on_media_change(event)
        })
    }

    /// Snapshot of the active breakpoints, most specific first.
    pub fn activated_breakpoints(&self) -> ActivatedBreakpoints {
        self.with(|inner| inner.table.activated.clone())
    }

    /// Alias of the most specific active breakpoint, `""` if none is active.
    pub fn activated_alias(&self) -> String {
        self.with(|inner| {
            inner
                .table
                .activated
                .first()
                .map(|bp| bp.alias.clone())
                .unwrap_or_default()
        })
    }

    pub fn is_active(&self, alias: &str) -> bool {
        self.with(|inner| inner.table.activated.contains(alias))
    }

    pub fn is_printing(&self) -> bool {
        self.with(|inner| inner.hook.is_printing())
    }

    pub fn print_breakpoint(&self) -> Option<Rc<Breakpoint>> {
        self.with(|inner| inner.hook.print_breakpoint().cloned())
    }

    pub fn create_element(&self) -> ElementId {
        self.update(|inner| inner.table.create_element())
    }

    pub fn contains_element(&self, element: ElementId) -> bool {
        self.with(|inner| inner.table.contains(element))
    }

    /// Registers `binding` for `key` on `element`.
    ///
    /// Calling this again for the same key replaces the callbacks but keeps the triggers
    /// subscribed by the first call that had any.
    pub fn init(
        &self,
        element: ElementId,
        key: &str,
        mut binding: Binding<V>,
    ) -> Result<(), MediaError> {
        let triggers = std::mem::take(&mut binding.triggers);
        let weak = Rc::downgrade(&self.inner);
        self.update(|inner| {
            let slot = inner.table.key_entry(element, key).inspect_err(|err| {
                warn!(%err, "init on an unknown element");
            })?;
            slot.binding = Some(Rc::new(binding));
            if slot.subscriptions.is_empty() {
                for trigger in &triggers {
                    let weak = weak.clone();
                    let key = key.to_string();
                    slot.subscriptions.push(trigger.subscribe(move || {
                        if let Some(inner) = weak.upgrade() {
                            let marshaller = MediaMarshaller { inner };
                            // The element may be gone by the time a trigger fires.
                            let _ = marshaller.trigger_update(element, Some(&key));
                        }
                    }));
                }
            }
            Ok(())
        })
    }

    /// Stores `value` for `key` at the breakpoint `alias` (`""` for the base value).
    ///
    /// If `alias` is the breakpoint that now resolves the key, the binding is run right
    /// away with `value`.
    pub fn set_value(
        &self,
        element: ElementId,
        key: &str,
        value: V,
        alias: &str,
    ) -> Result<(), MediaError> {
        self.update(|inner| inner.table.set_value(element, key, value, alias))
            .inspect_err(|err| warn!(%err, "set_value on an unknown element"))
    }

    /// The effective value of `key`: the value of the most specific active breakpoint that
    /// has one, else the base value.
    pub fn get_value(&self, element: ElementId, key: &str) -> Option<V> {
        self.with(|inner| inner.table.get_value(element, key))
    }

    /// The raw value stored for `alias`, regardless of what is active.
    pub fn value_at(&self, element: ElementId, key: &str, alias: &str) -> Option<V> {
        self.with(|inner| inner.table.value_at(element, key, alias))
    }

    pub fn has_value(&self, element: ElementId, key: &str) -> bool {
        self.get_value(element, key).is_some()
    }

    /// Runs the binding of `key` with `value`.
    ///
    /// Fails if `element` is unknown or `key` never went through [`init`](Self::init).
    pub fn update_element(
        &self,
        element: ElementId,
        key: &str,
        value: V,
    ) -> Result<(), MediaError> {
        self.update(|inner| inner.table.update_element(element, key, value))
            .inspect_err(|err| warn!(%err, "update_element misuse"))
    }

    /// Re-renders every key whose effective value changed.
    pub fn update_styles(&self) {
        self.update(|inner| HookTarget::update_styles(&mut inner.table));
    }

    /// Re-applies the effective value of `key`, or of every key of `element`, even if it
    /// did not change.
    pub fn trigger_update(
        &self,
        element: ElementId,
        key: Option<&str>,
    ) -> Result<(), MediaError> {
        self.update(|inner| inner.table.refresh(element, key))
            .inspect_err(|err| warn!(%err, "trigger_update on an unknown element"))
    }

    /// Streams changes of the effective value of `key`.
    ///
    /// Every call starts a fresh stream that sees changes from now on. For an unknown
    /// element the stream is already finished.
    pub fn track_value(&self, element: ElementId, key: &str) -> ValueStream<V> {
        self.update(|inner| inner.table.track_value(element, key))
    }

    /// Streams every event that passes the print hook, with its alias resolved.
    pub fn media_changes(&self) -> MediaChangeStream {
        let (sender, stream) = MediaChangeStream::channel();
        self.update(|inner| inner.table.add_observer(sender));
        stream
    }

    /// Forgets `element`: its values, bindings, trigger subscriptions and value streams.
    pub fn release_element(&self, element: ElementId) -> Result<(), MediaError> {
        self.update(|inner| inner.table.release(element))
            .inspect_err(|err| warn!(%err, "release_element misuse"))
    }

    pub fn stats(&self) -> MarshallerStats {
        self.with(|inner| MarshallerStats {
            elements: inner.table.element_count(),
            style_passes: inner.table.counters.style_passes,
            notifications: inner.table.counters.notifications,
        })
    }
}
