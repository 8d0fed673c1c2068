//! Per-element value storage and effective value resolution.
//!
//! Nothing in here runs user code. Callbacks that should run are queued as
//! [`Notification`]s and handed back to the marshaller, which runs them once its state is
//! no longer borrowed.

use std::rc::Rc;

use futures::channel::mpsc::UnboundedSender;
use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};
use tracing::{debug, trace};

use super::{binding::Binding, stream::ValueStream, value::ResponsiveValue};
use crate::{
    activated::ActivatedBreakpoints, error::MediaError, media_change::MediaChange,
    print_hook::HookTarget, registry::BreakpointRegistry, trigger::Subscription,
};

new_key_type! {
    /// Identity of an element managed by a [`MediaMarshaller`](crate::MediaMarshaller).
    ///
    /// Ids are never reused: once an element is released its id stays invalid, even if an
    /// element created later is structurally identical.
    pub struct ElementId;
}

pub(crate) enum Notification<V> {
    Update {
        element: ElementId,
        binding: Rc<Binding<V>>,
        value: V,
    },
    Clear {
        element: ElementId,
        binding: Rc<Binding<V>>,
    },
}

pub(crate) struct KeyEntry<V> {
    pub(crate) values: ResponsiveValue<V>,
    pub(crate) binding: Option<Rc<Binding<V>>>,
    pub(crate) subscriptions: Vec<Subscription>,
    last_applied: Option<V>,
    trackers: Vec<UnboundedSender<Option<V>>>,
}

impl<V> Default for KeyEntry<V> {
    fn default() -> Self {
        Self {
            values: ResponsiveValue::new(),
            binding: None,
            subscriptions: Vec::new(),
            last_applied: None,
            trackers: Vec::new(),
        }
    }
}

impl<V: Clone + PartialEq> KeyEntry<V> {
    /// Applies `value`, notifying trackers only if it differs from the last applied value.
    fn apply(
        &mut self,
        element: ElementId,
        value: V,
        pending: &mut Vec<Notification<V>>,
        stats: &mut Counters,
    ) {
        if self.last_applied.as_ref() != Some(&value) {
            self.last_applied = Some(value.clone());
            self.trackers
                .retain(|tracker| tracker.unbounded_send(Some(value.clone())).is_ok());
        }
        if let Some(binding) = &self.binding {
            stats.notifications += 1;
            pending.push(Notification::Update {
                element,
                binding: binding.clone(),
                value,
            });
        }
    }

    fn clear(
        &mut self,
        element: ElementId,
        pending: &mut Vec<Notification<V>>,
        stats: &mut Counters,
    ) {
        if self.last_applied.take().is_some() {
            self.trackers
                .retain(|tracker| tracker.unbounded_send(None).is_ok());
        }
        if let Some(binding) = &self.binding {
            stats.notifications += 1;
            pending.push(Notification::Clear {
                element,
                binding: binding.clone(),
            });
        }
    }
}

pub(crate) struct ElementEntry<V> {
    pub(crate) keys: FxHashMap<String, KeyEntry<V>>,
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Counters {
    pub(crate) style_passes: u64,
    pub(crate) notifications: u64,
}

pub(crate) struct MediaTable<V> {
    pub(crate) registry: Rc<BreakpointRegistry>,
    pub(crate) activated: ActivatedBreakpoints,
    elements: SlotMap<ElementId, ElementEntry<V>>,
    pending: Vec<Notification<V>>,
    observers: Vec<UnboundedSender<MediaChange>>,
    pub(crate) counters: Counters,
}

impl<V: Clone + PartialEq + 'static> MediaTable<V> {
    pub(crate) fn new(registry: Rc<BreakpointRegistry>) -> Self {
        Self {
            registry,
            activated: ActivatedBreakpoints::new(),
            elements: SlotMap::with_key(),
            pending: Vec::new(),
            observers: Vec::new(),
            counters: Counters::default(),
        }
    }

    pub(crate) fn take_pending(&mut self) -> Vec<Notification<V>> {
        std::mem::take(&mut self.pending)
    }

    pub(crate) fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub(crate) fn create_element(&mut self) -> ElementId {
        self.elements.insert(ElementEntry {
            keys: FxHashMap::default(),
        })
    }

    pub(crate) fn contains(&self, element: ElementId) -> bool {
        self.elements.contains_key(element)
    }

    pub(crate) fn release(&mut self, element: ElementId) -> Result<(), MediaError> {
        let entry = self
            .elements
            .remove(element)
            .ok_or(MediaError::UnknownElement(element))?;
        debug!(?element, keys = entry.keys.len(), "released element");
        Ok(())
    }

    /// The entry for `(element, key)`, created empty if the element has never seen `key`.
    pub(crate) fn key_entry(
        &mut self,
        element: ElementId,
        key: &str,
    ) -> Result<&mut KeyEntry<V>, MediaError> {
        let entry = self
            .elements
            .get_mut(element)
            .ok_or(MediaError::UnknownElement(element))?;
        Ok(entry.keys.entry(key.to_string()).or_default())
    }

    fn slot(&self, element: ElementId, key: &str) -> Option<&KeyEntry<V>> {
        self.elements.get(element)?.keys.get(key)
    }

    pub(crate) fn get_value(&self, element: ElementId, key: &str) -> Option<V> {
        self.slot(element, key)?
            .values
            .resolve(&self.activated)
            .cloned()
    }

    pub(crate) fn value_at(&self, element: ElementId, key: &str, alias: &str) -> Option<V> {
        self.slot(element, key)?.values.get(alias).cloned()
    }

    pub(crate) fn set_value(
        &mut self,
        element: ElementId,
        key: &str,
        value: V,
        alias: &str,
    ) -> Result<(), MediaError> {
        let entry = self
            .elements
            .get_mut(element)
            .ok_or(MediaError::UnknownElement(element))?;
        let slot = entry.keys.entry(key.to_string()).or_default();
        slot.values.set(alias, value);

        let resolved = slot
            .values
            .resolve_entry(&self.activated)
            .filter(|(resolved_alias, _)| *resolved_alias == alias)
            .map(|(_, value)| value.clone());
        if let Some(value) = resolved {
            trace!(?element, key = %key, alias = %alias, "value set for resolving breakpoint");
            slot.apply(element, value, &mut self.pending, &mut self.counters);
        }
        Ok(())
    }

    pub(crate) fn update_element(
        &mut self,
        element: ElementId,
        key: &str,
        value: V,
    ) -> Result<(), MediaError> {
        let Self {
            elements,
            pending,
            counters,
            ..
        } = self;
        let slot = bound_slot(elements, element, key)?;
        slot.apply(element, value, pending, counters);
        Ok(())
    }

    /// Re-applies the effective value of `key`, or of every key when `None`, whether or not
    /// it changed.
    pub(crate) fn refresh(
        &mut self,
        element: ElementId,
        key: Option<&str>,
    ) -> Result<(), MediaError> {
        let Self {
            elements,
            activated,
            pending,
            counters,
            ..
        } = self;
        let entry = elements
            .get_mut(element)
            .ok_or(MediaError::UnknownElement(element))?;

        let mut refresh_slot = |slot: &mut KeyEntry<V>| {
            match slot.values.resolve(activated).cloned() {
                Some(value) => slot.apply(element, value, pending, counters),
                None if slot.last_applied.is_some() => slot.clear(element, pending, counters),
                None => {}
            }
        };
        match key {
            Some(key) => {
                if let Some(slot) = entry.keys.get_mut(key) {
                    refresh_slot(slot);
                }
            }
            None => entry.keys.values_mut().for_each(refresh_slot),
        }
        Ok(())
    }

    /// Re-renders every key whose effective value changed since it was last applied.
    pub(crate) fn update_styles(&mut self) {
        self.counters.style_passes += 1;
        let Self {
            elements,
            activated,
            pending,
            counters,
            ..
        } = self;

        for (element, entry) in elements.iter_mut() {
            for (key, slot) in entry.keys.iter_mut() {
                let resolved = slot.values.resolve(activated).cloned();
                match resolved {
                    Some(value) if slot.last_applied.as_ref() != Some(&value) => {
                        trace!(?element, key = %key, "effective value changed");
                        slot.apply(element, value, pending, counters);
                    }
                    None if slot.last_applied.is_some() => {
                        trace!(?element, key = %key, "effective value cleared");
                        slot.clear(element, pending, counters);
                    }
                    _ => {}
                }
            }
        }
    }

    /// Applies a resolved media event to the activation stack, re-rendering if it changed.
    pub(crate) fn on_media_change(&mut self, event: &MediaChange) -> bool {
        let Some(breakpoint) = self.registry.find_by_query(&event.media_query).cloned() else {
            return false;
        };
        if breakpoint.is_base() {
            return false;
        }

        let changed = if event.matches {
            self.activated.activate(breakpoint.clone())
        } else {
            self.activated.deactivate(&breakpoint.alias).is_some()
        };
        if changed {
            debug!(
                alias = %breakpoint.alias,
                matches = event.matches,
                activated = ?self.activated.aliases().collect::<Vec<_>>(),
                "activation changed"
            );
            self.update_styles();
        }
        changed
    }

    pub(crate) fn track_value(&mut self, element: ElementId, key: &str) -> ValueStream<V> {
        match self.key_entry(element, key) {
            Ok(slot) => {
                let (sender, stream) = ValueStream::channel();
                slot.trackers.push(sender);
                stream
            }
            Err(_) => ValueStream::finished(),
        }
    }

    pub(crate) fn add_observer(&mut self, observer: UnboundedSender<MediaChange>) {
        self.observers.push(observer);
    }

    pub(crate) fn broadcast(&mut self, event: &MediaChange) {
        self.observers
            .retain(|observer| observer.unbounded_send(event.clone()).is_ok());
    }
}

/// The keyed slot of an element that went through `init`.
fn bound_slot<'a, V>(
    elements: &'a mut SlotMap<ElementId, ElementEntry<V>>,
    element: ElementId,
    key: &str,
) -> Result<&'a mut KeyEntry<V>, MediaError> {
    let entry = elements
        .get_mut(element)
        .ok_or(MediaError::UnknownElement(element))?;
    entry
        .keys
        .get_mut(key)
        .filter(|slot| slot.binding.is_some())
        .ok_or_else(|| MediaError::UnknownKey {
            element,
            key: key.to_string(),
        })
}

impl<V: Clone + PartialEq + 'static> HookTarget for MediaTable<V> {
    fn activated_breakpoints(&mut self) -> &mut ActivatedBreakpoints {
        &mut self.activated
    }

    fn update_styles(&mut self) {
        MediaTable::update_styles(self);
    }
}
