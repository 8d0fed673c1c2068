use crate::trigger::Trigger;

/// How an element key is rendered.
///
/// The builder receives every value applied to the key. The optional update observer runs
/// right after it, the optional clear callback runs when the key stops resolving to any
/// value, and every trigger forces the key to be re-applied when it fires.
///
/// ```rust
/// use floem_media::{Binding, Trigger};
///
/// let direction_changed = Trigger::new();
/// let binding = Binding::new(|value: &String| println!("flex-direction: {value}"))
///     .on_clear(|| println!("flex-direction reset"))
///     .trigger(direction_changed);
/// # let _ = binding;
/// ```
#[derive(educe::Educe)]
#[educe(Debug)]
pub struct Binding<V> {
    #[educe(Debug(ignore))]
    builder: Box<dyn Fn(&V)>,
    #[educe(Debug(ignore))]
    on_update: Option<Box<dyn Fn(&V)>>,
    #[educe(Debug(ignore))]
    on_clear: Option<Box<dyn Fn()>>,
    pub(crate) triggers: Vec<Trigger>,
}

impl<V> Binding<V> {
    pub fn new(builder: impl Fn(&V) + 'static) -> Self {
        Self {
            builder: Box::new(builder),
            on_update: None,
            on_clear: None,
            triggers: Vec::new(),
        }
    }

    pub fn on_update(mut self, on_update: impl Fn(&V) + 'static) -> Self {
        self.on_update = Some(Box::new(on_update));
        self
    }

    pub fn on_clear(mut self, on_clear: impl Fn() + 'static) -> Self {
        self.on_clear = Some(Box::new(on_clear));
        self
    }

    pub fn trigger(mut self, trigger: Trigger) -> Self {
        self.triggers.push(trigger);
        self
    }

    pub fn triggers(mut self, triggers: impl IntoIterator<Item = Trigger>) -> Self {
        self.triggers.extend(triggers);
        self
    }

    pub(crate) fn apply(&self, value: &V) {
        (self.builder)(value);
        if let Some(on_update) = &self.on_update {
            on_update(value);
        }
    }

    pub(crate) fn clear(&self) {
        if let Some(on_clear) = &self.on_clear {
            on_clear();
        }
    }
}
