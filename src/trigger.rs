use std::{
    cell::RefCell,
    fmt,
    rc::{Rc, Weak},
};

use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

new_key_type! {
    struct ListenerId;
}

type Listeners = RefCell<SlotMap<ListenerId, Rc<dyn Fn()>>>;

/// A notification without a payload.
///
/// Bind a trigger to an element key with [`Binding::trigger`](crate::Binding::trigger) to
/// force that key to be re-applied whenever the trigger fires, even if no breakpoint changed.
/// Clones share the same listeners.
#[derive(Clone, Default)]
pub struct Trigger {
    listeners: Rc<Listeners>,
}

impl fmt::Debug for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trigger")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl Trigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs every listener registered at the time of the call.
    pub fn notify(&self) {
        let listeners: SmallVec<[Rc<dyn Fn()>; 4]> =
            self.listeners.borrow().values().cloned().collect();
        for listener in listeners {
            listener();
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub(crate) fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
        let id = self.listeners.borrow_mut().insert(Rc::new(listener));
        Subscription {
            listeners: Rc::downgrade(&self.listeners),
            id,
        }
    }
}

/// Keeps a listener registered until dropped.
pub(crate) struct Subscription {
    listeners: Weak<Listeners>,
    id: ListenerId,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().remove(self.id);
        }
    }
}
