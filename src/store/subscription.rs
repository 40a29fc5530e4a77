//! Handles returned by `subscribe`.

use super::StoreError;
use crate::core::ListenerId;
use std::cell::Cell;
use std::fmt;
use std::rc::Weak;

/// The part of a store an unsubscribe handle talks to.
pub(crate) trait ListenerHost {
    fn is_dispatching(&self) -> bool;
    fn remove_listener(&self, id: ListenerId) -> bool;
}

/// Removes one listener from its store.
///
/// Holds only a weak reference: once the store is gone, unsubscribing is a
/// no-op.
pub struct Unsubscribe {
    host: Weak<dyn ListenerHost>,
    id: ListenerId,
    subscribed: Cell<bool>,
}

impl Unsubscribe {
    pub(crate) fn new(host: Weak<dyn ListenerHost>, id: ListenerId) -> Self {
        Self {
            host,
            id,
            subscribed: Cell::new(true),
        }
    }

    /// Remove the listener.
    ///
    /// Calling this again after it succeeded does nothing. Calling it while
    /// a reducer runs fails and leaves the listener registered.
    pub fn unsubscribe(&self) -> Result<(), StoreError> {
        if !self.subscribed.get() {
            return Ok(());
        }
        let Some(host) = self.host.upgrade() else {
            self.subscribed.set(false);
            return Ok(());
        };
        if host.is_dispatching() {
            return Err(StoreError::ReentrantUnsubscribe);
        }

        self.subscribed.set(false);
        host.remove_listener(self.id);
        Ok(())
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed.get()
    }
}

impl fmt::Debug for Unsubscribe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unsubscribe")
            .field("id", &self.id)
            .field("subscribed", &self.subscribed.get())
            .finish()
    }
}
