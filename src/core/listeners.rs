//! Listener registry with copy-on-write snapshots.
//!
//! Notification iterates a [`Snapshot`] taken when the pass starts. Edits
//! made while any snapshot is alive copy the live list first, so a
//! listener that subscribes or unsubscribes during a pass affects the next
//! dispatch, never the current one.

use std::fmt;
use std::rc::Rc;

/// Callback invoked after every successful dispatch.
pub type Listener = Rc<dyn Fn()>;

/// Identity of one registry entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Clone)]
struct Entry {
    id: ListenerId,
    listener: Listener,
}

/// Ordered listener list.
///
/// Registering the same callback twice yields two independent entries.
pub struct ListenerRegistry {
    live: Rc<Vec<Entry>>,
    next_id: u64,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self {
            live: Rc::new(Vec::new()),
            next_id: 0,
        }
    }

    /// Append a listener, returning the id of its entry.
    pub fn insert(&mut self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        // Copies the list if a snapshot still shares it.
        Rc::make_mut(&mut self.live).push(Entry { id, listener });
        id
    }

    /// Remove the entry with `id`. Returns whether an entry was removed.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let Some(index) = self.live.iter().position(|entry| entry.id == id) else {
            return false;
        };
        Rc::make_mut(&mut self.live).remove(index);
        true
    }

    /// Freeze the current list for one notification pass.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            entries: Rc::clone(&self.live),
        }
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

impl Default for ListenerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("len", &self.len())
            .finish()
    }
}

/// Immutable view of the registry at the start of a notification pass.
pub struct Snapshot {
    entries: Rc<Vec<Entry>>,
}

impl Snapshot {
    /// Invoke every listener in registration order.
    pub fn notify(&self) {
        for entry in self.entries.iter() {
            (entry.listener)();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn recorder(log: &Rc<RefCell<Vec<&'static str>>>, name: &'static str) -> Listener {
        let log = Rc::clone(log);
        Rc::new(move || log.borrow_mut().push(name))
    }

    #[test]
    fn snapshot_notifies_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ListenerRegistry::new();
        registry.insert(recorder(&log, "a"));
        registry.insert(recorder(&log, "b"));
        registry.insert(recorder(&log, "c"));

        registry.snapshot().notify();

        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn edits_after_snapshot_do_not_affect_it() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ListenerRegistry::new();
        let a = registry.insert(recorder(&log, "a"));
        registry.insert(recorder(&log, "b"));

        let snapshot = registry.snapshot();
        registry.remove(a);
        registry.insert(recorder(&log, "c"));

        snapshot.notify();
        assert_eq!(*log.borrow(), vec!["a", "b"]);
        assert_eq!(snapshot.len(), 2);

        log.borrow_mut().clear();
        registry.snapshot().notify();
        assert_eq!(*log.borrow(), vec!["b", "c"]);
    }

    #[test]
    fn duplicate_listeners_are_independent_entries() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let listener = recorder(&log, "dup");
        let mut registry = ListenerRegistry::new();
        let first = registry.insert(Rc::clone(&listener));
        registry.insert(Rc::clone(&listener));
        assert_eq!(registry.len(), 2);

        assert!(registry.remove(first));
        assert_eq!(registry.len(), 1);

        registry.snapshot().notify();
        assert_eq!(*log.borrow(), vec!["dup"]);
    }

    #[test]
    fn removing_twice_removes_once() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ListenerRegistry::new();
        let id = registry.insert(recorder(&log, "a"));
        registry.insert(recorder(&log, "b"));

        assert!(registry.remove(id));
        assert!(!registry.remove(id));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn new_registry_is_empty() {
        let registry = ListenerRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.snapshot().is_empty());
    }
}
