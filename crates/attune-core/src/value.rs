use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

new_key_type! {
    /// Removal handle returned by [`Value::listen`].
    pub struct ListenerKey;
}

thread_local! {
    static NEXT_VALUE_ID: Cell<u64> = const { Cell::new(1) };
}

/// Observable value holder.
///
/// A `Value<T>` is a cloneable handle to a single current value plus the set
/// of listeners registered against it. Mutating through `set` or `update`
/// fires every listener synchronously before the call returns. Listeners take
/// no arguments; an observer re-reads the current value itself, usually
/// through a [`WeakValue`] so the registration never keeps the holder alive.
///
/// Listener invocation order is unspecified. Anything that needs an order
/// between two listeners of the same holder is relying on something this type
/// does not promise.
pub struct Value<T: 'static>(Rc<Inner<T>>);

struct Inner<T> {
    id: u64,
    value: RefCell<T>,
    listeners: RefCell<SlotMap<ListenerKey, Rc<dyn Fn()>>>,
}

impl<T: 'static> Value<T> {
    pub fn new(value: T) -> Self {
        let id = NEXT_VALUE_ID.with(|n| {
            let id = n.get();
            n.set(id + 1);
            id
        });
        Self(Rc::new(Inner {
            id,
            value: RefCell::new(value),
            listeners: RefCell::new(SlotMap::with_key()),
        }))
    }

    /// Identity token for this holder. Tokens are unique per allocation and
    /// never reused, so comparing them is identity comparison. Two holders
    /// that happen to carry equal values still have different tokens.
    pub fn id(&self) -> u64 {
        self.0.id
    }

    /// True when both handles point at the same holder.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.value.borrow().clone()
    }

    /// Borrow-read access without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.value.borrow())
    }

    pub fn set(&self, v: T) {
        *self.0.value.borrow_mut() = v;
        self.notify();
    }

    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.0.value.borrow_mut());
        self.notify();
    }

    /// Registers a change listener and returns its removal key.
    ///
    /// The holder does not deduplicate: registering the same closure twice
    /// yields two independent registrations with two keys.
    pub fn listen(&self, f: impl Fn() + 'static) -> ListenerKey {
        self.0.listeners.borrow_mut().insert(Rc::new(f))
    }

    /// Removes a listener. Unknown or already-removed keys are ignored.
    pub fn unlisten(&self, key: ListenerKey) {
        self.0.listeners.borrow_mut().remove(key);
    }

    pub fn listener_count(&self) -> usize {
        self.0.listeners.borrow().len()
    }

    pub fn downgrade(&self) -> WeakValue<T> {
        WeakValue(Rc::downgrade(&self.0))
    }

    fn notify(&self) {
        // Snapshot before calling out: the value borrow is already released,
        // and listeners may freely call get/listen/unlisten. A listener added
        // during this round does not fire until the next mutation; one
        // removed mid-round by an earlier listener may still fire once.
        let snapshot: SmallVec<[Rc<dyn Fn()>; 4]> =
            self.0.listeners.borrow().values().cloned().collect();
        for listener in snapshot {
            listener();
        }
    }
}

impl<T> Clone for Value<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

/// Non-owning handle to a [`Value`].
///
/// Subscribers hold one of these inside their registered listener so the
/// listener never keeps its own holder alive.
pub struct WeakValue<T: 'static>(Weak<Inner<T>>);

impl<T> WeakValue<T> {
    pub fn upgrade(&self) -> Option<Value<T>> {
        self.0.upgrade().map(Value)
    }
}

impl<T> Clone for WeakValue<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

pub fn value<T>(t: T) -> Value<T> {
    Value::new(t)
}
