use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::View;
use crate::scope::Scope;

thread_local! {
    pub static COMPOSER: RefCell<Composer> = RefCell::new(Composer::default());
    static REBUILD_REQUESTED: Cell<bool> = const { Cell::new(false) };
}

/// Slot storage backing `remember*`.
///
/// Positional slots are matched by call order within a composition pass, so
/// a pass must visit the same `remember` call sites in the same order as the
/// previous one. Keyed slots are stable across conditional branches.
#[derive(Default)]
pub struct Composer {
    pub slots: Vec<Box<dyn Any>>,
    pub cursor: usize,
    pub keyed_slots: HashMap<String, Box<dyn Any>>,
}

/// Marks the mounted composition dirty so the next [`Scheduler::tick`]
/// recomposes. This is the only path through which the tree updates; nothing
/// polls holders for changes.
pub fn request_rebuild() {
    REBUILD_REQUESTED.with(|flag| flag.set(true));
}

fn take_rebuild_request() -> bool {
    REBUILD_REQUESTED.with(|flag| flag.replace(false))
}

/// Slot-based remember (sequential composition only).
pub fn remember<T: 'static>(init: impl FnOnce() -> T) -> Rc<T> {
    COMPOSER.with(|c| {
        let mut c = c.borrow_mut();
        let cursor = c.cursor;
        c.cursor += 1;

        if cursor >= c.slots.len() {
            let rc: Rc<T> = Rc::new(init());
            c.slots.push(Box::new(rc.clone()));
            return rc;
        }

        if let Some(rc) = c.slots[cursor].downcast_ref::<Rc<T>>() {
            rc.clone()
        } else {
            log::warn!(
                "remember: slot {} type changed; replacing. \
                 If this is due to conditional composition, prefer remember_with_key.",
                cursor
            );
            let rc: Rc<T> = Rc::new(init());
            c.slots[cursor] = Box::new(rc.clone());
            rc
        }
    })
}

/// Key-based remember.
pub fn remember_with_key<T: 'static>(key: impl Into<String>, init: impl FnOnce() -> T) -> Rc<T> {
    COMPOSER.with(|c| {
        let mut c = c.borrow_mut();
        let key = key.into();

        if let Some(existing) = c.keyed_slots.get(&key) {
            if let Some(rc) = existing.downcast_ref::<Rc<T>>() {
                return rc.clone();
            } else {
                log::warn!(
                    "remember_with_key: key '{}' reused with a different type; replacing.",
                    key
                );
            }
        }

        let rc: Rc<T> = Rc::new(init());
        c.keyed_slots.insert(key, Box::new(rc.clone()));
        rc
    })
}

pub fn remember_state<T: 'static>(init: impl FnOnce() -> T) -> Rc<RefCell<T>> {
    remember(|| RefCell::new(init()))
}

pub fn remember_state_with_key<T: 'static>(
    key: impl Into<String>,
    init: impl FnOnce() -> T,
) -> Rc<RefCell<T>> {
    remember_with_key(key, || RefCell::new(init()))
}

/// Drives one mounted composition: a persistent root scope plus a dirty
/// flag. `mount` composes once, `tick` recomposes only when a rebuild was
/// requested, `unmount` tears everything down.
///
/// Composer slots are thread-local, so one scheduler may be mounted per
/// thread at a time. The whole runtime is single-threaded and cooperative;
/// listeners fire on whatever call mutated their holder, and recomposition
/// happens only inside `mount`/`tick`.
pub struct Scheduler {
    root: Option<Scope>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self { root: None }
    }

    pub fn is_mounted(&self) -> bool {
        self.root.is_some()
    }

    /// Composes the tree for the first time under a fresh root scope.
    ///
    /// Mounting over a live tree unmounts it first.
    pub fn mount<F: FnMut() -> View>(&mut self, mut build: F) -> View {
        if self.root.is_some() {
            log::warn!("mount: scheduler already mounted; unmounting previous tree");
            self.unmount();
        }

        let scope = Scope::new();
        COMPOSER.with(|c| {
            let mut c = c.borrow_mut();
            c.slots.clear();
            c.keyed_slots.clear();
            c.cursor = 0;
        });
        // A request raised during the pass itself (a builder mutating a
        // holder) stays pending for the first tick.
        REBUILD_REQUESTED.with(|flag| flag.set(false));

        let view = scope.run(&mut build);
        self.root = Some(scope);
        view
    }

    /// Recomposes and returns the new tree if a rebuild is pending,
    /// otherwise does nothing.
    pub fn tick<F: FnMut() -> View>(&mut self, mut build: F) -> Option<View> {
        let Some(scope) = self.root.as_ref() else {
            log::warn!("tick: nothing mounted");
            return None;
        };
        if !take_rebuild_request() {
            return None;
        }

        COMPOSER.with(|c| c.borrow_mut().cursor = 0);
        Some(scope.run(&mut build))
    }

    /// Disposes the root scope, running every registered cleanup, and clears
    /// slot storage. Idempotent; also runs on drop.
    pub fn unmount(&mut self) {
        if let Some(scope) = self.root.take() {
            scope.dispose();
            COMPOSER.with(|c| {
                let mut c = c.borrow_mut();
                c.slots.clear();
                c.keyed_slots.clear();
                c.cursor = 0;
            });
            // Rebuild requests die with the tree they were raised against.
            REBUILD_REQUESTED.with(|flag| flag.set(false));
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.unmount();
    }
}
