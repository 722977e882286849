use std::cell::{Cell, RefCell};

use crate::runtime::remember;
use crate::scope::scoped_effect;

/// Run-at-most-once cleanup cell. Safe to call `run` repeatedly.
#[derive(Clone)]
pub struct Dispose(std::rc::Rc<RefCell<Option<Box<dyn FnOnce()>>>>);

impl Dispose {
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self(std::rc::Rc::new(RefCell::new(Some(Box::new(f)))))
    }

    pub fn run(&self) {
        if let Some(f) = self.0.borrow_mut().take() {
            f()
        }
    }
}

/// Runs `f` immediately and returns its `Dispose`.
///
/// The cleanup is also registered with the current scope, if any, so it runs
/// on teardown even when the caller drops the returned handle.
pub fn effect<F>(f: F) -> Dispose
where
    F: FnOnce() -> Dispose + 'static,
{
    let d = f();
    if let Some(scope) = crate::scope::current_scope() {
        let d2 = d.clone();
        scope.add_disposer(move || d2.run());
    }
    d
}

/// Builds the cleanup half of an effect.
pub fn on_unmount(f: impl FnOnce() + 'static) -> Dispose {
    Dispose::new(f)
}

/// Keyed effect with cleanup on key change and on unmount.
///
/// Slot-backed, so each call site keeps its own key and cleanup across
/// composition passes. The first pass runs `effect` and stores its cleanup;
/// a later pass with a different key runs the stored cleanup and then
/// re-runs `effect`; scope teardown runs whatever cleanup is pending.
///
/// Key comparison is `PartialEq` on `K`. Callers that need identity rather
/// than value semantics (resubscription to a replaced holder) must pass an
/// identity token such as [`crate::Value::id`] as the key, never the value
/// itself.
pub fn disposable_effect<K: PartialEq + Clone + 'static>(
    key: K,
    effect: impl FnOnce() -> Dispose + 'static,
) {
    let last_key = remember(|| RefCell::new(None::<K>));
    let cleanup_slot = remember(|| RefCell::new(None::<Dispose>));
    let installed = remember(|| Cell::new(false));

    // One unmount disposer per call site, installed on the first pass.
    if !installed.get() {
        installed.set(true);
        let cleanup_slot = cleanup_slot.clone();
        scoped_effect(move || {
            on_unmount(move || {
                if let Some(d) = cleanup_slot.borrow_mut().take() {
                    d.run();
                }
            })
        });
    }

    let changed = last_key.borrow().as_ref() != Some(&key);
    if changed {
        *last_key.borrow_mut() = Some(key);

        if let Some(d) = cleanup_slot.borrow_mut().take() {
            d.run();
        }

        let d = effect();
        *cleanup_slot.borrow_mut() = Some(d);
    }
}

/// Runs on every composition pass.
pub fn side_effect(effect: impl Fn()) {
    effect();
}
