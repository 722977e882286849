use std::cell::RefCell;
use std::rc::Rc;

use attune_core::{
    Value, View, disposable_effect, on_unmount, remember, request_rebuild, with_local,
};

/// Decides whether a change to the published value marks the subtree dirty.
/// Receives (previous cached value, new value).
pub type ShouldNotify<T> = Rc<dyn Fn(&T, &T) -> bool>;

/// Subscribes the current composition to a holder and returns the cache cell
/// carrying the holder's latest observed value.
///
/// The subscription is keyed by holder identity, not value: recomposing with
/// a different holder that happens to carry an equal value still deregisters
/// from the old one, re-reads the new one, and registers there. Recomposing
/// with the same holder touches nothing. Scope teardown deregisters
/// unconditionally.
///
/// The registered listener holds only a weak handle to its holder plus the
/// cache cell, so the holder is never kept alive by its own listener set.
fn subscribe_slot<T: Clone + 'static>(
    value: &Value<T>,
    should_notify: Option<ShouldNotify<T>>,
) -> Rc<RefCell<T>> {
    let cache = remember(|| RefCell::new(value.get()));

    disposable_effect(value.id(), {
        let value = value.clone();
        let cache = cache.clone();
        move || {
            // The holder changed identity (or this is the first pass), so
            // the cache is refreshed before listening.
            *cache.borrow_mut() = value.get();

            let weak = value.downgrade();
            let listener_cache = cache.clone();
            let key = value.listen(move || {
                let Some(holder) = weak.upgrade() else {
                    return;
                };
                let next = holder.get();
                let notify = match &should_notify {
                    Some(pred) => pred(&listener_cache.borrow(), &next),
                    None => true,
                };
                *listener_cache.borrow_mut() = next;
                if notify {
                    request_rebuild();
                }
            });

            let weak = value.downgrade();
            on_unmount(move || {
                if let Some(holder) = weak.upgrade() {
                    holder.unlisten(key);
                }
            })
        }
    });

    cache
}

/// Stateful subscriber: observes `value` and delegates rendering of its
/// latest observed value to `build`.
///
/// `child` is threaded through to `build` unchanged across rebuilds, so a
/// subtree that does not depend on the value is constructed once (typically
/// in a `remember` slot by the caller) and reused by identity.
///
/// The build function runs inside the ambient composition context (current
/// scope and locals); it receives the cached value and the optional static
/// child, and its result is returned unmodified.
pub fn Observe<T: Clone + 'static>(
    value: &Value<T>,
    child: Option<Rc<View>>,
    build: impl Fn(&T, Option<&Rc<View>>) -> View,
) -> View {
    let cache = subscribe_slot(value, None);
    let current = cache.borrow().clone();
    build(&current, child.as_ref())
}

/// Stateless adapter: observes `value` and publishes its latest observed
/// value as a composition local around `build_child`, so descendants read it
/// with [`attune_core::local`] instead of subscribing themselves.
///
/// `update_should_notify` receives (previous, new) on each change and decides
/// whether the subtree rebuilds at all; the cache still advances when it
/// returns false. Absent predicate means every change notifies.
///
/// Subscription management is delegated entirely to the subscriber path; the
/// adapter holds no subscription state of its own. The child is a builder
/// closure because locals are read at build time.
pub fn ProvideValue<T: Clone + 'static>(
    value: &Value<T>,
    update_should_notify: Option<ShouldNotify<T>>,
    build_child: impl Fn() -> View,
) -> View {
    let cache = subscribe_slot(value, update_should_notify);
    let current = cache.borrow().clone();
    with_local(current, build_child)
}
