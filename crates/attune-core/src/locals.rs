//! # Composition locals
//!
//! Scoped value injection: a provider publishes a value for the dynamic
//! extent of its subtree's composition, and any descendant reads it back by
//! type, without holding a subscription or any explicit wiring.
//!
//! ```rust
//! use attune_core::{local, with_local};
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Accent(&'static str);
//!
//! let seen = with_local(Accent("teal"), || local::<Accent>());
//! assert_eq!(seen, Some(Accent("teal")));
//! assert_eq!(local::<Accent>(), None);
//! ```
//!
//! Bindings nest: the innermost provider of a type shadows outer ones, and a
//! frame is popped even when the subtree unwinds.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;

thread_local! {
    static LOCALS_STACK: RefCell<Vec<HashMap<TypeId, Box<dyn Any>>>> = RefCell::new(Vec::new());
}

/// Publishes `value` for the dynamic extent of `f`.
pub fn with_local<T: Clone + 'static, R>(value: T, f: impl FnOnce() -> R) -> R {
    // Frame guard pops on unwind too.
    struct FrameGuard;
    impl Drop for FrameGuard {
        fn drop(&mut self) {
            LOCALS_STACK.with(|stack| {
                stack.borrow_mut().pop();
            });
        }
    }

    LOCALS_STACK.with(|stack| {
        let mut frame: HashMap<TypeId, Box<dyn Any>> = HashMap::new();
        frame.insert(TypeId::of::<T>(), Box::new(value));
        stack.borrow_mut().push(frame);
    });
    let _guard = FrameGuard;
    f()
}

/// Reads the innermost published `T`, if any.
pub fn local<T: Clone + 'static>() -> Option<T> {
    LOCALS_STACK.with(|stack| {
        for frame in stack.borrow().iter().rev() {
            if let Some(v) = frame.get(&TypeId::of::<T>())
                && let Some(v) = v.downcast_ref::<T>()
            {
                return Some(v.clone());
            }
        }
        None
    })
}

pub fn local_or_default<T: Clone + Default + 'static>() -> T {
    local::<T>().unwrap_or_default()
}
