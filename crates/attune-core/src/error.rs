#![allow(non_snake_case)]
use std::cell::RefCell;
use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::View;
use crate::runtime::remember;
use crate::scope::{Scope, current_scope};

pub struct ErrorInfo {
    pub message: String,
}

/// Composes `content` under its own scope; on panic, tears that scope down
/// (running every cleanup registered so far, listener deregistrations
/// included) and renders `fallback` instead.
///
/// The boundary scope persists across composition passes so effects inside
/// `content` keep their install-once semantics. After a panic the next pass
/// starts over with a fresh scope.
pub fn ErrorBoundary(
    fallback: impl Fn(ErrorInfo) -> View,
    content: impl Fn() -> View,
) -> View {
    let slot = remember(|| RefCell::new(None::<Scope>));

    let scope = slot
        .borrow_mut()
        .get_or_insert_with(|| match current_scope() {
            Some(parent) => parent.child(),
            None => Scope::new(),
        })
        .clone();

    match catch_unwind(AssertUnwindSafe(|| scope.run(&content))) {
        Ok(view) => view,
        Err(err) => {
            if let Some(scope) = slot.borrow_mut().take() {
                scope.dispose();
            }

            let message = if let Some(s) = err.downcast_ref::<String>() {
                s.clone()
            } else if let Some(s) = err.downcast_ref::<&str>() {
                s.to_string()
            } else {
                "unknown panic".to_string()
            };

            fallback(ErrorInfo { message })
        }
    }
}
