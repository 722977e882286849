#![allow(non_snake_case)]
//! Observable-value bindings and basic view constructors.
//!
//! Two wrappers connect a [`attune_core::Value`] to a composed subtree:
//!
//! - [`Observe`] subscribes, caches the latest value, and hands it to a
//!   build function together with an optional static child.
//! - [`ProvideValue`] publishes the latest value as a composition local so
//!   descendants read it without subscribing themselves.
//!
//! ```rust
//! use attune_core::{Scheduler, value};
//! use attune_ui::{Observe, Text};
//!
//! let temperature = value(21);
//! let mut host = Scheduler::new();
//! let mut build = {
//!     let t = temperature.clone();
//!     move || Observe(&t, None, |v, _| Text(format!("{v} C")))
//! };
//!
//! assert_eq!(host.mount(&mut build).text_content(), "21 C");
//!
//! temperature.set(22);
//! let view = host.tick(&mut build).expect("rebuild after change");
//! assert_eq!(view.text_content(), "22 C");
//! ```

pub mod observe;

pub use observe::{Observe, ProvideValue, ShouldNotify};

use attune_core::{View, ViewKind};

pub fn Group(children: Vec<View>) -> View {
    View::new(ViewKind::Group).with_children(children)
}

pub fn Text(text: impl Into<String>) -> View {
    View::new(ViewKind::Text { text: text.into() })
}
