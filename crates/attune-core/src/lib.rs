//! # Values, scopes, and rebuild scheduling
//!
//! Attune's core is a small reactive runtime with three main pieces:
//!
//! - `Value<T>` — observable value holder with listener registration.
//! - `remember*` — lifecycle-aware storage bound to composition.
//! - `Scheduler` — mount/tick/unmount driver with dirty-flag rebuilds.
//!
//! ## Values
//!
//! `Value<T>` is a cloneable handle to a current value plus its listeners:
//!
//! ```rust
//! use attune_core::*;
//!
//! let count = value(0);
//! count.set(1);
//! count.update(|v| *v += 1);
//! assert_eq!(count.get(), 2);
//! ```
//!
//! Listeners take no arguments and fire synchronously inside `set`/`update`;
//! an observer re-reads the current value itself. Invocation order across
//! listeners of one holder is unspecified.
//!
//! ```rust
//! use attune_core::*;
//!
//! let name = value("ada".to_string());
//! let key = name.listen(|| println!("changed"));
//! name.set("grace".to_string());
//! name.unlisten(key);
//! ```
//!
//! ## Remembered state
//!
//! Composition-local state lives in `remember_*` slots rather than globals.
//! `remember` and `remember_state` are order-based: the Nth call in a pass
//! always refers to the Nth stored value. `remember_with_key` and
//! `remember_state_with_key` are key-based and stable across conditional
//! branches.
//!
//! ## Effects and cleanup
//!
//! `effect` / `scoped_effect` run a side effect now and tie its cleanup to
//! the current scope; `disposable_effect` additionally re-runs when its key
//! changes, cleaning up the previous run first. Subscription lifecycles are
//! built on exactly this: subscribe in the effect, deregister in the
//! cleanup, key the effect by holder identity.
//!
//! ```rust
//! use attune_core::*;
//!
//! let scope = Scope::new();
//! scope.run(|| {
//!     scoped_effect(|| {
//!         log::info!("mounted");
//!         on_unmount(|| log::info!("unmounted"))
//!     });
//! });
//! scope.dispose(); // runs the unmount cleanup
//! ```
//!
//! ## Rebuilds
//!
//! Nothing here polls. A listener calls `request_rebuild()`, and the next
//! `Scheduler::tick` recomposes; a tick with no pending request does no
//! work and returns `None`.

pub mod effects;
pub mod error;
pub mod locals;
pub mod prelude;
pub mod runtime;
pub mod scope;
pub mod tests;
pub mod value;
pub mod view;

pub use effects::*;
pub use error::*;
pub use locals::*;
pub use prelude::*;
pub use runtime::*;
pub use scope::*;
pub use value::*;
pub use view::*;
