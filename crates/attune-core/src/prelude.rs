pub use crate::effects::{Dispose, disposable_effect, effect, on_unmount, side_effect};
pub use crate::error::{ErrorBoundary, ErrorInfo};
pub use crate::locals::{local, local_or_default, with_local};
pub use crate::runtime::{
    Scheduler, remember, remember_state, remember_state_with_key, remember_with_key,
    request_rebuild,
};
pub use crate::scope::{Scope, current_scope, scoped_effect};
pub use crate::value::{ListenerKey, Value, WeakValue, value};
pub use crate::view::{View, ViewKind};
