//! Authentication state: context, phases, and the route guard.

pub mod context;
pub mod guard;

pub use context::{AuthContext, AuthPhase, AuthSnapshot};
pub use guard::{RouteDecision, decide};
