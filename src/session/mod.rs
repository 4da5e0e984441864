//! Client-held session: persisted token + cached profile.

pub mod model;
pub mod store;
pub mod vault;

pub use model::{ProfileUpdate, Session, UserProfile};
pub use store::{FileStore, MemoryStore, SessionStore};
pub use vault::SessionVault;
