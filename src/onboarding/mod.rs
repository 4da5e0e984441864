//! Driver onboarding — the three-step registration workflow.
//!
//! An ordered sequence (Account → Driver Profile → Motorcycle) where each
//! step persists partial state and advances only on a successful save.
//! The session's driver id is the correlation key the steps share.

pub mod attachments;
pub mod flow;
pub mod forms;
pub mod state;

pub use attachments::{ImageAttachment, PhotoSelection, PreviewRegistry, RgSelection};
pub use flow::{RegistrationFlow, StepReport};
pub use forms::{AccountForm, DriverProfileForm, MotorcycleForm};
pub use state::{RegistrationState, RegistrationStep};
