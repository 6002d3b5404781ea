//! Domain models for the RAMS backend.

pub mod account;
pub mod candidate;
pub mod institute;
pub mod invitation;

pub use account::{AccountStatus, Role};
pub use candidate::Language;
pub use institute::Institute;
pub use invitation::{InvitationState, ResponseDecision};
