//! Entity definitions (database row mappings).

pub mod account;
pub mod candidate;
pub mod institute;
pub mod invitation;

pub use account::AccountEntity;
pub use candidate::CandidateEntity;
pub use institute::InstituteEntity;
pub use invitation::{CheckinRow, InvitationEntity};
