//! Repository implementations.

pub mod account;
pub mod candidate;
pub mod institute;
pub mod invitation;

pub use account::AccountRepository;
pub use candidate::{CandidateFilter, CandidateListRow, CandidateRepository, NewCandidate};
pub use institute::InstituteRepository;
pub use invitation::{CheckinOutcome, InvitationRepository};
