//! HTTP route handlers.

pub mod auth;
pub mod candidates;
pub mod checkin;
pub mod health;
pub mod institutes;
pub mod invitations;
