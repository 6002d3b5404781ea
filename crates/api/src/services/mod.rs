//! Business logic services.

pub mod admin_bootstrap;
pub mod auth;
pub mod email;
pub mod invitation;
pub mod qr;
