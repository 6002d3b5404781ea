//! RAMS backend API crate.
//!
//! Event-registration and invitation-management backend: candidate records,
//! per-event invitation lifecycle, token-based response links, QR-code
//! check-in, and role-based staff authentication.

pub mod app;
pub mod config;
pub mod error;
pub mod i18n;
pub mod middleware;
pub mod routes;
pub mod services;
