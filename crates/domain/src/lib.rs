//! Domain layer for the RAMS backend.
//!
//! This crate contains the domain models and the pure rules of the
//! invitation lifecycle: roles, account status, candidate languages, and the
//! invitation state machine.

pub mod models;
