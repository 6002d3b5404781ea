//! HTTP middleware: authentication and logging setup.

pub mod auth;
pub mod logging;
