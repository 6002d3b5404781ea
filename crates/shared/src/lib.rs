//! Shared utilities for the RAMS backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Session token (JWT) generation and validation
//! - Password hashing with Argon2id
//! - Opaque invitation-token generation

pub mod jwt;
pub mod password;
pub mod token;
