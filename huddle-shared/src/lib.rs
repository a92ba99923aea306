//! # Huddle Shared Library
//!
//! This crate contains the domain types and business logic shared by the
//! Huddle API server and its tests.
//!
//! ## Module Organization
//!
//! - `models`: Database models and data structures
//! - `auth`: Password hashing, token issuing, and the request auth context
//! - `db`: Connection pool and migration utilities
//! - `workflow`: Team enrollment (create/join) and code generation

pub mod auth;
pub mod db;
pub mod models;
pub mod workflow;

/// Current version of the Huddle shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
