//! # Huddle API Server Library
//!
//! This library provides the core functionality for the Huddle API server:
//! user registration and login, team creation and joining via shared codes,
//! member listings, and team notes.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `json`: JSON body extraction with uniform error responses
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod json;
pub mod routes;
