/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `users`: Registration, login, and the authenticated profile
/// - `teams`: Team creation, enrollment via code, and member listings
/// - `notes`: Note CRUD

pub mod health;
pub mod notes;
pub mod teams;
pub mod users;
