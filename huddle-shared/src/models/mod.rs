/// Database models for Huddle
///
/// This module contains all database models and their operations.
///
/// # Models
///
/// - `user`: registered accounts and the profile projection
/// - `team`: joinable workspaces keyed by a 6-digit code
/// - `membership`: user-team relationships with roles
/// - `note`: team-tagged notes
///
/// # Example
///
/// ```no_run
/// use huddle_shared::models::user::{CreateUser, User};
/// use huddle_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let new_user = CreateUser {
///     fullname: "Ada Lovelace".to_string(),
///     email: "ada@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
/// };
///
/// let user = User::create(&pool, new_user).await?;
/// # Ok(())
/// # }
/// ```
pub mod membership;
pub mod note;
pub mod team;
pub mod user;
