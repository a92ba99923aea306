/// User model and database operations
///
/// This module provides the User model and the read/write operations the
/// account endpoints need. Users can belong to multiple teams via the
/// Membership model; their "current" team is the one joined most recently.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     fullname VARCHAR(255) NOT NULL,
///     email VARCHAR(255) NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     last_login_at TIMESTAMPTZ
/// );
/// ```
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
/// println!("Created user: {}", user.id);
///
/// let found = User::find_by_email(&pool, "ada@example.com").await?;
/// # Ok(())
/// # }
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::membership::TeamRole;
use super::team::Team;

/// User model representing a registered account
///
/// Users can belong to multiple teams via the team_members table.
/// Passwords are stored as Argon2id hashes, never in plaintext, and the
/// hash is excluded from serialization so it cannot end up in a response.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v4)
    pub id: Uuid,

    /// Display name supplied at registration
    pub fullname: String,

    /// Email address, unique across all users
    pub email: String,

    /// Argon2id password hash
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last updated
    pub updated_at: DateTime<Utc>,

    /// When the user last logged in (None if never logged in)
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Display name
    pub fullname: String,

    /// Email address
    pub email: String,

    /// Argon2id password hash (NOT the plaintext password!)
    pub password_hash: String,
}

/// Response-facing projection of a user joined with their current team
///
/// The current team is the most recently joined membership; all team fields
/// are None for users who have not joined a team yet. Carries no password
/// material by construction.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// User ID
    pub id: Uuid,

    /// Display name
    pub full_name: String,

    /// Email address
    pub email: String,

    /// Current team ID, if any
    pub team_id: Option<Uuid>,

    /// Current team display name
    pub team_name: Option<String>,

    /// Current team join code
    pub team_code: Option<String>,

    /// Role held in the current team
    pub role: Option<TeamRole>,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the user last logged in
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Creates a new user in the database
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `data` - User creation data
    ///
    /// # Returns
    ///
    /// The newly created user with generated ID and timestamps
    ///
    /// # Errors
    ///
    /// Returns an error if the email already exists (unique constraint
    /// violation) or the database connection fails.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use huddle_shared::models::user::{CreateUser, User};
    /// # use sqlx::PgPool;
    /// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
    /// let new_user = CreateUser {
    ///     fullname: "Ada Lovelace".to_string(),
    ///     email: "ada@example.com".to_string(),
    ///     password_hash: "$argon2id$...".to_string(),
    /// };
    ///
    /// let user = User::create(&pool, new_user).await?;
    /// println!("Created user: {}", user.id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (fullname, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, fullname, email, password_hash,
                      created_at, updated_at, last_login_at
            "#,
        )
        .bind(data.fullname)
        .bind(data.email)
        .bind(data.password_hash)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `id` - User ID to search for
    ///
    /// # Returns
    ///
    /// The user if found, None otherwise
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, fullname, email, password_hash,
                   created_at, updated_at, last_login_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by email address
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `email` - Email address to search for
    ///
    /// # Returns
    ///
    /// The user if found, None otherwise
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use huddle_shared::models::user::User;
    /// # use sqlx::PgPool;
    /// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
    /// if let Some(user) = User::find_by_email(&pool, "ada@example.com").await? {
    ///     println!("Found user: {}", user.id);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, fullname, email, password_hash,
                   created_at, updated_at, last_login_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Updates the last login timestamp for a user
    ///
    /// Called after successful authentication.
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `id` - ID of the user who logged in
    ///
    /// # Returns
    ///
    /// True if the user was found and stamped, false otherwise
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails
    pub async fn update_last_login(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET last_login_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Loads a user's profile joined with their current team
    ///
    /// The current team is the membership with the latest `joined_at`; the
    /// team columns come back NULL for users without any membership.
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `id` - User ID to load
    ///
    /// # Returns
    ///
    /// The profile if the user exists, None otherwise
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use huddle_shared::models::user::User;
    /// # use sqlx::PgPool;
    /// # use uuid::Uuid;
    /// # async fn example(pool: PgPool, user_id: Uuid) -> Result<(), sqlx::Error> {
    /// if let Some(profile) = User::profile(&pool, user_id).await? {
    ///     println!("{} is on team {:?}", profile.full_name, profile.team_name);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn profile(pool: &PgPool, id: Uuid) -> Result<Option<UserProfile>, sqlx::Error> {
        let profile = sqlx::query_as::<_, UserProfile>(
            r#"
            SELECT u.id, u.fullname AS full_name, u.email,
                   m.team_id, t.team_name, t.team_code, m.role,
                   u.created_at, u.last_login_at
            FROM users u
            LEFT JOIN LATERAL (
                SELECT team_id, role
                FROM team_members
                WHERE user_id = u.id
                ORDER BY joined_at DESC
                LIMIT 1
            ) m ON TRUE
            LEFT JOIN teams t ON t.id = m.team_id
            WHERE u.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(profile)
    }
}

impl UserProfile {
    /// Builds a profile for a user with no team affiliation
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            full_name: user.fullname.clone(),
            email: user.email.clone(),
            team_id: None,
            team_name: None,
            team_code: None,
            role: None,
            created_at: user.created_at,
            last_login_at: user.last_login_at,
        }
    }

    /// Builds a profile from an enrollment's parts, avoiding a re-query
    pub fn with_team(user: &User, team: &Team, role: TeamRole) -> Self {
        Self {
            id: user.id,
            full_name: user.fullname.clone(),
            email: user.email.clone(),
            team_id: Some(team.id),
            team_name: Some(team.team_name.clone()),
            team_code: Some(team.team_code.clone()),
            role: Some(role),
            created_at: user.created_at,
            last_login_at: user.last_login_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            fullname: "Test User".to_string(),
            email: "test@example.com".to_string(),
            password_hash: "$argon2id$test".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            last_login_at: None,
        }
    }

    #[test]
    fn test_create_user_struct() {
        let create_user = CreateUser {
            fullname: "Test User".to_string(),
            email: "test@example.com".to_string(),
            password_hash: "hash".to_string(),
        };

        assert_eq!(create_user.email, "test@example.com");
        assert_eq!(create_user.password_hash, "hash");
    }

    #[test]
    fn test_user_serialization_excludes_password_hash() {
        let user = sample_user();
        let json = serde_json::to_value(&user).unwrap();

        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "test@example.com");
    }

    #[test]
    fn test_profile_from_user_has_no_team() {
        let user = sample_user();
        let profile = UserProfile::from_user(&user);

        assert_eq!(profile.id, user.id);
        assert_eq!(profile.full_name, "Test User");
        assert!(profile.team_id.is_none());
        assert!(profile.role.is_none());
    }

    #[test]
    fn test_profile_serializes_camel_case() {
        let user = sample_user();
        let json = serde_json::to_value(UserProfile::from_user(&user)).unwrap();

        assert!(json.get("fullName").is_some());
        assert!(json.get("lastLoginAt").is_some());
        assert!(json.get("password_hash").is_none());
        assert!(json.get("passwordHash").is_none());
    }

    // Database operations are covered by the workflow and API integration tests
}
