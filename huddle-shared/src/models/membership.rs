/// Membership model and database operations
///
/// This module provides the Membership model for user-team relationships.
/// It implements a many-to-many relationship between users and teams; the
/// composite primary key keeps a user from joining the same team twice.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE team_role AS ENUM ('admin', 'member');
///
/// CREATE TABLE team_members (
///     team_id UUID NOT NULL REFERENCES teams(id) ON DELETE CASCADE,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     role team_role NOT NULL DEFAULT 'member',
///     joined_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     PRIMARY KEY (team_id, user_id)
/// );
/// ```
///
/// # Roles
///
/// - **admin**: the team's creator
/// - **member**: joined through the team code
///
/// Membership rows are written by the enrollment workflows inside their
/// transactions; this module covers the read side.
///
/// # Example
///
/// ```no_run
/// use huddle_shared::models::membership::Membership;
/// use huddle_shared::db::pool::{create_pool, DatabaseConfig};
/// use uuid::Uuid;
///
/// # async fn example(team_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let members = Membership::list_members(&pool, team_id).await?;
/// println!("{} members", members.len());
/// # Ok(())
/// # }
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Roles a user can hold within a team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "team_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TeamRole {
    /// Assigned to the user who created the team
    Admin,

    /// Assigned to users who joined through the team code
    Member,
}

impl TeamRole {
    /// Converts role to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            TeamRole::Admin => "admin",
            TeamRole::Member => "member",
        }
    }
}

/// Membership model representing a user's place in a team
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Membership {
    /// Team ID
    pub team_id: Uuid,

    /// User ID
    pub user_id: Uuid,

    /// Role within the team
    pub role: TeamRole,

    /// When the user joined the team
    pub joined_at: DateTime<Utc>,
}

/// A team member as shown in member listings
///
/// Joins the membership row with the user's display fields; carries no
/// password material.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MemberProfile {
    /// User ID
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Role within the team
    pub role: TeamRole,

    /// When the user joined the team
    pub joined_at: DateTime<Utc>,
}

impl Membership {
    /// Finds a specific membership by team and user
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `team_id` - Team ID
    /// * `user_id` - User ID
    ///
    /// # Returns
    ///
    /// The membership if found, None otherwise
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use huddle_shared::models::membership::Membership;
    /// # use sqlx::PgPool;
    /// # use uuid::Uuid;
    /// # async fn example(pool: PgPool, team_id: Uuid, user_id: Uuid) -> Result<(), sqlx::Error> {
    /// if let Some(membership) = Membership::find(&pool, team_id, user_id).await? {
    ///     println!("User role: {:?}", membership.role);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn find(
        pool: &PgPool,
        team_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let membership = sqlx::query_as::<_, Membership>(
            r#"
            SELECT team_id, user_id, role, joined_at
            FROM team_members
            WHERE team_id = $1 AND user_id = $2
            "#,
        )
        .bind(team_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(membership)
    }

    /// Lists the members of a team with their display fields
    ///
    /// Members come back in join order, so the team's creator is first.
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `team_id` - Team ID
    ///
    /// # Returns
    ///
    /// Vector of member profiles ordered by `joined_at` ascending
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use huddle_shared::models::membership::Membership;
    /// # use sqlx::PgPool;
    /// # use uuid::Uuid;
    /// # async fn example(pool: PgPool, team_id: Uuid) -> Result<(), sqlx::Error> {
    /// let members = Membership::list_members(&pool, team_id).await?;
    /// println!("Team has {} members", members.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_members(
        pool: &PgPool,
        team_id: Uuid,
    ) -> Result<Vec<MemberProfile>, sqlx::Error> {
        let members = sqlx::query_as::<_, MemberProfile>(
            r#"
            SELECT u.id, u.fullname AS name, u.email, tm.role, tm.joined_at
            FROM team_members tm
            JOIN users u ON u.id = tm.user_id
            WHERE tm.team_id = $1
            ORDER BY tm.joined_at ASC
            "#,
        )
        .bind(team_id)
        .fetch_all(pool)
        .await?;

        Ok(members)
    }

    /// Counts members in a team
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `team_id` - Team ID
    ///
    /// # Returns
    ///
    /// Number of members in the team
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails
    pub async fn count_by_team(pool: &PgPool, team_id: Uuid) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM team_members WHERE team_id = $1")
                .bind(team_id)
                .fetch_one(pool)
                .await?;

        Ok(count)
    }
}
