/// Team model and database operations
///
/// Teams are the tenant boundary: users belong to teams through the
/// Membership model and find each other via the team's 6-digit join code.
/// Team rows are inserted by the enrollment workflow inside a transaction
/// (see `crate::workflow`), so this module only carries the read side.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE teams (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     team_name VARCHAR(255) NOT NULL,
///     description TEXT,
///     team_code VARCHAR(6) NOT NULL UNIQUE,
///     created_by VARCHAR(255) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// `created_by` holds the creator's display name at creation time; it is
/// intentionally not a foreign key.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Team model representing a workspace users can join
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    /// Unique team ID (UUID v4)
    pub id: Uuid,

    /// Team display name (not unique)
    pub team_name: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// 6-digit join code, unique across all teams
    pub team_code: String,

    /// Display name of the user who created the team
    pub created_by: String,

    /// When the team was created
    pub created_at: DateTime<Utc>,

    /// When the team was last updated
    pub updated_at: DateTime<Utc>,
}

impl Team {
    /// Finds a team by its join code
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `team_code` - 6-digit join code
    ///
    /// # Returns
    ///
    /// The team if found, None otherwise
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use huddle_shared::models::team::Team;
    /// # use sqlx::PgPool;
    /// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
    /// if let Some(team) = Team::find_by_code(&pool, "482913").await? {
    ///     println!("Found team: {}", team.team_name);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn find_by_code(pool: &PgPool, team_code: &str) -> Result<Option<Self>, sqlx::Error> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            SELECT id, team_name, description, team_code, created_by,
                   created_at, updated_at
            FROM teams
            WHERE team_code = $1
            "#,
        )
        .bind(team_code)
        .fetch_optional(pool)
        .await?;

        Ok(team)
    }

    /// Finds a team by display name
    ///
    /// Team names are not unique; when several teams share a name the oldest
    /// one wins.
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `team_name` - Display name to search for
    ///
    /// # Returns
    ///
    /// The oldest team with that name, None if no team matches
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails
    pub async fn find_by_name(pool: &PgPool, team_name: &str) -> Result<Option<Self>, sqlx::Error> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            SELECT id, team_name, description, team_code, created_by,
                   created_at, updated_at
            FROM teams
            WHERE team_name = $1
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .bind(team_name)
        .fetch_optional(pool)
        .await?;

        Ok(team)
    }

    /// Checks whether a join code is already taken
    ///
    /// Used by code generation to retry on collisions; the UNIQUE constraint
    /// on `team_code` remains the final arbiter under concurrency.
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `team_code` - Candidate code
    ///
    /// # Returns
    ///
    /// True if a team already uses the code
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails
    pub async fn code_exists(pool: &PgPool, team_code: &str) -> Result<bool, sqlx::Error> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM teams WHERE team_code = $1
            )
            "#,
        )
        .bind(team_code)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    /// Counts all teams
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM teams")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_serializes_camel_case() {
        let team = Team {
            id: Uuid::new_v4(),
            team_name: "Platform".to_string(),
            description: None,
            team_code: "123456".to_string(),
            created_by: "Ada Lovelace".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&team).unwrap();
        assert_eq!(json["teamName"], "Platform");
        assert_eq!(json["teamCode"], "123456");
        assert_eq!(json["createdBy"], "Ada Lovelace");
        assert!(json["description"].is_null());
    }

    // Database operations are covered by the workflow and API integration tests
}
