/// Note model and database operations
///
/// Notes are lightweight team-tagged messages. They reference their team and
/// author by display name and email rather than by id, so they survive
/// membership changes unchanged.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Note model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique note ID (UUID v4)
    pub id: Uuid,

    /// Short title
    pub heading: String,

    /// Note body
    pub text: String,

    /// Display name of the author
    pub member_name: String,

    /// Email of the author
    pub member_email: String,

    /// Display name of the team the note belongs to
    pub team_name: String,

    /// When the note was created
    pub created_at: DateTime<Utc>,

    /// When the note was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a note
#[derive(Debug, Clone)]
pub struct CreateNote {
    pub heading: String,
    pub text: String,
    pub member_name: String,
    pub member_email: String,
    pub team_name: String,
}

/// Input for updating a note's content
#[derive(Debug, Clone)]
pub struct UpdateNote {
    pub heading: String,
    pub text: String,
}

impl Note {
    /// Creates a new note
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails
    pub async fn create(pool: &PgPool, data: CreateNote) -> Result<Self, sqlx::Error> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            INSERT INTO notes (heading, text, member_name, member_email, team_name)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, heading, text, member_name, member_email, team_name,
                      created_at, updated_at
            "#,
        )
        .bind(data.heading)
        .bind(data.text)
        .bind(data.member_name)
        .bind(data.member_email)
        .bind(data.team_name)
        .fetch_one(pool)
        .await?;

        Ok(note)
    }

    /// Finds a note by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            SELECT id, heading, text, member_name, member_email, team_name,
                   created_at, updated_at
            FROM notes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(note)
    }

    /// Lists all notes, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let notes = sqlx::query_as::<_, Note>(
            r#"
            SELECT id, heading, text, member_name, member_email, team_name,
                   created_at, updated_at
            FROM notes
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(notes)
    }

    /// Lists a team's notes, newest first
    ///
    /// An unknown team name yields an empty list rather than an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails
    pub async fn list_by_team(pool: &PgPool, team_name: &str) -> Result<Vec<Self>, sqlx::Error> {
        let notes = sqlx::query_as::<_, Note>(
            r#"
            SELECT id, heading, text, member_name, member_email, team_name,
                   created_at, updated_at
            FROM notes
            WHERE team_name = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(team_name)
        .fetch_all(pool)
        .await?;

        Ok(notes)
    }

    /// Updates a note's heading and text, stamping `updated_at`
    ///
    /// # Returns
    ///
    /// The updated note if found, None if the note doesn't exist
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateNote,
    ) -> Result<Option<Self>, sqlx::Error> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            UPDATE notes
            SET heading = $2, text = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, heading, text, member_name, member_email, team_name,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(data.heading)
        .bind(data.text)
        .fetch_optional(pool)
        .await?;

        Ok(note)
    }

    /// Deletes a note by ID
    ///
    /// # Returns
    ///
    /// The deleted note if it existed, None otherwise
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            DELETE FROM notes
            WHERE id = $1
            RETURNING id, heading, text, member_name, member_email, team_name,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(note)
    }
}
