/// Team enrollment workflows
///
/// Creating and joining teams touch several tables at once, so the write
/// side lives here rather than in the individual models. Both operations
/// resolve their inputs up front, then perform all inserts inside a single
/// transaction. A failure at any step rolls the whole enrollment back.
///
/// Team codes are the 6-digit shared secrets members use to join. Codes are
/// drawn at random and checked against the `teams` table; the `UNIQUE`
/// constraint on `team_code` remains the final arbiter when two enrollments
/// race for the same code.
use rand::Rng;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::membership::{Membership, TeamRole};
use crate::models::team::Team;
use crate::models::user::User;

/// Upper bound on collision retries when generating a team code
pub const MAX_CODE_ATTEMPTS: u32 = 10;

/// Error type for enrollment workflows
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// No registered user with the given email
    #[error("No registered user with email {0}")]
    UserNotFound(String),

    /// No team with the given code
    #[error("No team with code {0}")]
    TeamNotFound(String),

    /// Could not find a free team code
    #[error("Could not allocate a unique team code after {attempts} attempts")]
    CodeSpaceExhausted { attempts: u32 },

    /// Database error
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Input for [`create_team`]
#[derive(Debug, Clone)]
pub struct CreateTeamParams {
    /// Display name for the new team
    pub team_name: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Display name recorded as the team's creator
    pub creator_name: String,

    /// Email of the registered user creating the team
    pub creator_email: String,

    /// Client-supplied code; generated when absent
    pub team_code: Option<String>,
}

/// Input for [`join_team`]
#[derive(Debug, Clone)]
pub struct JoinTeamParams {
    /// Code of the team to join
    pub team_code: String,

    /// Display name supplied by the client. Accepted for request symmetry;
    /// the registered fullname stays canonical.
    pub member_name: String,

    /// Email of the registered user joining
    pub member_email: String,
}

/// The (team, user, membership) triple produced by an enrollment
#[derive(Debug, Clone)]
pub struct TeamEnrollment {
    pub team: Team,
    pub user: User,
    pub membership: Membership,
}

/// Draws a uniform random 6-digit team code
///
/// Codes range over `100000..=999999`, so every code is exactly six decimal
/// digits with no leading zero.
pub fn random_team_code() -> String {
    rand::thread_rng().gen_range(100_000..=999_999).to_string()
}

/// Generates a team code not currently in use
///
/// Draws random candidates and checks them against the `teams` table,
/// retrying at most [`MAX_CODE_ATTEMPTS`] times before giving up.
///
/// # Errors
///
/// Returns `WorkflowError::CodeSpaceExhausted` when every candidate
/// collided, `WorkflowError::Database` on query failure.
pub async fn generate_team_code(pool: &PgPool) -> Result<String, WorkflowError> {
    for attempt in 0..MAX_CODE_ATTEMPTS {
        let code = random_team_code();
        if !Team::code_exists(pool, &code).await? {
            return Ok(code);
        }
        tracing::debug!(attempt, "team code collision, retrying");
    }

    Err(WorkflowError::CodeSpaceExhausted {
        attempts: MAX_CODE_ATTEMPTS,
    })
}

/// Creates a team and enrolls its creator as admin
///
/// The creator must already be registered; the email is resolved to a user
/// before anything is written. The team row and the creator's `admin`
/// membership are inserted in one transaction, so a failure at either step
/// leaves no orphan rows.
///
/// A client-supplied code is honored as-is. Uniqueness is enforced by the
/// database; a duplicate surfaces as `WorkflowError::Database` carrying the
/// constraint violation.
///
/// # Example
///
/// ```no_run
/// use huddle_shared::workflow::{create_team, CreateTeamParams};
///
/// # async fn example(pool: sqlx::PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let enrollment = create_team(
///     &pool,
///     CreateTeamParams {
///         team_name: "Platform".to_string(),
///         description: None,
///         creator_name: "Ada".to_string(),
///         creator_email: "ada@example.com".to_string(),
///         team_code: None,
///     },
/// )
/// .await?;
///
/// println!("join with code {}", enrollment.team.team_code);
/// # Ok(())
/// # }
/// ```
pub async fn create_team(
    pool: &PgPool,
    params: CreateTeamParams,
) -> Result<TeamEnrollment, WorkflowError> {
    let user = User::find_by_email(pool, &params.creator_email)
        .await?
        .ok_or_else(|| WorkflowError::UserNotFound(params.creator_email.clone()))?;

    let team_code = match params.team_code {
        Some(code) => code,
        None => generate_team_code(pool).await?,
    };

    let mut tx = pool.begin().await?;

    let team = sqlx::query_as::<_, Team>(
        r#"
        INSERT INTO teams (team_name, description, team_code, created_by)
        VALUES ($1, $2, $3, $4)
        RETURNING id, team_name, description, team_code, created_by, created_at, updated_at
        "#,
    )
    .bind(&params.team_name)
    .bind(&params.description)
    .bind(&team_code)
    .bind(&params.creator_name)
    .fetch_one(&mut *tx)
    .await?;

    let membership = insert_membership(&mut *tx, team.id, user.id, TeamRole::Admin).await?;

    tx.commit().await?;

    tracing::info!(team_id = %team.id, team_name = %team.team_name, "team created");

    Ok(TeamEnrollment {
        team,
        user,
        membership,
    })
}

/// Enrolls a registered user into the team behind a code
///
/// Joining is idempotent: a user who already belongs to the team gets their
/// existing membership back, original role and `joined_at` preserved, and no
/// duplicate row is written.
///
/// # Errors
///
/// `TeamNotFound` when no team carries the code, `UserNotFound` when the
/// email has no registered account.
pub async fn join_team(
    pool: &PgPool,
    params: JoinTeamParams,
) -> Result<TeamEnrollment, WorkflowError> {
    let team = Team::find_by_code(pool, &params.team_code)
        .await?
        .ok_or_else(|| WorkflowError::TeamNotFound(params.team_code.clone()))?;

    let user = User::find_by_email(pool, &params.member_email)
        .await?
        .ok_or_else(|| WorkflowError::UserNotFound(params.member_email.clone()))?;

    let mut tx = pool.begin().await?;

    let membership = insert_membership(&mut *tx, team.id, user.id, TeamRole::Member).await?;

    tx.commit().await?;

    tracing::info!(team_id = %team.id, user_id = %user.id, "member joined team");

    Ok(TeamEnrollment {
        team,
        user,
        membership,
    })
}

/// Inserts a membership row, returning the existing one on conflict
async fn insert_membership(
    conn: &mut PgConnection,
    team_id: Uuid,
    user_id: Uuid,
    role: TeamRole,
) -> Result<Membership, sqlx::Error> {
    let inserted = sqlx::query_as::<_, Membership>(
        r#"
        INSERT INTO team_members (team_id, user_id, role)
        VALUES ($1, $2, $3)
        ON CONFLICT (team_id, user_id) DO NOTHING
        RETURNING team_id, user_id, role, joined_at
        "#,
    )
    .bind(team_id)
    .bind(user_id)
    .bind(role)
    .fetch_optional(&mut *conn)
    .await?;

    match inserted {
        Some(membership) => Ok(membership),
        // Conflict skipped the insert: the membership already exists
        None => {
            sqlx::query_as::<_, Membership>(
                r#"
                SELECT team_id, user_id, role, joined_at
                FROM team_members
                WHERE team_id = $1 AND user_id = $2
                "#,
            )
            .bind(team_id)
            .bind(user_id)
            .fetch_one(&mut *conn)
            .await
        }
    }
}
