/// Team endpoints
///
/// Handles team creation, enrollment via the shared 6-digit code, and
/// member listings:
///
/// ```text
/// POST /teams/create-team  - Create a team, creator becomes admin
/// POST /teams/join-team    - Join an existing team via its code
/// GET  /teams/members      - Members of the caller's team (bearer token)
/// GET  /teams/:team_name   - Public team page with member roster
/// ```
///
/// Both enrollment endpoints require the email of an already-registered
/// user and return a fresh token whose claims carry the enrolled team, so
/// clients can call `/teams/members` without logging in again.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    json::Json,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension,
};
use huddle_shared::{
    auth::{context::AuthContext, jwt},
    models::{
        membership::{MemberProfile, Membership},
        team::Team,
        user::UserProfile,
    },
    workflow::{self, CreateTeamParams, JoinTeamParams, TeamEnrollment},
};
use serde::{Deserialize, Serialize};

/// Team creation request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamRequest {
    /// Display name for the new team
    pub team_name: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Display name recorded as the team's creator
    pub user_name: String,

    /// Email of the registered user creating the team
    pub email: String,

    /// Optional client-supplied code; generated when absent
    pub team_code: Option<String>,
}

/// Team join request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinTeamRequest {
    /// Code of the team to join
    pub team_code: String,

    /// Display name supplied by the client
    pub user_name: String,

    /// Email of the registered user joining
    pub email: String,
}

/// Token, team, and profile returned by both enrollment endpoints
#[derive(Debug, Serialize)]
pub struct EnrollmentResponse {
    /// Fresh token carrying the enrolled team's claims
    pub token: String,

    /// The team
    pub team: Team,

    /// The enrolled user with team fields populated
    pub user: UserProfile,
}

/// Member listing response
#[derive(Debug, Serialize)]
pub struct MembersResponse {
    /// Members ordered by join time, creator first
    pub members: Vec<MemberProfile>,
}

/// Public team page response
#[derive(Debug, Serialize)]
pub struct TeamPageResponse {
    /// The team
    pub team: Team,

    /// Members ordered by join time
    pub members: Vec<MemberProfile>,
}

/// Creates a team and enrolls the creator as admin
///
/// The creator's email must belong to a registered account. The team row
/// and the admin membership are written in one transaction.
///
/// # Endpoint
///
/// ```text
/// POST /teams/create-team
/// {"teamName": "Platform", "userName": "Ada", "email": "ada@example.com"}
/// ```
pub async fn create_team(
    State(state): State<AppState>,
    Json(req): Json<CreateTeamRequest>,
) -> ApiResult<(StatusCode, Json<EnrollmentResponse>)> {
    if req.team_name.trim().is_empty() {
        return Err(ApiError::Validation("teamName is required".to_string()));
    }
    if req.user_name.trim().is_empty() {
        return Err(ApiError::Validation("userName is required".to_string()));
    }
    if req.email.trim().is_empty() || !req.email.contains('@') {
        return Err(ApiError::Validation(
            "A valid email address is required".to_string(),
        ));
    }

    let enrollment = workflow::create_team(
        &state.db,
        CreateTeamParams {
            team_name: req.team_name.trim().to_string(),
            description: req.description,
            creator_name: req.user_name.trim().to_string(),
            creator_email: req.email.trim().to_string(),
            team_code: req.team_code.filter(|code| !code.trim().is_empty()),
        },
    )
    .await?;

    let response = enrollment_response(&state, enrollment)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Joins the team behind a 6-digit code
///
/// Requires a registered account. Joining a team the user already belongs
/// to returns the existing membership with its original role.
///
/// # Endpoint
///
/// ```text
/// POST /teams/join-team
/// {"teamCode": "123456", "userName": "Grace", "email": "grace@example.com"}
/// ```
pub async fn join_team(
    State(state): State<AppState>,
    Json(req): Json<JoinTeamRequest>,
) -> ApiResult<(StatusCode, Json<EnrollmentResponse>)> {
    if req.team_code.trim().is_empty() {
        return Err(ApiError::Validation("teamCode is required".to_string()));
    }
    if req.user_name.trim().is_empty() {
        return Err(ApiError::Validation("userName is required".to_string()));
    }
    if req.email.trim().is_empty() || !req.email.contains('@') {
        return Err(ApiError::Validation(
            "A valid email address is required".to_string(),
        ));
    }

    let enrollment = workflow::join_team(
        &state.db,
        JoinTeamParams {
            team_code: req.team_code.trim().to_string(),
            member_name: req.user_name.trim().to_string(),
            member_email: req.email.trim().to_string(),
        },
    )
    .await?;

    let response = enrollment_response(&state, enrollment)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Lists the members of the caller's team
///
/// The team comes from the token claims, so only tokens issued by an
/// enrollment endpoint (or a login after enrolling) can list members.
///
/// # Endpoint
///
/// ```text
/// GET /teams/members
/// Authorization: Bearer <token>
/// ```
pub async fn list_members(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<MembersResponse>> {
    let team_id = auth.team_id.ok_or_else(|| {
        ApiError::Validation("Token carries no team; create or join a team first".to_string())
    })?;

    let members = Membership::list_members(&state.db, team_id).await?;

    Ok(Json(MembersResponse { members }))
}

/// Public team page: the team and its member roster
///
/// # Endpoint
///
/// ```text
/// GET /teams/Platform
/// ```
pub async fn team_page(
    State(state): State<AppState>,
    Path(team_name): Path<String>,
) -> ApiResult<Json<TeamPageResponse>> {
    let team = Team::find_by_name(&state.db, &team_name)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No team named {}", team_name)))?;

    let members = Membership::list_members(&state.db, team.id).await?;

    Ok(Json(TeamPageResponse { team, members }))
}

/// Builds the enrollment response: token with team claims plus profile
fn enrollment_response(
    state: &AppState,
    enrollment: TeamEnrollment,
) -> Result<EnrollmentResponse, ApiError> {
    let TeamEnrollment {
        team,
        user,
        membership,
    } = enrollment;

    let claims = jwt::Claims::with_expiration(
        user.id,
        user.email.clone(),
        Some(team.id),
        Some(membership.role),
        state.token_ttl(),
    );
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    let profile = UserProfile::with_team(&user, &team, membership.role);

    Ok(EnrollmentResponse {
        token,
        team,
        user: profile,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_team_request_deserialization() {
        let json = r#"{
            "teamName": "Platform",
            "description": "Core platform team",
            "userName": "Ada Lovelace",
            "email": "ada@example.com"
        }"#;

        let req: CreateTeamRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.team_name, "Platform");
        assert_eq!(req.description.as_deref(), Some("Core platform team"));
        assert!(req.team_code.is_none());
    }

    #[test]
    fn test_create_team_request_optional_fields_default_to_none() {
        let json = r#"{
            "teamName": "Platform",
            "userName": "Ada",
            "email": "ada@example.com"
        }"#;

        let req: CreateTeamRequest = serde_json::from_str(json).unwrap();
        assert!(req.description.is_none());
        assert!(req.team_code.is_none());
    }

    #[test]
    fn test_join_team_request_deserialization() {
        let json = r#"{
            "teamCode": "123456",
            "userName": "Grace Hopper",
            "email": "grace@example.com"
        }"#;

        let req: JoinTeamRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.team_code, "123456");
        assert_eq!(req.email, "grace@example.com");
    }

    #[test]
    fn test_join_team_request_rejects_missing_code() {
        let json = r#"{"userName": "Grace", "email": "grace@example.com"}"#;
        let result: Result<JoinTeamRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
