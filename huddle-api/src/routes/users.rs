/// Account endpoints
///
/// Handles user registration, login, and the authenticated profile:
///
/// ```text
/// POST /users/register  - Register a new account
/// POST /users/login     - Login with email and password
/// GET  /users/profile   - Current user's profile (bearer token)
/// ```
///
/// Registration and login both return a signed token alongside the user
/// profile. Login embeds the user's current team in the token claims so a
/// returning member can immediately call the team endpoints.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    json::Json,
};
use axum::{extract::State, http::StatusCode, Extension};
use huddle_shared::{
    auth::{context::AuthContext, jwt, password},
    models::user::{CreateUser, User, UserProfile},
};
use serde::{Deserialize, Serialize};

/// Registration request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Display name
    pub full_name: String,

    /// Email address (must be unique)
    pub email: String,

    /// Plaintext password, hashed before storage
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Email address
    pub email: String,

    /// Plaintext password
    pub password: String,
}

/// Token plus profile returned by register and login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// Signed bearer token
    pub token: String,

    /// The authenticated user
    pub user: UserProfile,
}

/// Profile response
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    /// The authenticated user
    pub user: UserProfile,
}

/// Registers a new user account
///
/// Hashes the password with Argon2id, stores the user, and returns a token
/// with no team claims (a fresh account belongs to no team yet).
///
/// # Endpoint
///
/// ```text
/// POST /users/register
/// {"fullName": "Ada Lovelace", "email": "ada@example.com", "password": "..."}
/// ```
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    if req.full_name.trim().is_empty() {
        return Err(ApiError::Validation("fullName is required".to_string()));
    }
    if req.email.trim().is_empty() || !req.email.contains('@') {
        return Err(ApiError::Validation(
            "A valid email address is required".to_string(),
        ));
    }
    if req.password.is_empty() {
        return Err(ApiError::Validation("password is required".to_string()));
    }

    // Pre-check for a clear message; the unique constraint still backstops
    // concurrent registrations
    if User::find_by_email(&state.db, &req.email).await?.is_some() {
        return Err(ApiError::Conflict(
            "A user with this email already exists".to_string(),
        ));
    }

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            fullname: req.full_name.trim().to_string(),
            email: req.email.trim().to_string(),
            password_hash,
        },
    )
    .await?;

    let claims = jwt::Claims::with_expiration(
        user.id,
        user.email.clone(),
        None,
        None,
        state.token_ttl(),
    );
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: UserProfile::from_user(&user),
            token,
        }),
    ))
}

/// Authenticates a user with email and password
///
/// A wrong password and an unknown email produce the same 401 message, so
/// responses do not reveal which emails are registered.
///
/// # Endpoint
///
/// ```text
/// POST /users/login
/// {"email": "ada@example.com", "password": "..."}
/// ```
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(ApiError::Validation(
            "email and password are required".to_string(),
        ));
    }

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    User::update_last_login(&state.db, user.id).await?;

    // Reload as a profile so the token carries the current team, if any
    let profile = User::profile(&state.db, user.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let claims = jwt::Claims::with_expiration(
        profile.id,
        profile.email.clone(),
        profile.team_id,
        profile.role,
        state.token_ttl(),
    );
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    tracing::info!(user_id = %profile.id, "user logged in");

    Ok(Json(AuthResponse {
        token,
        user: profile,
    }))
}

/// Returns the authenticated user's profile
///
/// The auth layer has already validated the token; the 404 covers accounts
/// deleted after the token was issued.
///
/// # Endpoint
///
/// ```text
/// GET /users/profile
/// Authorization: Bearer <token>
/// ```
pub async fn profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<ProfileResponse>> {
    let profile = User::profile(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(ProfileResponse { user: profile }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_deserialization() {
        let json = r#"{
            "fullName": "Ada Lovelace",
            "email": "ada@example.com",
            "password": "secret123"
        }"#;

        let req: RegisterRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.full_name, "Ada Lovelace");
        assert_eq!(req.email, "ada@example.com");
        assert_eq!(req.password, "secret123");
    }

    #[test]
    fn test_register_request_rejects_missing_fields() {
        let json = r#"{"email": "ada@example.com"}"#;
        let result: Result<RegisterRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_login_request_deserialization() {
        let json = r#"{"email": "ada@example.com", "password": "secret123"}"#;
        let req: LoginRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.email, "ada@example.com");
    }

    #[test]
    fn test_auth_response_has_no_password_material() {
        let user = User {
            id: uuid::Uuid::new_v4(),
            fullname: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
            last_login_at: None,
        };

        let response = AuthResponse {
            token: "token".to_string(),
            user: UserProfile::from_user(&user),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password"));
    }
}
