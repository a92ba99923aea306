/// JWT token generation and validation module
///
/// This module provides JWT (JSON Web Token) functionality for user
/// authentication. Tokens are signed using HS256 (HMAC-SHA256) and carry the
/// user's identity plus their current team context.
///
/// # Security
///
/// - **Algorithm**: HS256 (HMAC with SHA-256)
/// - **Expiration**: configurable, default 24 hours
/// - **Validation**: signature, expiration, not-before, and issuer checks
/// - **Secret Management**: the secret is always caller-provided and must be
///   at least 32 bytes; there is no built-in fallback value
///
/// # Example
///
/// ```
/// use huddle_shared::auth::jwt::{create_token, validate_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let user_id = Uuid::new_v4();
/// let secret = "a-test-secret-key-at-least-32-bytes!";
///
/// let claims = Claims::new(user_id, "ada@example.com".to_string(), None, None);
/// let token = create_token(&claims, secret)?;
///
/// let validated = validate_token(&token, secret)?;
/// assert_eq!(validated.sub, user_id);
/// # Ok(())
/// # }
/// ```
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::membership::TeamRole;

/// Issuer claim stamped into every token
pub const ISSUER: &str = "huddle";

/// Default token lifetime in hours
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Failed to validate token
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Invalid token format
    #[error("Invalid token format: {0}")]
    InvalidFormat(String),

    /// Invalid issuer
    #[error("Invalid issuer: expected {expected}")]
    InvalidIssuer { expected: String },
}

/// JWT claims structure
///
/// Standard claims plus the team context the session was issued under.
///
/// # Standard Claims
///
/// - `sub`: Subject (user ID)
/// - `iss`: Issuer (always "huddle")
/// - `iat`: Issued at timestamp
/// - `exp`: Expiration timestamp
/// - `nbf`: Not before timestamp
///
/// # Custom Claims
///
/// - `email`: the user's email address
/// - `team_id`: current team, absent for users without a membership
/// - `role`: role held in the current team
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - User ID
    pub sub: Uuid,

    /// Issuer - Always "huddle"
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// Email address (custom claim)
    pub email: String,

    /// Current team ID (custom claim)
    pub team_id: Option<Uuid>,

    /// Role within the current team (custom claim)
    pub role: Option<TeamRole>,
}

impl Claims {
    /// Creates new claims with the default 24-hour expiration
    ///
    /// # Arguments
    ///
    /// * `user_id` - User ID (subject)
    /// * `email` - User's email address
    /// * `team_id` - Current team, if the user has one
    /// * `role` - Role within that team
    ///
    /// # Example
    ///
    /// ```
    /// use huddle_shared::auth::jwt::Claims;
    /// use huddle_shared::models::membership::TeamRole;
    /// use uuid::Uuid;
    ///
    /// let claims = Claims::new(
    ///     Uuid::new_v4(),
    ///     "ada@example.com".to_string(),
    ///     Some(Uuid::new_v4()),
    ///     Some(TeamRole::Admin),
    /// );
    /// ```
    pub fn new(
        user_id: Uuid,
        email: String,
        team_id: Option<Uuid>,
        role: Option<TeamRole>,
    ) -> Self {
        Self::with_expiration(
            user_id,
            email,
            team_id,
            role,
            Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
        )
    }

    /// Creates claims with a custom expiration
    ///
    /// # Example
    ///
    /// ```
    /// use huddle_shared::auth::jwt::Claims;
    /// use chrono::Duration;
    /// use uuid::Uuid;
    ///
    /// let claims = Claims::with_expiration(
    ///     Uuid::new_v4(),
    ///     "ada@example.com".to_string(),
    ///     None,
    ///     None,
    ///     Duration::hours(1),
    /// );
    /// ```
    pub fn with_expiration(
        user_id: Uuid,
        email: String,
        team_id: Option<Uuid>,
        role: Option<TeamRole>,
        expires_in: Duration,
    ) -> Self {
        let now = Utc::now();
        let expiration = now + expires_in;

        Self {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            nbf: now.timestamp(),
            email,
            team_id,
            role,
        }
    }

    /// Checks if the token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Gets time until expiration, None once expired
    pub fn time_until_expiration(&self) -> Option<Duration> {
        let now = Utc::now().timestamp();
        if self.exp > now {
            Some(Duration::seconds(self.exp - now))
        } else {
            None
        }
    }
}

/// Creates a JWT token from claims
///
/// Signs the token using HS256 (HMAC-SHA256) with the provided secret.
///
/// # Arguments
///
/// * `claims` - Token claims
/// * `secret` - Secret key for signing (at least 32 bytes)
///
/// # Errors
///
/// Returns `JwtError::CreateError` if token encoding fails
///
/// # Example
///
/// ```
/// use huddle_shared::auth::jwt::{create_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let claims = Claims::new(Uuid::new_v4(), "ada@example.com".to_string(), None, None);
/// let token = create_token(&claims, "a-test-secret-key-at-least-32-bytes!")?;
/// assert!(!token.is_empty());
/// # Ok(())
/// # }
/// ```
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a JWT token and extracts claims
///
/// Verifies:
/// - Signature is valid
/// - Token hasn't expired
/// - Issuer is "huddle"
/// - Token is not used before its nbf time
///
/// # Arguments
///
/// * `token` - JWT token string
/// * `secret` - Secret key used for signing
///
/// # Errors
///
/// Expired tokens return `JwtError::Expired`, distinguishable from the other
/// failure modes; a malformed token returns `JwtError::InvalidFormat` and a
/// bad signature or issuer returns `ValidationError`/`InvalidIssuer`.
///
/// # Example
///
/// ```
/// use huddle_shared::auth::jwt::{create_token, validate_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let user_id = Uuid::new_v4();
/// let secret = "a-test-secret-key-at-least-32-bytes!";
///
/// let claims = Claims::new(user_id, "ada@example.com".to_string(), None, None);
/// let token = create_token(&claims, secret)?;
///
/// let validated = validate_token(&token, secret)?;
/// assert_eq!(validated.sub, user_id);
/// assert_eq!(validated.email, "ada@example.com");
/// # Ok(())
/// # }
/// ```
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.validate_nbf = true;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidIssuer => JwtError::InvalidIssuer {
            expected: ISSUER.to_string(),
        },
        jsonwebtoken::errors::ErrorKind::InvalidToken => {
            JwtError::InvalidFormat("Token is not a valid JWT".to_string())
        }
        _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}
