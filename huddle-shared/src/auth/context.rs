/// Authenticated request context
///
/// After a bearer token is validated, the identity it carries is captured in
/// an [`AuthContext`] and inserted into the request extensions, where
/// handlers pick it up with Axum's `Extension` extractor.
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use huddle_shared::auth::context::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("User: {}", auth.user_id)
/// }
/// ```
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwt::Claims;
use crate::models::membership::TeamRole;

/// Identity extracted from a validated session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: Uuid,

    /// Email address the token was issued for
    pub email: String,

    /// Current team, absent when the user has not joined one
    pub team_id: Option<Uuid>,

    /// Role within the current team
    pub role: Option<TeamRole>,
}

impl AuthContext {
    /// Creates an auth context from validated token claims
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email.clone(),
            team_id: claims.team_id,
            role: claims.role,
        }
    }

    /// Whether the token was issued with a team context
    pub fn has_team(&self) -> bool {
        self.team_id.is_some()
    }
}
