/// Authentication utilities
///
/// This module provides the authentication primitives for Huddle:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: JWT token generation and validation
/// - [`context`]: authenticated identity attached to requests
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **JWT Tokens**: HS256 signing with configurable expiration
/// - **Constant-time Comparison**: verification uses constant-time operations
///
/// # Example
///
/// ```
/// use huddle_shared::auth::password::{hash_password, verify_password};
/// use huddle_shared::auth::jwt::{create_token, validate_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // Password authentication
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// // Session token issuance
/// let claims = Claims::new(Uuid::new_v4(), "ada@example.com".to_string(), None, None);
/// let token = create_token(&claims, "a-test-secret-key-at-least-32-bytes!")?;
/// # Ok(())
/// # }
/// ```
pub mod context;
pub mod jwt;
pub mod password;
