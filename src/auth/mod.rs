pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{generate_token, verify_token, Claims};

/// Represents the payload for both signup and login requests.
///
/// The two endpoints accept the same shape, so they share one DTO. Absent
/// fields are rejected at deserialization; blank fields are rejected here.
#[derive(Debug, Deserialize, Validate)]
pub struct Credentials {
    /// Desired (signup) or registered (login) username.
    #[validate(custom = "crate::models::validate_not_blank")]
    pub username: String,
    /// The account password. Only ever held in memory; persisted as a
    /// bcrypt hash.
    #[validate(custom = "crate::models::validate_not_blank")]
    pub password: String,
}

/// Response structure after successful signup or login.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The session token for bearer authentication.
    pub token: String,
}
