use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT payload. Carries enough identity that requests never hit the users table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub sub: Uuid,         // user ID
    pub email: String,     // user email
    pub full_name: String, // display name
    pub iat: usize,        // issued at (unix timestamp)
    pub exp: usize,        // expires at (unix timestamp)
    pub iss: String,       // issuer
    pub aud: String,       // audience
}

/// Authenticated caller, handed explicitly to handlers and services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
    pub email: String,
    pub full_name: String,
}

impl From<Claims> for Principal {
    fn from(c: Claims) -> Self {
        Self {
            user_id: c.sub,
            email: c.email,
            full_name: c.full_name,
        }
    }
}
