//! Authentication module
//!
//! Argon2 password hashing and HS256 auth tokens.

mod middleware;
mod password;
mod token;

pub use middleware::{bearer_token, AuthUser};
pub use password::PasswordService;
pub use token::{
    random_secret, TokenClaims, TokenSigner, TokenVerification, DEFAULT_TOKEN_EXPIRY_SECS,
    GENERATED_SECRET_LEN, MAX_TOKEN_EXPIRY_SECS,
};
