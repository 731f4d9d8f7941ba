//! Authentication core
//!
//! Storage-free building blocks for credential issuance and verification:
//! - Password hashing (Argon2id)
//! - Signed, expiring JWT access tokens (HS256)
//! - Authentication coordination
//!
//! The service crate wires these into its own ports; nothing here performs I/O.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other_password", &hash));
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::JwtHandler;
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let token = handler.issue("alice", Duration::minutes(30)).unwrap();
//! assert_eq!(handler.verify(&token).unwrap(), "alice");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::minutes(30)).unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let result = auth
//!     .authenticate("password123", Some(&hash), "alice", auth.token_ttl())
//!     .unwrap();
//! assert_eq!(result.token_type, "bearer");
//!
//! // Validate token
//! let subject = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(subject, "alice");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use authenticator::TOKEN_TYPE;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
