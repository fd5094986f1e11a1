//! Credential primitives for the authentication service.
//!
//! - Password hashing (Argon2id) and hash fingerprints
//! - HS256 token signing for access tokens and password-reset tokens
//!
//! The service crate owns the authentication flow; this crate only knows how
//! to hash, sign and verify.
//!
//! # Examples
//!
//! ```
//! use auth::{AccessClaims, PasswordHasher, TokenSigner};
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("correct horse").unwrap();
//! assert!(hasher.verify("correct horse", &hash).unwrap());
//!
//! let signer = TokenSigner::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = AccessClaims::new("user-1", "alice@example.com", 24);
//! let token = signer.sign(&claims).unwrap();
//! let decoded: AccessClaims = signer.verify(&token).unwrap();
//! assert_eq!(decoded.sub, "user-1");
//! ```

pub mod password;
pub mod token;

pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::AccessClaims;
pub use token::ResetClaims;
pub use token::TokenError;
pub use token::TokenSigner;
pub use token::PASSWORD_RESET_PURPOSE;
