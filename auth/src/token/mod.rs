pub mod claims;
pub mod errors;
pub mod signer;

pub use claims::AccessClaims;
pub use claims::ResetClaims;
pub use claims::PASSWORD_RESET_PURPOSE;
pub use errors::TokenError;
pub use signer::TokenSigner;
