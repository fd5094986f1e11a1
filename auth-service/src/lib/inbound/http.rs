pub mod errors;
pub mod handlers;
pub mod router;

pub use errors::ErrorTranslator;
pub use errors::JsonErrorTranslator;
pub use handlers::AuthHandler;
