pub mod facebook;
pub mod mailer;
pub mod repositories;
