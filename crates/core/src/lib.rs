pub mod error;
pub mod publication;
pub mod roles;
pub mod types;
