pub mod auth;
pub mod entry;
pub mod project;
pub mod request;
pub mod tag;
pub mod users;
