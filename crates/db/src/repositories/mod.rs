//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod entry_repo;
pub mod project_repo;
pub mod request_repo;
pub mod tag_repo;
pub mod user_repo;

pub use entry_repo::EntryRepo;
pub use project_repo::ProjectRepo;
pub use request_repo::RequestRepo;
pub use tag_repo::TagRepo;
pub use user_repo::UserRepo;
