//! Database repositories
//!
//! Data access layer: plain sqlx queries, no business rules.

pub mod role;
pub mod user;

pub use role::{RoleRecord, RoleRepository};
pub use user::{UserRepository, UserWithRole};
