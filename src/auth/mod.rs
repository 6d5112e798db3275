//! Authentication module
//!
//! Provides JWT issuing/validation and bcrypt password hashing.

mod jwt;
mod password;

pub use jwt::{Claims, JwtService};
pub use password::PasswordService;
