//! Service layer - user lifecycle business rules.

mod user_service;

pub use user_service::{UserManager, UserService};
