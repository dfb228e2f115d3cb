//! SeaORM table models.

pub mod user;
