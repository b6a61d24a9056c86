//! Database models and repository queries

pub mod events;
pub mod init;
pub mod models;
pub mod talks;
pub mod users;

pub use init::*;
pub use models::*;
