//! JSON API handlers

pub mod health;
pub mod speakers;
pub mod talks;
