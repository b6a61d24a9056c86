//! # Confsite Common Library
//!
//! Shared code for the conference-website backend including:
//! - Domain models (talks, users, events, rooms)
//! - Repository queries over the SQLite store
//! - Locale resolution and date/time formatting
//! - Markdown rendering
//! - Configuration loading
//! - Slug utilities

pub mod config;
pub mod db;
pub mod error;
pub mod locale;
pub mod markdown;
pub mod slug;

pub use error::{Error, Result};
pub use locale::Language;
pub use markdown::MarkdownRenderer;
