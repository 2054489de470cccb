//! Session-stored models for the site.

pub mod session;

pub use session::{CurrentModerator, keys as session_keys};
