//! Core types for Bloom Haven.
//!
//! Type-safe wrappers for ids, email addresses and naira amounts.

pub mod email;
pub mod id;
pub mod money;

pub use email::{Email, EmailError};
pub use id::*;
pub use money::Naira;
