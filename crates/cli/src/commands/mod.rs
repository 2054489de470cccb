//! Command implementations.

pub mod catalog;
pub mod quote;
pub mod reviews;
