//! Bloom Haven Core - domain library.
//!
//! This crate holds the business rules shared by the web site and the CLI:
//! - `storefront` - public site, order handoff and review moderation panel
//! - `cli` - quote calculator and moderation from the terminal
//!
//! # Architecture
//!
//! Only types and pure functions live here: no I/O, no HTTP clients, no
//! clocks. Persistence and authentication are the callers' concern.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, emails and naira amounts
//! - [`pricing`] - Custom bouquet calculator and money tower prices
//! - [`catalog`] - Published products, priced from [`pricing`]
//! - [`review`] - Review validation and moderation states
//! - [`order`] - WhatsApp order messages
//! - [`inquiry`] - Contact form validation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod inquiry;
pub mod order;
pub mod pricing;
pub mod review;
pub mod types;

pub use pricing::{PriceBreakdown, PricingAction, PricingConfig, compute_total};
pub use review::{NewReview, Review, ReviewError, ReviewFilter, ReviewQuery};
pub use types::*;
