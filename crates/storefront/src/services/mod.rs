//! Services behind the route handlers.
//!
//! # Services
//!
//! - `reviews` - Review listing, submission and moderation (cached)
//! - `auth` - Moderator sign-in seam
//! - `store` - Review persistence seam
//! - `supabase` - Supabase implementation of both seams
//! - `memory` - In-process implementations for local runs and tests
//! - `form_relay` - Contact form delivery
//! - `whatsapp` - `wa.me` link building

pub mod auth;
pub mod form_relay;
pub mod memory;
pub mod reviews;
pub mod store;
pub mod supabase;
pub mod whatsapp;

pub use auth::{AccessToken, AuthError, AuthProvider};
pub use form_relay::{FormRelay, HttpFormRelay, RelayError};
pub use reviews::{ModerationError, ModerationList, ReviewService, SubmitError};
pub use store::{ReviewStore, StoreError};
pub use supabase::SupabaseClient;
pub use whatsapp::WhatsApp;
