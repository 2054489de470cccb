//! HTTP middleware stack for the site.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, new hub per request)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (tower-sessions, in-memory store)
//! 5. Rate limiting on submission and sign-in routes (governor)

pub mod auth;
pub mod rate_limit;
pub mod request_id;
pub mod session;

pub use auth::{
    OptionalModerator, RequireModerator, clear_current_moderator, set_current_moderator,
};
pub use rate_limit::{auth_rate_limiter, submission_rate_limiter};
pub use request_id::request_id_middleware;
pub use session::create_session_layer;
