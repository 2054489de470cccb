//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                            - Home page (?gallery=event|bouquet|packages)
//! GET  /health                      - Health check
//!
//! # Catalog
//! GET  /products                    - Product listing (?category=&q=)
//! GET  /products/{slug}             - Product detail (?option=&workmanship=)
//! GET  /order/whatsapp              - 303 to WhatsApp with the order message
//!
//! # Custom bouquet
//! GET  /custom-package              - Calculator (?...&action=)
//! GET  /custom-package/order        - 303 to WhatsApp with the custom order
//! POST /api/custom-package/quote    - JSON price breakdown
//!
//! # Submissions (rate limited)
//! GET  /api/reviews                 - Latest approved reviews
//! POST /reviews                     - Submit a review
//! POST /contact                     - Send an inquiry
//!
//! # Moderation
//! GET  /admin/login                 - Login page
//! POST /admin/login                 - Login action (rate limited)
//! POST /admin/logout                - Logout action
//! GET  /admin                       - Dashboard (?filter=&notice=&error=)
//! POST /admin/reviews/{id}/approve  - Approve
//! GET  /admin/reviews/{id}/delete   - Delete confirmation
//! POST /admin/reviews/{id}/delete   - Delete
//! ```

pub mod admin;
pub mod contact;
pub mod custom_package;
pub mod home;
pub mod order;
pub mod products;
pub mod reviews;
pub mod views;

use std::fmt;
use std::str::FromStr;

use axum::{
    Router,
    routing::{get, post},
};
use serde::{Deserialize, Deserializer, de};

use crate::middleware::{auth_rate_limiter, submission_rate_limiter};
use crate::state::AppState;

/// Treat `field=` like a missing field.
///
/// HTML forms submit empty inputs as empty strings, which would otherwise
/// fail to parse as numbers or enums.
pub(crate) fn empty_string_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let opt = Option::<String>::deserialize(de)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => T::from_str(s).map_err(de::Error::custom).map(Some),
    }
}

/// Create the public page routes router.
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/products", get(products::index))
        .route("/products/{slug}", get(products::show))
        .route("/order/whatsapp", get(order::whatsapp))
        .route("/custom-package", get(custom_package::calculator))
        .route("/custom-package/order", get(custom_package::order))
        .route("/api/custom-package/quote", post(custom_package::quote))
        .route("/api/reviews", get(reviews::published))
}

/// Create the visitor submission routes router.
pub fn submission_routes() -> Router<AppState> {
    Router::new()
        .route("/reviews", post(reviews::submit))
        .route("/contact", post(contact::submit))
}

/// Create the moderator sign-in router.
pub fn login_routes() -> Router<AppState> {
    Router::new().route("/admin/login", post(admin::login))
}

/// Create the moderation routes router.
pub fn moderation_routes() -> Router<AppState> {
    Router::new()
        .route("/admin", get(admin::dashboard))
        .route("/admin/login", get(admin::login_page))
        .route("/admin/logout", post(admin::logout))
        .route("/admin/reviews/{id}/approve", post(admin::approve))
        .route(
            "/admin/reviews/{id}/delete",
            get(admin::confirm_delete).post(admin::delete),
        )
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(page_routes())
        .merge(submission_routes())
        .merge(login_routes())
        .merge(moderation_routes())
}

/// All routes, with submissions and sign-in rate limited per client IP.
pub fn rate_limited_routes() -> Router<AppState> {
    Router::new()
        .merge(page_routes())
        .merge(submission_routes().layer(submission_rate_limiter()))
        .merge(login_routes().layer(auth_rate_limiter()))
        .merge(moderation_routes())
}
