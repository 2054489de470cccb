//! Integration tests for Bloom Haven.
//!
//! Each test starts the full site (all middleware, rate limiting and
//! sessions included) on an ephemeral port, backed by the in-memory review
//! store, identity service and form relay, and drives it over HTTP.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bloom-haven-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `pricing` - Catalog, calculator and quote API agree on prices
//! - `moderation` - Review submission through approval and deletion
//! - `whatsapp` - Order handoff links
//! - `rate_limits` - Submission throttling

use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::{Client, Response, header};
use secrecy::SecretString;
use url::Url;

use bloom_haven_core::Email;
use bloom_haven_storefront::config::SiteConfig;
use bloom_haven_storefront::routes::rate_limited_routes;
use bloom_haven_storefront::services::memory::{
    MemoryAuth, MemoryRelay, MemoryReviewStore, TokenSet,
};
use bloom_haven_storefront::state::AppState;

/// Moderator account known to the in-memory identity service.
pub const MODERATOR_EMAIL: &str = "moderator@bloomhaven.ng";
pub const MODERATOR_PASSWORD: &str = "tulips and twenties";

/// A running site and a cookie-keeping client that does not follow
/// redirects.
pub struct TestContext {
    pub client: Client,
    pub base_url: Url,
    pub store: Arc<MemoryReviewStore>,
    pub relay: Arc<MemoryRelay>,
}

impl TestContext {
    /// Start the site on `127.0.0.1` with an empty review store.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound or the client cannot be built.
    pub async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");
        let base_url = Url::parse(&format!("http://{addr}")).expect("Invalid base URL");

        let tokens = TokenSet::default();
        let store = Arc::new(MemoryReviewStore::new(tokens.clone()));
        let auth = Arc::new(MemoryAuth::new(
            vec![(
                Email::parse(MODERATOR_EMAIL).expect("Invalid moderator email"),
                SecretString::from(MODERATOR_PASSWORD),
            )],
            tokens,
        ));
        let relay = Arc::new(MemoryRelay::default());

        let state = AppState::new(
            SiteConfig::local(base_url.clone()),
            store.clone(),
            auth,
            Some(relay.clone()),
        );
        let app = bloom_haven_storefront::app(state, rate_limited_routes());

        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .expect("Test server failed");
        });

        let client = Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to build client");

        Self {
            client,
            base_url,
            store,
            relay,
        }
    }

    /// Absolute URL for `path`.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid relative reference.
    #[must_use]
    pub fn url(&self, path: &str) -> Url {
        self.base_url.join(path).expect("Invalid path")
    }

    /// GET `path`.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET failed")
    }

    /// POST `body` as JSON to `path`.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("POST failed")
    }

    /// POST an urlencoded form to `path`.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> Response {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        self.client
            .post(self.url(path))
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .expect("POST failed")
    }

    /// Sign in as the moderator; the session cookie is kept by the client.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn sign_in(&self, password: &str) -> Response {
        self.post_form(
            "/admin/login",
            &[("email", MODERATOR_EMAIL), ("password", password)],
        )
        .await
    }

    /// Submit a five-star review.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn submit_review(&self, name: &str, text: &str) -> Response {
        self.post_json(
            "/reviews",
            &serde_json::json!({
                "name": name,
                "event_type": "Birthday",
                "rating": 5,
                "review": text,
            }),
        )
        .await
    }
}

/// The `Location` header of a redirect.
///
/// # Panics
///
/// Panics if the response has no valid `Location` header.
#[must_use]
pub fn location(response: &Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("Missing Location header")
        .to_string()
}

/// The decoded `text` parameter of a `wa.me` link.
///
/// # Panics
///
/// Panics if `link` is not a URL or has no `text` parameter.
#[must_use]
pub fn whatsapp_text(link: &str) -> String {
    Url::parse(link)
        .expect("Invalid WhatsApp link")
        .query_pairs()
        .find(|(k, _)| k == "text")
        .map(|(_, v)| v.into_owned())
        .expect("WhatsApp link has no text")
}
