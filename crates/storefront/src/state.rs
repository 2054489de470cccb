//! Application state shared across handlers.

use std::sync::Arc;

use secrecy::SecretString;

use bloom_haven_core::types::EmailError;
use bloom_haven_core::Email;

use crate::config::SiteConfig;
use crate::services::auth::AuthProvider;
use crate::services::form_relay::{FormRelay, HttpFormRelay, RelayError};
use crate::services::memory::{MemoryAuth, MemoryReviewStore, TokenSet};
use crate::services::reviews::ReviewService;
use crate::services::store::ReviewStore;
use crate::services::supabase::{SupabaseClient, SupabaseSetupError};
use crate::services::whatsapp::WhatsApp;

/// Error wiring collaborators from configuration.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("supabase client: {0}")]
    Supabase(#[from] SupabaseSetupError),
    #[error("form relay: {0}")]
    Relay(#[from] RelayError),
    #[error("DEV_MODERATOR_EMAIL: {0}")]
    DevModerator(#[from] EmailError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// review workflow, moderator sign-in, the contact relay and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    reviews: ReviewService,
    auth: Arc<dyn AuthProvider>,
    relay: Option<Arc<dyn FormRelay>>,
    whatsapp: WhatsApp,
}

impl AppState {
    /// Wire collaborators from configuration.
    ///
    /// Uses Supabase when configured and the in-memory backend otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if a client cannot be built or the development
    /// moderator email is invalid.
    pub fn from_config(config: SiteConfig) -> Result<Self, StateError> {
        let (store, auth): (Arc<dyn ReviewStore>, Arc<dyn AuthProvider>) =
            if let Some(supabase) = &config.supabase {
                let client = SupabaseClient::new(supabase)?;
                (Arc::new(client.clone()), Arc::new(client))
            } else {
                tracing::warn!("Supabase not configured, using in-memory reviews");
                let tokens = TokenSet::default();
                let accounts = match &config.dev_moderator {
                    Some(dev) => vec![(Email::parse(&dev.email)?, dev.password.clone())],
                    None => Vec::<(Email, SecretString)>::new(),
                };
                (
                    Arc::new(MemoryReviewStore::with_sample_reviews(tokens.clone())),
                    Arc::new(MemoryAuth::new(accounts, tokens)),
                )
            };

        let relay: Option<Arc<dyn FormRelay>> = match &config.form_relay_endpoint {
            Some(endpoint) => Some(Arc::new(HttpFormRelay::new(endpoint.clone())?)),
            None => None,
        };

        Ok(Self::new(config, store, auth, relay))
    }

    /// Create a new application state from explicit collaborators.
    #[must_use]
    pub fn new(
        config: SiteConfig,
        store: Arc<dyn ReviewStore>,
        auth: Arc<dyn AuthProvider>,
        relay: Option<Arc<dyn FormRelay>>,
    ) -> Self {
        let whatsapp = WhatsApp::new(config.whatsapp_phone.clone());
        Self {
            inner: Arc::new(AppStateInner {
                config,
                reviews: ReviewService::new(store),
                auth,
                relay,
                whatsapp,
            }),
        }
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get a reference to the review workflow.
    #[must_use]
    pub fn reviews(&self) -> &ReviewService {
        &self.inner.reviews
    }

    /// Get a reference to the moderator identity service.
    #[must_use]
    pub fn auth(&self) -> &dyn AuthProvider {
        self.inner.auth.as_ref()
    }

    /// Get the contact relay, if one is configured.
    #[must_use]
    pub fn relay(&self) -> Option<&dyn FormRelay> {
        self.inner.relay.as_deref()
    }

    /// Get a reference to the WhatsApp link builder.
    #[must_use]
    pub fn whatsapp(&self) -> &WhatsApp {
        &self.inner.whatsapp
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::DevModerator;
    use url::Url;

    fn local() -> SiteConfig {
        SiteConfig::local(Url::parse("http://localhost:3000").unwrap())
    }

    #[tokio::test]
    async fn test_local_config_uses_sample_reviews() {
        let state = AppState::from_config(local()).unwrap();
        assert!(state.relay().is_none());
        assert_eq!(state.reviews().published().await.unwrap().len(), 2);
        assert_eq!(state.whatsapp().chat_link(), "https://wa.me/2347069975865");
    }

    #[tokio::test]
    async fn test_dev_moderator_can_sign_in() {
        let mut config = local();
        config.dev_moderator = Some(DevModerator {
            email: "owner@bloomhaven.ng".to_string(),
            password: SecretString::from("local-only"),
        });
        let state = AppState::from_config(config).unwrap();

        let email = Email::parse("owner@bloomhaven.ng").unwrap();
        assert!(
            state
                .auth()
                .sign_in(&email, &SecretString::from("local-only"))
                .await
                .is_ok()
        );
    }

    #[test]
    fn test_invalid_dev_moderator_email_is_rejected() {
        let mut config = local();
        config.dev_moderator = Some(DevModerator {
            email: "not-an-email".to_string(),
            password: SecretString::from("pw"),
        });
        assert!(matches!(
            AppState::from_config(config),
            Err(StateError::DevModerator(_))
        ));
    }
}
