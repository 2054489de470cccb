//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use bloom_haven_core::catalog::{self, Product};
use bloom_haven_core::review::EVENT_TYPES;

use crate::content::{
    self, ABOUT, GalleryCategory, GalleryItem, HERO, Hero, Highlight, SERVICES, Service,
};
use crate::filters;
use crate::state::AppState;

use super::empty_string_as_none;
use super::views::{ReviewCard, Tab};

/// Query parameters for the home page.
#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    /// Gallery tab (`event`, `bouquet`, `packages`); anything else shows all.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub gallery: Option<String>,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub hero: Hero,
    pub services: &'static [Service],
    pub about: &'static [Highlight],
    pub gallery: Vec<&'static GalleryItem>,
    pub gallery_tabs: Vec<Tab>,
    pub products: &'static [Product],
    pub reviews: Vec<ReviewCard>,
    pub reviews_unavailable: bool,
    pub event_types: [&'static str; 7],
    pub whatsapp_link: String,
}

/// Display the home page.
///
/// The page still renders when reviews cannot be loaded; the reviews
/// section shows a notice instead.
#[instrument(skip(state))]
pub async fn home(
    State(state): State<AppState>,
    Query(query): Query<HomeQuery>,
) -> impl IntoResponse {
    let gallery_filter = query
        .gallery
        .as_deref()
        .and_then(|g| g.parse::<GalleryCategory>().ok());

    let gallery_tabs = std::iter::once(Tab::new("/#gallery", "All", gallery_filter.is_none()))
        .chain(GalleryCategory::ALL.into_iter().map(|c| {
            Tab::new(
                format!("/?gallery={}#gallery", c.key()),
                c.label(),
                gallery_filter == Some(c),
            )
        }))
        .collect();

    let (reviews, reviews_unavailable) = match state.reviews().published().await {
        Ok(reviews) => (reviews.iter().map(ReviewCard::from).collect(), false),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load published reviews");
            (Vec::new(), true)
        }
    };

    HomeTemplate {
        hero: HERO,
        services: &SERVICES,
        about: &ABOUT,
        gallery: content::gallery(gallery_filter),
        gallery_tabs,
        products: catalog::products(),
        reviews,
        reviews_unavailable,
        event_types: EVENT_TYPES,
        whatsapp_link: state.whatsapp().chat_link(),
    }
}
