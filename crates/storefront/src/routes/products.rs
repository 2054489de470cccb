//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use bloom_haven_core::Naira;
use bloom_haven_core::catalog::{self, CatalogFilter, Category, Product};
use bloom_haven_core::order::enquiry_message;
use bloom_haven_core::review::EVENT_TYPES;

use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;

use super::empty_string_as_none;
use super::views::{Choice, Tab};

/// Product card data for the listing.
pub struct ProductCard {
    pub product: &'static Product,
    pub starting_price: Naira,
    pub enquiry_link: String,
}

/// Listing query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    /// Category slug or label.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub q: Option<String>,
}

/// Selected option and workmanship on the detail page.
#[derive(Debug, Default, Deserialize)]
pub struct SelectionQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub option: Option<usize>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub workmanship: Option<usize>,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductCard>,
    pub category_tabs: Vec<Tab>,
    /// Slug of the selected category, kept in the search form.
    pub category: String,
    pub query: String,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: &'static Product,
    pub options: Vec<Choice>,
    pub workmanship: Vec<Choice>,
    pub selected_option: usize,
    /// `None` until a required workmanship choice is made.
    pub total: Option<Naira>,
    pub enquiry_link: String,
    pub event_types: [&'static str; 7],
}

/// Display the product listing.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> impl IntoResponse {
    let category = query
        .category
        .as_deref()
        .and_then(|c| c.parse::<Category>().ok());
    let filter = CatalogFilter {
        category,
        query: query.q.clone(),
    };

    let products = catalog::filter(&filter)
        .into_iter()
        .map(|product| ProductCard {
            product,
            starting_price: product.starting_price(),
            enquiry_link: state.whatsapp().message_link(&enquiry_message(product)),
        })
        .collect();

    let search = query.q.as_deref().map(urlencoding::encode).unwrap_or_default();
    let category_tabs = std::iter::once(Tab::new(
        format!("/products?q={search}"),
        "All",
        category.is_none(),
    ))
    .chain(Category::ALL.into_iter().map(|c| {
        Tab::new(
            format!("/products?category={}&q={search}", c.slug()),
            c.label(),
            category == Some(c),
        )
    }))
    .collect();

    ProductsIndexTemplate {
        products,
        category_tabs,
        category: category.map(|c| c.slug().to_string()).unwrap_or_default(),
        query: query.q.unwrap_or_default(),
    }
}

/// Display a product with its options.
///
/// # Errors
///
/// Returns `NotFound` for an unknown slug.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(selection): Query<SelectionQuery>,
) -> Result<impl IntoResponse> {
    let product = catalog::find_by_slug(&slug)
        .ok_or_else(|| AppError::NotFound(format!("product {slug}")))?;

    let selected_option = selection
        .option
        .filter(|i| *i < product.options.len())
        .unwrap_or(0);
    let selected_workmanship = selection
        .workmanship
        .filter(|i| *i < product.workmanship.len());

    let options = product
        .options
        .iter()
        .enumerate()
        .map(|(index, o)| Choice {
            index,
            label: o.label.clone(),
            detail: o.calculation.clone(),
            price: o.total.to_string(),
            selected: index == selected_option,
        })
        .collect();
    let workmanship = product
        .workmanship
        .iter()
        .enumerate()
        .map(|(index, w)| Choice {
            index,
            label: w.label.to_string(),
            detail: None,
            price: w.price.to_string(),
            selected: selected_workmanship == Some(index),
        })
        .collect();

    Ok(ProductShowTemplate {
        product,
        options,
        workmanship,
        selected_option,
        total: product.selection_total(selected_option, selected_workmanship),
        enquiry_link: state.whatsapp().message_link(&enquiry_message(product)),
        event_types: EVENT_TYPES,
    })
}
