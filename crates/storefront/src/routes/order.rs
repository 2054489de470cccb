//! WhatsApp order handoff.
//!
//! Builds the order message and answers with a 303 to `wa.me`. Nothing is
//! stored and the chat is not awaited.

use axum::{
    extract::{Query, State},
    response::Redirect,
};
use serde::Deserialize;
use tracing::instrument;

use bloom_haven_core::catalog;
use bloom_haven_core::order::{OrderDetails, catalog_order_message};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

use super::empty_string_as_none;

/// Details fields shared by both order forms.
#[derive(Debug, Default, Deserialize)]
pub struct DetailsQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub quantity: Option<u32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub event_type: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub delivery_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub notes: Option<String>,
}

impl DetailsQuery {
    /// As order details, with quantity defaulting to 1.
    #[must_use]
    pub fn to_details(&self) -> OrderDetails {
        OrderDetails {
            quantity: self.quantity.unwrap_or(1),
            event_type: self.event_type.clone(),
            delivery_date: self.delivery_date.clone(),
            notes: self.notes.clone(),
        }
        .normalized()
    }
}

/// Catalog order query.
#[derive(Debug, Deserialize)]
pub struct CatalogOrderQuery {
    pub product: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub option: Option<usize>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub workmanship: Option<usize>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub quantity: Option<u32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub event_type: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub delivery_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub notes: Option<String>,
}

impl CatalogOrderQuery {
    fn details(&self) -> OrderDetails {
        DetailsQuery {
            quantity: self.quantity,
            event_type: self.event_type.clone(),
            delivery_date: self.delivery_date.clone(),
            notes: self.notes.clone(),
        }
        .to_details()
    }
}

/// Send a catalog order to WhatsApp.
///
/// The first option is used when none is given. Products that have
/// workmanship choices need one.
///
/// # Errors
///
/// Returns `NotFound` for an unknown product and `BadRequest` for an invalid
/// or missing selection.
#[instrument(skip(state))]
pub async fn whatsapp(
    State(state): State<AppState>,
    Query(query): Query<CatalogOrderQuery>,
) -> Result<Redirect> {
    let product = catalog::find_by_slug(&query.product)
        .ok_or_else(|| AppError::NotFound(format!("product {}", query.product)))?;

    let option_index = query.option.unwrap_or(0);
    let option = product.options.get(option_index);
    if option.is_none() && !product.options.is_empty() {
        return Err(AppError::BadRequest(format!(
            "unknown option {option_index}"
        )));
    }

    let workmanship = match query.workmanship {
        Some(i) => Some(
            product
                .workmanship
                .get(i)
                .ok_or_else(|| AppError::BadRequest(format!("unknown workmanship {i}")))?,
        ),
        None if !product.workmanship.is_empty() => {
            return Err(AppError::BadRequest(
                "please choose a workmanship type".to_string(),
            ));
        }
        None => None,
    };

    let message = catalog_order_message(product, option, workmanship, &query.details());
    add_breadcrumb("order", "WhatsApp order", Some(&[("product", product.slug)]));
    tracing::info!(product = %product.slug, "Order handed off to WhatsApp");

    Ok(Redirect::to(&state.whatsapp().message_link(&message)))
}
