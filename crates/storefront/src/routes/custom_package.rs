//! Custom bouquet calculator.
//!
//! The calculator page is a plain GET form. Every submit carries the whole
//! configuration; step buttons add an `action` which is applied through the
//! pricing reducer before the page is rendered again.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tracing::instrument;

use bloom_haven_core::order::custom_package_message;
use bloom_haven_core::pricing::{
    AddOn, AddOns, FoamType, MAX_PIECES, MIN_PIECES, MIN_WRAPPERS, NoteValue, PIECE_STEP,
};
use bloom_haven_core::{Naira, PriceBreakdown, PricingAction, PricingConfig, compute_total};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::state::AppState;

use super::empty_string_as_none;
use super::order::DetailsQuery;
use super::views::{SelectOption, event_options};

/// Calculator form state.
///
/// Checkboxes are only sent when ticked, so `configured` tells a submitted
/// form (unticked means excluded) from a first visit (defaults apply).
#[derive(Debug, Default, Deserialize)]
pub struct CalculatorQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub pieces: Option<u32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub note_value: Option<NoteValue>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub wrappers: Option<u32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub foam: Option<FoamType>,
    pub flower: Option<String>,
    pub birthday_card: Option<String>,
    pub bow: Option<String>,
    pub clip: Option<String>,
    pub ribbon: Option<String>,
    pub configured: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub action: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub quantity: Option<u32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub event_type: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub delivery_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub notes: Option<String>,
}

impl CalculatorQuery {
    /// The configuration described by the form, before any action.
    #[must_use]
    pub fn config(&self) -> PricingConfig {
        let defaults = PricingConfig::default();
        let add_ons = if self.configured.is_some() {
            AddOns {
                flower: self.flower.is_some(),
                birthday_card: self.birthday_card.is_some(),
                bow: self.bow.is_some(),
                clip: self.clip.is_some(),
                ribbon: self.ribbon.is_some(),
            }
        } else {
            defaults.add_ons
        };

        PricingConfig {
            pieces: self.pieces.unwrap_or(defaults.pieces),
            note_value: self.note_value.unwrap_or(defaults.note_value),
            wrappers: self
                .wrappers
                .unwrap_or(defaults.wrappers)
                .max(MIN_WRAPPERS),
            foam: self.foam.unwrap_or(defaults.foam),
            add_ons,
        }
        .clamped()
    }

    /// The configuration after applying the submitted action.
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` for an unknown action.
    pub fn resolve(&self) -> Result<PricingConfig> {
        let config = self.config();
        match self.action.as_deref() {
            None => Ok(config),
            Some(action) => action
                .parse::<PricingAction>()
                .map(|a| config.apply(a))
                .map_err(AppError::BadRequest),
        }
    }

    fn details(&self) -> DetailsQuery {
        DetailsQuery {
            quantity: self.quantity,
            event_type: self.event_type.clone(),
            delivery_date: self.delivery_date.clone(),
            notes: self.notes.clone(),
        }
    }
}

/// One add-on checkbox.
pub struct AddOnField {
    pub key: &'static str,
    pub label: &'static str,
    pub checked: bool,
}

/// Calculator page template.
#[derive(Template, WebTemplate)]
#[template(path = "custom_package.html")]
pub struct CustomPackageTemplate {
    pub breakdown: PriceBreakdown,
    pub lines: Vec<(&'static str, Naira)>,
    pub note_options: Vec<SelectOption>,
    pub foam_options: Vec<SelectOption>,
    pub add_ons: Vec<AddOnField>,
    pub min_pieces: u32,
    pub max_pieces: u32,
    pub piece_step: u32,
    pub min_wrappers: u32,
    pub quantity: u32,
    pub event_options: Vec<SelectOption>,
    pub delivery_date: String,
    pub notes: String,
}

/// Display the calculator.
///
/// # Errors
///
/// Returns `BadRequest` for an unknown action.
#[instrument]
pub async fn calculator(Query(query): Query<CalculatorQuery>) -> Result<impl IntoResponse> {
    let config = query.resolve()?;
    let breakdown = compute_total(&config);

    let add_ons = AddOn::ALL
        .into_iter()
        .map(|a| AddOnField {
            key: a.key(),
            label: a.label(),
            checked: config.add_ons.contains(a),
        })
        .collect();

    let note_options = NoteValue::ALL
        .into_iter()
        .map(|n| SelectOption {
            value: n.as_u32().to_string(),
            label: format!("{n} notes"),
            selected: n == config.note_value,
        })
        .collect();
    let foam_options = [(FoamType::Half, "Half foam"), (FoamType::Full, "Full foam")]
        .into_iter()
        .map(|(f, label)| SelectOption {
            value: f.as_str().to_string(),
            label: label.to_string(),
            selected: f == config.foam,
        })
        .collect();
    let details = query.details().to_details();

    Ok(CustomPackageTemplate {
        lines: breakdown.material_lines(),
        breakdown,
        note_options,
        foam_options,
        add_ons,
        min_pieces: MIN_PIECES,
        max_pieces: MAX_PIECES,
        piece_step: PIECE_STEP,
        min_wrappers: MIN_WRAPPERS,
        quantity: details.quantity,
        event_options: event_options(details.event_type.as_deref()),
        delivery_date: details.delivery_date.unwrap_or_default(),
        notes: details.notes.unwrap_or_default(),
    })
}

/// Send the configured bouquet to WhatsApp.
///
/// # Errors
///
/// Returns `BadRequest` for an unknown action.
#[instrument(skip(state))]
pub async fn order(
    State(state): State<AppState>,
    Query(query): Query<CalculatorQuery>,
) -> Result<Redirect> {
    let breakdown = compute_total(&query.resolve()?);
    let message = custom_package_message(&breakdown, &query.details().to_details());

    let total = breakdown.total.to_string();
    add_breadcrumb("order", "Custom bouquet order", Some(&[("total", &total)]));
    tracing::info!(total = %breakdown.total, pieces = breakdown.config.pieces, "Custom bouquet handed off to WhatsApp");

    Ok(Redirect::to(&state.whatsapp().message_link(&message)))
}

/// Price a configuration.
///
/// POST /api/custom-package/quote
pub async fn quote(Json(config): Json<PricingConfig>) -> Json<PriceBreakdown> {
    Json(compute_total(&config))
}
