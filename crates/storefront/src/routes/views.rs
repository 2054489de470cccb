//! Display data shared by several templates.

use bloom_haven_core::Review;
use bloom_haven_core::review::{EVENT_TYPES, Rating};

/// A filter tab: a link, its label, and whether it is the current one.
pub struct Tab {
    pub href: String,
    pub label: &'static str,
    pub active: bool,
}

impl Tab {
    #[must_use]
    pub fn new(href: impl Into<String>, label: &'static str, active: bool) -> Self {
        Self {
            href: href.into(),
            label,
            active,
        }
    }
}

/// A selectable choice on a product page.
pub struct Choice {
    pub index: usize,
    pub label: String,
    pub detail: Option<String>,
    pub price: String,
    pub selected: bool,
}

/// An `<option>` of a select box.
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Event type options, with `selected` preselected when it is one of them.
#[must_use]
pub fn event_options(selected: Option<&str>) -> Vec<SelectOption> {
    EVENT_TYPES
        .into_iter()
        .map(|event| SelectOption {
            value: event.to_string(),
            label: event.to_string(),
            selected: selected == Some(event),
        })
        .collect()
}

/// A review as shown on the site and the dashboard.
pub struct ReviewCard {
    pub id: i64,
    pub name: String,
    pub event_type: String,
    pub stars: String,
    pub text: String,
    pub date: String,
    pub approved: bool,
}

/// Filled and empty stars for a rating.
#[must_use]
pub fn star_line(rating: Rating) -> String {
    "★".repeat(usize::from(rating.stars())) + &"☆".repeat(usize::from(rating.missing()))
}

impl From<&Review> for ReviewCard {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id.as_i64(),
            name: review.name.clone(),
            event_type: review.event_type.clone(),
            stars: star_line(review.rating),
            text: review.text.clone(),
            date: review.created_at.format("%b %-d, %Y").to_string(),
            approved: review.approved,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_star_line() {
        let rating = Rating::try_from(3_i64).unwrap();
        assert_eq!(star_line(rating), "★★★☆☆");
        assert_eq!(star_line(Rating::FIVE_STARS), "★★★★★");
    }

    #[test]
    fn test_event_options_preselect() {
        let options = event_options(Some("Wedding"));
        assert_eq!(options.len(), EVENT_TYPES.len());
        assert_eq!(options.iter().filter(|o| o.selected).count(), 1);
        assert!(event_options(Some("Picnic")).iter().all(|o| !o.selected));
    }
}
