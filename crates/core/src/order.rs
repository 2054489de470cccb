//! Order messages handed off to WhatsApp.
//!
//! Orders are not stored. The site builds a pre-filled chat message and
//! sends the customer to the business's WhatsApp; everything after that
//! happens in the chat.

use core::fmt::Write as _;

use serde::Deserialize;

use crate::catalog::{PackageOption, Product, WorkmanshipOption};
use crate::pricing::PriceBreakdown;

/// Opening line of every message.
pub const GREETING: &str = "Hello Kayjih Bloom Haven 👋";

/// Extra details the customer may attach to an order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OrderDetails {
    pub quantity: u32,
    pub event_type: Option<String>,
    pub delivery_date: Option<String>,
    /// Free-text notes ("Additional Notes" in the message).
    pub notes: Option<String>,
}

impl Default for OrderDetails {
    fn default() -> Self {
        Self {
            quantity: 1,
            event_type: None,
            delivery_date: None,
            notes: None,
        }
    }
}

impl OrderDetails {
    /// Trimmed copy with blank fields removed and quantity at least 1.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let clean = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToString::to_string)
        };
        Self {
            quantity: self.quantity.max(1),
            event_type: clean(&self.event_type),
            delivery_date: clean(&self.delivery_date),
            notes: clean(&self.notes),
        }
    }

    fn write_lines(&self, message: &mut String) {
        let details = self.normalized();
        if details.quantity > 1 {
            let _ = writeln!(message, "Quantity: {}", details.quantity);
        }
        if let Some(event_type) = &details.event_type {
            let _ = writeln!(message, "Event Type: {event_type}");
        }
        if let Some(date) = &details.delivery_date {
            let _ = writeln!(message, "Delivery Date: {date}");
        }
        if let Some(notes) = &details.notes {
            let _ = writeln!(message, "Additional Notes: {notes}");
        }
    }
}

/// The short "I'm interested in ..." message used by product cards.
#[must_use]
pub fn enquiry_message(product: &Product) -> String {
    format!(
        "{GREETING}\n\nI'm interested in the {}.\n\nPlease provide details for my order. Thank you!",
        product.name
    )
}

/// Message for a catalog product with an optional selected package and
/// workmanship.
#[must_use]
pub fn catalog_order_message(
    product: &Product,
    option: Option<&PackageOption>,
    workmanship: Option<&WorkmanshipOption>,
    details: &OrderDetails,
) -> String {
    let mut message = format!("{GREETING}\n\nI would like to order the following:\n\n");
    let _ = writeln!(message, "Product: {}", product.name);

    if let Some(option) = option {
        if let Some(calculation) = &option.calculation {
            let _ = writeln!(message, "Note Value: {}", option.label);
            let _ = writeln!(message, "Calculation: {calculation}");
        } else {
            let _ = writeln!(message, "Package: {}", option.label);
        }
        let _ = writeln!(message, "Package Price: {}", option.total);
    }

    if let Some(workmanship) = workmanship {
        let _ = writeln!(message, "Workmanship Type: {}", workmanship.label);
        let _ = writeln!(message, "Workmanship Price: {}", workmanship.price);
    }

    if let Some(option) = option {
        let total = workmanship.map_or(option.total, |w| option.total + w.price);
        let _ = writeln!(message, "Total Price: {total}");
    }

    details.write_lines(&mut message);
    message.push_str("\nPlease confirm availability and provide payment details. Thank you!");
    message
}

/// Message for a custom bouquet built in the calculator.
#[must_use]
pub fn custom_package_message(breakdown: &PriceBreakdown, details: &OrderDetails) -> String {
    let config = &breakdown.config;
    let includes: Vec<&str> = config.add_ons.enabled().map(|a| a.label()).collect();
    let includes = if includes.is_empty() {
        "None".to_string()
    } else {
        includes.join(", ")
    };

    let mut message = format!("{GREETING}\n\nI would like to create a CUSTOM MONEY BOUQUET:\n\n");
    message.push_str("Custom Details:\n");
    let _ = writeln!(message, "• Pieces: {}", config.pieces);
    let _ = writeln!(message, "• Note Value: {}", config.note_value);
    let _ = writeln!(message, "• Wrappers: {}", config.wrappers);
    let _ = writeln!(message, "• Foam: {}", config.foam);
    let _ = writeln!(message, "• Includes: {includes}");
    let _ = writeln!(message, "\nTotal Price: {}", breakdown.total);

    let mut extra = String::new();
    details.write_lines(&mut extra);
    if !extra.is_empty() {
        message.push('\n');
        message.push_str(&extra);
    }

    message.push_str("\nPlease confirm availability. Thank you!");
    message
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::find_by_slug;
    use crate::pricing::{AddOns, PricingConfig, compute_total};

    #[test]
    fn test_custom_message_for_default_config() {
        let breakdown = compute_total(&PricingConfig::default());
        let message = custom_package_message(&breakdown, &OrderDetails::default());
        assert_eq!(
            message,
            "Hello Kayjih Bloom Haven 👋\n\n\
             I would like to create a CUSTOM MONEY BOUQUET:\n\n\
             Custom Details:\n\
             • Pieces: 50\n\
             • Note Value: ₦200\n\
             • Wrappers: 5\n\
             • Foam: half\n\
             • Includes: Flower, Birthday Card, Bow, Clip, Ribbon\n\n\
             Total Price: ₦32,700\n\n\
             Please confirm availability. Thank you!"
        );
    }

    #[test]
    fn test_custom_message_without_add_ons() {
        let breakdown = compute_total(&PricingConfig {
            add_ons: AddOns::none(),
            ..PricingConfig::default()
        });
        let details = OrderDetails {
            event_type: Some("Birthday".to_string()),
            ..OrderDetails::default()
        };
        let message = custom_package_message(&breakdown, &details);
        assert!(message.contains("• Includes: None\n"));
        assert!(message.contains("Total Price: ₦28,500\n\nEvent Type: Birthday\n"));
    }

    #[test]
    fn test_catalog_message_for_bouquet() {
        let product = find_by_slug("50-pieces-money-bouquet").unwrap();
        let details = OrderDetails {
            quantity: 2,
            event_type: Some(" Wedding ".to_string()),
            delivery_date: Some("2025-12-24".to_string()),
            notes: Some("   ".to_string()),
        };
        let message = catalog_order_message(product, product.options.get(1), None, &details);
        assert_eq!(
            message,
            "Hello Kayjih Bloom Haven 👋\n\n\
             I would like to order the following:\n\n\
             Product: 50-PIECES MONEY BOUQUET\n\
             Note Value: ₦500 notes\n\
             Calculation: ₦500 × 50 = ₦25,000\n\
             Package Price: ₦47,700\n\
             Total Price: ₦47,700\n\
             Quantity: 2\n\
             Event Type: Wedding\n\
             Delivery Date: 2025-12-24\n\
             \nPlease confirm availability and provide payment details. Thank you!"
        );
    }

    #[test]
    fn test_catalog_message_for_decoration_adds_workmanship() {
        let product = find_by_slug("decoration-package").unwrap();
        let message = catalog_order_message(
            product,
            product.options.first(),
            product.workmanship.get(1),
            &OrderDetails::default(),
        );
        assert!(message.contains("Package: With Normal Balloon\n"));
        assert!(message.contains("Workmanship Type: Normal bed with ceiling\n"));
        assert!(message.contains("Workmanship Price: ₦12,000\n"));
        assert!(message.contains("Total Price: ₦33,500\n"));
        assert!(!message.contains("Quantity"));
    }

    #[test]
    fn test_enquiry_message() {
        let product = find_by_slug("money-tower").unwrap();
        assert_eq!(
            enquiry_message(product),
            "Hello Kayjih Bloom Haven 👋\n\nI'm interested in the MONEY TOWER.\n\nPlease provide details for my order. Thank you!"
        );
    }

    #[test]
    fn test_order_details_deserialize_defaults() {
        let details: OrderDetails = serde_json::from_str(r#"{"quantity": 0}"#).unwrap();
        assert_eq!(details.normalized().quantity, 1);
        assert_eq!(details.event_type, None);
    }
}
