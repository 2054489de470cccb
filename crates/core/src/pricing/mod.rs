//! Custom money bouquet pricing.
//!
//! # Formula
//!
//! ```text
//! money_value = pieces × note_value
//! materials   = wrappers × wrapper + foam + sticks + cellotape
//!             + enabled add-ons + collection
//! total       = money_value + materials + workmanship
//! ```
//!
//! Sticks switch price above 50 pieces. Cellotape, collection and workmanship
//! are looked up by [`Tier`]. The calculation is pure and cannot fail; the
//! configuration is clamped before it is priced.

pub mod config;
pub mod table;
pub mod tower;

use serde::Serialize;

use crate::types::Naira;

pub use config::{
    AddOn, AddOns, FoamType, MAX_PIECES, MIN_PIECES, MIN_WRAPPERS, NoteValue, PIECE_STEP,
    PricingAction, PricingConfig, UnsupportedNoteValue,
};
pub use table::{PRICE_TABLE, PriceTable, Tier, TierFees};
pub use tower::{TOWER_PIECES, TowerPrice, tower_total};

/// Line-by-line price of a custom bouquet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceBreakdown {
    /// The configuration that was priced, after clamping.
    pub config: PricingConfig,
    pub money_value: Naira,
    pub wrapper: Naira,
    pub foam: Naira,
    pub sticks: Naira,
    pub cellotape: Naira,
    pub flower: Naira,
    pub birthday_card: Naira,
    pub bow: Naira,
    pub clip: Naira,
    pub ribbon: Naira,
    pub collection: Naira,
    pub workmanship: Naira,
    /// Everything except the money and workmanship.
    pub materials: Naira,
    pub total: Naira,
}

impl PriceBreakdown {
    /// Material lines in display order, excluding zero-cost add-ons.
    #[must_use]
    pub fn material_lines(&self) -> Vec<(&'static str, Naira)> {
        let add_ons = AddOn::ALL
            .into_iter()
            .filter(|a| self.config.add_ons.contains(*a))
            .map(|a| (a.label(), self.add_on(a)));

        [
            ("Wrappers", self.wrapper),
            ("Foam", self.foam),
            ("Sticks", self.sticks),
            ("Cellotape", self.cellotape),
        ]
        .into_iter()
        .chain(add_ons)
        .chain(std::iter::once(("Collection", self.collection)))
        .collect()
    }

    const fn add_on(&self, add_on: AddOn) -> Naira {
        match add_on {
            AddOn::Flower => self.flower,
            AddOn::BirthdayCard => self.birthday_card,
            AddOn::Bow => self.bow,
            AddOn::Clip => self.clip,
            AddOn::Ribbon => self.ribbon,
        }
    }
}

/// Price a configuration with the canonical [`PRICE_TABLE`].
#[must_use]
pub fn compute_total(config: &PricingConfig) -> PriceBreakdown {
    compute_with(&PRICE_TABLE, config)
}

/// Price a configuration with an explicit table.
#[must_use]
pub fn compute_with(table: &PriceTable, config: &PricingConfig) -> PriceBreakdown {
    let config = config.clamped();
    let pieces = config.pieces;
    let tier = Tier::for_pieces(pieces);
    let add_ons = config.add_ons;

    let money_value = config.note_value.value() * i64::from(pieces);
    let wrapper = table.wrapper * i64::from(config.wrappers);
    let foam = table.foam(config.foam);
    let sticks = table.sticks(pieces);
    let cellotape = table.cellotape.fee(tier);
    let flower = table.flower.if_included(add_ons.flower);
    let birthday_card = table.birthday_card.if_included(add_ons.birthday_card);
    let bow = table.bow.if_included(add_ons.bow);
    let clip = table.clip.if_included(add_ons.clip);
    let ribbon = table.ribbon.if_included(add_ons.ribbon);
    let collection = table.collection.fee(tier);
    let workmanship = table.workmanship.fee(tier);

    let materials: Naira = [
        wrapper,
        foam,
        sticks,
        cellotape,
        flower,
        birthday_card,
        bow,
        clip,
        ribbon,
        collection,
    ]
    .into_iter()
    .sum();

    PriceBreakdown {
        config,
        money_value,
        wrapper,
        foam,
        sticks,
        cellotape,
        flower,
        birthday_card,
        bow,
        clip,
        ribbon,
        collection,
        workmanship,
        materials,
        total: money_value + materials + workmanship,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(pieces: u32) -> PricingConfig {
        PricingConfig {
            pieces,
            ..PricingConfig::default()
        }
    }

    #[test]
    fn test_default_config_prices_at_published_total() {
        let breakdown = compute_total(&PricingConfig::default());
        assert_eq!(breakdown.money_value, Naira::new(10_000));
        assert_eq!(breakdown.wrapper, Naira::new(4_000));
        assert_eq!(breakdown.materials, Naira::new(14_700));
        assert_eq!(breakdown.workmanship, Naira::new(8_000));
        assert_eq!(breakdown.total, Naira::new(32_700));
    }

    #[test]
    fn test_sticks_tiers_across_range() {
        for pieces in (MIN_PIECES..=MAX_PIECES).step_by(10) {
            let expected = if pieces <= 50 {
                PRICE_TABLE.sticks_small
            } else {
                PRICE_TABLE.sticks_large
            };
            assert_eq!(compute_total(&config(pieces)).sticks, expected, "{pieces}");
        }
    }

    #[test]
    fn test_total_is_sum_of_parts_for_every_config() {
        for pieces in (MIN_PIECES..=MAX_PIECES).step_by(10) {
            for note_value in NoteValue::ALL {
                for foam in [FoamType::Half, FoamType::Full] {
                    for add_ons in [AddOns::all(), AddOns::none()] {
                        let b = compute_total(&PricingConfig {
                            pieces,
                            note_value,
                            wrappers: 3,
                            foam,
                            add_ons,
                        });
                        assert_eq!(b.total, b.money_value + b.materials + b.workmanship);
                        let lines: Naira = b.material_lines().into_iter().map(|(_, v)| v).sum();
                        assert_eq!(lines, b.materials);
                    }
                }
            }
        }
    }

    #[test]
    fn test_boundary_pieces_use_lower_tier() {
        let at_50 = compute_total(&config(50));
        assert_eq!(at_50.collection, Naira::new(3_500));
        assert_eq!(at_50.workmanship, Naira::new(8_000));

        let at_100 = compute_total(&config(100));
        assert_eq!(at_100.collection, Naira::new(4_500));
        assert_eq!(at_100.workmanship, Naira::new(12_000));

        let at_110 = compute_total(&config(110));
        assert_eq!(at_110.collection, Naira::new(6_500));
        assert_eq!(at_110.workmanship, Naira::new(13_000));
    }

    #[test]
    fn test_disabled_add_ons_cost_nothing() {
        let b = compute_total(&PricingConfig {
            add_ons: AddOns::none(),
            ..PricingConfig::default()
        });
        assert_eq!(b.flower, Naira::ZERO);
        assert_eq!(b.ribbon, Naira::ZERO);
        assert_eq!(b.total, Naira::new(32_700 - 4_200));
        assert_eq!(b.material_lines().len(), 5);
    }

    #[test]
    fn test_out_of_range_input_is_clamped() {
        let b = compute_total(&PricingConfig {
            pieces: 1_000,
            wrappers: 0,
            ..PricingConfig::default()
        });
        assert_eq!(b.config.pieces, 200);
        assert_eq!(b.money_value, Naira::new(40_000));
        assert_eq!(b.wrapper, Naira::ZERO);
    }
}
