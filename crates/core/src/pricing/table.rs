//! Material and fee tables.
//!
//! One canonical table is used everywhere. Its tiered cellotape fee is the
//! value that reproduces the published 50- and 100-piece catalog prices.
//! The site's first calculator charged a flat ₦1,000 for cellotape; keep the
//! tiers, a flat fee breaks both published bouquet prices.

use crate::types::Naira;

use super::config::{AddOn, FoamType};

/// Piece-count bracket that selects a tiered fee.
///
/// Boundaries belong to the lower tier: 50 pieces is `UpTo50`, 100 pieces
/// is `UpTo100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    UpTo50,
    UpTo100,
    Over100,
}

impl Tier {
    /// Bracket for a piece count.
    #[must_use]
    pub const fn for_pieces(pieces: u32) -> Self {
        if pieces <= 50 {
            Self::UpTo50
        } else if pieces <= 100 {
            Self::UpTo100
        } else {
            Self::Over100
        }
    }
}

/// A fee with one value per [`Tier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierFees {
    pub up_to_50: Naira,
    pub up_to_100: Naira,
    pub over_100: Naira,
}

impl TierFees {
    /// Fee for the bracket `tier`.
    #[must_use]
    pub const fn fee(&self, tier: Tier) -> Naira {
        match tier {
            Tier::UpTo50 => self.up_to_50,
            Tier::UpTo100 => self.up_to_100,
            Tier::Over100 => self.over_100,
        }
    }
}

/// Unit costs and fees used by the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceTable {
    pub wrapper: Naira,
    pub foam_half: Naira,
    pub foam_full: Naira,
    /// Sticks for bouquets of up to 50 pieces.
    pub sticks_small: Naira,
    /// Sticks for anything larger.
    pub sticks_large: Naira,
    pub cellotape: TierFees,
    pub flower: Naira,
    pub birthday_card: Naira,
    pub bow: Naira,
    pub clip: Naira,
    pub ribbon: Naira,
    /// Bank withdrawal and transport of the cash.
    pub collection: TierFees,
    pub workmanship: TierFees,
}

/// The price list in use.
pub const PRICE_TABLE: PriceTable = PriceTable {
    wrapper: Naira::new(800),
    foam_half: Naira::new(2_000),
    foam_full: Naira::new(4_000),
    sticks_small: Naira::new(500),
    sticks_large: Naira::new(1_000),
    cellotape: TierFees {
        up_to_50: Naira::new(500),
        up_to_100: Naira::new(1_500),
        over_100: Naira::new(1_500),
    },
    flower: Naira::new(500),
    birthday_card: Naira::new(1_500),
    bow: Naira::new(1_000),
    clip: Naira::new(1_000),
    ribbon: Naira::new(200),
    collection: TierFees {
        up_to_50: Naira::new(3_500),
        up_to_100: Naira::new(4_500),
        over_100: Naira::new(6_500),
    },
    workmanship: TierFees {
        up_to_50: Naira::new(8_000),
        up_to_100: Naira::new(12_000),
        over_100: Naira::new(13_000),
    },
};

impl PriceTable {
    /// Foam cost for the chosen base.
    #[must_use]
    pub const fn foam(&self, foam: FoamType) -> Naira {
        match foam {
            FoamType::Half => self.foam_half,
            FoamType::Full => self.foam_full,
        }
    }

    /// Sticks cost: the small set covers up to 50 pieces.
    #[must_use]
    pub const fn sticks(&self, pieces: u32) -> Naira {
        if pieces <= 50 {
            self.sticks_small
        } else {
            self.sticks_large
        }
    }

    /// Unit price of an add-on.
    #[must_use]
    pub const fn add_on(&self, add_on: AddOn) -> Naira {
        match add_on {
            AddOn::Flower => self.flower,
            AddOn::BirthdayCard => self.birthday_card,
            AddOn::Bow => self.bow,
            AddOn::Clip => self.clip,
            AddOn::Ribbon => self.ribbon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries_fall_low() {
        assert_eq!(Tier::for_pieces(10), Tier::UpTo50);
        assert_eq!(Tier::for_pieces(50), Tier::UpTo50);
        assert_eq!(Tier::for_pieces(60), Tier::UpTo100);
        assert_eq!(Tier::for_pieces(100), Tier::UpTo100);
        assert_eq!(Tier::for_pieces(110), Tier::Over100);
        assert_eq!(Tier::for_pieces(200), Tier::Over100);
    }

    #[test]
    fn test_sticks_switch_after_fifty() {
        assert_eq!(PRICE_TABLE.sticks(50), Naira::new(500));
        assert_eq!(PRICE_TABLE.sticks(60), Naira::new(1_000));
    }

    #[test]
    fn test_cellotape_is_tiered() {
        assert_eq!(PRICE_TABLE.cellotape.fee(Tier::UpTo50), Naira::new(500));
        assert_eq!(PRICE_TABLE.cellotape.fee(Tier::UpTo100), Naira::new(1_500));
        assert_eq!(PRICE_TABLE.cellotape.fee(Tier::Over100), Naira::new(1_500));
    }
}
