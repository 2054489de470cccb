//! Money tower pricing.
//!
//! A tower always holds 200 notes. Collection is charged per denomination
//! rather than per tier, and the remaining costs are flat.

use serde::Serialize;

use crate::types::Naira;

use super::config::NoteValue;

/// Notes in a standard five-layer tower.
pub const TOWER_PIECES: u32 = 200;
/// "Happy Birthday" topper.
pub const TOWER_LOGO: Naira = Naira::new(2_500);
/// Rope used to assemble the layers.
pub const TOWER_ROPE: Naira = Naira::new(2_000);
/// Foam and ball, rented.
pub const TOWER_FOAM_RENT: Naira = Naira::new(5_000);
pub const TOWER_WORKMANSHIP: Naira = Naira::new(13_000);

/// Price of a money tower for one denomination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TowerPrice {
    pub note_value: NoteValue,
    pub money_value: Naira,
    pub collection: Naira,
    pub total: Naira,
}

/// Collection fee for a tower of the given denomination.
#[must_use]
pub const fn tower_collection(note_value: NoteValue) -> Naira {
    match note_value {
        NoteValue::Naira200 => Naira::new(6_500),
        NoteValue::Naira500 => Naira::new(12_500),
        NoteValue::Naira1000 => Naira::new(22_500),
    }
}

/// Price a standard tower.
#[must_use]
pub fn tower_total(note_value: NoteValue) -> TowerPrice {
    let money_value = note_value.value() * i64::from(TOWER_PIECES);
    let collection = tower_collection(note_value);
    let total =
        money_value + collection + TOWER_LOGO + TOWER_ROPE + TOWER_FOAM_RENT + TOWER_WORKMANSHIP;

    TowerPrice {
        note_value,
        money_value,
        collection,
        total,
    }
}
