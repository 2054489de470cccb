//! Calculator inputs and the reducer that edits them.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::Naira;

/// Smallest bouquet the calculator prices.
pub const MIN_PIECES: u32 = 10;
/// Largest bouquet the calculator prices.
pub const MAX_PIECES: u32 = 200;
/// Piece counts move in steps of this size.
pub const PIECE_STEP: u32 = 10;
/// The form never goes below one wrapper.
pub const MIN_WRAPPERS: u32 = 1;

/// Denomination of the notes folded into the bouquet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum NoteValue {
    #[default]
    Naira200,
    Naira500,
    Naira1000,
}

impl NoteValue {
    /// All denominations, smallest first.
    pub const ALL: [Self; 3] = [Self::Naira200, Self::Naira500, Self::Naira1000];

    /// Face value of a single note.
    #[must_use]
    pub fn value(self) -> Naira {
        Naira::new(i64::from(self.as_u32()))
    }

    /// Face value as a plain number.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        match self {
            Self::Naira200 => 200,
            Self::Naira500 => 500,
            Self::Naira1000 => 1000,
        }
    }
}

impl fmt::Display for NoteValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value().fmt(f)
    }
}

/// Error for a denomination the business does not use.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported note value: {0} (expected 200, 500 or 1000)")]
pub struct UnsupportedNoteValue(pub u32);

impl TryFrom<u32> for NoteValue {
    type Error = UnsupportedNoteValue;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            200 => Ok(Self::Naira200),
            500 => Ok(Self::Naira500),
            1000 => Ok(Self::Naira1000),
            other => Err(UnsupportedNoteValue(other)),
        }
    }
}

impl From<NoteValue> for u32 {
    fn from(value: NoteValue) -> Self {
        value.as_u32()
    }
}

impl FromStr for NoteValue {
    type Err = UnsupportedNoteValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits: String = s.chars().filter(char::is_ascii_digit).collect();
        let value = digits.parse::<u32>().map_err(|_| UnsupportedNoteValue(0))?;
        Self::try_from(value)
    }
}

/// Foam base under the bouquet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoamType {
    #[default]
    Half,
    Full,
}

impl FoamType {
    /// Lowercase name used in forms and messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Half => "half",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for FoamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FoamType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "half" => Ok(Self::Half),
            "full" => Ok(Self::Full),
            other => Err(format!("invalid foam type: {other}")),
        }
    }
}

/// An optional extra that can be added to a custom bouquet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOn {
    Flower,
    BirthdayCard,
    Bow,
    Clip,
    Ribbon,
}

impl AddOn {
    /// All add-ons in display order.
    pub const ALL: [Self; 5] = [
        Self::Flower,
        Self::BirthdayCard,
        Self::Bow,
        Self::Clip,
        Self::Ribbon,
    ];

    /// Customer-facing name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Flower => "Flower",
            Self::BirthdayCard => "Birthday Card",
            Self::Bow => "Bow",
            Self::Clip => "Clip",
            Self::Ribbon => "Ribbon",
        }
    }

    /// Form field / CLI name.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Flower => "flower",
            Self::BirthdayCard => "birthday_card",
            Self::Bow => "bow",
            Self::Clip => "clip",
            Self::Ribbon => "ribbon",
        }
    }
}

impl FromStr for AddOn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flower" => Ok(Self::Flower),
            "birthday_card" | "card" => Ok(Self::BirthdayCard),
            "bow" => Ok(Self::Bow),
            "clip" => Ok(Self::Clip),
            "ribbon" => Ok(Self::Ribbon),
            other => Err(format!("unknown add-on: {other}")),
        }
    }
}

/// Which add-ons are included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct AddOns {
    pub flower: bool,
    pub birthday_card: bool,
    pub bow: bool,
    pub clip: bool,
    pub ribbon: bool,
}

impl Default for AddOns {
    fn default() -> Self {
        Self::all()
    }
}

impl AddOns {
    /// Every add-on included.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            flower: true,
            birthday_card: true,
            bow: true,
            clip: true,
            ribbon: true,
        }
    }

    /// No add-ons.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            flower: false,
            birthday_card: false,
            bow: false,
            clip: false,
            ribbon: false,
        }
    }

    /// Whether `add_on` is included.
    #[must_use]
    pub const fn contains(&self, add_on: AddOn) -> bool {
        match add_on {
            AddOn::Flower => self.flower,
            AddOn::BirthdayCard => self.birthday_card,
            AddOn::Bow => self.bow,
            AddOn::Clip => self.clip,
            AddOn::Ribbon => self.ribbon,
        }
    }

    /// Copy with `add_on` set to `included`.
    #[must_use]
    pub const fn with(mut self, add_on: AddOn, included: bool) -> Self {
        match add_on {
            AddOn::Flower => self.flower = included,
            AddOn::BirthdayCard => self.birthday_card = included,
            AddOn::Bow => self.bow = included,
            AddOn::Clip => self.clip = included,
            AddOn::Ribbon => self.ribbon = included,
        }
        self
    }

    /// Included add-ons in display order.
    pub fn enabled(&self) -> impl Iterator<Item = AddOn> + '_ {
        AddOn::ALL.into_iter().filter(|a| self.contains(*a))
    }
}

/// A custom bouquet configuration.
///
/// Values are never changed by the calculator; the form edits them through
/// [`PricingConfig::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub pieces: u32,
    pub note_value: NoteValue,
    pub wrappers: u32,
    pub foam: FoamType,
    pub add_ons: AddOns,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            pieces: 50,
            note_value: NoteValue::Naira200,
            wrappers: 5,
            foam: FoamType::Half,
            add_ons: AddOns::all(),
        }
    }
}

impl PricingConfig {
    /// Copy with the piece count snapped down to a step of 10 and clamped to
    /// `[MIN_PIECES, MAX_PIECES]`.
    #[must_use]
    pub const fn clamped(mut self) -> Self {
        let snapped = self.pieces / PIECE_STEP * PIECE_STEP;
        self.pieces = if snapped < MIN_PIECES {
            MIN_PIECES
        } else if snapped > MAX_PIECES {
            MAX_PIECES
        } else {
            snapped
        };
        self
    }

    /// Apply a form action and return the resulting configuration.
    #[must_use]
    pub fn apply(self, action: PricingAction) -> Self {
        let next = match action {
            PricingAction::SetPieces(pieces) => Self { pieces, ..self },
            PricingAction::IncrementPieces => Self {
                pieces: self.pieces.saturating_add(PIECE_STEP),
                ..self
            },
            PricingAction::DecrementPieces => Self {
                pieces: self.pieces.saturating_sub(PIECE_STEP),
                ..self
            },
            PricingAction::SetNoteValue(note_value) => Self { note_value, ..self },
            PricingAction::SetWrappers(wrappers) => Self {
                wrappers: wrappers.max(MIN_WRAPPERS),
                ..self
            },
            PricingAction::IncrementWrappers => Self {
                wrappers: self.wrappers.saturating_add(1),
                ..self
            },
            PricingAction::DecrementWrappers => Self {
                wrappers: self.wrappers.saturating_sub(1).max(MIN_WRAPPERS),
                ..self
            },
            PricingAction::SetFoam(foam) => Self { foam, ..self },
            PricingAction::ToggleAddOn(add_on) => Self {
                add_ons: self
                    .add_ons
                    .with(add_on, !self.add_ons.contains(add_on)),
                ..self
            },
        };
        next.clamped()
    }
}

/// An edit made through the calculator form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingAction {
    SetPieces(u32),
    IncrementPieces,
    DecrementPieces,
    SetNoteValue(NoteValue),
    SetWrappers(u32),
    IncrementWrappers,
    DecrementWrappers,
    SetFoam(FoamType),
    ToggleAddOn(AddOn),
}

impl FromStr for PricingAction {
    type Err = String;

    /// Parses the step buttons of the form (`pieces_up`, `wrappers_down`, ...)
    /// and `toggle_<add-on>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pieces_up" => Ok(Self::IncrementPieces),
            "pieces_down" => Ok(Self::DecrementPieces),
            "wrappers_up" => Ok(Self::IncrementWrappers),
            "wrappers_down" => Ok(Self::DecrementWrappers),
            other => other
                .strip_prefix("toggle_")
                .ok_or_else(|| format!("unknown action: {other}"))?
                .parse::<AddOn>()
                .map(Self::ToggleAddOn),
        }
    }
}
