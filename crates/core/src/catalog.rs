//! The published product catalog.
//!
//! Bouquet and tower prices are not written down here: they are computed
//! from the same tables the custom calculator uses, so the catalog and the
//! calculator cannot drift apart. Only the decoration package carries fixed
//! prices.

use core::fmt;
use core::str::FromStr;
use std::sync::LazyLock;

use serde::Serialize;

use crate::pricing::{
    AddOns, FoamType, NoteValue, PRICE_TABLE, PriceBreakdown, PricingConfig, TOWER_PIECES,
    compute_total, tower, tower_total,
};
use crate::types::{Naira, ProductId};

/// Product family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    MoneyBouquet,
    MoneyTower,
    Decoration,
}

impl Category {
    pub const ALL: [Self; 3] = [Self::MoneyBouquet, Self::MoneyTower, Self::Decoration];

    /// Display name, as shown on the category tabs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MoneyBouquet => "Money Bouquet",
            Self::MoneyTower => "Money Tower",
            Self::Decoration => "Decoration",
        }
    }

    /// URL form used in `?category=`.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::MoneyBouquet => "money-bouquet",
            Self::MoneyTower => "money-tower",
            Self::Decoration => "decoration",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Accepts either the slug or the label, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.slug().eq_ignore_ascii_case(s) || c.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// One line of a product's materials list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaterialLine {
    pub name: &'static str,
    pub detail: String,
}

impl MaterialLine {
    fn new(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            detail: detail.into(),
        }
    }
}

/// A priced variant of a product (a note value, or a balloon type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageOption {
    pub label: String,
    /// How the money value is made up, for note-value options.
    pub calculation: Option<String>,
    /// Separately listed collection fee (towers only).
    pub collection: Option<Naira>,
    pub total: Naira,
}

/// Labor choice that is added on top of the package price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkmanshipOption {
    pub label: &'static str,
    pub price: Naira,
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub slug: &'static str,
    pub name: &'static str,
    pub category: Category,
    /// Short variant label such as "50-Pieces".
    pub kind: &'static str,
    pub description: &'static str,
    pub materials: Vec<MaterialLine>,
    pub options: Vec<PackageOption>,
    /// Empty unless the product is priced with a separate labor choice.
    pub workmanship: Vec<WorkmanshipOption>,
    pub features: Vec<&'static str>,
    pub note: Option<&'static str>,
}

impl Product {
    /// Cheapest option price, shown as "from ..." on the listing.
    #[must_use]
    pub fn starting_price(&self) -> Naira {
        self.options
            .iter()
            .map(|o| o.total)
            .min()
            .unwrap_or(Naira::ZERO)
    }

    /// Price of option `option` plus workmanship `workmanship`.
    ///
    /// Products with workmanship choices need one picked; `None` is returned
    /// when an index is out of range or a required choice is missing.
    #[must_use]
    pub fn selection_total(&self, option: usize, workmanship: Option<usize>) -> Option<Naira> {
        let package = self.options.get(option)?.total;
        if self.workmanship.is_empty() {
            return Some(package);
        }
        let labor = self.workmanship.get(workmanship?)?.price;
        Some(package + labor)
    }

    /// Case-insensitive match on name or description.
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }
}

/// Listing filter: a category (or all) and a free-text search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub category: Option<Category>,
    pub query: Option<String>,
}

impl CatalogFilter {
    /// Whether `product` should be listed.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.category.is_none_or(|c| c == product.category)
            && self
                .query
                .as_deref()
                .is_none_or(|q| product.matches_query(q))
    }
}

// =============================================================================
// Catalog contents
// =============================================================================

static CATALOG: LazyLock<Vec<Product>> = LazyLock::new(|| {
    vec![
        bouquet(
            1,
            BouquetSpec {
                slug: "50-pieces-money-bouquet",
                name: "50-PIECES MONEY BOUQUET",
                kind: "50-Pieces",
                description: "Elegant 50-piece money bouquet - perfect for small to medium celebrations",
                pieces: 50,
                wrappers: 5,
                foam: FoamType::Half,
                features: vec![
                    "Perfect for birthdays, anniversaries",
                    "Includes birthday card",
                    "Flower decoration included",
                    "Professional wrapping",
                    "Bank collection service",
                ],
            },
        ),
        bouquet(
            2,
            BouquetSpec {
                slug: "100-pieces-money-bouquet",
                name: "100-PIECES MONEY BOUQUET",
                kind: "100-Pieces",
                description: "Grand 100-piece money bouquet - ideal for large celebrations and VIP events",
                pieces: 100,
                wrappers: 9,
                foam: FoamType::Full,
                features: vec![
                    "Perfect for weddings, corporate events",
                    "Larger, more impressive display",
                    "Includes birthday card",
                    "Full foam base for stability",
                    "Professional bank collection",
                ],
            },
        ),
        money_tower(3),
        decoration_package(4),
    ]
});

/// Every product, in display order.
#[must_use]
pub fn products() -> &'static [Product] {
    &CATALOG
}

/// Products passing `filter`, in display order.
#[must_use]
pub fn filter(filter: &CatalogFilter) -> Vec<&'static Product> {
    products().iter().filter(|p| filter.matches(p)).collect()
}

#[must_use]
pub fn find_by_slug(slug: &str) -> Option<&'static Product> {
    products().iter().find(|p| p.slug == slug)
}

#[must_use]
pub fn find(id: ProductId) -> Option<&'static Product> {
    products().iter().find(|p| p.id == id)
}

struct BouquetSpec {
    slug: &'static str,
    name: &'static str,
    kind: &'static str,
    description: &'static str,
    pieces: u32,
    wrappers: u32,
    foam: FoamType,
    features: Vec<&'static str>,
}

fn note_calculation(note: NoteValue, pieces: u32) -> String {
    format!("{note} × {pieces} = {}", note.value() * i64::from(pieces))
}

fn note_label(note: NoteValue) -> String {
    format!("{note} notes")
}

fn bouquet(id: i64, spec: BouquetSpec) -> Product {
    let priced = |note_value| -> PriceBreakdown {
        compute_total(&PricingConfig {
            pieces: spec.pieces,
            note_value,
            wrappers: spec.wrappers,
            foam: spec.foam,
            add_ons: AddOns::all(),
        })
    };
    let base = priced(NoteValue::Naira200);
    let foam_label = match spec.foam {
        FoamType::Half => "Half foam",
        FoamType::Full => "Full foam",
    };

    let mut materials = vec![
        MaterialLine::new(
            "Wrapper",
            format!("{} × {} = {}", PRICE_TABLE.wrapper, spec.wrappers, base.wrapper),
        ),
        MaterialLine::new("Foam", format!("{foam_label} = {}", base.foam)),
        MaterialLine::new("Sticks", format!("{} pieces = {}", spec.pieces, base.sticks)),
        MaterialLine::new("Cellotape", base.cellotape.to_string()),
    ];
    materials.extend(
        base.config
            .add_ons
            .enabled()
            .map(|a| MaterialLine::new(a.label(), PRICE_TABLE.add_on(a).to_string())),
    );
    materials.push(MaterialLine::new(
        "Collection",
        format!("Bank collection + transport = {}", base.collection),
    ));
    materials.push(MaterialLine::new("Total materials", base.materials.to_string()));
    materials.push(MaterialLine::new("Workmanship", base.workmanship.to_string()));

    let options = NoteValue::ALL
        .into_iter()
        .map(|note| PackageOption {
            label: note_label(note),
            calculation: Some(note_calculation(note, spec.pieces)),
            collection: None,
            total: priced(note).total,
        })
        .collect();

    Product {
        id: ProductId::new(id),
        slug: spec.slug,
        name: spec.name,
        category: Category::MoneyBouquet,
        kind: spec.kind,
        description: spec.description,
        materials,
        options,
        workmanship: Vec::new(),
        features: spec.features,
        note: None,
    }
}

fn money_tower(id: i64) -> Product {
    let options = NoteValue::ALL
        .into_iter()
        .map(|note| {
            let price = tower_total(note);
            PackageOption {
                label: note_label(note),
                calculation: Some(note_calculation(note, TOWER_PIECES)),
                collection: Some(price.collection),
                total: price.total,
            }
        })
        .collect();

    Product {
        id: ProductId::new(id),
        slug: "money-tower",
        name: "MONEY TOWER",
        category: Category::MoneyTower,
        kind: "5-Layers",
        description: "Impressive 5-layer money tower with 200 pieces - the ultimate luxury display",
        materials: vec![
            MaterialLine::new("Collection", "Bank collection + transport"),
            MaterialLine::new("Logo", format!("Happy Birthday logo = {}", tower::TOWER_LOGO)),
            MaterialLine::new("Rope", format!("Rope for assembly = {}", tower::TOWER_ROPE)),
            MaterialLine::new(
                "Foam",
                format!("Foam + ball (rent) = {}", tower::TOWER_FOAM_RENT),
            ),
            MaterialLine::new("Workmanship", tower::TOWER_WORKMANSHIP.to_string()),
        ],
        options,
        workmanship: Vec::new(),
        features: vec![
            "5-layer impressive display",
            "Happy Birthday logo included",
            "Professional assembly",
            "Adjustable number of layers",
            "Perfect for grand celebrations",
        ],
        note: Some("Five layers is not fixed. You can choose any number of layers."),
    }
}

fn decoration_package(id: i64) -> Product {
    let line = |name, detail: &str| MaterialLine::new(name, detail);
    Product {
        id: ProductId::new(id),
        slug: "decoration-package",
        name: "DECORATION PACKAGE",
        category: Category::Decoration,
        kind: "Complete Setup",
        description: "Complete decoration package with all accessories - perfect for birthdays and celebrations",
        materials: vec![
            line("Confetti", "₦2,500"),
            line("Normal balloon", "₦3,500"),
            line("Shiny balloon", "₦4,500"),
            line("Ribbon", "Normal ribbon = ₦1,000"),
            line("Glue", "Balloon glue = ₦1,500"),
            line("Backdrop", "₦2,500"),
            line("Foil balloon", "Happy Birthday foil balloon = ₦3,000"),
            line("Birthday card", "₦1,500"),
            line("Sash", "Birthday sash = ₦2,000"),
            line("Fishing line", "₦1,000"),
            line("Number balloon", "₦3,000"),
            line("Bento cake", "Normal bento cake = ₦9,500"),
        ],
        options: vec![
            PackageOption {
                label: "With Normal Balloon".to_string(),
                calculation: None,
                collection: None,
                total: Naira::new(21_500),
            },
            PackageOption {
                label: "With Shiny Balloon".to_string(),
                calculation: None,
                collection: None,
                total: Naira::new(22_500),
            },
        ],
        workmanship: vec![
            WorkmanshipOption {
                label: "Bunk bed",
                price: Naira::new(8_000),
            },
            WorkmanshipOption {
                label: "Normal bed with ceiling",
                price: Naira::new(12_000),
            },
            WorkmanshipOption {
                label: "Lake Tana (high ceiling)",
                price: Naira::new(15_000),
            },
        ],
        features: vec![
            "Complete decoration setup",
            "Choice of balloon type",
            "Bento cake included",
            "Professional installation",
            "All accessories included",
            "Customizable design",
        ],
        note: Some(
            "Workmanship depends on bed type and style complexity. Price can be reduced if you prefer simpler decoration. Delivery of cake included.",
        ),
    }
}
