//! Static marketing content for the home page.
//!
//! Hero copy, the service cards, the about section, and the gallery. The
//! gallery can be narrowed to one category through `?gallery=`.

use std::fmt;
use std::str::FromStr;

/// Hero headline and call to action.
#[derive(Debug, Clone, Copy)]
pub struct Hero {
    pub eyebrow: &'static str,
    pub headline: &'static str,
    pub highlight: &'static str,
    pub tagline: &'static str,
}

pub const HERO: Hero = Hero {
    eyebrow: "Premium Event Styling",
    headline: "Turning Special Moments Into",
    highlight: "Beautiful Memories",
    tagline: "From breathtaking event décor to creative money bouquets, we design luxury \
              experiences that leave lasting impressions and wow your guests.",
};

/// One service card. `name` is what the contact form records as the service.
#[derive(Debug, Clone, Copy)]
pub struct Service {
    pub name: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
}

pub const SERVICES: [Service; 3] = [
    Service {
        name: "Event Decoration",
        description: "Complete event styling including venue decoration, theme design, and \
                      floral arrangements for all occasions.",
        features: &["Theme Design", "Venue Setup", "Floral Arrangements", "Lighting"],
    },
    Service {
        name: "Money Bouquets",
        description: "Creative and elegant money bouquets for birthdays, weddings, \
                      graduations, and special celebrations.",
        features: &[
            "Custom Designs",
            "Elegant Packaging",
            "Various Sizes",
            "Fast Delivery",
        ],
    },
    Service {
        name: "Birthday Styling",
        description: "Transform birthday celebrations with stunning decorations, balloon \
                      arrangements, and personalized themes.",
        features: &["Balloon Decor", "Backdrop Design", "Table Setup", "Photo Booth"],
    },
];

/// A selling point in the about section.
#[derive(Debug, Clone, Copy)]
pub struct Highlight {
    pub title: &'static str,
    pub description: &'static str,
}

pub const ABOUT: [Highlight; 3] = [
    Highlight {
        title: "Luxury Craftsmanship",
        description: "Every decoration and money bouquet is thoughtfully designed with \
                      elegance, detail, and a refined finish.",
    },
    Highlight {
        title: "Trusted & Professional",
        description: "Reliable service you can count on delivered with care, precision, and \
                      respect for your special moments.",
    },
    Highlight {
        title: "Personalized Experience",
        description: "Your vision comes first. Each design is tailored to match your style, \
                      theme, and celebration.",
    },
];

// =============================================================================
// Gallery
// =============================================================================

/// Gallery grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryCategory {
    Event,
    Bouquet,
    Packages,
}

impl GalleryCategory {
    pub const ALL: [Self; 3] = [Self::Event, Self::Bouquet, Self::Packages];

    /// Query-string value.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::Bouquet => "bouquet",
            Self::Packages => "packages",
        }
    }

    /// Tab label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Event => "Event Decoration",
            Self::Bouquet => "Money Bouquets",
            Self::Packages => "Gift Packages",
        }
    }
}

impl fmt::Display for GalleryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for GalleryCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(s.trim()))
            .ok_or(())
    }
}

/// A photo of past work.
#[derive(Debug, Clone, Copy)]
pub struct GalleryItem {
    pub category: GalleryCategory,
    pub title: &'static str,
    pub image: &'static str,
    pub description: &'static str,
}

const fn item(
    category: GalleryCategory,
    title: &'static str,
    image: &'static str,
    description: &'static str,
) -> GalleryItem {
    GalleryItem {
        category,
        title,
        image,
        description,
    }
}

pub const GALLERY: [GalleryItem; 13] = [
    item(
        GalleryCategory::Event,
        "Wedding Mandap Decoration",
        "/static/img/decoration.jpeg",
        "A beautifully crafted floral mandap designed to create an elegant and unforgettable wedding atmosphere.",
    ),
    item(
        GalleryCategory::Bouquet,
        "Money Bouquet Design",
        "/static/img/bouquet.jpeg",
        "A creative money bouquet styled with precision, blending luxury gifting with artistic presentation.",
    ),
    item(
        GalleryCategory::Packages,
        "Birthday Balloon Decor",
        "/static/img/wrapped-gift.jpeg",
        "A vibrant balloon decoration setup that transforms birthdays into colorful and joyful celebrations.",
    ),
    item(
        GalleryCategory::Event,
        "Corporate Event Setup",
        "/static/img/decoration-1.jpeg",
        "A clean and professional event decoration tailored to elevate corporate gatherings and brand presence.",
    ),
    item(
        GalleryCategory::Bouquet,
        "Graduation Bouquet",
        "/static/img/bouquet-1.jpeg",
        "A thoughtfully designed graduation bouquet that celebrates success, milestones, and new beginnings.",
    ),
    item(
        GalleryCategory::Packages,
        "Kids Birthday Theme",
        "/static/img/wrapped-gift-1.jpeg",
        "A fun and playful themed decoration featuring bright colors and characters kids absolutely love.",
    ),
    item(
        GalleryCategory::Event,
        "Anniversary Decoration",
        "/static/img/decoration-2.jpeg",
        "A romantic decoration setup created to celebrate love, memories, and special anniversary moments.",
    ),
    item(
        GalleryCategory::Bouquet,
        "Wedding Money Bouquet",
        "/static/img/bouquet-2.jpeg",
        "An elegant wedding money bouquet designed as a stylish and meaningful bridal gift.",
    ),
    item(
        GalleryCategory::Event,
        "Wedding Money Bouquet Display",
        "/static/img/decoration-3.jpeg",
        "A stunning decorative display that blends wedding elegance with creative money bouquet styling.",
    ),
    item(
        GalleryCategory::Packages,
        "Wedding Gift Package",
        "/static/img/wrapped-gift-2.jpeg",
        "A premium wedding gift package thoughtfully wrapped to leave a lasting impression.",
    ),
    item(
        GalleryCategory::Bouquet,
        "Luxury Wedding Money Bouquet",
        "/static/img/bouquet-3.jpeg",
        "A luxurious money bouquet crafted for weddings, symbolizing love, prosperity, and celebration.",
    ),
    item(
        GalleryCategory::Bouquet,
        "Classic Wedding Money Bouquet",
        "/static/img/bouquet-4.jpeg",
        "A classic money bouquet design featuring a neat arrangement and timeless bridal elegance.",
    ),
    item(
        GalleryCategory::Bouquet,
        "Premium Wedding Money Bouquet",
        "/static/img/bouquet-5.jpeg",
        "A premium handcrafted money bouquet created to make wedding gifting truly memorable.",
    ),
];

/// Gallery items in `category`, or all of them.
#[must_use]
pub fn gallery(category: Option<GalleryCategory>) -> Vec<&'static GalleryItem> {
    GALLERY
        .iter()
        .filter(|item| category.is_none_or(|c| item.category == c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gallery_filter() {
        assert_eq!(gallery(None).len(), 13);
        assert_eq!(gallery(Some(GalleryCategory::Event)).len(), 4);
        assert_eq!(gallery(Some(GalleryCategory::Bouquet)).len(), 6);
        assert_eq!(gallery(Some(GalleryCategory::Packages)).len(), 3);
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("Bouquet".parse(), Ok(GalleryCategory::Bouquet));
        assert!("all".parse::<GalleryCategory>().is_err());
    }
}
