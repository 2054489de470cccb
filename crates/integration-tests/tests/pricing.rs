//! The catalog, the calculator page and the quote API price bouquets the
//! same way.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use serde_json::{Value, json};

use bloom_haven_core::catalog::{self, Category};
use bloom_haven_core::pricing::{AddOns, FoamType, NoteValue, tower_total};
use bloom_haven_core::{PricingConfig, compute_total};

use bloom_haven_integration_tests::TestContext;

#[test]
fn test_catalog_bouquets_match_calculator() {
    let cases = [
        ("50-pieces-money-bouquet", 50, 5, FoamType::Half),
        ("100-pieces-money-bouquet", 100, 9, FoamType::Full),
    ];
    for (slug, pieces, wrappers, foam) in cases {
        let product = catalog::find_by_slug(slug).unwrap();
        for (option, note_value) in product.options.iter().zip(NoteValue::ALL) {
            let config = PricingConfig {
                pieces,
                note_value,
                wrappers,
                foam,
                add_ons: AddOns::all(),
            };
            assert_eq!(option.total, compute_total(&config).total, "{slug} {note_value}");
        }
    }
}

#[test]
fn test_catalog_tower_matches_tower_pricing() {
    let tower = catalog::find_by_slug("money-tower").unwrap();
    assert_eq!(tower.category, Category::MoneyTower);
    for (option, note_value) in tower.options.iter().zip(NoteValue::ALL) {
        assert_eq!(option.total, tower_total(note_value).total);
        assert_eq!(option.collection, Some(tower_total(note_value).collection));
    }
}

#[tokio::test]
async fn test_quote_api_matches_core() {
    let ctx = TestContext::start().await;
    let config = PricingConfig {
        pieces: 120,
        note_value: NoteValue::Naira1000,
        wrappers: 7,
        foam: FoamType::Full,
        add_ons: AddOns::none(),
    };

    let response = ctx
        .post_json("/api/custom-package/quote", &serde_json::to_value(config).unwrap())
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let quote: Value = response.json().await.unwrap();
    let expected = compute_total(&config);
    assert_eq!(quote["total"], json!(expected.total));
    assert_eq!(quote["money_value"], 120_000);
}

#[tokio::test]
async fn test_quote_api_clamps_pieces() {
    let ctx = TestContext::start().await;
    let response = ctx
        .post_json("/api/custom-package/quote", &json!({ "pieces": 5000 }))
        .await;
    let quote: Value = response.json().await.unwrap();
    assert_eq!(quote["config"]["pieces"], 200);
}

#[tokio::test]
async fn test_calculator_page_shows_computed_total() {
    let ctx = TestContext::start().await;
    let html = ctx
        .get("/custom-package?configured=1&pieces=100&note_value=500&wrappers=3&foam=full&flower=on")
        .await
        .text()
        .await
        .unwrap();

    let config = PricingConfig {
        pieces: 100,
        note_value: NoteValue::Naira500,
        wrappers: 3,
        foam: FoamType::Full,
        add_ons: AddOns::none().with(bloom_haven_core::pricing::AddOn::Flower, true),
    };
    let total = compute_total(&config).total.to_string();
    assert!(html.contains(&total), "missing {total}");
}

#[tokio::test]
async fn test_calculator_steps_through_actions() {
    let ctx = TestContext::start().await;
    let html = ctx
        .get("/custom-package?configured=1&pieces=200&action=pieces_up")
        .await
        .text()
        .await
        .unwrap();
    assert!(html.contains("step=\"10\" value=\"200\""));

    let response = ctx.get("/custom-package?action=launch").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
