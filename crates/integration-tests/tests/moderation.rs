//! Review submission, moderation and publication over HTTP.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use serde_json::Value;

use bloom_haven_integration_tests::{MODERATOR_PASSWORD, TestContext, location};

async fn published(ctx: &TestContext) -> Vec<Value> {
    let response = ctx.get("/api/reviews").await;
    assert_eq!(response.status(), StatusCode::OK);
    response.json().await.unwrap()
}

#[tokio::test]
async fn test_review_is_published_only_after_approval() {
    let ctx = TestContext::start().await;

    let response = ctx.submit_review("Ada", "The bouquet was stunning!").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert!(published(&ctx).await.is_empty());

    let response = ctx.sign_in(MODERATOR_PASSWORD).await;
    assert_eq!(location(&response), "/admin");

    let dashboard = ctx.get("/admin").await;
    assert_eq!(dashboard.status(), StatusCode::OK);
    let html = dashboard.text().await.unwrap();
    assert!(html.contains("Ada"));
    assert!(html.contains("The bouquet was stunning!"));

    let response = ctx
        .post_form("/admin/reviews/1/approve?filter=pending", &[])
        .await;
    assert_eq!(
        location(&response),
        "/admin?filter=pending&notice=approved"
    );

    let reviews = published(&ctx).await;
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["name"], "Ada");
    assert_eq!(reviews[0]["rating"], 5);
    assert_eq!(reviews[0]["approved"], true);

    let home = ctx.get("/").await.text().await.unwrap();
    assert!(home.contains("The bouquet was stunning!"));
}

#[tokio::test]
async fn test_rejected_review_is_deleted() {
    let ctx = TestContext::start().await;
    ctx.submit_review("Bola", "Spam spam spam").await;
    ctx.sign_in(MODERATOR_PASSWORD).await;

    let confirm = ctx.get("/admin/reviews/1/delete?filter=all").await;
    assert_eq!(confirm.status(), StatusCode::OK);
    assert!(confirm.text().await.unwrap().contains("Delete this review?"));

    let response = ctx
        .post_form("/admin/reviews/1/delete?filter=all", &[])
        .await;
    assert_eq!(location(&response), "/admin?filter=all&notice=deleted");

    let html = ctx.get("/admin?filter=all").await.text().await.unwrap();
    assert!(!html.contains("Spam spam spam"));

    let response = ctx
        .post_form("/admin/reviews/1/delete?filter=all", &[])
        .await;
    assert_eq!(location(&response), "/admin?filter=all&error=not_found");
}

#[tokio::test]
async fn test_invalid_reviews_are_rejected_before_storage() {
    let ctx = TestContext::start().await;

    let response = ctx
        .post_json(
            "/reviews",
            &serde_json::json!({
                "name": "Ada",
                "event_type": "Birthday",
                "rating": 9,
                "review": "Great",
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = ctx.submit_review("   ", "No name given").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(ctx.store.calls(), 0);
}

#[tokio::test]
async fn test_moderation_requires_sign_in() {
    let ctx = TestContext::start().await;
    ctx.submit_review("Ada", "Lovely").await;
    let calls = ctx.store.calls();

    assert_eq!(location(&ctx.get("/admin").await), "/admin/login");
    let response = ctx.post_form("/admin/reviews/1/approve", &[]).await;
    assert_eq!(location(&response), "/admin/login");
    let response = ctx.post_form("/admin/reviews/1/delete", &[]).await;
    assert_eq!(location(&response), "/admin/login");
    assert_eq!(ctx.store.calls(), calls);

    let response = ctx.sign_in("wrong password").await;
    assert_eq!(location(&response), "/admin/login?error=credentials");
    assert_eq!(location(&ctx.get("/admin").await), "/admin/login");
}

#[tokio::test]
async fn test_sign_out_ends_the_session() {
    let ctx = TestContext::start().await;
    ctx.sign_in(MODERATOR_PASSWORD).await;
    assert_eq!(ctx.get("/admin").await.status(), StatusCode::OK);

    let response = ctx.post_form("/admin/logout", &[]).await;
    assert_eq!(location(&response), "/admin/login?notice=signed_out");
    assert_eq!(location(&ctx.get("/admin").await), "/admin/login");
}

#[tokio::test]
async fn test_dashboard_counts_and_filters() {
    let ctx = TestContext::start().await;
    ctx.submit_review("Ada", "First").await;
    ctx.submit_review("Bola", "Second").await;
    ctx.sign_in(MODERATOR_PASSWORD).await;
    ctx.post_form("/admin/reviews/1/approve", &[]).await;

    let pending = ctx.get("/admin?filter=pending").await.text().await.unwrap();
    assert!(pending.contains("Bola"));
    assert!(!pending.contains("First"));

    let approved = ctx.get("/admin?filter=approved").await.text().await.unwrap();
    assert!(approved.contains("First"));
    assert!(!approved.contains("Second"));
}
