//! Submissions and sign-in attempts are throttled per client.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;

use bloom_haven_integration_tests::TestContext;

#[tokio::test]
async fn test_review_flood_is_throttled() {
    let ctx = TestContext::start().await;

    let mut statuses = Vec::new();
    for i in 0..12 {
        let response = ctx.submit_review(&format!("Guest {i}"), "Lovely work").await;
        statuses.push(response.status());
    }

    assert!(statuses[..10].iter().all(|s| *s == StatusCode::CREATED));
    assert_eq!(statuses[11], StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_sign_in_attempts_are_throttled() {
    let ctx = TestContext::start().await;

    let mut last = StatusCode::OK;
    for _ in 0..7 {
        last = ctx.sign_in("guess").await.status();
    }
    assert_eq!(last, StatusCode::TOO_MANY_REQUESTS);

    // Pages are not throttled.
    assert_eq!(ctx.get("/products").await.status(), StatusCode::OK);
}
