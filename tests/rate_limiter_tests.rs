use clinic_chat_relay::services::rate_limiter::{RateDecision, RateLimiter};
use std::time::Duration;
use tokio::time::advance;

#[tokio::test]
async fn eleventh_request_is_limited() {
    let limiter = RateLimiter::new(Duration::from_secs(60), 10);
    for i in 0..10 {
        assert_eq!(
            limiter.check("client").await,
            RateDecision::Allowed { remaining: 9 - i },
        );
    }
    match limiter.check("client").await {
        RateDecision::Limited { retry_after } => assert!(retry_after <= Duration::from_secs(60)),
        other => panic!("expected limit, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_window_expiration() {
    let limiter = RateLimiter::new(Duration::from_secs(60), 1);
    assert!(matches!(limiter.check("a").await, RateDecision::Allowed { .. }));
    assert!(matches!(limiter.check("a").await, RateDecision::Limited { .. }));

    advance(Duration::from_secs(30)).await;
    match limiter.check("a").await {
        RateDecision::Limited { retry_after } => assert_eq!(retry_after, Duration::from_secs(30)),
        other => panic!("expected limit, got {other:?}"),
    }

    // Wait for the window to lapse
    advance(Duration::from_secs(30)).await;
    assert!(matches!(limiter.check("a").await, RateDecision::Allowed { .. }));
}

#[tokio::test(start_paused = true)]
async fn test_purge_expired() {
    let limiter = RateLimiter::new(Duration::from_secs(60), 5);
    limiter.check("a").await;
    advance(Duration::from_secs(45)).await;
    limiter.check("b").await;
    assert_eq!(limiter.len().await, 2);

    advance(Duration::from_secs(20)).await;
    let removed = limiter.purge_expired().await;
    assert_eq!(removed, 1, "Should have removed the stale window");
    assert_eq!(limiter.len().await, 1);
}

#[tokio::test]
async fn concurrent_checks_never_over_admit() {
    let limiter = RateLimiter::new(Duration::from_secs(60), 10);
    let mut handles = Vec::new();
    for _ in 0..50 {
        let limiter = limiter.clone();
        handles.push(tokio::spawn(async move { limiter.check("shared").await }));
    }

    let mut admitted = 0;
    for handle in handles {
        if let RateDecision::Allowed { .. } = handle.await.unwrap() {
            admitted += 1;
        }
    }
    assert_eq!(admitted, 10);
}
