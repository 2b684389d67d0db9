mod common;

use chrono::{Duration, DurationRound, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use portal_api::domain::repositories::{AnalyticsRepository, HitsQuery};
use portal_api::infrastructure::persistence::PgAnalyticsRepository;

use common::create_test_hits;

#[sqlx::test]
async fn test_hits_grouped_by_application(pool: PgPool) {
    let repo = PgAnalyticsRepository::new(Arc::new(pool.clone()));
    let to = Utc::now().duration_trunc(Duration::seconds(1)).unwrap();
    let from = to - Duration::days(7);

    create_test_hits(&pool, "weather", "app-a", to - Duration::hours(1), 3).await;
    create_test_hits(&pool, "weather", "app-b", to - Duration::days(2), 5).await;
    create_test_hits(&pool, "maps", "app-a", to - Duration::hours(1), 4).await;

    let hits = repo
        .top_hits(HitsQuery::applications_of_api("weather", from, to))
        .await
        .unwrap();

    assert_eq!(hits.len(), 2);
    assert_eq!(hits.get("app-a"), Some(&3));
    assert_eq!(hits.get("app-b"), Some(&5));
}

#[sqlx::test]
async fn test_hits_grouped_by_api(pool: PgPool) {
    let repo = PgAnalyticsRepository::new(Arc::new(pool.clone()));
    let to = Utc::now().duration_trunc(Duration::seconds(1)).unwrap();
    let from = to - Duration::days(7);

    create_test_hits(&pool, "weather", "app-a", to - Duration::hours(1), 2).await;
    create_test_hits(&pool, "maps", "app-a", to - Duration::hours(3), 6).await;
    create_test_hits(&pool, "maps", "app-b", to - Duration::hours(3), 9).await;

    let hits = repo
        .top_hits(HitsQuery::apis_of_application("app-a", from, to))
        .await
        .unwrap();

    assert_eq!(hits.get("weather"), Some(&2));
    assert_eq!(hits.get("maps"), Some(&6));
}

#[sqlx::test]
async fn test_window_includes_start_and_excludes_end(pool: PgPool) {
    let repo = PgAnalyticsRepository::new(Arc::new(pool.clone()));
    let to = Utc::now().duration_trunc(Duration::seconds(1)).unwrap();
    let from = to - Duration::days(7);

    create_test_hits(&pool, "weather", "on-start", from, 1).await;
    create_test_hits(&pool, "weather", "on-end", to, 1).await;
    create_test_hits(&pool, "weather", "too-old", from - Duration::seconds(1), 1).await;

    let hits = repo
        .top_hits(HitsQuery::applications_of_api("weather", from, to))
        .await
        .unwrap();

    assert_eq!(hits.get("on-start"), Some(&1));
    assert_eq!(hits.get("on-end"), None);
    assert_eq!(hits.get("too-old"), None);
}

#[sqlx::test]
async fn test_empty_window(pool: PgPool) {
    let repo = PgAnalyticsRepository::new(Arc::new(pool.clone()));
    let to = Utc::now();

    let hits = repo
        .top_hits(HitsQuery::applications_of_api("weather", to - Duration::days(7), to))
        .await
        .unwrap();

    assert!(hits.is_empty());
}

#[sqlx::test]
async fn test_ping(pool: PgPool) {
    let repo = PgAnalyticsRepository::new(Arc::new(pool));

    assert!(repo.ping().await.is_ok());
}
