#![allow(dead_code)]

use axum_test::TestServer;
use chrono::{DateTime, Duration, Utc};
use portal_api::config::{Config, StorageKind};
use portal_api::domain::entities::{
    Api, Application, ApplicationStatus, LifecycleState, ReferenceType, Subscription,
    SubscriptionStatus, Visibility,
};
use portal_api::infrastructure::memory::{Hit, MemoryStore};
use portal_api::routes::portal_router;
use portal_api::server::{Repositories, build_state};
use sqlx::PgPool;

pub const BASE_URL: &str = "http://portal.test";
pub const USER_HEADER: &str = "x-portal-user";

pub fn test_config() -> Config {
    Config {
        storage: StorageKind::Memory,
        database_url: None,
        seed_file: None,
        listen_addr: "127.0.0.1:0".to_string(),
        log_level: "info".to_string(),
        log_format: "text".to_string(),
        public_base_url: Some(BASE_URL.to_string()),
        user_header: USER_HEADER.to_string(),
        default_page_size: 10,
        analytics_window_days: 7,
        db_max_connections: 1,
        db_connect_timeout: 1,
        db_idle_timeout: 1,
        db_max_lifetime: 1,
    }
}

pub fn make_server(store: MemoryStore) -> TestServer {
    let state = build_state(Repositories::from_memory(store), &test_config()).unwrap();
    TestServer::new(portal_router(state)).unwrap()
}

pub fn api(id: &str, name: &str, owner: &str, visibility: Visibility) -> Api {
    let now = Utc::now();
    Api {
        id: id.to_string(),
        name: Some(name.to_string()),
        version: "1.0".to_string(),
        description: None,
        owner_id: owner.to_string(),
        visibility,
        lifecycle_state: LifecycleState::Published,
        created_at: now,
        updated_at: now,
    }
}

pub fn application(id: &str, name: &str, owner: &str) -> Application {
    let now = Utc::now();
    Application {
        id: id.to_string(),
        name: Some(name.to_string()),
        description: None,
        owner_id: owner.to_string(),
        status: ApplicationStatus::Active,
        created_at: now,
        updated_at: now,
    }
}

pub fn subscription(
    api_id: &str,
    application_id: &str,
    reference_type: ReferenceType,
    status: SubscriptionStatus,
) -> Subscription {
    Subscription {
        id: format!("{api_id}:{application_id}"),
        api_id: api_id.to_string(),
        application_id: application_id.to_string(),
        reference_type,
        status,
        created_at: Utc::now(),
    }
}

pub async fn hits(store: &MemoryStore, api_id: &str, application_id: &str, count: u64) {
    store
        .record_hit(Hit {
            api_id: api_id.to_string(),
            application_id: application_id.to_string(),
            at: Utc::now() - Duration::hours(1),
            count,
        })
        .await;
}

/// `count` public APIs named `Catalog 01`, `Catalog 02`, ... owned by carol.
pub async fn catalog(count: usize) -> MemoryStore {
    let store = MemoryStore::new();
    for i in 1..=count {
        store
            .insert_api(api(
                &format!("catalog-{i:02}"),
                &format!("Catalog {i:02}"),
                "carol",
                Visibility::Public,
            ))
            .await;
    }
    store
}

/// A small portal:
///
/// - APIs: `weather` (public, alice), `payments` (private, alice),
///   `maps` (public, bob), `legacy` (unpublished, alice)
/// - Applications: `app-a`, `app-b`, `app-c`, `app-d` (dave), `mobile` and
///   `web` (alice), `old` (alice, archived)
/// - `weather` subscribers: A (10 hits), B (paused, 20), C (30), Mobile (5),
///   D through an API product (1000)
/// - `mobile` subscribes to weather (5), maps (50), payments (0), legacy (999)
pub async fn portal() -> MemoryStore {
    let store = MemoryStore::new();

    store.insert_api(api("weather", "Weather", "alice", Visibility::Public)).await;
    store.insert_api(api("payments", "Payments", "alice", Visibility::Private)).await;
    store.insert_api(api("maps", "Maps", "bob", Visibility::Public)).await;
    let mut legacy = api("legacy", "Legacy", "alice", Visibility::Public);
    legacy.lifecycle_state = LifecycleState::Unpublished;
    store.insert_api(legacy).await;

    for (id, name) in [("app-a", "A"), ("app-b", "B"), ("app-c", "C"), ("app-d", "D")] {
        store.insert_application(application(id, name, "dave")).await;
    }
    store.insert_application(application("mobile", "Mobile", "alice")).await;
    store.insert_application(application("web", "Web", "alice")).await;
    let mut old = application("old", "Old", "alice");
    old.status = ApplicationStatus::Archived;
    store.insert_application(old).await;

    use ReferenceType::{Api as Plain, ApiProduct};
    use SubscriptionStatus::{Accepted, Paused};
    for sub in [
        subscription("weather", "app-a", Plain, Accepted),
        subscription("weather", "app-b", Plain, Paused),
        subscription("weather", "app-c", Plain, Accepted),
        subscription("weather", "mobile", Plain, Accepted),
        subscription("weather", "app-d", ApiProduct, Accepted),
        subscription("maps", "mobile", Plain, Accepted),
        subscription("payments", "mobile", Plain, Accepted),
        subscription("legacy", "mobile", Plain, Accepted),
    ] {
        store.insert_subscription(sub).await;
    }

    hits(&store, "weather", "app-a", 10).await;
    hits(&store, "weather", "app-b", 20).await;
    hits(&store, "weather", "app-c", 30).await;
    hits(&store, "weather", "mobile", 5).await;
    hits(&store, "weather", "app-d", 1000).await;
    hits(&store, "maps", "mobile", 50).await;
    hits(&store, "legacy", "mobile", 999).await;

    // Outside the analytics window.
    store
        .record_hit(Hit {
            api_id: "weather".to_string(),
            application_id: "app-a".to_string(),
            at: Utc::now() - Duration::days(30),
            count: 1_000,
        })
        .await;

    store
}

pub fn ids(json: &serde_json::Value) -> Vec<String> {
    json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect()
}

pub async fn create_test_api(pool: &PgPool, id: &str, name: Option<&str>, lifecycle_state: &str) {
    sqlx::query(
        "INSERT INTO apis (id, name, owner_id, lifecycle_state) VALUES ($1, $2, 'alice', $3)",
    )
    .bind(id)
    .bind(name)
    .bind(lifecycle_state)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn create_test_subscription(
    pool: &PgPool,
    id: &str,
    api_id: &str,
    application_id: &str,
    reference_type: &str,
    status: &str,
) {
    sqlx::query(
        "INSERT INTO subscriptions (id, api_id, application_id, reference_type, status) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(id)
    .bind(api_id)
    .bind(application_id)
    .bind(reference_type)
    .bind(status)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn create_test_hits(
    pool: &PgPool,
    api_id: &str,
    application_id: &str,
    at: DateTime<Utc>,
    count: usize,
) {
    for _ in 0..count {
        sqlx::query("INSERT INTO api_hits (api_id, application_id, hit_at) VALUES ($1, $2, $3)")
            .bind(api_id)
            .bind(application_id)
            .bind(at)
            .execute(pool)
            .await
            .unwrap();
    }
}
