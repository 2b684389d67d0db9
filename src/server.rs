//! HTTP server initialization and runtime setup.
//!
//! Handles storage setup, service wiring, and Axum server lifecycle.

use crate::application::services::{ApiService, ApplicationService, SubscriberService};
use crate::config::{Config, StorageKind};
use crate::domain::repositories::{
    AnalyticsRepository, ApiRepository, ApplicationRepository, SubscriptionRepository,
};
use crate::infrastructure::memory::MemoryStore;
use crate::infrastructure::persistence::{
    PgAnalyticsRepository, PgApiRepository, PgApplicationRepository, PgSubscriptionRepository,
};
use crate::routes::app_router;
use crate::state::{AppState, PortalSettings};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use axum::http::HeaderName;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Repository handles backing the services, whatever the storage.
pub struct Repositories {
    pub apis: Arc<dyn ApiRepository>,
    pub applications: Arc<dyn ApplicationRepository>,
    pub subscriptions: Arc<dyn SubscriptionRepository>,
    pub analytics: Arc<dyn AnalyticsRepository>,
}

impl Repositories {
    /// All four repositories served by one in-memory store.
    pub fn from_memory(store: MemoryStore) -> Self {
        let store = Arc::new(store);
        Self {
            apis: store.clone(),
            applications: store.clone(),
            subscriptions: store.clone(),
            analytics: store,
        }
    }
}

/// Wires services and request settings into the shared handler state.
///
/// # Errors
///
/// Returns an error if the configured user header is not a valid header name.
pub fn build_state(repositories: Repositories, config: &Config) -> Result<AppState> {
    let user_header = HeaderName::try_from(config.user_header.as_str())
        .with_context(|| format!("Invalid USER_HEADER '{}'", config.user_header))?;

    let subscriber_service = SubscriberService::new(
        repositories.apis.clone(),
        repositories.applications.clone(),
        repositories.subscriptions,
        repositories.analytics,
        chrono::Duration::days(config.analytics_window_days),
    );

    Ok(AppState {
        api_service: Arc::new(ApiService::new(repositories.apis)),
        application_service: Arc::new(ApplicationService::new(repositories.applications)),
        subscriber_service: Arc::new(subscriber_service),
        settings: Arc::new(PortalSettings {
            user_header,
            public_base_url: config.public_base_url.clone(),
            default_page_size: config.default_page_size,
        }),
    })
}

/// Opens the configured storage backend.
///
/// For PostgreSQL, connects the pool and applies embedded migrations.
async fn open_storage(config: &Config) -> Result<Repositories> {
    match config.storage {
        StorageKind::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for PostgreSQL storage")?;

            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
                .idle_timeout(Duration::from_secs(config.db_idle_timeout))
                .max_lifetime(Duration::from_secs(config.db_max_lifetime))
                .connect(database_url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to migrate")?;

            let pool = Arc::new(pool);
            Ok(Repositories {
                apis: Arc::new(PgApiRepository::new(pool.clone())),
                applications: Arc::new(PgApplicationRepository::new(pool.clone())),
                subscriptions: Arc::new(PgSubscriptionRepository::new(pool.clone())),
                analytics: Arc::new(PgAnalyticsRepository::new(pool)),
            })
        }
        StorageKind::Memory => {
            let store = match &config.seed_file {
                Some(path) => MemoryStore::from_seed_file(path).await?,
                None => MemoryStore::new(),
            };
            tracing::info!("Using in-memory storage");
            Ok(Repositories::from_memory(store))
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Storage backend (PostgreSQL pool + migrations, or in-memory store)
/// - Services and shared state
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - Storage initialization fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repositories = open_storage(&config).await?;
    let state = build_state(repositories, &config)?;

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
