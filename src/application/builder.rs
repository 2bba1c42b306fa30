use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::api::handlers::HealthState;
use crate::api::router::AppState;
use crate::application::{
    ports::{BundleStore, MemoryRepository, RemoteFetcher},
    use_cases::{
        CreateBundleUseCase, DownloadArchiveUseCase, QueryMemoryUseCase, UploadBundleUseCase,
        UpsertMemoryUseCase,
    },
};
use crate::config::Config;
use crate::infrastructure::{
    http::HttpRemoteFetcher,
    persistence::{InMemoryMemoryRepository, PostgresMemoryRepository},
    storage::LocalBundleStore,
};

pub type BuildError = Box<dyn std::error::Error + Send + Sync>;

/// Application builder for clean dependency injection and setup.
///
/// Adapters set explicitly (tests do this) are kept; anything still missing is
/// created from the configuration by `with_infrastructure`.
pub struct ApplicationBuilder {
    config: Config,
    pool: Option<sqlx::PgPool>,
    bundle_store: Option<Arc<dyn BundleStore>>,
    remote_fetcher: Option<Arc<dyn RemoteFetcher>>,
    memory_repo: Option<Arc<dyn MemoryRepository>>,
    memory_backend: &'static str,
}

impl ApplicationBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            pool: None,
            bundle_store: None,
            remote_fetcher: None,
            memory_repo: None,
            memory_backend: "in-memory",
        }
    }

    /// Connect to Postgres with retry and run migrations; a no-op without DATABASE_URL
    pub async fn with_database(mut self) -> Result<Self, BuildError> {
        let Some(database_url) = self.config.database_url.clone() else {
            info!("DATABASE_URL not set, memory records stay in-process");
            return Ok(self);
        };
        info!("Connecting to database");

        // Retry connection with exponential backoff
        let mut retries = 3;
        let mut delay = Duration::from_secs(1);
        let pool = loop {
            match PgPoolOptions::new()
                .max_connections(self.config.db_max_connections)
                .min_connections(self.config.db_min_connections)
                .acquire_timeout(Duration::from_secs(self.config.db_acquire_timeout_secs))
                .connect(&database_url)
                .await
            {
                Ok(pool) => break pool,
                Err(e) if retries > 0 => {
                    retries -= 1;
                    tracing::warn!(
                        "Database connection failed, retrying in {:?} ({} retries left): {}",
                        delay,
                        retries,
                        e
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(e) => {
                    tracing::error!("Failed to connect to database after retries: {}", e);
                    return Err(Box::new(e));
                }
            }
        };

        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to run migrations: {}", e);
                e
            })?;

        self.pool = Some(pool);
        Ok(self)
    }

    pub fn with_bundle_store(mut self, store: Arc<dyn BundleStore>) -> Self {
        self.bundle_store = Some(store);
        self
    }

    pub fn with_remote_fetcher(mut self, fetcher: Arc<dyn RemoteFetcher>) -> Self {
        self.remote_fetcher = Some(fetcher);
        self
    }

    pub fn with_memory_repository(mut self, repo: Arc<dyn MemoryRepository>) -> Self {
        self.memory_repo = Some(repo);
        self
    }

    /// Initialize infrastructure layer (storage, remote fetcher, memory store)
    pub async fn with_infrastructure(mut self) -> Result<Self, BuildError> {
        if self.bundle_store.is_none() {
            let store = Arc::new(LocalBundleStore::new(
                self.config.local_storage_path.clone(),
                self.config.base_url.clone(),
            ));
            store.init().await?;
            self.bundle_store = Some(store);
        }

        if self.remote_fetcher.is_none() {
            let fetcher = HttpRemoteFetcher::new(
                Duration::from_secs(self.config.fetch_timeout_secs),
                self.config.max_remote_file_bytes,
            )?;
            self.remote_fetcher = Some(Arc::new(fetcher));
        }

        if self.memory_repo.is_none() {
            let repo: Arc<dyn MemoryRepository> = match &self.pool {
                Some(pool) => {
                    self.memory_backend = "postgres";
                    Arc::new(PostgresMemoryRepository::new(pool.clone()))
                }
                None => Arc::new(InMemoryMemoryRepository::new()),
            };
            self.memory_repo = Some(repo);
        }

        info!(memory_backend = self.memory_backend, "Infrastructure layer initialized");
        Ok(self)
    }

    /// Build application state with all use cases
    pub fn build(self) -> Result<AppState, BuildError> {
        let bundle_store = self.bundle_store.ok_or("Bundle store not initialized")?;
        let remote_fetcher = self.remote_fetcher.ok_or("Remote fetcher not initialized")?;
        let memory_repo = self.memory_repo.ok_or("Memory repository not initialized")?;

        let create_bundle = Arc::new(CreateBundleUseCase::with_compression_level(
            remote_fetcher,
            self.config.zip_compression_level,
        ));
        let upload_bundle = Arc::new(UploadBundleUseCase::new(
            Arc::clone(&create_bundle),
            Arc::clone(&bundle_store),
        ));
        let download_archive = Arc::new(DownloadArchiveUseCase::new(Arc::clone(&bundle_store)));
        let upsert_memory = Arc::new(UpsertMemoryUseCase::new(Arc::clone(&memory_repo)));
        let query_memory = Arc::new(QueryMemoryUseCase::new(Arc::clone(&memory_repo)));

        info!("Application layer initialized");

        Ok(AppState {
            create_bundle,
            upload_bundle,
            download_archive,
            upsert_memory,
            query_memory,
            health: Arc::new(HealthState::new(
                bundle_store,
                memory_repo,
                self.memory_backend,
            )),
            config: self.config,
        })
    }

    /// Get configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
