use std::path::PathBuf;

const MIB: u64 = 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    /// Public origin used to build download links for stored archives
    pub base_url: String,
    pub local_storage_path: PathBuf,
    /// Memory records go to Postgres when set, otherwise they stay in-process
    pub database_url: Option<String>,
    pub fetch_timeout_secs: u64,
    pub max_remote_file_bytes: u64,
    pub max_body_bytes: u64,
    /// Comma separated list, or `*`
    pub cors_allow_origins: String,
    pub zip_compression_level: i64,
    // Database connection pool settings
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; unparsable numbers fall back to defaults
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        fn parsed<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
            value.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
        }

        // LISTEN_ADDR wins; hosting platforms usually only hand out PORT
        let listen_addr = var("LISTEN_ADDR")
            .filter(|s| !s.trim().is_empty())
            .or_else(|| {
                var("PORT")
                    .filter(|p| !p.trim().is_empty())
                    .map(|p| format!("0.0.0.0:{}", p.trim()))
            })
            .unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let port = listen_addr
            .rsplit(':')
            .next()
            .unwrap_or("3000")
            .to_string();

        Self {
            base_url: var("BASE_URL").unwrap_or_else(|| format!("http://localhost:{}", port)),
            listen_addr,
            local_storage_path: var("LOCAL_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./uploads")),
            database_url: var("DATABASE_URL").filter(|s| !s.trim().is_empty()),
            fetch_timeout_secs: parsed(var("FETCH_TIMEOUT_SECS"), 30),
            max_remote_file_bytes: parsed(var("MAX_REMOTE_FILE_BYTES"), 50 * MIB),
            max_body_bytes: parsed(var("MAX_BODY_BYTES"), 50 * MIB),
            cors_allow_origins: var("CORS_ALLOW_ORIGINS").unwrap_or_else(|| "*".to_string()),
            zip_compression_level: parsed(var("ZIP_COMPRESSION_LEVEL"), 9),
            db_max_connections: parsed(var("DB_MAX_CONNECTIONS"), 10),
            db_min_connections: parsed(var("DB_MIN_CONNECTIONS"), 1),
            db_acquire_timeout_secs: parsed(var("DB_ACQUIRE_TIMEOUT_SECS"), 30),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if let Some(url) = &self.database_url {
            if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
                return Err(
                    "DATABASE_URL must start with postgres:// or postgresql://".to_string()
                );
            }
        }

        if self.listen_addr.is_empty() {
            return Err("LISTEN_ADDR cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("BASE_URL must start with http:// or https://".to_string());
        }

        if self.fetch_timeout_secs == 0 {
            return Err("FETCH_TIMEOUT_SECS must be at least 1 second".to_string());
        }

        if self.max_body_bytes == 0 || self.max_remote_file_bytes == 0 {
            return Err("MAX_BODY_BYTES and MAX_REMOTE_FILE_BYTES must be positive".to_string());
        }

        if !(0..=9).contains(&self.zip_compression_level) {
            return Err("ZIP_COMPRESSION_LEVEL must be between 0 and 9".to_string());
        }

        if self.db_min_connections > self.db_max_connections {
            return Err("DB_MIN_CONNECTIONS cannot exceed DB_MAX_CONNECTIONS".to_string());
        }

        Ok(())
    }

    /// Allowed CORS origins; `None` means any origin
    pub fn cors_origins(&self) -> Option<Vec<String>> {
        let origins: Vec<String> = self
            .cors_allow_origins
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            None
        } else {
            Some(origins)
        }
    }
}
