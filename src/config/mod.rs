use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub paging: PagingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
    pub enable_request_logging: bool,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Full connection URL; wins over the individual parts when set
    #[serde(default)]
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub db_name: String,
    pub user: String,
    #[serde(default)]
    pub password: String,
    pub max_pool_size: u32,
    pub connection_timeout: u64,
    pub slow_query_threshold_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub base_url: String,
    pub authenticate_path: String,
    /// Identity of this service towards the authority
    pub service_user_id: i64,
    #[serde(default)]
    pub service_token: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagingConfig {
    pub max_page_size: i64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::preset(Self::environment_from_env()).with_env_overrides()
    }

    /// Load a YAML config file, then apply environment overrides on top
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;
        let config: AppConfig = serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })?;
        Ok(config.with_env_overrides())
    }

    fn environment_from_env() -> Environment {
        match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        }
    }

    pub fn preset(environment: Environment) -> Self {
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
    }

    fn with_env_overrides(mut self) -> Self {
        // HTTP overrides
        if let Ok(v) = env::var("SETTING_SERVICE_HOST") {
            self.http.host = v;
        }
        if let Ok(v) = env::var("SETTING_SERVICE_PORT").or_else(|_| env::var("PORT")) {
            self.http.port = v.parse().unwrap_or(self.http.port);
        }
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.http.enable_request_logging = v.parse().unwrap_or(self.http.enable_request_logging);
        }
        if let Ok(v) = env::var("API_MAX_REQUEST_SIZE_BYTES") {
            self.http.max_request_size_bytes = v.parse().unwrap_or(self.http.max_request_size_bytes);
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = Some(v);
        }
        if let Ok(v) = env::var("DATABASE_HOST") {
            self.database.host = v;
        }
        if let Ok(v) = env::var("DATABASE_PORT") {
            self.database.port = v.parse().unwrap_or(self.database.port);
        }
        if let Ok(v) = env::var("DATABASE_NAME") {
            self.database.db_name = v;
        }
        if let Ok(v) = env::var("DATABASE_USER") {
            self.database.user = v;
        }
        if let Ok(v) = env::var("DATABASE_PASSWORD") {
            self.database.password = v;
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_pool_size = v.parse().unwrap_or(self.database.max_pool_size);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }
        if let Ok(v) = env::var("DATABASE_SLOW_QUERY_THRESHOLD_MS") {
            self.database.slow_query_threshold_ms = v.parse().unwrap_or(self.database.slow_query_threshold_ms);
        }

        // Auth overrides
        if let Ok(v) = env::var("AUTH_SERVICE_URL") {
            self.auth.base_url = v;
        }
        if let Ok(v) = env::var("AUTH_SERVICE_PATH") {
            self.auth.authenticate_path = v;
        }
        if let Ok(v) = env::var("SETTING_SERVICE_USER_ID") {
            self.auth.service_user_id = v.parse().unwrap_or(self.auth.service_user_id);
        }
        if let Ok(v) = env::var("SETTING_SERVICE_TOKEN") {
            self.auth.service_token = v;
        }
        if let Ok(v) = env::var("AUTH_SERVICE_TIMEOUT_SECS") {
            self.auth.timeout_secs = v.parse().unwrap_or(self.auth.timeout_secs);
        }

        // Paging overrides
        if let Ok(v) = env::var("PAGING_MAX_PAGE_SIZE") {
            self.paging.max_page_size = v.parse().unwrap_or(self.paging.max_page_size);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            http: HttpConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                enable_request_logging: true,
                max_request_size_bytes: 1024 * 1024, // 1MB
            },
            database: DatabaseConfig {
                url: None,
                host: "localhost".to_string(),
                port: 5432,
                db_name: "setting".to_string(),
                user: "postgres".to_string(),
                password: String::new(),
                max_pool_size: 10,
                connection_timeout: 30,
                slow_query_threshold_ms: 100,
            },
            auth: AuthConfig {
                base_url: "http://localhost:8081".to_string(),
                authenticate_path: "/auth/authenticate".to_string(),
                service_user_id: 2,
                service_token: String::new(),
                timeout_secs: 10,
            },
            paging: PagingConfig { max_page_size: 1000 },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            http: HttpConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                enable_request_logging: true,
                max_request_size_bytes: 512 * 1024,
            },
            database: DatabaseConfig {
                url: None,
                host: "localhost".to_string(),
                port: 5432,
                db_name: "setting".to_string(),
                user: "setting".to_string(),
                password: String::new(),
                max_pool_size: 20,
                connection_timeout: 10,
                slow_query_threshold_ms: 500,
            },
            auth: AuthConfig {
                base_url: "http://auth-service:8080".to_string(),
                authenticate_path: "/auth/authenticate".to_string(),
                service_user_id: 2,
                service_token: String::new(),
                timeout_secs: 5,
            },
            paging: PagingConfig { max_page_size: 500 },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            http: HttpConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                enable_request_logging: false,
                max_request_size_bytes: 256 * 1024,
            },
            database: DatabaseConfig {
                url: None,
                host: "localhost".to_string(),
                port: 5432,
                db_name: "setting".to_string(),
                user: "setting".to_string(),
                password: String::new(),
                max_pool_size: 50,
                connection_timeout: 5,
                slow_query_threshold_ms: 1000,
            },
            auth: AuthConfig {
                base_url: "http://auth-service:8080".to_string(),
                authenticate_path: "/auth/authenticate".to_string(),
                service_user_id: 2,
                service_token: String::new(),
                timeout_secs: 5,
            },
            paging: PagingConfig { max_page_size: 100 },
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::development()
    }
}
