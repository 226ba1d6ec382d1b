use secrecy::SecretString;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub store: StoreConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            store: StoreConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Which history backend the service persists submissions to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    GitHub,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "github" => Ok(Self::GitHub),
            "memory" | "in-memory" => Ok(Self::Memory),
            other => Err(ConfigError::InvalidStoreBackend {
                value: other.to_string(),
            }),
        }
    }
}

/// `owner/name` pair identifying the repository that hosts the history files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySlug {
    pub owner: String,
    pub name: String,
}

impl FromStr for RepositorySlug {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidRepository {
            value: value.to_string(),
        };
        let (owner, name) = value.trim().split_once('/').ok_or_else(invalid)?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for RepositorySlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Remote history store settings. The access token is optional at load time; remote
/// operations fail with a credential error when it is absent.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub api_url: String,
    pub repository: Option<RepositorySlug>,
    pub data_dir: String,
    pub branch: Option<String>,
    pub token: Option<SecretString>,
}

impl StoreConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let backend = match non_empty_var("ENERGYSCAN_STORE") {
            Some(value) => value.parse()?,
            None => StoreBackend::GitHub,
        };

        let repository = non_empty_var("GITHUB_REPOSITORY")
            .map(|value| value.parse::<RepositorySlug>())
            .transpose()?;

        Ok(Self {
            backend,
            api_url: non_empty_var("GITHUB_API_URL")
                .unwrap_or_else(|| "https://api.github.com".to_string()),
            repository,
            data_dir: non_empty_var("GITHUB_DATA_DIR").unwrap_or_else(|| "data".to_string()),
            branch: non_empty_var("GITHUB_BRANCH"),
            token: non_empty_var("GITHUB_PAT").map(SecretString::new),
        })
    }

    pub fn require_repository(&self) -> Result<&RepositorySlug, ConfigError> {
        self.repository
            .as_ref()
            .ok_or(ConfigError::MissingRepository)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidStoreBackend { value: String },
    InvalidRepository { value: String },
    MissingRepository,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidStoreBackend { value } => {
                write!(f, "ENERGYSCAN_STORE must be 'github' or 'memory', got '{value}'")
            }
            ConfigError::InvalidRepository { value } => {
                write!(f, "GITHUB_REPOSITORY must look like 'owner/repo', got '{value}'")
            }
            ConfigError::MissingRepository => {
                write!(f, "GITHUB_REPOSITORY is required for the github history store")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidStoreBackend { .. }
            | ConfigError::InvalidRepository { .. }
            | ConfigError::MissingRepository => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "ENERGYSCAN_STORE",
            "GITHUB_API_URL",
            "GITHUB_REPOSITORY",
            "GITHUB_DATA_DIR",
            "GITHUB_BRANCH",
            "GITHUB_PAT",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.store.backend, StoreBackend::GitHub);
        assert_eq!(config.store.api_url, "https://api.github.com");
        assert_eq!(config.store.data_dir, "data");
        assert!(config.store.repository.is_none());
        assert!(config.store.token.is_none());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn rejects_invalid_port() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PORT", "not-a-port");
        let result = AppConfig::load();
        assert!(matches!(result, Err(ConfigError::InvalidPort)));
        reset_env();
    }

    #[test]
    fn reads_store_settings_and_secret() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ENERGYSCAN_STORE", "memory");
        env::set_var("GITHUB_REPOSITORY", "energy-lab/energyscan");
        env::set_var("GITHUB_BRANCH", "main");
        env::set_var("GITHUB_PAT", "ghp_example");

        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.store.backend, StoreBackend::Memory);
        let repository = config.store.require_repository().expect("repository set");
        assert_eq!(repository.owner, "energy-lab");
        assert_eq!(repository.name, "energyscan");
        assert_eq!(config.store.branch.as_deref(), Some("main"));
        let token = config.store.token.as_ref().expect("token set");
        assert_eq!(token.expose_secret(), "ghp_example");
        assert!(!format!("{:?}", config.store).contains("ghp_example"));
        reset_env();
    }

    #[test]
    fn rejects_malformed_repository_slug() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("GITHUB_REPOSITORY", "missing-owner");
        let result = AppConfig::load();
        assert!(matches!(result, Err(ConfigError::InvalidRepository { .. })));
        reset_env();
    }

    #[test]
    fn missing_repository_is_reported() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads");
        assert!(matches!(
            config.store.require_repository(),
            Err(ConfigError::MissingRepository)
        ));
    }
}
