use crate::clients::ClientOptions;
use crate::constants::providers::{ANILIST_API, JIKAN_API, USER_AGENT};
use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub schedule: ScheduleConfig,

    pub providers: ProvidersConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    #[serde(default)]
    pub suppress_connection_errors: bool,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/animehub.db".to_string(),
            log_level: "info".to_string(),
            suppress_connection_errors: false,
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// IANA zone the "today" view is computed in. Unset means the system
    /// local zone.
    pub viewer_timezone: Option<String>,
}

impl ScheduleConfig {
    /// The configured viewer zone, `None` for the system local zone.
    pub fn viewer_tz(&self) -> Result<Option<Tz>> {
        self.viewer_timezone
            .as_deref()
            .map(str::trim)
            .filter(|tz| !tz.is_empty())
            .map(parse_timezone)
            .transpose()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub anilist_url: String,

    pub jikan_url: String,

    pub user_agent: String,

    pub request_timeout_seconds: u64,

    /// Delay before retrying a rate-limited request when the provider sends
    /// no `Retry-After`.
    pub rate_limit_retry_ms: u64,

    /// Query AniList and Jikan concurrently when linking.
    pub parallel_lookup: bool,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            anilist_url: ANILIST_API.to_string(),
            jikan_url: JIKAN_API.to_string(),
            user_agent: USER_AGENT.to_string(),
            request_timeout_seconds: 15,
            rate_limit_retry_ms: 1000,
            parallel_lookup: false,
        }
    }
}

impl ProvidersConfig {
    fn options_for(&self, base_url: &str) -> ClientOptions {
        ClientOptions {
            base_url: base_url.to_string(),
            user_agent: self.user_agent.clone(),
            timeout: Duration::from_secs(self.request_timeout_seconds),
            retry_delay: Duration::from_millis(self.rate_limit_retry_ms),
        }
    }

    #[must_use]
    pub fn anilist_options(&self) -> ClientOptions {
        self.options_for(&self.anilist_url)
    }

    #[must_use]
    pub fn jikan_options(&self) -> ClientOptions {
        self.options_for(&self.jikan_url)
    }
}

/// Parses an IANA timezone name such as `America/New_York`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| anyhow::anyhow!("Unknown timezone: {name}"))
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::default_config_path();
        self.save_to_path(&path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("animehub").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".animehub").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.general.database_path.trim().is_empty() {
            anyhow::bail!("Database path cannot be empty");
        }

        if self.general.min_db_connections > self.general.max_db_connections {
            anyhow::bail!("min_db_connections cannot exceed max_db_connections");
        }

        self.schedule
            .viewer_tz()
            .context("Invalid schedule.viewer_timezone")?;

        for (name, value) in [
            ("anilist_url", &self.providers.anilist_url),
            ("jikan_url", &self.providers.jikan_url),
        ] {
            url::Url::parse(value).with_context(|| format!("Invalid providers.{name}: {value}"))?;
        }

        if self.providers.request_timeout_seconds == 0 {
            anyhow::bail!("Provider request timeout must be > 0");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.database_path, "sqlite:data/animehub.db");
        assert!(config.schedule.viewer_timezone.is_none());
        assert_eq!(config.providers.anilist_url, "https://graphql.anilist.co");
        assert!(!config.providers.parallel_lookup);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[providers]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [schedule]
            viewer_timezone = "America/New_York"

            [providers]
            parallel_lookup = true
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(
            config.schedule.viewer_tz().unwrap(),
            Some(chrono_tz::America::New_York)
        );
        assert!(config.providers.parallel_lookup);

        assert_eq!(config.providers.jikan_url, "https://api.jikan.moe/v4");
    }

    #[test]
    fn test_invalid_timezone_fails_validation() {
        let mut config = Config::default();
        config.schedule.viewer_timezone = Some("Mars/Olympus".to_string());
        assert!(config.validate().is_err());

        config.schedule.viewer_timezone = Some("  ".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_client_options_follow_provider_settings() {
        let mut config = Config::default();
        config.providers.request_timeout_seconds = 3;
        config.providers.rate_limit_retry_ms = 250;

        let options = config.providers.jikan_options();
        assert_eq!(options.base_url, JIKAN_API);
        assert_eq!(options.timeout, Duration::from_secs(3));
        assert_eq!(options.retry_delay, Duration::from_millis(250));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "animehub-config-{}.toml",
            uuid::Uuid::new_v4()
        ));
        let mut config = Config::default();
        config.general.log_level = "warn".to_string();
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.general.log_level, "warn");

        std::fs::remove_file(&path).ok();
    }
}
