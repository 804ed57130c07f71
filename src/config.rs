use anyhow::{anyhow, Context};
use reqwest::ClientBuilder;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DbConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpClientConfig {
    pub proxy: Option<String>,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            proxy: None,
            user_agent: "KeYanPlagiarismCheck/0.1".to_string(),
        }
    }
}

impl HttpClientConfig {
    pub fn apply(&self, builder: ClientBuilder) -> anyhow::Result<ClientBuilder> {
        let builder = builder.user_agent(self.user_agent.clone());
        match self.proxy.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            Some(proxy) => {
                let proxy = reqwest::Proxy::all(proxy)
                    .with_context(|| format!("invalid proxy url {proxy:?}"))?;
                Ok(builder.proxy(proxy))
            }
            None => Ok(builder),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlagiarismConfig {
    pub url_fetch_timeout_secs: u64,
    pub url_fetch_max_bytes: usize,
}

impl Default for PlagiarismConfig {
    fn default() -> Self {
        Self {
            url_fetch_timeout_secs: 10,
            url_fetch_max_bytes: 5 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    #[default]
    Never,
    Hourly,
    Daily,
}

impl std::str::FromStr for LogRotation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "never" => Ok(LogRotation::Never),
            "hourly" => Ok(LogRotation::Hourly),
            "daily" => Ok(LogRotation::Daily),
            other => Err(anyhow!("unknown log rotation {other:?}")),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: String,
    pub level: Option<String>,
    pub rotation: LogRotation,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: "logs/keyan.log".to_string(),
            level: Some("info".to_string()),
            rotation: LogRotation::Never,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub db: DbConfig,
    pub http_client: HttpClientConfig,
    pub plagiarism: PlagiarismConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let explicit_path = std::env::var("CONFIG_FILE").ok();
        let config = if let Some(path) = explicit_path {
            let path = PathBuf::from(path);
            if !path.exists() {
                return Err(anyhow!("config file {:?} not found", path));
            }
            Self::load_from_file(&path)?
        } else {
            match locate_default_config() {
                Some(path) => Self::load_from_file(&path)?,
                None => AppConfig::default(),
            }
        };

        Self::apply_env_overrides(config)
    }

    fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {:?}", path))?;
        Self::from_yaml(&contents).with_context(|| format!("failed to parse config file {:?}", path))
    }

    pub fn from_yaml(contents: &str) -> anyhow::Result<Self> {
        let config: AppConfig = serde_yaml::from_str(contents)?;
        Ok(config)
    }

    fn apply_env_overrides(mut config: AppConfig) -> anyhow::Result<AppConfig> {
        if let Ok(bind) = std::env::var("SERVER_BIND") {
            config.server.bind = bind;
        }

        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.db.url = url;
        }

        if let Some(max_conn) = parse_optional_env("DB_MAX_CONNECTIONS")? {
            config.db.max_connections = max_conn;
        }

        if let Ok(proxy) = std::env::var("HTTP_PROXY_URL") {
            config.http_client.proxy = Some(proxy);
        }

        if let Ok(user_agent) = std::env::var("HTTP_USER_AGENT") {
            config.http_client.user_agent = user_agent;
        }

        if let Some(timeout) = parse_optional_env("URL_FETCH_TIMEOUT_SECS")? {
            config.plagiarism.url_fetch_timeout_secs = timeout;
        }

        if let Some(max_bytes) = parse_optional_env("URL_FETCH_MAX_BYTES")? {
            config.plagiarism.url_fetch_max_bytes = max_bytes;
        }

        if let Ok(log_file) = std::env::var("LOG_FILE_PATH") {
            config.logging.file = log_file;
        }

        if let Ok(log_level) = std::env::var("LOG_LEVEL") {
            config.logging.level = Some(log_level);
        }

        if let Ok(rotation) = std::env::var("LOG_ROTATION") {
            config.logging.rotation = rotation.parse().context("LOG_ROTATION is invalid")?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.db.url.trim().is_empty() {
            return Err(anyhow!(
                "database url missing; set DATABASE_URL env var or db.url in config file"
            ));
        }
        Ok(())
    }
}

fn parse_optional_env<T>(key: &str) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(v) => Ok(Some(
            v.parse::<T>()
                .with_context(|| format!("{key} must be a valid value"))?,
        )),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn locate_default_config() -> Option<PathBuf> {
    let candidates = [
        PathBuf::from("config/config.yaml"),
        PathBuf::from("../config/config.yaml"),
    ];

    candidates.into_iter().find(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_uses_defaults() {
        let config = AppConfig::from_yaml("{}").unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:8080");
        assert_eq!(config.db.max_connections, 5);
        assert_eq!(config.plagiarism.url_fetch_timeout_secs, 10);
        assert_eq!(config.logging.rotation, LogRotation::Never);
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_yaml_overrides_sections() {
        let config = AppConfig::from_yaml(
            r#"
server:
  bind: "0.0.0.0:9000"
db:
  url: "postgres://localhost/keyan"
plagiarism:
  url_fetch_timeout_secs: 3
logging:
  rotation: daily
"#,
        )
        .unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:9000");
        assert_eq!(config.db.max_connections, 5);
        assert_eq!(config.plagiarism.url_fetch_timeout_secs, 3);
        assert_eq!(config.plagiarism.url_fetch_max_bytes, 5 * 1024 * 1024);
        assert_eq!(config.logging.rotation, LogRotation::Daily);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn log_rotation_parses_case_insensitively() {
        assert_eq!("Hourly".parse::<LogRotation>().unwrap(), LogRotation::Hourly);
        assert!("weekly".parse::<LogRotation>().is_err());
    }

    #[test]
    fn blank_proxy_is_ignored() {
        let config = HttpClientConfig {
            proxy: Some("  ".to_string()),
            ..HttpClientConfig::default()
        };
        assert!(config.apply(reqwest::Client::builder()).is_ok());
    }
}
