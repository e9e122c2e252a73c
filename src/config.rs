use log::LevelFilter;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const TOKEN_STORAGE_KEY: &str = "token";
pub const PRIVACY_STATEMENT_PATH: &str = "/content/privacy_statement.json";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("backend url must not be empty")]
    EmptyBackendUrl,
    #[error("backend url must use http:// or https:// and include a host")]
    InvalidBackendUrl,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub backend_url: String,
    pub page_size: u32,
    pub storage_key: String,
    pub log_level: LevelFilter,
}

impl Config {
    /// Build-time settings. The browser has no process environment, so values
    /// are baked in by `option_env!` when the bundle is compiled.
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("TRICKSTER_BACKEND_URL"),
            option_env!("TRICKSTER_PAGE_SIZE"),
            option_env!("TRICKSTER_LOG_LEVEL"),
        )
    }

    pub fn from_values(
        backend_url: Option<&str>,
        page_size: Option<&str>,
        log_level: Option<&str>,
    ) -> Self {
        let backend_url = backend_url
            .and_then(|raw| normalize_base_url(raw).ok())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        let page_size = page_size
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        let log_level = log_level
            .and_then(parse_log_level)
            .unwrap_or(LevelFilter::Info);

        Self {
            backend_url,
            page_size,
            storage_key: TOKEN_STORAGE_KEY.to_string(),
            log_level,
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.backend_url, path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_values(None, None, None)
    }
}

pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyBackendUrl);
    }
    let Some((scheme, host)) = trimmed.split_once("://") else {
        return Err(ConfigError::InvalidBackendUrl);
    };
    if !matches!(scheme, "http" | "https") || host.trim().is_empty() || host.starts_with('/') {
        return Err(ConfigError::InvalidBackendUrl);
    }
    Ok(trimmed.to_string())
}

pub fn parse_log_level(raw: &str) -> Option<LevelFilter> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" | "warning" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.backend_url, "http://localhost:5000");
        assert_eq!(config.page_size, 20);
        assert_eq!(config.storage_key, "token");
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_base_url_normalization() {
        assert_eq!(
            normalize_base_url("  https://demo.example/ ").unwrap(),
            "https://demo.example"
        );
        assert_eq!(normalize_base_url(""), Err(ConfigError::EmptyBackendUrl));
        assert_eq!(
            normalize_base_url("ftp://demo.example"),
            Err(ConfigError::InvalidBackendUrl)
        );
        assert_eq!(
            normalize_base_url("http://"),
            Err(ConfigError::InvalidBackendUrl)
        );
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = Config::from_values(Some("not a url"), Some("0"), Some("loud"));
        assert_eq!(config.backend_url, DEFAULT_BACKEND_URL);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_values(Some("http://10.0.0.5:8000/"), Some("50"), Some("DEBUG"));
        assert_eq!(config.endpoint("/messages"), "http://10.0.0.5:8000/messages");
        assert_eq!(config.page_size, 50);
        assert_eq!(config.log_level, LevelFilter::Debug);
    }
}
