//! Configuration loading.
//!
//! Settings come from a YAML file, then from a `.env` file, then from the
//! process environment; later sources win.

use crate::error::{CfError, ConfigError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::types::OpsConfig;

/// Cloud controller URL override.
pub const ENV_API_URL: &str = "CF_OPS_API_URL";
/// UAA URL override.
pub const ENV_UAA_URL: &str = "CF_OPS_UAA_URL";
/// Log cache URL override.
pub const ENV_LOG_CACHE_URL: &str = "CF_OPS_LOG_CACHE_URL";
/// Target space override.
pub const ENV_SPACE_ID: &str = "CF_OPS_SPACE_ID";
/// Bearer token for the platform APIs.
pub const ENV_ACCESS_TOKEN: &str = "CF_ACCESS_TOKEN";

/// Configuration parser.
#[derive(Debug, Default)]
pub struct ConfigParser {
    /// Directory holding the `.env` file.
    base_path: Option<PathBuf>,
}

impl ConfigParser {
    /// Creates a new configuration parser.
    #[must_use]
    pub const fn new() -> Self {
        Self { base_path: None }
    }

    /// Sets the directory the `.env` file is read from.
    #[must_use]
    pub fn with_base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<OpsConfig> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ParseError {
            message: format!("Failed to read file: {e}"),
            location: Some(path.display().to_string()),
        })?;

        self.parse_yaml(&content, Some(path))
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn parse_yaml(&self, content: &str, source: Option<&Path>) -> Result<OpsConfig> {
        debug!("Parsing YAML configuration");

        // An empty file is an empty mapping.
        if content.trim().is_empty() {
            return Ok(OpsConfig::default());
        }

        serde_yaml::from_str(content).map_err(|e| {
            CfError::Config(ConfigError::ParseError {
                message: format!("YAML parse error: {e}"),
                location: source.map(|p| p.display().to_string()),
            })
        })
    }

    /// Loads configuration from the given file, or from the first file
    /// found by [`find_config_file`], or from the environment alone, then
    /// applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly given file is missing or any file
    /// cannot be parsed.
    pub fn load(&self, path: Option<&Path>) -> Result<OpsConfig> {
        self.load_dotenv()?;

        let mut config = match path {
            Some(path) => self.load_file(path)?,
            None => {
                let start = self
                    .base_path
                    .clone()
                    .map_or_else(std::env::current_dir, Ok)?;
                match find_config_file(&start) {
                    Ok(found) => self.load_file(found)?,
                    Err(_) => {
                        debug!("No configuration file found, using environment only");
                        OpsConfig::default()
                    }
                }
            }
        };

        apply_env_overrides(&mut config, |key| std::env::var(key).ok());
        Ok(config)
    }

    /// Loads the .env file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the .env file exists but cannot be loaded.
    pub fn load_dotenv(&self) -> Result<()> {
        let env_path = self
            .base_path
            .as_ref()
            .map_or_else(|| PathBuf::from(".env"), |p| p.join(".env"));

        if env_path.exists() {
            info!("Loading environment from: {}", env_path.display());
            dotenvy::from_path(&env_path).map_err(|e| ConfigError::ParseError {
                message: format!("Failed to load .env file: {e}"),
                location: Some(env_path.display().to_string()),
            })?;
        } else {
            debug!(".env file not found at: {}", env_path.display());
        }

        Ok(())
    }

    /// Gets the platform access token from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not set.
    pub fn access_token() -> Result<String> {
        std::env::var(ENV_ACCESS_TOKEN)
            .ok()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                ConfigError::MissingEnvVar {
                    name: String::from(ENV_ACCESS_TOKEN),
                }
                .into()
            })
    }
}

/// Applies environment overrides read through `lookup`.
pub fn apply_env_overrides<F>(config: &mut OpsConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_API_URL) {
        debug!("Overriding api.url from environment");
        config.api.url = url;
    }

    if let Some(url) = lookup(ENV_UAA_URL) {
        debug!("Overriding api.uaa_url from environment");
        config.api.uaa_url = Some(url);
    }

    if let Some(url) = lookup(ENV_LOG_CACHE_URL) {
        debug!("Overriding api.log_cache_url from environment");
        config.api.log_cache_url = Some(url);
    }

    if let Some(space_id) = lookup(ENV_SPACE_ID) {
        debug!("Overriding target.space_id from environment");
        config.target.space_id = Some(space_id);
    }
}

/// Configuration file names searched in each directory.
pub const DEFAULT_CONFIG_FILES: &[&str] = &["cf-ops.yaml", "cf-ops.yml", ".cf-ops.yaml"];

/// Finds the configuration file in the given directory or its parents,
/// falling back to `~/.cf-ops/config.yaml`.
///
/// # Errors
///
/// Returns an error if no configuration file is found.
pub fn find_config_file(start_dir: impl AsRef<Path>) -> Result<PathBuf> {
    let start = start_dir.as_ref();
    let mut current = start.to_path_buf();

    loop {
        for filename in DEFAULT_CONFIG_FILES {
            let config_path = current.join(filename);
            if config_path.exists() {
                info!("Found configuration file: {}", config_path.display());
                return Ok(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    if let Some(home) = user_config_file().filter(|path| path.exists()) {
        info!("Found configuration file: {}", home.display());
        return Ok(home);
    }

    Err(ConfigError::FileNotFound {
        path: start.join(DEFAULT_CONFIG_FILES[0]),
    }
    .into())
}

/// The per-user configuration file.
#[must_use]
pub fn user_config_file() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".cf-ops").join("config.yaml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const FULL_CONFIG: &str = r"
api:
  url: https://api.example.com
  uaa_url: https://uaa.example.com
  log_cache_url: https://log-cache.example.com
  skip_ssl_validation: true
  timeout_secs: 10
target:
  organization: test-organization
  space: test-space
  space_id: test-space-id
polling:
  interval_ms: 500
  timeout_secs: 60
";

    #[test]
    fn test_parse_full_config() {
        let config = ConfigParser::new()
            .parse_yaml(FULL_CONFIG, None)
            .expect("config should parse");
        assert_eq!(config.api.url, "https://api.example.com");
        assert!(config.api.skip_ssl_validation);
        assert_eq!(config.target.space_id.as_deref(), Some("test-space-id"));
        assert_eq!(config.polling.interval_ms, 500);
    }

    #[test]
    fn test_parse_empty_config() {
        let config = ConfigParser::new()
            .parse_yaml("", None)
            .expect("empty config parses");
        assert_eq!(config, OpsConfig::default());
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let result = ConfigParser::new().parse_yaml("api: [unterminated", None);
        assert!(matches!(
            result,
            Err(CfError::Config(ConfigError::ParseError { .. }))
        ));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cf-ops.yaml");
        std::fs::write(&path, FULL_CONFIG).expect("write config");

        let config = ConfigParser::new().load_file(&path).expect("config loads");
        assert_eq!(config.target.space.as_deref(), Some("test-space"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = ConfigParser::new().load_file(dir.path().join("missing.yaml"));
        assert!(matches!(
            result,
            Err(CfError::Config(ConfigError::FileNotFound { .. }))
        ));
    }

    #[test]
    fn test_find_config_in_parent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).expect("create dirs");
        let path = dir.path().join(".cf-ops.yaml");
        std::fs::write(&path, "{}").expect("write config");

        let found = find_config_file(&nested).expect("config found");
        assert_eq!(found, path);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ConfigParser::new()
            .parse_yaml(FULL_CONFIG, None)
            .expect("config should parse");
        let env: HashMap<&str, &str> = [
            (ENV_API_URL, "https://api.other.com"),
            (ENV_SPACE_ID, "other-space-id"),
        ]
        .into_iter()
        .collect();

        apply_env_overrides(&mut config, |key| env.get(key).map(ToString::to_string));

        assert_eq!(config.api.url, "https://api.other.com");
        assert_eq!(config.target.space_id.as_deref(), Some("other-space-id"));
        assert_eq!(config.api.uaa_url.as_deref(), Some("https://uaa.example.com"));
    }
}
