use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const API_KEY_ENV: &str = "OMDB_API_KEY";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default)]
    pub appdir: Option<String>,
    #[serde(default)]
    pub dbdir: Option<String>,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub omdb: OmdbConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_port")]
    pub port: String,
    #[serde(default)]
    pub tlscert: Option<String>,
    #[serde(default)]
    pub tlskey: Option<String>,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: default_port(),
            tlscert: None,
            tlskey: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub sqlite: Option<SqliteConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SqliteConfig {
    pub filename: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OmdbConfig {
    #[serde(default = "default_omdb_url")]
    pub baseurl: String,
    #[serde(default)]
    pub apikey: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            baseurl: default_omdb_url(),
            apikey: None,
            timeout: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct UiConfig {
    /// Base URL of the movie proxy the pages talk to. When unset the pages
    /// use the OMDb client in-process.
    #[serde(default)]
    pub apibase: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    #[serde(default = "default_cors_origins")]
    pub origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            origins: default_cors_origins(),
        }
    }
}

fn default_port() -> String {
    "8080".to_string()
}

fn default_omdb_url() -> String {
    "https://www.omdbapi.com/".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:5173".to_string()]
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_string(), e))?;

        Self::from_yaml(path, &content)
    }

    pub fn from_yaml(path: &str, content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError(path.to_string(), e))
    }

    pub fn get_database_path(&self) -> Option<String> {
        if let Some(ref sqlite) = self.database.sqlite {
            return Some(sqlite.filename.clone());
        }

        if let Some(ref dbdir) = self.dbdir {
            let path = PathBuf::from(dbdir).join("omdb-explorer.db");
            return Some(path.to_string_lossy().to_string());
        }

        None
    }

    /// The OMDb API key from the config file, or from `OMDB_API_KEY`.
    pub fn get_api_key(&self) -> Result<String, ConfigError> {
        self.omdb
            .apikey
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(String, serde_yaml::Error),
    #[error("No OMDb API key configured (set omdb.apikey or {})", API_KEY_ENV)]
    MissingApiKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let yaml = r#"
listen:
  port: "9000"
dbdir: /var/lib/omdb
omdb:
  apikey: secret
  timeout: 3
ui:
  apibase: http://localhost:9000
cors:
  origins: ["*"]
"#;
        let config = Config::from_yaml("test.yaml", yaml).unwrap();
        assert_eq!(config.listen.port, "9000");
        assert_eq!(config.omdb.baseurl, "https://www.omdbapi.com/");
        assert_eq!(config.omdb.timeout, 3);
        assert_eq!(config.get_api_key().unwrap(), "secret");
        assert_eq!(config.ui.apibase.as_deref(), Some("http://localhost:9000"));
        assert_eq!(config.cors.origins, vec!["*"]);
        assert_eq!(
            config.get_database_path().as_deref(),
            Some("/var/lib/omdb/omdb-explorer.db")
        );
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_yaml("empty.yaml", "{}").unwrap();
        assert_eq!(config.listen.port, "8080");
        assert_eq!(config.cors.origins, vec!["http://localhost:5173"]);
        assert!(config.ui.apibase.is_none());
        assert!(config.get_database_path().is_none());
    }

    #[test]
    fn test_sqlite_filename_wins() {
        let yaml = "dbdir: /data\ndatabase:\n  sqlite:\n    filename: /tmp/fav.db\n";
        let config = Config::from_yaml("test.yaml", yaml).unwrap();
        assert_eq!(config.get_database_path().as_deref(), Some("/tmp/fav.db"));
    }
}
