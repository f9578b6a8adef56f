use crate::error::{Result, UserbaseError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Name of the project configuration file searched for upwards from the working directory.
pub const CONFIG_FILE_NAME: &str = ".userbase.yml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserbaseConfig {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default = "default_database_path")]
    pub path: String,
}

fn default_database_path() -> String {
    "userbase.db".to_string()
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub environment: Environment,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: Environment::default(),
        }
    }
}

impl ServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default)]
    pub file: Option<String>,
}

/// Deployment environment. Developer tooling routes are only mounted in development.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_development(self) -> bool {
        self == Environment::Development
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl UserbaseConfig {
    /// Load the configuration, returning it together with the project root
    /// (the directory holding the config file).
    pub fn load(start_path: &Path) -> Result<(Self, PathBuf)> {
        let config_path = Self::find_config_file(start_path)?;
        Self::load_file(&config_path)
    }

    pub fn load_file(config_path: &Path) -> Result<(Self, PathBuf)> {
        let content = std::fs::read_to_string(config_path)?;
        let config: UserbaseConfig = if content.trim().is_empty() {
            UserbaseConfig::default()
        } else {
            serde_yaml::from_str(&content)?
        };
        let project_root = config_path
            .parent()
            .ok_or_else(|| {
                UserbaseError::Config("Config file has no parent directory".to_string())
            })?
            .to_path_buf();
        Ok((config, project_root))
    }

    pub fn find_config_file(start_path: &Path) -> Result<PathBuf> {
        let mut current = start_path.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Ok(config_path);
            }
            if !current.pop() {
                return Err(UserbaseError::NotInitialized);
            }
        }
    }

    pub fn database_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.database.path)
    }

    pub fn log_path(&self, project_root: &Path) -> Option<PathBuf> {
        self.logging.file.as_ref().map(|f| project_root.join(f))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = UserbaseConfig::default();
        assert_eq!(config.database.path, "userbase.db");
        assert_eq!(config.server.address(), "127.0.0.1:3000");
        assert_eq!(config.server.environment, Environment::Development);
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let yaml = "server:\n  port: 8080\n  environment: production\n";
        let config: UserbaseConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.environment, Environment::Production);
        assert_eq!(config.database.path, "userbase.db");
    }

    #[test]
    fn test_find_config_in_parent() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();

        let mut config = UserbaseConfig::default();
        config.database.path = "data/app.db".to_string();
        config
            .save(&temp_dir.path().join(CONFIG_FILE_NAME))
            .unwrap();

        let (loaded, root) = UserbaseConfig::load(&nested).unwrap();
        assert_eq!(root, temp_dir.path());
        assert_eq!(
            loaded.database_path(&root),
            temp_dir.path().join("data/app.db")
        );
    }

    #[test]
    fn test_missing_config_is_not_initialized() {
        let temp_dir = TempDir::new().unwrap();
        let err = UserbaseConfig::find_config_file(temp_dir.path()).unwrap_err();
        assert!(matches!(err, UserbaseError::NotInitialized));
    }
}
