mod init;
mod migrate;
mod mutate;
mod query;
mod schema;
mod serve;

pub use init::handle_init;
pub use migrate::handle_migrate;
pub use mutate::handle_mutate;
pub use query::handle_query;
pub use schema::handle_schema;
pub use serve::handle_serve;

use crate::config::UserbaseConfig;
use crate::graphql::build_schema;
use crate::storage::Database;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Common context passed to all command handlers that need a project
pub struct CommandContext {
    pub config: UserbaseConfig,
    pub root: PathBuf,
}

impl CommandContext {
    pub fn new(config: UserbaseConfig, root: PathBuf) -> Self {
        Self { config, root }
    }

    /// Load the project config from `config_path`, or search upward from the working directory.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let (config, root) = match config_path {
            Some(path) => UserbaseConfig::load_file(Path::new(path)),
            None => UserbaseConfig::load(&std::env::current_dir()?),
        }
        .context("Failed to load config")?;
        Ok(Self::new(config, root))
    }

    pub fn database_path(&self) -> PathBuf {
        self.config.database_path(&self.root)
    }

    /// Log file for this project: `--log-file` wins over `logging.file` in the config.
    pub fn log_path(&self, cli_override: Option<&str>) -> Option<PathBuf> {
        cli_override
            .map(PathBuf::from)
            .or_else(|| self.config.log_path(&self.root))
    }

    pub fn open_database(&self) -> Result<Database> {
        let path = self.database_path();
        Database::open(path.clone())
            .with_context(|| format!("Failed to open database {}", path.display()))
    }
}

/// Execute one GraphQL document against a freshly opened database.
fn execute_document(
    ctx: &CommandContext,
    document: String,
    variables: Option<String>,
) -> Result<async_graphql::Response> {
    let vars: async_graphql::Variables = if let Some(v) = variables {
        serde_json::from_str(&v).context("Variables must be a JSON object")?
    } else {
        async_graphql::Variables::default()
    };

    let database = ctx.open_database()?;
    let schema = build_schema(database.clone());
    let request = async_graphql::Request::new(document).variables(vars);
    let response = tokio::runtime::Runtime::new()?.block_on(schema.execute(request));
    database.close();
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_with_log_file(file: Option<&str>) -> CommandContext {
        let mut config = UserbaseConfig::default();
        config.logging.file = file.map(str::to_string);
        CommandContext::new(config, PathBuf::from("/srv/app"))
    }

    #[test]
    fn test_log_path_from_config_is_relative_to_root() {
        let ctx = context_with_log_file(Some("logs/userbase.log"));
        assert_eq!(
            ctx.log_path(None),
            Some(PathBuf::from("/srv/app/logs/userbase.log"))
        );
    }

    #[test]
    fn test_log_path_cli_override_wins() {
        let ctx = context_with_log_file(Some("logs/userbase.log"));
        assert_eq!(
            ctx.log_path(Some("/tmp/override.log")),
            Some(PathBuf::from("/tmp/override.log"))
        );
    }

    #[test]
    fn test_log_path_absent_without_config_or_flag() {
        assert_eq!(context_with_log_file(None).log_path(None), None);
    }
}
