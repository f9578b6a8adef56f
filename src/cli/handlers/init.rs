use crate::config::{CONFIG_FILE_NAME, UserbaseConfig};
use crate::error::UserbaseError;
use anyhow::Result;
use colored::Colorize;

pub fn handle_init(database: String, port: Option<u16>) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config_path = cwd.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        return Err(UserbaseError::AlreadyInitialized(config_path.display().to_string()).into());
    }

    let mut config = UserbaseConfig::default();
    config.database.path = database;
    if let Some(port) = port {
        config.server.port = port;
    }

    config.save(&config_path)?;

    println!(
        "{} userbase project in {}",
        "Initialized".green(),
        cwd.display()
    );
    println!("  Config:   {}", config_path.display());
    println!("  Database: {}", config.database_path(&cwd).display());
    println!("Run 'userbase migrate' to create the schema.");

    Ok(())
}
