use crate::graphql::schema_sdl;
use anyhow::{Context, Result};
use colored::Colorize;

pub fn handle_schema(output: Option<String>) -> Result<()> {
    let sdl = schema_sdl();
    match output {
        Some(path) => {
            std::fs::write(&path, sdl).with_context(|| format!("Failed to write {}", path))?;
            println!("{} schema to {}", "Wrote".green(), path);
        }
        None => print!("{}", sdl),
    }
    Ok(())
}
