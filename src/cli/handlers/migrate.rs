use anyhow::Result;
use colored::Colorize;

use super::CommandContext;

pub fn handle_migrate(ctx: CommandContext) -> Result<()> {
    let database = ctx.open_database()?;
    let (from, to) = tokio::runtime::Runtime::new()?.block_on(database.migrate())?;
    database.close();

    if from == to {
        println!(
            "{} {} (schema version {})",
            "Up to date".green(),
            database.location(),
            to
        );
    } else {
        println!(
            "{} {} from schema version {} to {}",
            "Migrated".green(),
            database.location(),
            from,
            to
        );
    }
    Ok(())
}
