use std::path::Path;

use anyhow::Result;
use clap::Parser;

use userbase::cli::handlers::{
    CommandContext, handle_init, handle_migrate, handle_mutate, handle_query, handle_schema,
    handle_serve,
};
use userbase::cli::{Cli, Commands};
use userbase::logging;

fn main() -> Result<()> {
    let Cli {
        command,
        config,
        verbose,
        log_file,
    } = Cli::parse();

    // Commands that operate on a project load its config first, so its log
    // file can apply.
    let project = || -> Result<CommandContext> {
        let ctx = CommandContext::load(config.as_deref())?;
        logging::init(verbose, ctx.log_path(log_file.as_deref()).as_deref())?;
        Ok(ctx)
    };

    match command {
        Commands::Init { database, port } => {
            logging::init(verbose, log_file.as_deref().map(Path::new))?;
            handle_init(database, port)
        }
        Commands::Schema { output } => {
            logging::init(verbose, log_file.as_deref().map(Path::new))?;
            handle_schema(output)
        }
        Commands::Migrate => handle_migrate(project()?),
        Commands::Serve {
            host,
            port,
            environment,
        } => handle_serve(project()?, host, port, environment.map(Into::into)),
        Commands::Query { query, variables } => handle_query(project()?, query, variables),
        Commands::Mutate {
            mutation,
            variables,
        } => handle_mutate(project()?, mutation, variables),
    }
}
