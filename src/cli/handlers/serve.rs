use crate::config::Environment;
use crate::graphql::{GRAPHQL_PATH, build_schema, run_server};
use anyhow::Result;

use super::CommandContext;

pub fn handle_serve(
    ctx: CommandContext,
    host: Option<String>,
    port: Option<u16>,
    environment: Option<Environment>,
) -> Result<()> {
    let mut settings = ctx.config.server.clone();
    if let Some(host) = host {
        settings.host = host;
    }
    if let Some(port) = port {
        settings.port = port;
    }
    if let Some(environment) = environment {
        settings.environment = environment;
    }

    let database = ctx.open_database()?;
    tracing::info!(database = database.location(), "Opened database");
    let schema = build_schema(database.clone());

    println!(
        "Starting GraphQL server on http://{}{}",
        settings.address(),
        GRAPHQL_PATH
    );
    if settings.environment.is_development() {
        println!("GraphiQL: http://{}/graphiql", settings.address());
    }

    let result = tokio::runtime::Runtime::new()?.block_on(run_server(schema, &settings));
    database.close();
    result?;
    Ok(())
}
