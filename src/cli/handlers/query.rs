use anyhow::Result;

use super::{CommandContext, execute_document};

pub fn handle_query(ctx: CommandContext, query: String, variables: Option<String>) -> Result<()> {
    let response = execute_document(&ctx, wrap_query(&query), variables)?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

/// Auto-wrap in `query { }` unless the document already is an operation.
fn wrap_query(query: &str) -> String {
    let trimmed = query.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with("query") {
        query.to_string()
    } else {
        format!("query {{ {} }}", query)
    }
}
