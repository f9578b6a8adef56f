use anyhow::Result;

use super::{CommandContext, execute_document};

pub fn handle_mutate(
    ctx: CommandContext,
    mutation: String,
    variables: Option<String>,
) -> Result<()> {
    let response = execute_document(&ctx, wrap_mutation(&mutation), variables)?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

/// Auto-wrap in `mutation { }` unless the document already is one.
fn wrap_mutation(mutation: &str) -> String {
    if mutation.trim_start().starts_with("mutation") {
        mutation.to_string()
    } else {
        format!("mutation {{ {} }}", mutation)
    }
}
