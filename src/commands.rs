use anyhow::Result;
use serde_json::Value;

use crate::auth::AzCliTokenProvider;
use crate::cli::Command;
use crate::client::{PatchOp, WorkItemClient};
use crate::config;

const TAGS_FIELD: &str = "System.Tags";

/// Load config, wire up the real token provider, and execute one command.
pub async fn run(command: Command) -> Result<()> {
    let config = config::load_config()?;
    let client = WorkItemClient::new(config.organization.clone(), Box::new(AzCliTokenProvider));

    match command {
        Command::TagRemove { id, tag } => tag_remove(&client, id, &tag).await,
        Command::TagSet { id, tags } => tag_set(&client, id, &tags).await,
        Command::FieldSet { id, field, value } => field_set(&client, id, &field, &value).await,
    }
}

async fn tag_remove(client: &WorkItemClient, id: u32, tag: &str) -> Result<()> {
    let work_item = client.get_work_item(id).await?;
    let new_tags = strip_tag(current_tags(&work_item), tag);

    let ops = [PatchOp::replace(format!("/fields/{TAGS_FIELD}"), new_tags)];
    let result = client.patch_work_item(id, &ops).await?;

    println!("Removed tag \"{tag}\" from #{id}");
    println!("Tags now: {}", display_tags(&result));
    Ok(())
}

async fn tag_set(client: &WorkItemClient, id: u32, tags: &str) -> Result<()> {
    // The tags argument is passed through literally; the service does its own
    // splitting on `;`.
    let ops = [PatchOp::replace(format!("/fields/{TAGS_FIELD}"), tags)];
    let result = client.patch_work_item(id, &ops).await?;

    println!("Set tags on #{id}");
    println!("Tags now: {}", display_tags(&result));
    Ok(())
}

async fn field_set(client: &WorkItemClient, id: u32, field: &str, value: &str) -> Result<()> {
    let ops = [PatchOp::replace(format!("/fields/{field}"), value)];
    client.patch_work_item(id, &ops).await?;

    println!("Set {field}=\"{value}\" on #{id}");
    Ok(())
}

fn current_tags(work_item: &Value) -> &str {
    work_item["fields"][TAGS_FIELD].as_str().unwrap_or("")
}

fn display_tags(work_item: &Value) -> &str {
    match current_tags(work_item) {
        "" => "(none)",
        tags => tags,
    }
}

/// Drop a tag (case-insensitive) from a semicolon-delimited tag string,
/// normalizing whitespace around the survivors.
fn strip_tag(current: &str, tag_to_remove: &str) -> String {
    current
        .split(';')
        .map(str::trim)
        .filter(|t| !t.is_empty() && !t.eq_ignore_ascii_case(tag_to_remove))
        .collect::<Vec<_>>()
        .join("; ")
}
