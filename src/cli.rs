/// A parsed invocation. Each variant maps to one REST mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    TagRemove { id: u32, tag: String },
    TagSet { id: u32, tags: String },
    FieldSet { id: u32, field: String, value: String },
}

/// Match the argument vector against the three supported shapes.
///
/// Supported forms:
///   wit tag remove <id> <tag>
///   wit tag set <id> "tag1; tag2"
///   wit field set <id> <field> <value>
///
/// Anything else (including a non-numeric id) returns None and the caller
/// prints usage.
pub fn parse_command(args: &[String]) -> Option<Command> {
    match args {
        [cmd, sub, id, tag] if cmd == "tag" && sub == "remove" => Some(Command::TagRemove {
            id: id.parse().ok()?,
            tag: tag.clone(),
        }),
        [cmd, sub, id, tags] if cmd == "tag" && sub == "set" => Some(Command::TagSet {
            id: id.parse().ok()?,
            tags: tags.clone(),
        }),
        [cmd, sub, id, field, value] if cmd == "field" && sub == "set" => {
            Some(Command::FieldSet {
                id: id.parse().ok()?,
                field: field.clone(),
                value: value.clone(),
            })
        }
        _ => None,
    }
}

pub fn print_usage() {
    println!("Usage:");
    println!("  wit tag remove <id> <tag>            Remove a tag from work item");
    println!("  wit tag set <id> \"tags\"              Set all tags (semicolon-separated)");
    println!("  wit field set <id> <field> <value>   Set any field value");
}
