use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Project-local Azure DevOps settings, written by the board setup tooling.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Organization base URL, e.g. `https://dev.azure.com/my-org`.
    pub organization: String,
    pub project: String,
    pub team: String,
    pub board: String,
    pub area_path: String,
    pub iteration_path: String,
    pub work_item_type: String,
    pub board_column_field: String,
    pub board_column_done_field: String,
    pub board_columns: HashMap<String, String>,
    pub board_column_done: HashMap<String, bool>,
}

fn config_path() -> PathBuf {
    PathBuf::from(".agentflow").join("azure-devops.json")
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        bail!("No .agentflow/azure-devops.json found");
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: Config = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "organization": "https://dev.azure.com/contoso",
        "project": "Widgets",
        "team": "Widgets Team",
        "board": "Stories",
        "areaPath": "Widgets\\Platform",
        "iterationPath": "Widgets\\Sprint 12",
        "workItemType": "User Story",
        "boardColumnField": "WEF_ABC_Kanban.Column",
        "boardColumnDoneField": "WEF_ABC_Kanban.Column.Done",
        "boardColumns": { "todo": "To Do", "doing": "Doing" },
        "boardColumnDone": { "doing": false }
    }"#;

    #[test]
    fn load_parses_sample() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("azure-devops.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.organization, "https://dev.azure.com/contoso");
        assert_eq!(config.work_item_type, "User Story");
        assert_eq!(config.board_columns.get("doing").unwrap(), "Doing");
        assert_eq!(config.board_column_done.get("doing"), Some(&false));
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_from(&dir.path().join("azure-devops.json")).unwrap_err();
        assert!(err
            .to_string()
            .contains("No .agentflow/azure-devops.json found"));
    }

    #[test]
    fn load_malformed_json_fails_with_parse_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("azure-devops.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
