//! Task-definition model and merge logic.
//!
//! The document is parsed into a structural type with explicit optional
//! `environment`/`secrets` lists; every field the model does not know about
//! rides along untouched through flattened maps, so a reconciled document is
//! the original document plus the merged entries.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::core::remote::SecretResolver;
use crate::core::vars::VarMap;
use crate::error::{Result, SyncError};

/// One `{name, value}` row of a container's `environment` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentVariable {
    pub name: String,
    pub value: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One `{name, valueFrom}` row of a container's `secrets` list.
///
/// `valueFrom` is always a reference the container runtime resolves at
/// launch; the literal secret value never appears in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerSecret {
    pub name: String,
    #[serde(rename = "valueFrom")]
    pub value_from: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The sub-record for one named container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerDefinition {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<Vec<EnvironmentVariable>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secrets: Option<Vec<ContainerSecret>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A parsed task definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDefinition {
    #[serde(rename = "containerDefinitions")]
    pub container_definitions: Vec<ContainerDefinition>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Read and parse a task definition, resolving relative paths against the
/// workspace root.
pub fn load_task_definition(file: &str, workspace: &Path) -> Result<TaskDefinition> {
    let path = if Path::new(file).is_absolute() {
        PathBuf::from(file)
    } else {
        workspace.join(file)
    };

    if !path.exists() {
        return Err(SyncError::SourceRead(file.to_string()));
    }

    let contents = std::fs::read_to_string(&path)?;
    let value: Value = serde_json::from_str(&contents)
        .map_err(|e| SyncError::InvalidDocument(format!("not valid JSON: {}", e)))?;

    if !value
        .get("containerDefinitions")
        .is_some_and(Value::is_array)
    {
        return Err(SyncError::InvalidDocument(
            "containerDefinitions section is not present or is not an array".into(),
        ));
    }

    serde_json::from_value(value).map_err(|e| SyncError::InvalidDocument(e.to_string()))
}

/// Merge the filtered environment and secret maps into the named container.
///
/// Takes ownership of the document and returns the updated value. Environment
/// entries are matched by their **prefixed** name; secret entries are matched
/// by the **unprefixed** key while `valueFrom` carries the resolved reference
/// for the prefixed name. Downstream consumers look secrets up in the
/// document by their plain name, so the asymmetry is load-bearing.
pub async fn reconcile<R: SecretResolver>(
    mut doc: TaskDefinition,
    container_name: &str,
    prefix: &str,
    env_vars: &VarMap,
    secrets: &VarMap,
    allow_removal: bool,
    resolver: &R,
) -> Result<TaskDefinition> {
    let container = doc
        .container_definitions
        .iter_mut()
        .find(|c| c.name == container_name)
        .ok_or_else(|| SyncError::ContainerNotFound(container_name.to_string()))?;

    if allow_removal {
        container.environment = Some(Vec::new());
        container.secrets = Some(Vec::new());
    }

    // Documents may omit either list entirely
    let environment = container.environment.get_or_insert_with(Vec::new);
    for (key, value) in env_vars {
        let name = format!("{}{}", prefix, key);
        match environment.iter_mut().find(|e| e.name == name) {
            Some(entry) => {
                debug!("updating env {} in task definition", name);
                entry.value = value.clone();
            }
            None => {
                debug!("creating env {} in task definition", name);
                environment.push(EnvironmentVariable {
                    name,
                    value: value.clone(),
                    extra: Map::new(),
                });
            }
        }
    }

    let container_secrets = container.secrets.get_or_insert_with(Vec::new);
    for key in secrets.keys() {
        // The value is intentionally unused: only the reference is stored
        let value_from = resolver.resolve(&format!("{}{}", prefix, key)).await?;

        match container_secrets.iter_mut().find(|s| s.name == *key) {
            Some(entry) => {
                debug!("updating secret {} in task definition", key);
                entry.value_from = value_from;
            }
            None => {
                debug!("creating secret {} in task definition", key);
                container_secrets.push(ContainerSecret {
                    name: key.clone(),
                    value_from,
                    extra: Map::new(),
                });
            }
        }
    }

    Ok(doc)
}

/// Write the reconciled document to a kept temp file and return its path.
///
/// Written only on success; a failed run never persists a partial document.
pub fn write_task_definition(doc: &TaskDefinition, dir: &Path) -> Result<PathBuf> {
    let mut file = tempfile::Builder::new()
        .prefix("task-definition-")
        .suffix(".json")
        .tempfile_in(dir)?;

    let contents = serde_json::to_string_pretty(doc)
        .map_err(|e| SyncError::InvalidDocument(e.to_string()))?;
    file.write_all(contents.as_bytes())?;
    file.write_all(b"\n")?;

    file.into_temp_path()
        .keep()
        .map_err(|e| SyncError::Io(e.error))
}
