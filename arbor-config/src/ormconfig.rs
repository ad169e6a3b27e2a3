//! On-disk ormconfig discovery.
//!
//! The entity directory for each named connection lives in an `ormconfig`
//! file next to the application base directory. Formats are tried in a
//! fixed order and the first file found wins; nothing is merged across
//! formats. A missing file is not an error, it just resolves nothing.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::options::DEFAULT_CONNECTION;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Toml,
    Json,
    Yaml,
}

const CANDIDATES: &[(&str, Format)] = &[
    ("ormconfig.toml", Format::Toml),
    ("ormconfig.json", Format::Json),
    ("ormconfig.yml", Format::Yaml),
    ("ormconfig.yaml", Format::Yaml),
];

/// File that produced the ormconfig, if any.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OrmConfigSource {
    #[default]
    Default,
    File(PathBuf),
}

/// Per-connection entity settings as written in the ormconfig file.
///
/// Unknown keys are tolerated; they belong to the driver, not to us.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntitySettings {
    pub name: Option<String>,
    pub entities_dir: Option<String>,
}

/// Name-keyed connection settings loaded from disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrmConfig {
    connections: BTreeMap<String, EntitySettings>,
}

impl OrmConfig {
    /// Load the ormconfig next to `base_dir`.
    ///
    /// Accepted shapes, normalized through one code path: a single
    /// connection table (keyed under its `name`, default `"default"`), a
    /// list of connection tables, or an explicit name-to-table map.
    pub fn load(base_dir: &Path) -> Result<(Self, OrmConfigSource)> {
        let Some((path, format)) = CANDIDATES
            .iter()
            .map(|(file, format)| (base_dir.join(file), *format))
            .find(|(path, _)| path.exists())
        else {
            return Ok((Self::default(), OrmConfigSource::Default));
        };

        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let value = parse_to_value(&contents, format, &path)?;
        let connections = normalize(value, &path)?;
        debug!(path = %path.display(), connections = connections.len(), "ormconfig loaded");

        Ok((Self { connections }, OrmConfigSource::File(path)))
    }

    /// Settings for a named connection.
    pub fn get(&self, connection: &str) -> Option<&EntitySettings> {
        self.connections.get(connection)
    }

    /// Configured entities directory for a named connection.
    pub fn entities_dir(&self, connection: &str) -> Option<&str> {
        self.connections
            .get(connection)?
            .entities_dir
            .as_deref()
            .filter(|dir| !dir.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

fn parse_to_value(contents: &str, format: Format, path: &Path) -> Result<serde_json::Value> {
    let parse_error = |message: String| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    };

    match format {
        Format::Toml => {
            let value: toml::Value =
                toml::from_str(contents).map_err(|err| parse_error(err.to_string()))?;
            serde_json::to_value(value).map_err(|err| parse_error(err.to_string()))
        }
        Format::Json => serde_json::from_str(contents).map_err(|err| parse_error(err.to_string())),
        Format::Yaml => {
            let value: serde_yaml::Value =
                serde_yaml::from_str(contents).map_err(|err| parse_error(err.to_string()))?;
            serde_json::to_value(value).map_err(|err| parse_error(err.to_string()))
        }
    }
}

fn normalize(
    value: serde_json::Value,
    path: &Path,
) -> Result<BTreeMap<String, EntitySettings>> {
    use serde_json::Value;

    let mut connections = BTreeMap::new();
    match value {
        Value::Null => {}
        Value::Array(entries) => {
            for entry in entries {
                let settings = settings_from(entry, path)?;
                let name = settings
                    .name
                    .clone()
                    .unwrap_or_else(|| DEFAULT_CONNECTION.to_string());
                connections.insert(name, settings);
            }
        }
        Value::Object(map)
            if map.contains_key("entities_dir") || map.contains_key("name") =>
        {
            let settings = settings_from(Value::Object(map), path)?;
            let name = settings
                .name
                .clone()
                .unwrap_or_else(|| DEFAULT_CONNECTION.to_string());
            connections.insert(name, settings);
        }
        Value::Object(map) => {
            for (name, entry) in map {
                let settings = settings_from(entry, path)?;
                connections.insert(name, settings);
            }
        }
        other => {
            return Err(ConfigError::Parse {
                path: path.to_path_buf(),
                message: format!("expected a connection table, list, or map, got {other}"),
            });
        }
    }
    Ok(connections)
}

fn settings_from(value: serde_json::Value, path: &Path) -> Result<EntitySettings> {
    serde_json::from_value(value).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}
