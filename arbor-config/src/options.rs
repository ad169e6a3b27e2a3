//! Connection-option resolution.
//!
//! Joins the host's configured clients with the on-disk ormconfig and
//! produces fully-resolved options per connection: defaulted name, absolute
//! entities glob for the current environment, and a query logger.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{error, warn};

use crate::env::Environment;
use crate::error::{ConfigError, Result};
use crate::logger::{QueryLogger, Verbosity};
use crate::ormconfig::OrmConfig;

/// Connection name used when a descriptor does not pick one.
pub const DEFAULT_CONNECTION: &str = "default";

/// Entity modules are loaded in source form during local development and in
/// compiled form everywhere else.
const SOURCE_MODULE_EXT: &str = "ts";
const COMPILED_MODULE_EXT: &str = "js";

/// Host-supplied ORM settings: a single client or a list of them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrmSettings {
    pub client: Option<ConnectionDescriptor>,
    pub clients: Option<Vec<ConnectionDescriptor>>,
}

/// One configured connection, as the host wrote it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConnectionDescriptor {
    pub name: Option<String>,
    pub logging: Option<Verbosity>,
    /// Driver parameters opaque to the loader (host, credentials, pool
    /// sizing and the like); passed through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Fully-resolved options for one connection.
#[derive(Debug, Clone)]
pub struct ConnectionOptions {
    pub name: String,
    /// Absolute entity directory for this connection.
    pub entities_dir: PathBuf,
    /// Absolute glob selecting this connection's entity modules.
    pub entities: PathBuf,
    pub logger: QueryLogger,
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Resolve every configured client into connection options.
///
/// `clients` takes precedence over `client`; with neither configured the
/// result is empty. Each descriptor must have an entities directory in the
/// ormconfig under its (defaulted) name, otherwise resolution aborts.
pub fn connection_options(
    settings: &OrmSettings,
    base_dir: &Path,
    env: Environment,
) -> Result<Vec<ConnectionOptions>> {
    let descriptors: Vec<ConnectionDescriptor> = match (&settings.clients, &settings.client) {
        (Some(clients), _) => clients.clone(),
        (None, Some(client)) => vec![client.clone()],
        (None, None) => return Ok(Vec::new()),
    };

    let (config, _source) = OrmConfig::load(base_dir)?;
    let extension = if env.uses_source_modules() {
        SOURCE_MODULE_EXT
    } else {
        COMPILED_MODULE_EXT
    };

    let mut options = Vec::with_capacity(descriptors.len());
    for descriptor in descriptors {
        let name = descriptor
            .name
            .clone()
            .unwrap_or_else(|| DEFAULT_CONNECTION.to_string());
        if options.iter().any(|existing: &ConnectionOptions| existing.name == name) {
            warn!(connection = %name, "duplicate connection name, the later entry wins downstream");
        }

        let Some(entities_dir) = config.entities_dir(&name) else {
            error!(
                connection = %name,
                "entities directory must be configured; a single client can set name to `default`"
            );
            return Err(ConfigError::MissingEntitiesDir { connection: name });
        };
        let entities_dir = base_dir.join(entities_dir);
        let entities = entities_dir.join("**").join(format!("*.{extension}"));
        let logger = QueryLogger::new(&name, descriptor.logging.unwrap_or_default());

        options.push(ConnectionOptions {
            name,
            entities_dir,
            entities,
            logger,
            extra: descriptor.extra,
        });
    }

    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn named(name: &str) -> ConnectionDescriptor {
        ConnectionDescriptor {
            name: Some(name.to_string()),
            ..ConnectionDescriptor::default()
        }
    }

    fn base_with_ormconfig(contents: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("ormconfig.toml"), contents).expect("write ormconfig");
        dir
    }

    #[test]
    fn no_clients_resolves_to_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let options = connection_options(&OrmSettings::default(), dir.path(), Environment::Prod)
            .expect("resolve");
        assert!(options.is_empty());
    }

    #[test]
    fn single_client_defaults_its_name() {
        let dir = base_with_ormconfig("entities_dir = \"app/entity\"\n");
        let settings = OrmSettings {
            client: Some(ConnectionDescriptor::default()),
            ..OrmSettings::default()
        };

        let options =
            connection_options(&settings, dir.path(), Environment::Prod).expect("resolve");
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].name, "default");
        assert_eq!(options[0].entities_dir, dir.path().join("app/entity"));
        assert_eq!(
            options[0].entities,
            dir.path().join("app/entity").join("**").join("*.js")
        );
    }

    #[test]
    fn clients_take_precedence_over_client() {
        let dir = base_with_ormconfig(
            "[replica]\nentities_dir = \"app/replica\"\n",
        );
        let settings = OrmSettings {
            client: Some(named("ignored")),
            clients: Some(vec![named("replica")]),
        };

        let options =
            connection_options(&settings, dir.path(), Environment::Prod).expect("resolve");
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].name, "replica");
    }

    #[test]
    fn local_environment_selects_source_modules() {
        let dir = base_with_ormconfig("entities_dir = \"app/entity\"\n");
        let settings = OrmSettings {
            client: Some(ConnectionDescriptor::default()),
            ..OrmSettings::default()
        };

        let options =
            connection_options(&settings, dir.path(), Environment::Local).expect("resolve");
        assert_eq!(
            options[0].entities,
            dir.path().join("app/entity").join("**").join("*.ts")
        );
    }

    #[test]
    fn missing_entities_dir_is_fatal() {
        let dir = base_with_ormconfig("[other]\nentities_dir = \"app/other\"\n");
        let settings = OrmSettings {
            client: Some(ConnectionDescriptor::default()),
            ..OrmSettings::default()
        };

        let err = connection_options(&settings, dir.path(), Environment::Prod)
            .expect_err("resolution should fail");
        match err {
            ConfigError::MissingEntitiesDir { connection } => {
                assert_eq!(connection, "default");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn logger_defaults_per_connection() {
        let dir = base_with_ormconfig(
            "[default]\nentities_dir = \"app/entity\"\n[replica]\nentities_dir = \"app/replica\"\n",
        );
        let mut verbose = named("replica");
        verbose.logging = Some(Verbosity::All);
        let settings = OrmSettings {
            clients: Some(vec![named("default"), verbose]),
            ..OrmSettings::default()
        };

        let options =
            connection_options(&settings, dir.path(), Environment::Prod).expect("resolve");
        assert_eq!(options[0].logger.connection(), "default");
        assert_eq!(options[0].logger.verbosity(), Verbosity::Errors);
        assert_eq!(options[1].logger.verbosity(), Verbosity::All);
    }

    #[test]
    fn driver_parameters_pass_through() {
        let dir = base_with_ormconfig("entities_dir = \"app/entity\"\n");
        let descriptor: ConnectionDescriptor = serde_json::from_str(
            r#"{ "logging": "all", "host": "localhost", "port": 5432 }"#,
        )
        .expect("descriptor");
        let settings = OrmSettings {
            client: Some(descriptor),
            ..OrmSettings::default()
        };

        let options =
            connection_options(&settings, dir.path(), Environment::Prod).expect("resolve");
        assert_eq!(
            options[0].extra.get("host"),
            Some(&serde_json::Value::String("localhost".to_string()))
        );
        assert_eq!(options[0].logger.verbosity(), Verbosity::All);
    }
}
