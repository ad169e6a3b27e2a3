use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid ormconfig {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("unknown environment `{value}`")]
    UnknownEnvironment { value: String },

    #[error("entities directory is not configured for connection `{connection}`")]
    MissingEntitiesDir { connection: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
