//! Shared configuration library for Arbor.
//!
//! This crate centralizes the plumbing around the loader: environment
//! flags, on-disk `ormconfig` discovery (TOML, JSON, or YAML - first format
//! found wins), connection-option resolution, and the default per-connection
//! query logger. The loader itself lives in `arbor-core` and only consumes
//! what is produced here: a base directory and an entities glob per named
//! connection.

pub mod env;
pub mod error;
pub mod logger;
pub mod options;
pub mod ormconfig;

pub use env::Environment;
pub use error::{ConfigError, Result};
pub use logger::{QueryLogger, Verbosity};
pub use options::{
    ConnectionDescriptor, ConnectionOptions, DEFAULT_CONNECTION, OrmSettings, connection_options,
};
pub use ormconfig::{EntitySettings, OrmConfig, OrmConfigSource};
