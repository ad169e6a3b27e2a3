//! Application environment flags.
//!
//! The host tells us which environment it runs in; the only decisions made
//! here are the prod/local checks and whether entity modules are loaded in
//! source form or compiled form.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Runtime environment of the host application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Local,
    Dev,
    Test,
    #[default]
    Prod,
}

impl Environment {
    pub fn is_prod(self) -> bool {
        matches!(self, Environment::Prod)
    }

    pub fn is_local(self) -> bool {
        matches!(self, Environment::Local)
    }

    /// Local and dev runs load entity modules in source form; everything
    /// else uses the compiled form.
    pub fn uses_source_modules(self) -> bool {
        matches!(self, Environment::Local | Environment::Dev)
    }
}

impl std::str::FromStr for Environment {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "local" => Ok(Environment::Local),
            "dev" => Ok(Environment::Dev),
            "test" => Ok(Environment::Test),
            "prod" => Ok(Environment::Prod),
            other => Err(ConfigError::UnknownEnvironment {
                value: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Environment::Local => "local",
            Environment::Dev => "dev",
            Environment::Test => "test",
            Environment::Prod => "prod",
        };
        write!(f, "{name}")
    }
}
