//! Per-connection query logging.
//!
//! Connections that do not configure logging get one of these stamped on
//! their options, so the storage layer always has somewhere to report
//! queries, failures, and slow statements.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

/// How much of a connection's SQL traffic is logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    None,
    #[default]
    Errors,
    All,
}

/// `tracing`-backed query logger scoped to one named connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryLogger {
    connection: String,
    verbosity: Verbosity,
}

impl QueryLogger {
    pub fn new(connection: impl Into<String>, verbosity: Verbosity) -> Self {
        Self {
            connection: connection.into(),
            verbosity,
        }
    }

    pub fn connection(&self) -> &str {
        &self.connection
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn log_query(&self, query: &str) {
        if self.verbosity == Verbosity::All {
            debug!(connection = %self.connection, query, "query");
        }
    }

    pub fn log_query_error(&self, query: &str, message: &str) {
        if self.verbosity != Verbosity::None {
            error!(connection = %self.connection, query, message, "query failed");
        }
    }

    pub fn log_slow_query(&self, query: &str, elapsed_ms: u64) {
        if self.verbosity != Verbosity::None {
            warn!(connection = %self.connection, query, elapsed_ms, "slow query");
        }
    }
}
