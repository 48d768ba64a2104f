//! Backend connection configuration.

use serde::{Deserialize, Serialize};

/// String-literal syntax of the backend SQL dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiteralDialect {
    /// Standard SQL: a quote inside a literal is written as two quotes.
    #[default]
    Standard,
    /// Backslash is also an escape character inside literals (PostgreSQL
    /// with `standard_conforming_strings` off).
    Backslash,
}

/// Connection pool configuration for the SQL engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL (`postgres://…` or `sqlite://…`).
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// Idle connection timeout in seconds.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,
    /// Literal syntax used when embedding values into statements.
    #[serde(default)]
    pub dialect: LiteralDialect,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_idle_timeout() -> u64 {
    300
}
