//! SQL engine connection pool.
//!
//! [`SqlEngine`] runs complete statements through an sqlx `Any` pool, so the
//! same code serves PostgreSQL and SQLite URLs. Statements are never given
//! bind arguments. The `Any` driver only decodes booleans, integers, floats
//! and text; columns of other backend types are cast in the select list.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::any::{AnyPoolOptions, AnyRow};
use sqlx::{AnyPool, Column, Row as _, ValueRef};
use tracing::{debug, info, trace};

use prodctl_core::config::{DatabaseConfig, LiteralDialect};
use prodctl_core::error::{AppError, ErrorKind};
use prodctl_core::result::AppResult;
use prodctl_core::traits::Executor;
use prodctl_core::types::row::{Row, Value};

/// PostgreSQL SQLSTATE for a statement cancelled by `statement_timeout`.
const PG_QUERY_CANCELED: &str = "57014";

/// URL schemes of the backends the engine can read from.
const SUPPORTED_SCHEMES: &[&str] = &["postgres", "postgresql", "sqlite"];

/// Shared handle to the backend connection pool.
#[derive(Debug, Clone)]
pub struct SqlEngine {
    /// The underlying sqlx connection pool.
    pool: AnyPool,
    /// Literal syntax of the backend.
    dialect: LiteralDialect,
}

impl SqlEngine {
    /// Create a new engine from configuration.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        check_scheme(&config.url)?;
        sqlx::any::install_default_drivers();

        info!(
            url = %mask_password(&config.url),
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            dialect = ?config.dialect,
            "Connecting to SQL engine"
        );

        let pool = AnyPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect(&config.url)
            .await
            .map_err(|e| map_sqlx_error("Failed to connect to SQL engine", e))?;

        info!("Successfully connected to SQL engine");
        Ok(Self {
            pool,
            dialect: config.dialect,
        })
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: AnyPool, dialect: LiteralDialect) -> Self {
        Self { pool, dialect }
    }

    /// Return a reference to the underlying sqlx pool.
    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    /// Check backend connectivity.
    pub async fn health_check(&self) -> Result<bool, AppError> {
        self.fetch_count("SELECT 1").await.map(|v| v == 1)
    }

    /// Close all connections in the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("SQL engine pool closed");
    }
}

#[async_trait]
impl Executor for SqlEngine {
    fn dialect(&self) -> LiteralDialect {
        self.dialect
    }

    async fn fetch_rows(&self, sql: &str) -> AppResult<Vec<Row>> {
        debug!(statement_len = sql.len(), "Executing select");
        trace!(sql, "Statement text");

        let rows = sqlx::query(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Select failed", e))?;

        rows.iter().map(convert_row).collect()
    }

    async fn fetch_count(&self, sql: &str) -> AppResult<u64> {
        debug!(statement_len = sql.len(), "Executing count");
        trace!(sql, "Statement text");

        let row = sqlx::query(sql)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Count failed", e))?;

        let count: i64 = row
            .try_get(0)
            .map_err(|e| map_sqlx_error("Count result is not an integer", e))?;

        u64::try_from(count)
            .map_err(|_| AppError::mapping(format!("Count result {count} is negative")))
    }
}

/// Convert a driver row into a driver-neutral [`Row`].
fn convert_row(row: &AnyRow) -> AppResult<Row> {
    let mut converted = Row::new();
    for (index, column) in row.columns().iter().enumerate() {
        converted.push(column.name(), decode_value(row, index)?);
    }
    Ok(converted)
}

/// Decode one column, trying each supported type in turn.
///
/// `try_get` checks type compatibility before decoding, so the first
/// successful attempt is the column's actual type.
fn decode_value(row: &AnyRow, index: usize) -> AppResult<Value> {
    let is_null = row
        .try_get_raw(index)
        .map_err(|e| map_sqlx_error("Failed to read column", e))?
        .is_null();
    if is_null {
        return Ok(Value::Null);
    }

    if let Ok(v) = row.try_get::<bool, _>(index) {
        return Ok(Value::Bool(v));
    }
    if let Ok(v) = row.try_get::<i64, _>(index) {
        return Ok(Value::Int(v));
    }
    if let Ok(v) = row.try_get::<f64, _>(index) {
        return Ok(Value::Float(v));
    }
    if let Ok(v) = row.try_get::<String, _>(index) {
        return Ok(Value::Text(v));
    }

    let name = row.columns().get(index).map(|c| c.name()).unwrap_or("?");
    Err(AppError::mapping(format!(
        "Column '{name}' has a type that cannot be decoded"
    )))
}

/// Map an sqlx error onto the data access taxonomy.
pub(crate) fn map_sqlx_error(context: &str, err: sqlx::Error) -> AppError {
    let kind = match &err {
        sqlx::Error::PoolTimedOut => ErrorKind::Timeout,
        sqlx::Error::Database(db) if db.code().as_deref() == Some(PG_QUERY_CANCELED) => {
            ErrorKind::Timeout
        }
        sqlx::Error::Database(_) => ErrorKind::MalformedStatement,
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Protocol(_)
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => ErrorKind::Connection,
        sqlx::Error::Configuration(_) => ErrorKind::Configuration,
        sqlx::Error::RowNotFound
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::AnyDriverError(_) => ErrorKind::Mapping,
        _ => ErrorKind::Internal,
    };
    AppError::with_source(kind, format!("{context}: {err}"), err)
}

/// Reject URLs for backends whose SQL dialect the builder does not speak.
fn check_scheme(url: &str) -> Result<(), AppError> {
    let scheme = url.split(':').next().unwrap_or_default();
    if SUPPORTED_SCHEMES.contains(&scheme) {
        Ok(())
    } else {
        Err(AppError::configuration(format!(
            "Unsupported database URL scheme '{scheme}', expected one of: {}",
            SUPPORTED_SCHEMES.join(", ")
        )))
    }
}

/// Mask the password portion of a connection URL for safe logging.
fn mask_password(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if let Some(colon_pos) = url[..at_pos].rfind(':') {
            let scheme_end = url.find("://").map(|p| p + 3).unwrap_or(0);
            if colon_pos > scheme_end {
                return format!("{}:****@{}", &url[..colon_pos], &url[at_pos + 1..]);
            }
        }
    }
    url.to_string()
}
