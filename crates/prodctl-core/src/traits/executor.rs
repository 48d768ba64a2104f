//! Statement execution seam.

use async_trait::async_trait;

use crate::config::LiteralDialect;
use crate::result::AppResult;
use crate::types::row::Row;

/// Executes complete SQL statements against the backend.
///
/// The backend does not support bound parameters, so statements arrive as
/// finished literal text. Implementations must be safe to share between
/// concurrent callers; pooling, timeouts and retries are their concern.
#[async_trait]
pub trait Executor: Send + Sync {
    /// String-literal syntax the backend expects.
    fn dialect(&self) -> LiteralDialect;

    /// Run a row-returning statement.
    async fn fetch_rows(&self, sql: &str) -> AppResult<Vec<Row>>;

    /// Run a statement returning a single non-negative count in its first column.
    async fn fetch_count(&self, sql: &str) -> AppResult<u64>;
}
