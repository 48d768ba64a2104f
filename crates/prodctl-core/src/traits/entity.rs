//! Contract every readable entity type fulfils.

use std::fmt;

use crate::result::AppResult;
use crate::types::descriptor::EntityDescriptor;
use crate::types::row::Row;

/// A read-only record type backed by a table or view.
///
/// Entities are created and maintained by the source system; this layer
/// only decodes them from result rows.
pub trait Entity: Sized + Send + Sync + Unpin + 'static {
    /// Type of the primary identity field.
    ///
    /// Identity values are embedded through the same literal quoting as any
    /// other untrusted text, so only a `Display` rendering is needed.
    type Id: fmt::Display + Send + Sync;

    /// The static descriptor for this entity type.
    fn descriptor() -> &'static EntityDescriptor;

    /// Decode one result row.
    fn from_row(row: &Row) -> AppResult<Self>;

    /// The primary identity of this record.
    fn id(&self) -> &Self::Id;
}
