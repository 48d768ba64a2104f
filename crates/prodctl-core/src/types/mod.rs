//! Core type definitions used across the workspace.

pub mod descriptor;
pub mod filter;
pub mod pagination;
pub mod row;
pub mod sorting;

pub use descriptor::{DescriptorError, EntityDescriptor, FieldDef, SqlCast, TableIdentifier};
pub use filter::SearchText;
pub use pagination::{NormalizedRequest, PageRequest, PageResponse};
pub use row::{Row, Value};
pub use sorting::SortDirection;
