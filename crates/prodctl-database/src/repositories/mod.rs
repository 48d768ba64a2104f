//! Read-only repositories.
//!
//! All entity types share [`SqlRepository`]; the aliases below only name
//! the concrete instantiations.

pub mod sql;

pub use sql::SqlRepository;

use prodctl_entity::{Product, SpacingRecord};

use crate::connection::SqlEngine;

/// Repository for [`Product`] records.
pub type ProductRepository<X = SqlEngine> = SqlRepository<Product, X>;

/// Repository for [`SpacingRecord`] records.
pub type SpacingRepository<X = SqlEngine> = SqlRepository<SpacingRecord, X>;
