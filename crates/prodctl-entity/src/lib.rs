//! # prodctl-entity
//!
//! Entity models for production control data. Every struct in this crate
//! represents a row of a read-only table or view in the source system and
//! implements [`prodctl_core::traits::Entity`]: a static descriptor plus
//! decoding from a result row.

pub mod product;
pub mod spacing;

pub use product::Product;
pub use spacing::SpacingRecord;
