//! # prodctl-database
//!
//! Read-only data access over a SQL backend that does not accept bound
//! parameters. Every untrusted value reaches a statement through
//! [`query::literal::quote_literal`]; identifiers only ever come from an
//! entity's validated descriptor.

pub mod connection;
pub mod query;
pub mod repositories;

pub use connection::SqlEngine;
pub use query::QueryBuilder;
pub use repositories::{ProductRepository, SpacingRepository, SqlRepository};
