//! Statement construction.

pub mod builder;
pub mod literal;

pub use builder::{PageStatements, QueryBuilder};
pub use literal::quote_literal;
