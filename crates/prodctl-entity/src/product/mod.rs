//! Product entities.

pub mod model;

pub use model::Product;
