//! Core trait definitions.
//!
//! These traits are the seams between entity definitions, the SQL engine,
//! and callers of the repositories.

pub mod entity;
pub mod executor;
pub mod repository;

pub use entity::Entity;
pub use executor::Executor;
pub use repository::ReadRepository;
