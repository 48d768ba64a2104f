//! # prodctl-core
//!
//! Core crate for production control data access. Contains the seam traits
//! (entities, statement executors, read repositories), configuration schemas,
//! pagination/sorting/filter value types, entity descriptors, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other workspace crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
