//! Spacing ("wijderzetten") registrations.

pub mod model;

pub use model::SpacingRecord;
