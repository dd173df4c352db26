//! Mutation-side date handling: finished-phase lock and batch overlay

pub mod changes;
pub mod overlay;

pub use changes::{filter_changing_date_types, validate_allowed_date_change_by_phase};
pub use overlay::BatchDateResolver;
