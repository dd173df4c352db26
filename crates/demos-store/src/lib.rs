//! DEMOS transactional store
//!
//! In-memory persistence for applications, phase statuses, dates and the
//! ordered phase/date-type table. All reads and writes go through a
//! [`Transaction`]; [`MemoryStore::commit`] publishes them atomically.

pub mod error;
pub mod memory;
pub mod resolver;
pub mod seed;
pub mod transaction;

pub use error::StoreError;
pub use memory::{ApplicationRecord, DateRecord, MemoryStore, PhaseRecord, StoreSnapshot};
pub use resolver::TransactionDateResolver;
pub use seed::default_phase_date_types;
pub use transaction::Transaction;

/// Version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
