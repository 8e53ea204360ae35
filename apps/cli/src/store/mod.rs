//! Durable storage of the item index.

pub mod error;
pub mod lock;
pub mod repository;

pub use error::StoreError;
pub use lock::IndexLock;
pub use repository::{CsvIndexStore, IndexRepository, ZERO_TIME};
