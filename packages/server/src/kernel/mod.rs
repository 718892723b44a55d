//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod image_storage;
pub mod pg_store;
pub mod test_dependencies;
pub mod traits;

pub use deps::{ServerDeps, TwilioAdapter};
pub use image_storage::LocalImageStorage;
pub use pg_store::PgStore;
pub use test_dependencies::{InMemoryStore, MockImageStorage, MockTwilio};
pub use traits::*;
