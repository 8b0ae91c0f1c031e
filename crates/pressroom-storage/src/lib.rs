//! Object-storage backends for archived source documents.
//!
//! The [`Storage`] trait is the archiver's only view of durable storage.
//! Backends: Google Cloud Storage (production) and the local filesystem
//! (development and tests).

pub mod factory;
pub mod gcs;
pub mod keys;
pub mod local;
pub mod traits;

pub use factory::create_storage;
pub use gcs::GcsStorage;
pub use keys::archive_key;
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};
