//! DocVQA Storage Library
//!
//! Storage abstraction and backends for uploaded files. The API layer only
//! talks to the `Storage` trait; backends are S3-compatible object storage
//! for deployments and an in-memory store for tests.
//!
//! # Storage key format
//!
//! Keys are `{prefix}/{uuid}.{ext}`: a random v4 UUID plus the original
//! file extension. Key generation is independent of the original filename,
//! so concurrent uploads of identically named files never collide. Key
//! generation is centralized in the `keys` module so all backends stay
//! consistent.

pub mod factory;
pub mod keys;
pub mod memory;
pub mod s3;
pub mod traits;

pub use factory::create_storage;
pub use memory::MemoryStorage;
pub use s3::S3Storage;
pub use traits::{Storage, StorageBackend, StorageError, StorageResult, StoredObject};
