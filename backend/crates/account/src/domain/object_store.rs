//! Object Storage Trait
//!
//! Narrow contract for durable blob storage (profile images). The
//! local-disk implementation lives in the infrastructure layer.

use crate::error::AccountResult;

/// Blob storage port
#[trait_variant::make(ObjectStore: Send)]
pub trait LocalObjectStore {
    /// Store a blob at the given path, replacing any existing object
    async fn put(&self, path: &str, bytes: Vec<u8>) -> AccountResult<()>;

    /// Delete the object at the given path; absent objects are a no-op
    async fn delete(&self, path: &str) -> AccountResult<()>;
}
