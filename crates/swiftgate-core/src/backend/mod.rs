//! The outbound interface to the underlying object store.
//!
//! The gateway consumes the store as an opaque container/object API that
//! supports JSON container listings and large-object manifests. The
//! [`SwiftBackend`] trait captures exactly the calls the gateway makes;
//! [`memory::InMemoryBackend`] implements it for tests.

pub mod memory;

use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::manifest::ManifestSegment;

/// Errors surfaced by a [`SwiftBackend`].
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The container or object does not exist.
    #[error("not found")]
    NotFound,

    /// A manifest segment is smaller than the store's minimum segment size.
    /// The message is the store's own text and is passed to clients verbatim.
    #[error("{0}")]
    SegmentTooSmall(String),

    /// The store rejected the request with an HTTP status.
    #[error("backend returned status {status}: {message}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The store's error message.
        message: String,
    },

    /// The store could not be reached.
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// Metadata of a stored object, as returned by a HEAD request.
#[derive(Debug, Clone, Default)]
pub struct ObjectMeta {
    /// Content hash (MD5 hex digest, unquoted).
    pub etag: String,
    /// Object size in bytes.
    pub content_length: u64,
    /// The stored content type.
    pub content_type: Option<String>,
    /// User metadata, keyed without any header prefix.
    pub metadata: HashMap<String, String>,
    /// Last-modified timestamp.
    pub last_modified: DateTime<Utc>,
    /// Whether the object is a large-object manifest.
    pub manifest: bool,
}

/// One entry of a JSON container listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SegmentInfo {
    /// The object name.
    pub name: String,
    /// Content hash (MD5 hex digest, unquoted).
    pub hash: String,
    /// Object size in bytes.
    pub bytes: u64,
    /// Last-modified timestamp.
    pub last_modified: DateTime<Utc>,
}

/// Parameters of a container listing request.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    /// Only return names starting with this prefix.
    pub prefix: Option<String>,
    /// Only return names strictly greater than this marker.
    pub marker: Option<String>,
    /// Maximum number of entries to return.
    pub limit: usize,
}

/// Headers applied when writing an object.
#[derive(Debug, Clone, Default)]
pub struct PutHeaders {
    /// The content type to store.
    pub content_type: Option<String>,
    /// User metadata to store.
    pub metadata: HashMap<String, String>,
}

/// The store's response to a manifest write.
///
/// A manifest write validates every referenced segment; per-segment failures
/// come back as `(path, status)` pairs rather than failing the whole call.
#[derive(Debug, Clone, Default)]
pub struct ManifestReceipt {
    /// Hash of the concatenated segment hashes, unquoted.
    pub etag: String,
    /// The store's overall response status line (e.g. `"201 Created"`).
    pub response_status: String,
    /// Per-segment failures as `(path, status)` pairs.
    pub errors: Vec<(String, String)>,
}

/// The store's response to a cascading delete of a manifest object.
#[derive(Debug, Clone, Default)]
pub struct CascadeDeleteReceipt {
    /// The store's overall response status line.
    pub response_status: String,
    /// Per-segment failures as `(path, status)` pairs.
    pub errors: Vec<(String, String)>,
}

/// The object store the gateway talks to.
///
/// Every method is a single round trip. Implementations must provide
/// per-object atomicity for put/delete/overwrite; the gateway adds no
/// locking on top.
#[async_trait]
pub trait SwiftBackend: Send + Sync {
    /// Check that a container exists.
    async fn head_container(&self, container: &str) -> Result<(), BackendError>;

    /// Create a container. Creating an existing container succeeds.
    async fn create_container(&self, container: &str) -> Result<(), BackendError>;

    /// Fetch object metadata.
    async fn head_object(&self, container: &str, object: &str) -> Result<ObjectMeta, BackendError>;

    /// Fetch an object's metadata and bytes.
    async fn get_object(
        &self,
        container: &str,
        object: &str,
    ) -> Result<(ObjectMeta, Bytes), BackendError>;

    /// Write an object, replacing any existing one. Returns the stored ETag
    /// (MD5 hex digest, unquoted).
    async fn put_object(
        &self,
        container: &str,
        object: &str,
        body: Bytes,
        headers: PutHeaders,
    ) -> Result<String, BackendError>;

    /// Delete an object. Returns [`BackendError::NotFound`] if absent.
    async fn delete_object(&self, container: &str, object: &str) -> Result<(), BackendError>;

    /// Delete an object together with any segments its manifest references.
    async fn delete_object_cascade(
        &self,
        container: &str,
        object: &str,
    ) -> Result<CascadeDeleteReceipt, BackendError>;

    /// List a container as JSON entries, in lexicographic name order.
    async fn list_container(
        &self,
        container: &str,
        query: &ListQuery,
    ) -> Result<Vec<SegmentInfo>, BackendError>;

    /// Write a large-object manifest describing the destination object as
    /// the ordered concatenation of the given segments.
    async fn put_manifest(
        &self,
        container: &str,
        object: &str,
        segments: &[ManifestSegment],
        headers: PutHeaders,
    ) -> Result<ManifestReceipt, BackendError>;
}
