//! In-memory [`SwiftBackend`] used by unit and integration tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use dashmap::DashMap;

use crate::backend::{
    BackendError, CascadeDeleteReceipt, ListQuery, ManifestReceipt, ObjectMeta, PutHeaders,
    SegmentInfo, SwiftBackend,
};
use crate::manifest::ManifestSegment;
use crate::utils::md5_hex;

#[derive(Debug, Clone)]
struct StoredObject {
    bytes: Bytes,
    etag: String,
    content_type: Option<String>,
    metadata: std::collections::HashMap<String, String>,
    last_modified: chrono::DateTime<Utc>,
    /// Segment references, for objects written as manifests.
    manifest: Option<Vec<ManifestSegment>>,
}

/// An in-memory store with the subset of semantics the gateway relies on:
/// per-object atomic writes, lexicographic JSON listings, and manifest
/// validation against a minimum segment size.
///
/// The minimum segment size defaults to 1 byte so tests can use tiny parts;
/// [`InMemoryBackend::with_min_segment_size`] restores production-like
/// behavior.
#[derive(Debug)]
pub struct InMemoryBackend {
    containers: DashMap<String, BTreeMap<String, StoredObject>>,
    min_segment_size: u64,
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBackend {
    /// Create an empty store with a 1-byte minimum segment size.
    #[must_use]
    pub fn new() -> Self {
        Self {
            containers: DashMap::new(),
            min_segment_size: 1,
        }
    }

    /// Create an empty store enforcing the given minimum segment size.
    #[must_use]
    pub fn with_min_segment_size(min_segment_size: u64) -> Self {
        Self {
            containers: DashMap::new(),
            min_segment_size,
        }
    }

    fn meta_of(stored: &StoredObject) -> ObjectMeta {
        ObjectMeta {
            etag: stored.etag.clone(),
            content_length: stored.bytes.len() as u64,
            content_type: stored.content_type.clone(),
            metadata: stored.metadata.clone(),
            last_modified: stored.last_modified,
            manifest: stored.manifest.is_some(),
        }
    }

    /// Split a manifest segment path into `(container, object)`.
    fn split_segment_path(path: &str) -> Option<(&str, &str)> {
        path.strip_prefix('/').unwrap_or(path).split_once('/')
    }

    fn lookup_segment(&self, path: &str) -> Option<StoredObject> {
        let (container, object) = Self::split_segment_path(path)?;
        self.containers.get(container)?.get(object).cloned()
    }
}

#[async_trait]
impl SwiftBackend for InMemoryBackend {
    async fn head_container(&self, container: &str) -> Result<(), BackendError> {
        if self.containers.contains_key(container) {
            Ok(())
        } else {
            Err(BackendError::NotFound)
        }
    }

    async fn create_container(&self, container: &str) -> Result<(), BackendError> {
        self.containers.entry(container.to_string()).or_default();
        Ok(())
    }

    async fn head_object(&self, container: &str, object: &str) -> Result<ObjectMeta, BackendError> {
        let objects = self.containers.get(container).ok_or(BackendError::NotFound)?;
        let stored = objects.get(object).ok_or(BackendError::NotFound)?;
        Ok(Self::meta_of(stored))
    }

    async fn get_object(
        &self,
        container: &str,
        object: &str,
    ) -> Result<(ObjectMeta, Bytes), BackendError> {
        let objects = self.containers.get(container).ok_or(BackendError::NotFound)?;
        let stored = objects.get(object).ok_or(BackendError::NotFound)?;
        Ok((Self::meta_of(stored), stored.bytes.clone()))
    }

    async fn put_object(
        &self,
        container: &str,
        object: &str,
        body: Bytes,
        headers: PutHeaders,
    ) -> Result<String, BackendError> {
        let etag = md5_hex(&body);
        let stored = StoredObject {
            bytes: body,
            etag: etag.clone(),
            content_type: headers.content_type,
            metadata: headers.metadata,
            last_modified: Utc::now(),
            manifest: None,
        };
        self.containers
            .entry(container.to_string())
            .or_default()
            .insert(object.to_string(), stored);
        Ok(etag)
    }

    async fn delete_object(&self, container: &str, object: &str) -> Result<(), BackendError> {
        let mut objects = self
            .containers
            .get_mut(container)
            .ok_or(BackendError::NotFound)?;
        objects.remove(object).ok_or(BackendError::NotFound)?;
        Ok(())
    }

    async fn delete_object_cascade(
        &self,
        container: &str,
        object: &str,
    ) -> Result<CascadeDeleteReceipt, BackendError> {
        let segments = {
            let objects = self.containers.get(container).ok_or(BackendError::NotFound)?;
            let stored = objects.get(object).ok_or(BackendError::NotFound)?;
            stored.manifest.clone()
        };

        // Missing segments are not an error: the delete is idempotent.
        if let Some(segments) = segments {
            for segment in segments {
                if let Some((seg_container, seg_object)) =
                    Self::split_segment_path(&segment.path)
                {
                    if let Some(mut objects) = self.containers.get_mut(seg_container) {
                        objects.remove(seg_object);
                    }
                }
            }
        }

        if let Some(mut objects) = self.containers.get_mut(container) {
            objects.remove(object);
        }

        Ok(CascadeDeleteReceipt {
            response_status: "200 OK".to_string(),
            errors: Vec::new(),
        })
    }

    async fn list_container(
        &self,
        container: &str,
        query: &ListQuery,
    ) -> Result<Vec<SegmentInfo>, BackendError> {
        let objects = self.containers.get(container).ok_or(BackendError::NotFound)?;

        let entries = objects
            .iter()
            .filter(|(name, _)| match &query.prefix {
                Some(prefix) => name.starts_with(prefix.as_str()),
                None => true,
            })
            .filter(|(name, _)| match &query.marker {
                Some(marker) => name.as_str() > marker.as_str(),
                None => true,
            })
            .take(query.limit)
            .map(|(name, stored)| SegmentInfo {
                name: name.clone(),
                hash: stored.etag.clone(),
                bytes: stored.bytes.len() as u64,
                last_modified: stored.last_modified,
            })
            .collect();

        Ok(entries)
    }

    async fn put_manifest(
        &self,
        container: &str,
        object: &str,
        segments: &[ManifestSegment],
        headers: PutHeaders,
    ) -> Result<ManifestReceipt, BackendError> {
        let mut errors = Vec::new();
        let mut resolved = Vec::with_capacity(segments.len());

        for (index, segment) in segments.iter().enumerate() {
            let Some(stored) = self.lookup_segment(&segment.path) else {
                errors.push((segment.path.clone(), "404 Not Found".to_string()));
                continue;
            };
            if stored.etag != segment.etag {
                errors.push((segment.path.clone(), "412 Precondition Failed".to_string()));
                continue;
            }
            let is_last = index == segments.len() - 1;
            if !is_last && (stored.bytes.len() as u64) < self.min_segment_size {
                return Err(BackendError::SegmentTooSmall(format!(
                    "{}: segment size must be at least {} bytes",
                    segment.path, self.min_segment_size
                )));
            }
            resolved.push(stored);
        }

        if !errors.is_empty() {
            return Ok(ManifestReceipt {
                etag: String::new(),
                response_status: "400 Bad Request".to_string(),
                errors,
            });
        }

        // Materialize the concatenation so reads need no manifest support.
        let mut body = Vec::new();
        let mut etag_concat = String::new();
        for stored in &resolved {
            body.extend_from_slice(&stored.bytes);
            etag_concat.push_str(&stored.etag);
        }
        let manifest_etag = md5_hex(etag_concat.as_bytes());

        let stored = StoredObject {
            bytes: Bytes::from(body),
            etag: manifest_etag.clone(),
            content_type: headers.content_type,
            metadata: headers.metadata,
            last_modified: Utc::now(),
            manifest: Some(segments.to_vec()),
        };
        self.containers
            .entry(container.to_string())
            .or_default()
            .insert(object.to_string(), stored);

        Ok(ManifestReceipt {
            etag: manifest_etag,
            response_status: "201 Created".to_string(),
            errors: Vec::new(),
        })
    }
}
