//! Access to a bucket's segments container.
//!
//! Wraps a [`SwiftBackend`] with the handful of patterns the multipart
//! handlers repeat: paged listings, marker lookups that map "not found" to
//! the right client error, and deletes that absorb already-gone objects.

use std::sync::Arc;

use bytes::Bytes;

use crate::backend::{BackendError, ListQuery, ObjectMeta, PutHeaders, SegmentInfo, SwiftBackend};
use crate::error::{GatewayError, GatewayResult};

/// Page size used when walking a full listing.
const LIST_PAGE_SIZE: usize = 1000;

/// What a missing object in the segments container means to the client.
#[derive(Debug, Clone, Copy)]
pub enum MissingAs {
    /// The upload marker is gone, so the upload does not exist.
    NoSuchUpload,
    /// A copy source object is gone.
    NoSuchKey,
}

/// A bucket's segments container.
pub struct SegmentStore {
    backend: Arc<dyn SwiftBackend>,
    container: String,
}

impl std::fmt::Debug for SegmentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SegmentStore")
            .field("container", &self.container)
            .finish_non_exhaustive()
    }
}

impl SegmentStore {
    /// Create a store view over the given container.
    pub fn new(backend: Arc<dyn SwiftBackend>, container: impl Into<String>) -> Self {
        Self {
            backend,
            container: container.into(),
        }
    }

    /// The container name this store operates on.
    #[must_use]
    pub fn container(&self) -> &str {
        &self.container
    }

    /// Fetch one listing page. A missing container lists as empty: the
    /// container only exists once an upload has been initiated.
    pub async fn list(
        &self,
        prefix: Option<&str>,
        marker: Option<&str>,
        limit: usize,
    ) -> GatewayResult<Vec<SegmentInfo>> {
        let query = ListQuery {
            prefix: prefix.map(str::to_string),
            marker: marker.map(str::to_string),
            limit,
        };
        match self.backend.list_container(&self.container, &query).await {
            Ok(entries) => Ok(entries),
            Err(BackendError::NotFound) => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    /// Walk the full listing under a prefix, following pagination,
    /// optionally starting after a marker.
    pub async fn list_all(
        &self,
        prefix: &str,
        start_after: Option<&str>,
    ) -> GatewayResult<Vec<SegmentInfo>> {
        let mut entries: Vec<SegmentInfo> = Vec::new();
        let mut marker: Option<String> = start_after.map(str::to_string);

        loop {
            let page = self
                .list(Some(prefix), marker.as_deref(), LIST_PAGE_SIZE)
                .await?;
            let full_page = page.len() == LIST_PAGE_SIZE;
            entries.extend(page);
            if !full_page {
                return Ok(entries);
            }
            marker = entries.last().map(|e| e.name.clone());
        }
    }

    /// Fetch object metadata, mapping a missing object per `missing_as`.
    pub async fn head(
        &self,
        object: &str,
        missing_as: MissingAs,
        resource: &str,
    ) -> GatewayResult<ObjectMeta> {
        match self.backend.head_object(&self.container, object).await {
            Ok(meta) => Ok(meta),
            Err(BackendError::NotFound) => Err(match missing_as {
                MissingAs::NoSuchUpload => GatewayError::NoSuchUpload {
                    upload_id: resource.to_string(),
                },
                MissingAs::NoSuchKey => GatewayError::NoSuchKey {
                    key: resource.to_string(),
                },
            }),
            Err(err) => Err(err.into()),
        }
    }

    /// Write an object. Returns the stored ETag, unquoted.
    pub async fn put(
        &self,
        object: &str,
        body: Bytes,
        headers: PutHeaders,
    ) -> GatewayResult<String> {
        Ok(self
            .backend
            .put_object(&self.container, object, body, headers)
            .await?)
    }

    /// Delete an object, absorbing "already gone".
    pub async fn delete(&self, object: &str) -> GatewayResult<()> {
        match self.backend.delete_object(&self.container, object).await {
            Ok(()) | Err(BackendError::NotFound) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
