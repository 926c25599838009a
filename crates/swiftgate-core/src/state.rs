//! Explicit multipart upload state.
//!
//! An upload's state is scattered across store objects: a marker records the
//! initiation, part objects accumulate next to it, and completion replaces
//! them with a manifest at the destination key. [`UploadState::query`] is the
//! single place that turns those observations into a tagged state; handlers
//! match on the result instead of re-deriving it from raw 404s.

use std::sync::Arc;

use crate::backend::{BackendError, ObjectMeta, SwiftBackend};
use crate::error::GatewayResult;
use crate::paths::PathTranslator;
use crate::segments::SegmentStore;

/// The lifecycle state of one multipart upload.
#[derive(Debug, Clone)]
pub enum UploadState {
    /// No marker and no completed object: the upload id is unknown here.
    Uninitiated,
    /// The marker exists; parts may be uploaded, listed, completed, aborted.
    Active {
        /// The marker object's metadata (holds the initiation headers).
        marker: ObjectMeta,
        /// Number of part objects currently stored.
        part_count: usize,
    },
    /// The destination key holds a manifest; the upload has been completed.
    Completed {
        /// The destination object's metadata.
        manifest: ObjectMeta,
    },
}

impl UploadState {
    /// Observe the store and classify the upload.
    ///
    /// # Errors
    ///
    /// Propagates backend failures other than "not found".
    pub async fn query(
        backend: &Arc<dyn SwiftBackend>,
        translator: &PathTranslator,
        bucket: &str,
        key: &str,
        upload_id: &str,
    ) -> GatewayResult<Self> {
        let store = SegmentStore::new(backend.clone(), translator.segments_container(bucket));
        let marker_name = translator.upload_marker(key, upload_id);

        match backend.head_object(store.container(), &marker_name).await {
            Ok(marker) => {
                let prefix = format!("{marker_name}/");
                let part_count = store.list_all(&prefix, None).await?.len();
                Ok(Self::Active { marker, part_count })
            }
            Err(BackendError::NotFound) => {
                match backend.head_object(bucket, key).await {
                    Ok(meta) if meta.manifest => Ok(Self::Completed { manifest: meta }),
                    Ok(_) | Err(BackendError::NotFound) => Ok(Self::Uninitiated),
                    Err(err) => Err(err.into()),
                }
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Whether parts may still be uploaded or the upload completed.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }
}
