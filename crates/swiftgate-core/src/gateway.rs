//! The gateway handle.

use std::sync::Arc;
use std::time::Duration;

use swiftgate_model::input::CompleteMultipartUploadInput;
use swiftgate_xml::{error_to_xml, to_xml};

use crate::backend::SwiftBackend;
use crate::config::GatewayConfig;
use crate::heartbeat::KeepaliveBody;
use crate::paths::PathTranslator;
use crate::segments::SegmentStore;
use crate::utils::generate_request_id;

/// The S3 multipart gateway.
///
/// Holds the configuration and the backend connection; all operations go
/// through [`SwiftGateway::handle`]. Cloning is cheap and clones share the
/// backend.
#[derive(Clone)]
pub struct SwiftGateway {
    pub(crate) config: Arc<GatewayConfig>,
    pub(crate) backend: Arc<dyn SwiftBackend>,
    pub(crate) translator: PathTranslator,
}

impl std::fmt::Debug for SwiftGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwiftGateway")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SwiftGateway {
    /// Create a gateway over the given backend.
    pub fn new(config: GatewayConfig, backend: Arc<dyn SwiftBackend>) -> Self {
        let translator = PathTranslator::new(config.account.clone());
        Self {
            config: Arc::new(config),
            backend,
            translator,
        }
    }

    /// The gateway configuration.
    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// The segments container view for a bucket.
    pub(crate) fn segment_store(&self, bucket: &str) -> SegmentStore {
        SegmentStore::new(
            self.backend.clone(),
            self.translator.segments_container(bucket),
        )
    }

    /// Run a completion and stream the response body with keep-alive bytes.
    ///
    /// The body yields one whitespace byte per heartbeat interval while the
    /// manifest write is in progress, then the XML document: the completion
    /// result on success, an S3 error document on failure. Callers must send
    /// the HTTP status line before the outcome is known, so the status is
    /// always 200 and errors travel inside the body.
    #[must_use]
    pub fn complete_with_keepalive(&self, input: CompleteMultipartUploadInput) -> KeepaliveBody {
        let gateway = self.clone();
        let interval = Duration::from_millis(self.config.heartbeat_interval_ms);

        let work = async move {
            let key = format!("{}/{}", input.bucket, input.key);
            match gateway.complete_multipart_upload(input).await {
                Ok(output) => to_xml("CompleteMultipartUploadResult", &output)
                    .unwrap_or_else(|err| {
                        tracing::error!(error = %err, "failed to serialize completion result");
                        error_to_xml(
                            "InternalError",
                            "Internal server error",
                            Some(&key),
                            &generate_request_id(),
                        )
                    }),
                Err(err) => {
                    let s3 = err.into_s3_error();
                    error_to_xml(
                        s3.code.as_str(),
                        &s3.message,
                        s3.resource.as_deref().or(Some(key.as_str())),
                        &generate_request_id(),
                    )
                }
            }
        };

        KeepaliveBody::new(work, interval)
    }
}
