//! Integration tests for the SwiftGate multipart gateway.
//!
//! Every test drives a full [`SwiftGateway`] over the in-memory backend
//! through the typed request enum, the same path a transport adapter takes.

use std::sync::Arc;
use std::sync::Once;

use bytes::Bytes;
use md5::{Digest, Md5};

use swiftgate_core::backend::SwiftBackend;
use swiftgate_core::backend::memory::InMemoryBackend;
use swiftgate_core::{GatewayConfig, SwiftGateway};
use swiftgate_model::input::{CreateMultipartUploadInput, UploadPartInput};
use swiftgate_model::request::{S3MultipartRequest, S3MultipartResponse};

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// A gateway over a fresh in-memory store, with direct store access for
/// assertions the protocol cannot express.
#[derive(Debug)]
pub struct TestEnv {
    /// The gateway under test.
    pub gateway: SwiftGateway,
    /// The store behind it.
    pub backend: Arc<InMemoryBackend>,
}

/// Spin up a gateway with the given buckets pre-created.
pub async fn setup(buckets: &[&str]) -> TestEnv {
    init_tracing();
    let backend = Arc::new(InMemoryBackend::new());
    for bucket in buckets {
        backend.create_container(bucket).await.expect("create container");
    }
    let gateway = SwiftGateway::new(GatewayConfig::default(), backend.clone());
    TestEnv { gateway, backend }
}

/// MD5 hex digest helper.
#[must_use]
pub fn md5_hex(data: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Initiate an upload and return its upload ID.
pub async fn initiate(env: &TestEnv, bucket: &str, key: &str) -> String {
    let response = env
        .gateway
        .handle(S3MultipartRequest::CreateMultipartUpload(
            CreateMultipartUploadInput {
                bucket: bucket.to_string(),
                key: key.to_string(),
                ..Default::default()
            },
        ))
        .await
        .expect("initiate upload");
    let S3MultipartResponse::CreateMultipartUpload(output) = response else {
        panic!("unexpected response variant");
    };
    output.upload_id.expect("upload id")
}

/// Upload one part and return its quoted ETag.
pub async fn upload_part(
    env: &TestEnv,
    bucket: &str,
    key: &str,
    upload_id: &str,
    part_number: i32,
    body: &[u8],
) -> String {
    let response = env
        .gateway
        .handle(S3MultipartRequest::UploadPart(UploadPartInput {
            bucket: bucket.to_string(),
            key: key.to_string(),
            upload_id: upload_id.to_string(),
            part_number: part_number.to_string(),
            content_md5: None,
            body: Bytes::copy_from_slice(body),
        }))
        .await
        .expect("upload part");
    let S3MultipartResponse::UploadPart(output) = response else {
        panic!("unexpected response variant");
    };
    output.e_tag.expect("part etag")
}

/// Build a `CompleteMultipartUpload` request body from `(partNumber, etag)`
/// pairs.
#[must_use]
pub fn complete_body(parts: &[(i32, &str)]) -> Bytes {
    let mut xml = String::from("<CompleteMultipartUpload>");
    for (number, etag) in parts {
        xml.push_str(&format!(
            "<Part><PartNumber>{number}</PartNumber><ETag>{etag}</ETag></Part>"
        ));
    }
    xml.push_str("</CompleteMultipartUpload>");
    Bytes::from(xml)
}

/// The composite ETag the gateway must return for the given part payloads,
/// quoted.
#[must_use]
pub fn expected_composite_etag(parts: &[&[u8]]) -> String {
    let mut concat = Vec::new();
    for part in parts {
        concat.extend(hex::decode(md5_hex(part)).expect("hex digest"));
    }
    format!("\"{}-{}\"", md5_hex(&concat), parts.len())
}

mod test_delete;
mod test_error;
mod test_listing;
