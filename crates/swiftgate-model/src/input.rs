//! Input structures for the operations the gateway implements.
//!
//! Path parameters (bucket, key, uploadId, partNumber) are required fields;
//! optional HTTP headers and query parameters stay `Option`. Query parameters
//! that S3 validates as 32-bit integers (`max-parts`, `max-uploads`,
//! `part-number-marker`) are carried as raw strings so the gateway can reject
//! non-numeric and overflowing values itself.

use std::collections::HashMap;

use bytes::Bytes;
use chrono::{DateTime, Utc};

/// Input for CreateMultipartUpload.
#[derive(Debug, Clone, Default)]
pub struct CreateMultipartUploadInput {
    /// The destination bucket.
    pub bucket: String,
    /// The destination object key.
    pub key: String,
    /// HTTP header: `Content-Type`, recorded at initiate time and applied to
    /// the completed object.
    pub content_type: Option<String>,
    /// HTTP headers: `x-amz-meta-*` user metadata, keyed without the prefix.
    pub metadata: HashMap<String, String>,
}

/// Input for UploadPart.
#[derive(Debug, Clone, Default)]
pub struct UploadPartInput {
    /// The destination bucket.
    pub bucket: String,
    /// The destination object key.
    pub key: String,
    /// Query parameter: `uploadId`.
    pub upload_id: String,
    /// Query parameter: `partNumber` (raw, validated by the gateway).
    pub part_number: String,
    /// HTTP header: `Content-MD5` (base64), checked against the body.
    pub content_md5: Option<String>,
    /// The part payload.
    pub body: Bytes,
}

/// Input for UploadPartCopy.
#[derive(Debug, Clone, Default)]
pub struct UploadPartCopyInput {
    /// The destination bucket.
    pub bucket: String,
    /// The destination object key.
    pub key: String,
    /// Query parameter: `uploadId`.
    pub upload_id: String,
    /// Query parameter: `partNumber` (raw, validated by the gateway).
    pub part_number: String,
    /// HTTP header: `x-amz-copy-source` (`bucket/key`, percent-encoded,
    /// optionally with `?versionId=`).
    pub copy_source: String,
    /// HTTP header: `x-amz-copy-source-range`.
    pub copy_source_range: Option<String>,
    /// HTTP header: `x-amz-copy-source-if-match`.
    pub copy_source_if_match: Option<String>,
    /// HTTP header: `x-amz-copy-source-if-none-match`.
    pub copy_source_if_none_match: Option<String>,
    /// HTTP header: `x-amz-copy-source-if-modified-since`.
    pub copy_source_if_modified_since: Option<DateTime<Utc>>,
    /// HTTP header: `x-amz-copy-source-if-unmodified-since`.
    pub copy_source_if_unmodified_since: Option<DateTime<Utc>>,
}

/// Input for ListParts.
#[derive(Debug, Clone, Default)]
pub struct ListPartsInput {
    /// The bucket.
    pub bucket: String,
    /// The object key.
    pub key: String,
    /// Query parameter: `uploadId`.
    pub upload_id: String,
    /// Query parameter: `part-number-marker` (raw, validated by the gateway).
    pub part_number_marker: Option<String>,
    /// Query parameter: `max-parts` (raw, validated by the gateway).
    pub max_parts: Option<String>,
}

/// Input for ListMultipartUploads.
#[derive(Debug, Clone, Default)]
pub struct ListMultipartUploadsInput {
    /// The bucket.
    pub bucket: String,
    /// Query parameter: `prefix`.
    pub prefix: Option<String>,
    /// Query parameter: `delimiter`.
    pub delimiter: Option<String>,
    /// Query parameter: `key-marker`.
    pub key_marker: Option<String>,
    /// Query parameter: `upload-id-marker`.
    pub upload_id_marker: Option<String>,
    /// Query parameter: `max-uploads` (raw, validated by the gateway).
    pub max_uploads: Option<String>,
    /// Query parameter: `encoding-type`.
    pub encoding_type: Option<String>,
}

/// Input for CompleteMultipartUpload.
///
/// The body is carried raw: Content-MD5 validation and XML parsing are part
/// of the operation (BadDigest / MalformedXML are operation outcomes).
#[derive(Debug, Clone, Default)]
pub struct CompleteMultipartUploadInput {
    /// The destination bucket.
    pub bucket: String,
    /// The destination object key.
    pub key: String,
    /// Query parameter: `uploadId`.
    pub upload_id: String,
    /// HTTP header: `Content-MD5` (base64), checked against the body.
    pub content_md5: Option<String>,
    /// The raw `CompleteMultipartUpload` XML body.
    pub body: Bytes,
}

/// Input for AbortMultipartUpload.
#[derive(Debug, Clone, Default)]
pub struct AbortMultipartUploadInput {
    /// The bucket.
    pub bucket: String,
    /// The object key.
    pub key: String,
    /// Query parameter: `uploadId`.
    pub upload_id: String,
}

/// Input for DeleteObjects.
///
/// As with Complete, the XML body is parsed inside the operation.
#[derive(Debug, Clone, Default)]
pub struct DeleteObjectsInput {
    /// The bucket.
    pub bucket: String,
    /// HTTP header: `Content-MD5` (base64), checked against the body.
    pub content_md5: Option<String>,
    /// The raw `Delete` XML body.
    pub body: Bytes,
}
