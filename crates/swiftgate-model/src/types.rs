//! Shared S3 structures used by multiple operations.

use chrono::{DateTime, Utc};

/// The owner of a bucket or upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Owner {
    /// The canonical user ID.
    pub id: Option<String>,
    /// The display name.
    pub display_name: Option<String>,
}

/// The initiator of a multipart upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Initiator {
    /// The canonical user ID.
    pub id: Option<String>,
    /// The display name.
    pub display_name: Option<String>,
}

/// A stored part, as reported by ListParts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Part {
    /// The part number.
    pub part_number: Option<i32>,
    /// When the part object was written.
    pub last_modified: Option<DateTime<Utc>>,
    /// The part's ETag (quoted MD5 hex digest).
    pub e_tag: Option<String>,
    /// The part size in bytes.
    pub size: Option<i64>,
}

/// An in-progress multipart upload, as reported by ListMultipartUploads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartUpload {
    /// The object key.
    pub key: Option<String>,
    /// The upload ID.
    pub upload_id: Option<String>,
    /// The upload initiator.
    pub initiator: Option<Initiator>,
    /// The upload owner.
    pub owner: Option<Owner>,
    /// The storage class of the destination object.
    pub storage_class: Option<String>,
    /// When the upload was initiated.
    pub initiated: Option<DateTime<Utc>>,
}

/// A prefix group produced by delimiter-based listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommonPrefix {
    /// The common prefix, including the trailing delimiter.
    pub prefix: Option<String>,
}

/// One part reference in a CompleteMultipartUpload request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletedPart {
    /// The part number claimed by the client.
    pub part_number: Option<i32>,
    /// The ETag returned when the part was uploaded.
    pub e_tag: Option<String>,
}

/// The parsed body of a CompleteMultipartUpload request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletedMultipartUpload {
    /// The claimed parts, in the order the client listed them.
    pub parts: Vec<CompletedPart>,
}

/// One object reference in a Delete request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectIdentifier {
    /// The object key.
    pub key: String,
    /// An optional version ID (version-specific deletes are not implemented).
    pub version_id: Option<String>,
}

/// The parsed body of a DeleteObjects request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delete {
    /// The objects to delete, in request order.
    pub objects: Vec<ObjectIdentifier>,
    /// Quiet mode suppresses per-key success entries in the response.
    pub quiet: Option<bool>,
}

/// A successfully deleted object in a DeleteResult document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletedObject {
    /// The object key.
    pub key: Option<String>,
}

/// A per-key failure in a DeleteResult document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteError {
    /// The object key.
    pub key: Option<String>,
    /// The S3 error code string.
    pub code: Option<String>,
    /// The error message.
    pub message: Option<String>,
}

/// The result element of an UploadPartCopy response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyPartResult {
    /// The copied part's ETag.
    pub e_tag: Option<String>,
    /// When the copied part was written.
    pub last_modified: Option<DateTime<Utc>>,
}
