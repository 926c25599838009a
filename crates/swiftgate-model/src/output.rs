//! Output structures for the operations the gateway implements.
//!
//! All fields are `Option` (or lists), mirroring the looseness of the S3
//! RestXml protocol; the XML layer omits absent elements.

use crate::types::{
    CommonPrefix, CopyPartResult, DeleteError, DeletedObject, Initiator, MultipartUpload, Owner,
    Part,
};

/// Output of CreateMultipartUpload (`InitiateMultipartUploadResult`).
#[derive(Debug, Clone, Default)]
pub struct CreateMultipartUploadOutput {
    /// The destination bucket.
    pub bucket: Option<String>,
    /// The destination object key.
    pub key: Option<String>,
    /// The generated upload ID.
    pub upload_id: Option<String>,
}

/// Output of UploadPart. The ETag travels as a response header.
#[derive(Debug, Clone, Default)]
pub struct UploadPartOutput {
    /// The stored part's ETag (quoted MD5 hex digest).
    pub e_tag: Option<String>,
}

/// Output of UploadPartCopy (`CopyPartResult`).
#[derive(Debug, Clone, Default)]
pub struct UploadPartCopyOutput {
    /// The copy result element.
    pub copy_part_result: Option<CopyPartResult>,
}

/// Output of ListParts (`ListPartsResult`).
#[derive(Debug, Clone, Default)]
pub struct ListPartsOutput {
    /// The bucket.
    pub bucket: Option<String>,
    /// The object key.
    pub key: Option<String>,
    /// The upload ID.
    pub upload_id: Option<String>,
    /// The marker this page started after.
    pub part_number_marker: Option<String>,
    /// The marker to resume from when truncated.
    pub next_part_number_marker: Option<String>,
    /// The page size applied.
    pub max_parts: Option<i32>,
    /// Whether more parts remain.
    pub is_truncated: Option<bool>,
    /// The upload initiator.
    pub initiator: Option<Initiator>,
    /// The upload owner.
    pub owner: Option<Owner>,
    /// The storage class of the destination object.
    pub storage_class: Option<String>,
    /// The parts on this page, in ascending part-number order.
    pub parts: Vec<Part>,
}

/// Output of ListMultipartUploads (`ListMultipartUploadsResult`).
#[derive(Debug, Clone, Default)]
pub struct ListMultipartUploadsOutput {
    /// The bucket.
    pub bucket: Option<String>,
    /// The key marker this page started after.
    pub key_marker: Option<String>,
    /// The upload-id marker this page started after.
    pub upload_id_marker: Option<String>,
    /// The key marker to resume from when truncated.
    pub next_key_marker: Option<String>,
    /// The upload-id marker to resume from when truncated.
    pub next_upload_id_marker: Option<String>,
    /// The page size applied.
    pub max_uploads: Option<i32>,
    /// The delimiter used for grouping.
    pub delimiter: Option<String>,
    /// The prefix filter.
    pub prefix: Option<String>,
    /// Whether more uploads remain.
    pub is_truncated: Option<bool>,
    /// The encoding type echoed back.
    pub encoding_type: Option<String>,
    /// The uploads on this page.
    pub uploads: Vec<MultipartUpload>,
    /// Delimiter groups.
    pub common_prefixes: Vec<CommonPrefix>,
}

/// Output of CompleteMultipartUpload (`CompleteMultipartUploadResult`).
#[derive(Debug, Clone, Default)]
pub struct CompleteMultipartUploadOutput {
    /// The URI of the completed object.
    pub location: Option<String>,
    /// The destination bucket.
    pub bucket: Option<String>,
    /// The destination object key.
    pub key: Option<String>,
    /// The composite ETag (`"<md5-of-part-hashes>-<partCount>"`).
    pub e_tag: Option<String>,
}

/// Output of AbortMultipartUpload. An empty 204 response.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbortMultipartUploadOutput {}

/// Output of DeleteObjects (`DeleteResult`).
#[derive(Debug, Clone, Default)]
pub struct DeleteObjectsOutput {
    /// Successfully deleted keys, omitted in quiet mode.
    pub deleted: Vec<DeletedObject>,
    /// Per-key failures, in request order relative to `deleted`.
    pub errors: Vec<DeleteError>,
}
