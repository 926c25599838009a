//! Typed request and response envelopes for single-point dispatch.

use crate::input::{
    AbortMultipartUploadInput, CompleteMultipartUploadInput, CreateMultipartUploadInput,
    DeleteObjectsInput, ListMultipartUploadsInput, ListPartsInput, UploadPartCopyInput,
    UploadPartInput,
};
use crate::operations::S3Operation;
use crate::output::{
    AbortMultipartUploadOutput, CompleteMultipartUploadOutput, CreateMultipartUploadOutput,
    DeleteObjectsOutput, ListMultipartUploadsOutput, ListPartsOutput, UploadPartCopyOutput,
    UploadPartOutput,
};

/// A fully parsed inbound request, one variant per [`S3Operation`].
///
/// Built once by the transport adapter after routing; the gateway dispatches
/// over it with a single `match`.
#[derive(Debug, Clone)]
pub enum S3MultipartRequest {
    /// CreateMultipartUpload request.
    CreateMultipartUpload(CreateMultipartUploadInput),
    /// UploadPart request.
    UploadPart(UploadPartInput),
    /// UploadPartCopy request.
    UploadPartCopy(UploadPartCopyInput),
    /// ListParts request.
    ListParts(ListPartsInput),
    /// ListMultipartUploads request.
    ListMultipartUploads(ListMultipartUploadsInput),
    /// CompleteMultipartUpload request.
    CompleteMultipartUpload(CompleteMultipartUploadInput),
    /// AbortMultipartUpload request.
    AbortMultipartUpload(AbortMultipartUploadInput),
    /// DeleteObjects request.
    DeleteObjects(DeleteObjectsInput),
}

impl S3MultipartRequest {
    /// The operation this request carries.
    #[must_use]
    pub fn operation(&self) -> S3Operation {
        match self {
            Self::CreateMultipartUpload(_) => S3Operation::CreateMultipartUpload,
            Self::UploadPart(_) => S3Operation::UploadPart,
            Self::UploadPartCopy(_) => S3Operation::UploadPartCopy,
            Self::ListParts(_) => S3Operation::ListParts,
            Self::ListMultipartUploads(_) => S3Operation::ListMultipartUploads,
            Self::CompleteMultipartUpload(_) => S3Operation::CompleteMultipartUpload,
            Self::AbortMultipartUpload(_) => S3Operation::AbortMultipartUpload,
            Self::DeleteObjects(_) => S3Operation::DeleteObjects,
        }
    }
}

/// The typed response to an [`S3MultipartRequest`].
#[derive(Debug, Clone)]
pub enum S3MultipartResponse {
    /// CreateMultipartUpload response.
    CreateMultipartUpload(CreateMultipartUploadOutput),
    /// UploadPart response.
    UploadPart(UploadPartOutput),
    /// UploadPartCopy response.
    UploadPartCopy(UploadPartCopyOutput),
    /// ListParts response.
    ListParts(ListPartsOutput),
    /// ListMultipartUploads response.
    ListMultipartUploads(ListMultipartUploadsOutput),
    /// CompleteMultipartUpload response.
    CompleteMultipartUpload(CompleteMultipartUploadOutput),
    /// AbortMultipartUpload response.
    AbortMultipartUpload(AbortMultipartUploadOutput),
    /// DeleteObjects response.
    DeleteObjects(DeleteObjectsOutput),
}
