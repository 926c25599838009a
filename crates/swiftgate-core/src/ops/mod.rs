//! Operation handlers for the gateway.
//!
//! Each handler lives next to its protocol family; [`SwiftGateway::handle`]
//! is the single dispatch point over the closed request enum.

mod delete;
mod multipart;

use swiftgate_model::request::{S3MultipartRequest, S3MultipartResponse};

use crate::error::GatewayResult;
use crate::gateway::SwiftGateway;

impl SwiftGateway {
    /// Execute one gateway operation.
    ///
    /// # Errors
    ///
    /// Returns the operation's [`crate::GatewayError`]; callers convert it to
    /// an S3 error document with
    /// [`crate::GatewayError::into_s3_error`].
    pub async fn handle(&self, request: S3MultipartRequest) -> GatewayResult<S3MultipartResponse> {
        let operation = request.operation();
        tracing::debug!(operation = %operation, "dispatching gateway operation");

        match request {
            S3MultipartRequest::CreateMultipartUpload(input) => self
                .create_multipart_upload(input)
                .await
                .map(S3MultipartResponse::CreateMultipartUpload),
            S3MultipartRequest::UploadPart(input) => self
                .upload_part(input)
                .await
                .map(S3MultipartResponse::UploadPart),
            S3MultipartRequest::UploadPartCopy(input) => self
                .upload_part_copy(input)
                .await
                .map(S3MultipartResponse::UploadPartCopy),
            S3MultipartRequest::ListParts(input) => self
                .list_parts(input)
                .await
                .map(S3MultipartResponse::ListParts),
            S3MultipartRequest::ListMultipartUploads(input) => self
                .list_multipart_uploads(input)
                .await
                .map(S3MultipartResponse::ListMultipartUploads),
            S3MultipartRequest::CompleteMultipartUpload(input) => self
                .complete_multipart_upload(input)
                .await
                .map(S3MultipartResponse::CompleteMultipartUpload),
            S3MultipartRequest::AbortMultipartUpload(input) => self
                .abort_multipart_upload(input)
                .await
                .map(S3MultipartResponse::AbortMultipartUpload),
            S3MultipartRequest::DeleteObjects(input) => self
                .delete_objects(input)
                .await
                .map(S3MultipartResponse::DeleteObjects),
        }
    }
}
