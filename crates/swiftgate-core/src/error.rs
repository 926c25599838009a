//! Gateway error types.
//!
//! Provides [`GatewayError`], the closed set of failures the gateway
//! produces, and the conversion into the S3 error document sent to clients.
//! Backend failures are wrapped and only cross the client boundary as
//! `InternalError`.

use swiftgate_model::error::{S3Error, S3ErrorCode};

use crate::backend::BackendError;

/// Result alias used throughout the gateway.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors produced while handling a gateway operation.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    // -------------------------------------------------------------------------
    // Resource existence
    // -------------------------------------------------------------------------
    /// The bucket does not exist.
    #[error("bucket not found: {bucket}")]
    NoSuchBucket {
        /// The bucket name.
        bucket: String,
    },

    /// The object does not exist.
    #[error("key not found: {key}")]
    NoSuchKey {
        /// The object key.
        key: String,
    },

    /// The multipart upload does not exist or was already completed/aborted.
    #[error("upload not found: {upload_id}")]
    NoSuchUpload {
        /// The upload id.
        upload_id: String,
    },

    // -------------------------------------------------------------------------
    // Request validation
    // -------------------------------------------------------------------------
    /// A query parameter or header value is invalid.
    #[error("{message}")]
    InvalidArgument {
        /// The client-facing message.
        message: String,
    },

    /// The bucket name is not well formed.
    #[error("invalid bucket name: {name}")]
    InvalidBucketName {
        /// The offending name.
        name: String,
    },

    /// The object key exceeds the maximum length.
    #[error("key too long: {length} bytes")]
    KeyTooLong {
        /// The key length in bytes.
        length: usize,
    },

    /// A claimed part does not match a stored part.
    #[error("{message}")]
    InvalidPart {
        /// The client-facing message.
        message: String,
    },

    /// The part list is not in strictly ascending part-number order.
    #[error("parts are not ordered by part number")]
    InvalidPartOrder,

    /// A copy-source range does not fit the source object.
    #[error("{message}")]
    InvalidRange {
        /// The client-facing message.
        message: String,
    },

    /// The request is structurally invalid.
    #[error("{message}")]
    InvalidRequest {
        /// The client-facing message.
        message: String,
    },

    /// A non-final part is below the store's minimum segment size. The
    /// message is the backend's own text, passed through verbatim.
    #[error("{message}")]
    EntityTooSmall {
        /// The backend's message.
        message: String,
    },

    /// A copy-source precondition (If-Match etc.) was not met.
    #[error("precondition failed")]
    PreconditionFailed,

    /// The request body does not match the Content-MD5 header.
    #[error("content does not match the Content-MD5 header")]
    BadDigest,

    /// The Content-MD5 header is not valid base64.
    #[error("the Content-MD5 header is invalid")]
    InvalidDigest,

    /// The request body could not be parsed as XML.
    #[error("malformed XML: {detail}")]
    MalformedXml {
        /// Parser detail, logged but not sent to clients.
        detail: String,
    },

    /// The request requires a body and none was sent.
    #[error("missing request body")]
    MissingRequestBody,

    /// A delete entry has an empty key.
    #[error("user key must be specified")]
    UserKeyMustBeSpecified,

    /// The request uses a feature the gateway does not support.
    #[error("not implemented: {feature}")]
    NotImplemented {
        /// The unsupported feature.
        feature: String,
    },

    // -------------------------------------------------------------------------
    // Backend
    // -------------------------------------------------------------------------
    /// The backend failed in a way that has no client-facing mapping.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl GatewayError {
    /// The S3 error code this error maps to at the client boundary.
    #[must_use]
    pub fn error_code(&self) -> S3ErrorCode {
        match self {
            Self::NoSuchBucket { .. } => S3ErrorCode::NoSuchBucket,
            Self::NoSuchKey { .. } => S3ErrorCode::NoSuchKey,
            Self::NoSuchUpload { .. } => S3ErrorCode::NoSuchUpload,
            Self::InvalidArgument { .. } => S3ErrorCode::InvalidArgument,
            Self::InvalidBucketName { .. } => S3ErrorCode::InvalidBucketName,
            Self::KeyTooLong { .. } => S3ErrorCode::KeyTooLongError,
            Self::InvalidPart { .. } => S3ErrorCode::InvalidPart,
            Self::InvalidPartOrder => S3ErrorCode::InvalidPartOrder,
            Self::InvalidRange { .. } => S3ErrorCode::InvalidRange,
            Self::InvalidRequest { .. } => S3ErrorCode::InvalidRequest,
            Self::EntityTooSmall { .. } => S3ErrorCode::EntityTooSmall,
            Self::PreconditionFailed => S3ErrorCode::PreconditionFailed,
            Self::BadDigest => S3ErrorCode::BadDigest,
            Self::InvalidDigest => S3ErrorCode::InvalidDigest,
            Self::MalformedXml { .. } => S3ErrorCode::MalformedXML,
            Self::MissingRequestBody => S3ErrorCode::MissingRequestBodyError,
            Self::UserKeyMustBeSpecified => S3ErrorCode::UserKeyMustBeSpecified,
            Self::NotImplemented { .. } => S3ErrorCode::NotImplemented,
            Self::Backend(_) => S3ErrorCode::InternalError,
        }
    }

    /// Convert into the [`S3Error`] sent to clients.
    ///
    /// Backend failures are logged here and collapsed into a generic
    /// `InternalError` so store internals never leak to clients. Malformed
    /// XML keeps the parser detail out of the response for the same reason.
    #[must_use]
    pub fn into_s3_error(self) -> S3Error {
        match self {
            Self::Backend(err) => {
                tracing::error!(error = %err, "backend request failed");
                S3Error::new(S3ErrorCode::InternalError)
            }
            Self::MalformedXml { detail } => {
                tracing::debug!(detail = %detail, "rejecting malformed request body");
                S3Error::new(S3ErrorCode::MalformedXML)
            }
            other => {
                let code = other.error_code();
                S3Error::with_message(code, other.to_string())
            }
        }
    }
}
