//! The closed set of S3 operations handled by the gateway.

/// All S3 operations the gateway implements.
///
/// The variant is resolved exactly once from the HTTP method and query
/// string; every later decision is a `match` over this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum S3Operation {
    /// The CreateMultipartUpload operation (`POST /key?uploads`).
    CreateMultipartUpload,
    /// The UploadPart operation (`PUT /key?partNumber=N&uploadId=X`).
    UploadPart,
    /// The UploadPartCopy operation (UploadPart with `x-amz-copy-source`).
    UploadPartCopy,
    /// The ListParts operation (`GET /key?uploadId=X`).
    ListParts,
    /// The ListMultipartUploads operation (`GET /?uploads`).
    ListMultipartUploads,
    /// The CompleteMultipartUpload operation (`POST /key?uploadId=X`).
    CompleteMultipartUpload,
    /// The AbortMultipartUpload operation (`DELETE /key?uploadId=X`).
    AbortMultipartUpload,
    /// The DeleteObjects operation (`POST /?delete`).
    DeleteObjects,
}

impl S3Operation {
    /// Returns the operation name as used in S3 server logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateMultipartUpload => "CreateMultipartUpload",
            Self::UploadPart => "UploadPart",
            Self::UploadPartCopy => "UploadPartCopy",
            Self::ListParts => "ListParts",
            Self::ListMultipartUploads => "ListMultipartUploads",
            Self::CompleteMultipartUpload => "CompleteMultipartUpload",
            Self::AbortMultipartUpload => "AbortMultipartUpload",
            Self::DeleteObjects => "DeleteObjects",
        }
    }

    /// Look up an operation by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "CreateMultipartUpload" => Some(Self::CreateMultipartUpload),
            "UploadPart" => Some(Self::UploadPart),
            "UploadPartCopy" => Some(Self::UploadPartCopy),
            "ListParts" => Some(Self::ListParts),
            "ListMultipartUploads" => Some(Self::ListMultipartUploads),
            "CompleteMultipartUpload" => Some(Self::CompleteMultipartUpload),
            "AbortMultipartUpload" => Some(Self::AbortMultipartUpload),
            "DeleteObjects" => Some(Self::DeleteObjects),
            _ => None,
        }
    }

    /// Resolve the operation from an HTTP method, the raw query string, and
    /// whether the request targets an object key or the bucket root.
    ///
    /// `has_copy_source` distinguishes UploadPartCopy from UploadPart; the
    /// header itself lives outside the query string.
    ///
    /// Returns `None` when the request does not match any multipart or
    /// multi-delete operation.
    #[must_use]
    pub fn resolve(
        method: &http::Method,
        query: &str,
        has_key: bool,
        has_copy_source: bool,
    ) -> Option<Self> {
        let has_param = |name: &str| {
            query
                .split('&')
                .any(|pair| pair == name || pair.starts_with(name) && pair[name.len()..].starts_with('='))
        };

        match *method {
            http::Method::POST if has_key && has_param("uploads") => {
                Some(Self::CreateMultipartUpload)
            }
            http::Method::POST if has_key && has_param("uploadId") => {
                Some(Self::CompleteMultipartUpload)
            }
            http::Method::POST if !has_key && has_param("delete") => Some(Self::DeleteObjects),
            http::Method::PUT
                if has_key && has_param("partNumber") && has_param("uploadId") =>
            {
                if has_copy_source {
                    Some(Self::UploadPartCopy)
                } else {
                    Some(Self::UploadPart)
                }
            }
            http::Method::GET if has_key && has_param("uploadId") => Some(Self::ListParts),
            http::Method::GET if !has_key && has_param("uploads") => {
                Some(Self::ListMultipartUploads)
            }
            http::Method::DELETE if has_key && has_param("uploadId") => {
                Some(Self::AbortMultipartUpload)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for S3Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
