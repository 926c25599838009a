//! S3 name validation and the mapping onto store containers and objects.
//!
//! The mapping is pure string manipulation: a bucket maps to a container of
//! the same name, parts and markers live in a reserved `<bucket>+segments`
//! container, and all locations fall under a single configured account.

use crate::error::{GatewayError, GatewayResult};

/// Suffix of the container holding markers and part objects for a bucket.
pub const SEGMENTS_SUFFIX: &str = "+segments";

/// Maximum object key length in bytes.
pub const MAX_KEY_LENGTH: usize = 1024;

const MIN_BUCKET_NAME_LENGTH: usize = 3;
const MAX_BUCKET_NAME_LENGTH: usize = 63;

/// A fully resolved store location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectLocation {
    /// The store account.
    pub account: String,
    /// The container name.
    pub container: String,
    /// The object name.
    pub object: String,
}

/// Validate an S3 bucket name.
///
/// Enforces the subset of the S3 naming rules the gateway relies on: length
/// 3 to 63, lowercase letters, digits, hyphens and dots only, starting and
/// ending with a letter or digit. The `+` used by the segments-container
/// suffix can therefore never appear in a client-supplied name.
///
/// # Errors
///
/// Returns `GatewayError::InvalidBucketName` if the name is not valid.
pub fn validate_bucket_name(name: &str) -> GatewayResult<()> {
    let invalid = || GatewayError::InvalidBucketName {
        name: name.to_string(),
    };

    if name.len() < MIN_BUCKET_NAME_LENGTH || name.len() > MAX_BUCKET_NAME_LENGTH {
        return Err(invalid());
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        return Err(invalid());
    }
    let first = name.as_bytes()[0];
    let last = name.as_bytes()[name.len() - 1];
    if !first.is_ascii_alphanumeric() || !last.is_ascii_alphanumeric() {
        return Err(invalid());
    }

    Ok(())
}

/// Validate an S3 object key.
///
/// # Errors
///
/// Returns `GatewayError::InvalidArgument` for an empty key and
/// `GatewayError::KeyTooLong` for a key over [`MAX_KEY_LENGTH`] bytes.
pub fn validate_key(key: &str) -> GatewayResult<()> {
    if key.is_empty() {
        return Err(GatewayError::InvalidArgument {
            message: "Object key cannot be empty".to_string(),
        });
    }
    if key.len() > MAX_KEY_LENGTH {
        return Err(GatewayError::KeyTooLong { length: key.len() });
    }
    Ok(())
}

/// Maps S3 bucket/key names onto store locations.
#[derive(Debug, Clone)]
pub struct PathTranslator {
    account: String,
}

impl PathTranslator {
    /// Create a translator for the given store account.
    #[must_use]
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
        }
    }

    /// The location of a regular object.
    #[must_use]
    pub fn object(&self, bucket: &str, key: &str) -> ObjectLocation {
        ObjectLocation {
            account: self.account.clone(),
            container: bucket.to_string(),
            object: key.to_string(),
        }
    }

    /// The container holding markers and parts for a bucket.
    #[must_use]
    pub fn segments_container(&self, bucket: &str) -> String {
        format!("{bucket}{SEGMENTS_SUFFIX}")
    }

    /// The name of the marker object recording an in-progress upload.
    #[must_use]
    pub fn upload_marker(&self, key: &str, upload_id: &str) -> String {
        format!("{key}/{upload_id}")
    }

    /// The name of a part object. Part numbers are not zero-padded, so part
    /// objects sort lexicographically, not numerically.
    #[must_use]
    pub fn part_object(&self, key: &str, upload_id: &str, part_number: i32) -> String {
        format!("{key}/{upload_id}/{part_number}")
    }
}
