//! Shared utilities for the gateway.
//!
//! Provides ID generation, ETag helpers, numeric query-parameter validation,
//! Content-MD5 verification, conditional-request matching, and copy-source
//! parsing.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use md5::{Digest, Md5};
use rand::RngExt;
use uuid::Uuid;

use crate::error::{GatewayError, GatewayResult};

// ---------------------------------------------------------------------------
// ID generation
// ---------------------------------------------------------------------------

/// Generate a random upload ID.
///
/// Produces a 64-character hex string. Hex keeps part and marker object
/// names safely inside the store's name character set and gives uploads a
/// stable lexicographic order for listing markers.
///
/// # Examples
///
/// ```
/// use swiftgate_core::utils::generate_upload_id;
///
/// let id = generate_upload_id();
/// assert_eq!(id.len(), 64);
/// assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
pub fn generate_upload_id() -> String {
    let mut rng = rand::rng();
    let mut buf = [0u8; 32];
    rng.fill(&mut buf);
    hex::encode(buf)
}

/// Generate a unique request ID (UUID v4 without dashes).
///
/// # Examples
///
/// ```
/// use swiftgate_core::utils::generate_request_id;
///
/// let id = generate_request_id();
/// assert_eq!(id.len(), 32);
/// assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
pub fn generate_request_id() -> String {
    Uuid::new_v4().simple().to_string()
}

// ---------------------------------------------------------------------------
// ETag helpers
// ---------------------------------------------------------------------------

/// Compute the MD5 hex digest of a byte slice.
#[must_use]
pub fn md5_hex(data: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Wrap an ETag value in double quotes, unless it already is.
#[must_use]
pub fn quote_etag(etag: &str) -> String {
    if etag.starts_with('"') && etag.ends_with('"') {
        etag.to_string()
    } else {
        format!("\"{etag}\"")
    }
}

/// Normalize an ETag by stripping surrounding double quotes.
#[must_use]
pub fn normalize_etag(etag: &str) -> &str {
    etag.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(etag)
}

// ---------------------------------------------------------------------------
// Numeric query parameters
// ---------------------------------------------------------------------------

/// Parse a numeric query parameter that must fit in a 32-bit signed integer.
///
/// Values that are non-numeric, negative, or above `i32::MAX` are rejected;
/// anything a 32-bit counter cannot represent is meaningless as a marker or
/// page size.
///
/// # Errors
///
/// Returns `GatewayError::InvalidArgument` with the parameter name in the
/// message.
pub fn parse_int_param(name: &str, value: &str) -> GatewayResult<i32> {
    let invalid = || GatewayError::InvalidArgument {
        message: format!("Provided {name} not an integer or within integer range"),
    };

    let n = value.parse::<i64>().map_err(|_| invalid())?;
    if n < 0 || n > i64::from(i32::MAX) {
        return Err(invalid());
    }
    #[allow(clippy::cast_possible_truncation)]
    Ok(n as i32)
}

// ---------------------------------------------------------------------------
// Content-MD5 verification
// ---------------------------------------------------------------------------

/// Verify a request body against its `Content-MD5` header, if present.
///
/// # Errors
///
/// Returns `GatewayError::InvalidDigest` if the header is not valid base64
/// of a 16-byte digest, and `GatewayError::BadDigest` if the body hash does
/// not match.
pub fn check_content_md5(content_md5: Option<&str>, body: &[u8]) -> GatewayResult<()> {
    let Some(header) = content_md5 else {
        return Ok(());
    };

    let claimed = BASE64_STANDARD
        .decode(header)
        .map_err(|_| GatewayError::InvalidDigest)?;
    if claimed.len() != 16 {
        return Err(GatewayError::InvalidDigest);
    }

    let mut hasher = Md5::new();
    hasher.update(body);
    if hasher.finalize().as_slice() != claimed.as_slice() {
        return Err(GatewayError::BadDigest);
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Conditional request helpers
// ---------------------------------------------------------------------------

/// Check whether the given ETag satisfies an `If-Match` condition.
///
/// The `if_match` value may be `"*"` (matches any ETag) or a quoted ETag
/// value.
#[must_use]
pub fn is_valid_if_match(etag: &str, if_match: &str) -> bool {
    if if_match == "*" {
        return true;
    }
    normalize_etag(etag) == normalize_etag(if_match)
}

/// Check whether the given ETag satisfies an `If-None-Match` condition.
///
/// Returns `true` if the request may proceed (i.e. the ETag does *not*
/// match).
#[must_use]
pub fn is_valid_if_none_match(etag: &str, if_none_match: &str) -> bool {
    if if_none_match == "*" {
        return false;
    }
    normalize_etag(etag) != normalize_etag(if_none_match)
}

// ---------------------------------------------------------------------------
// Copy source parsing
// ---------------------------------------------------------------------------

/// Parse the `x-amz-copy-source` header value into bucket, key, and optional
/// version ID components.
///
/// The copy source header uses the format `/bucket/key` or `bucket/key`, with
/// an optional `?versionId=<vid>` suffix. Percent-encoded characters in the
/// key are decoded.
///
/// # Errors
///
/// Returns `GatewayError::InvalidArgument` if the copy source string is
/// empty or malformed.
pub fn parse_copy_source(source: &str) -> GatewayResult<(String, String, Option<String>)> {
    let source = source.strip_prefix('/').unwrap_or(source);

    // Split off the versionId query parameter if present.
    let (path, version_id) = if let Some((p, query)) = source.split_once('?') {
        let vid = query
            .split('&')
            .find_map(|param| param.strip_prefix("versionId="))
            .map(String::from);
        (p, vid)
    } else {
        (source, None)
    };

    let (bucket, key) = path
        .split_once('/')
        .ok_or_else(|| GatewayError::InvalidArgument {
            message: "Invalid copy source: must be in the format bucket/key".to_owned(),
        })?;

    if bucket.is_empty() || key.is_empty() {
        return Err(GatewayError::InvalidArgument {
            message: "Invalid copy source: bucket and key must not be empty".to_owned(),
        });
    }

    let decoded_key = percent_encoding::percent_decode_str(key)
        .decode_utf8()
        .map_err(|_| GatewayError::InvalidArgument {
            message: "Invalid copy source: key contains invalid UTF-8".to_owned(),
        })?
        .into_owned();

    Ok((bucket.to_owned(), decoded_key, version_id))
}

/// Parse an `x-amz-copy-source-range` header value against the source size.
///
/// Only the `bytes=N-M` form is accepted. The end offset may exceed the last
/// byte by exactly one (a client computing `start + length` is tolerated);
/// the range is clamped to the object. Returns an inclusive `(start, end)`
/// tuple.
///
/// # Errors
///
/// Returns `GatewayError::InvalidRange` for any other malformed or
/// unsatisfiable range.
pub fn parse_copy_range(range: &str, size: u64) -> GatewayResult<(u64, u64)> {
    let invalid = || GatewayError::InvalidRange {
        message: format!("Range specified is not valid for source object of size: {size}"),
    };

    let spec = range.strip_prefix("bytes=").ok_or_else(invalid)?;
    let (start_str, end_str) = spec.split_once('-').ok_or_else(invalid)?;
    let start: u64 = start_str.parse().map_err(|_| invalid())?;
    let end: u64 = end_str.parse().map_err(|_| invalid())?;

    if start > end || start >= size || end > size {
        return Err(invalid());
    }

    Ok((start, end.min(size - 1)))
}
