//! Manifest assembly for CompleteMultipartUpload.
//!
//! Validates the client's claimed part list against the stored part objects
//! and produces the ordered segment list written to the store, together with
//! the S3 composite ETag.

use std::collections::BTreeMap;

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};

use swiftgate_model::types::CompletedPart;

use crate::backend::SegmentInfo;
use crate::error::{GatewayError, GatewayResult};
use crate::utils::normalize_etag;

/// One entry of a large-object manifest, in the store's JSON format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManifestSegment {
    /// Segment location as `/container/object`.
    pub path: String,
    /// Expected MD5 hex digest of the segment, unquoted.
    pub etag: String,
    /// Expected segment size in bytes.
    pub size_bytes: u64,
}

/// A validated manifest, ready to be written to the store.
#[derive(Debug, Clone)]
pub struct Manifest {
    /// Segments in part-number order.
    pub segments: Vec<ManifestSegment>,
    /// The S3 composite ETag: `md5(concat(raw part digests))-<count>`,
    /// unquoted.
    pub etag: String,
}

/// Validate claimed parts against stored part objects and assemble the
/// manifest.
///
/// `stored` maps part numbers to the listing entries of the stored part
/// objects in the given segments container.
///
/// # Errors
///
/// - `InvalidRequest` if the claimed list is empty.
/// - `InvalidPartOrder` if part numbers are not strictly ascending.
/// - `InvalidPart` if a claimed part is missing a number or ETag, was never
///   uploaded, or its ETag does not match the stored object.
pub fn assemble(
    claimed: &[CompletedPart],
    stored: &BTreeMap<i32, SegmentInfo>,
    segments_container: &str,
) -> GatewayResult<Manifest> {
    if claimed.is_empty() {
        return Err(GatewayError::InvalidRequest {
            message: "You must specify at least one part".to_string(),
        });
    }

    let mut segments = Vec::with_capacity(claimed.len());
    let mut digest_concat = Vec::with_capacity(claimed.len() * 16);
    let mut previous_number: Option<i32> = None;

    for part in claimed {
        let number = part.part_number.ok_or_else(|| GatewayError::InvalidPart {
            message: "Part is missing a part number".to_string(),
        })?;
        let claimed_etag = part.e_tag.as_deref().ok_or_else(|| GatewayError::InvalidPart {
            message: format!("Part {number} is missing an ETag"),
        })?;

        if previous_number.is_some_and(|prev| number <= prev) {
            return Err(GatewayError::InvalidPartOrder);
        }
        previous_number = Some(number);

        let info = stored.get(&number).ok_or_else(|| GatewayError::InvalidPart {
            message: format!("Part {number} has not been uploaded"),
        })?;

        let claimed_etag = normalize_etag(claimed_etag);
        if claimed_etag != info.hash {
            return Err(GatewayError::InvalidPart {
                message: format!("Part {number} ETag does not match the uploaded part"),
            });
        }

        let raw = hex::decode(&info.hash).map_err(|_| GatewayError::InvalidPart {
            message: format!("Part {number} has a malformed stored ETag"),
        })?;
        digest_concat.extend_from_slice(&raw);

        segments.push(ManifestSegment {
            path: format!("/{segments_container}/{}", info.name),
            etag: info.hash.clone(),
            size_bytes: info.bytes,
        });
    }

    let mut hasher = Md5::new();
    hasher.update(&digest_concat);
    let etag = format!("{}-{}", hex::encode(hasher.finalize()), segments.len());

    Ok(Manifest { segments, etag })
}
