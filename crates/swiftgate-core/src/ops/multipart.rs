//! Multipart upload handlers.
//!
//! Uploads are materialized in the bucket's segments container: a marker
//! object (`key/uploadId`) records the initiation headers, part objects
//! (`key/uploadId/partNumber`) hold the payloads, and completion replaces
//! them with a manifest at the destination key.

use std::collections::BTreeMap;

use chrono::Utc;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use swiftgate_model::input::{
    AbortMultipartUploadInput, CompleteMultipartUploadInput, CreateMultipartUploadInput,
    ListMultipartUploadsInput, ListPartsInput, UploadPartCopyInput, UploadPartInput,
};
use swiftgate_model::output::{
    AbortMultipartUploadOutput, CompleteMultipartUploadOutput, CreateMultipartUploadOutput,
    ListMultipartUploadsOutput, ListPartsOutput, UploadPartCopyOutput, UploadPartOutput,
};
use swiftgate_model::types::{
    CompletedMultipartUpload, CopyPartResult, Initiator, MultipartUpload, Owner, Part,
};
use swiftgate_xml::from_xml;

use crate::backend::{BackendError, ObjectMeta, PutHeaders, SegmentInfo};
use crate::error::{GatewayError, GatewayResult};
use crate::gateway::SwiftGateway;
use crate::manifest;
use crate::paths::{validate_bucket_name, validate_key};
use crate::state::UploadState;
use crate::utils::{
    check_content_md5, generate_upload_id, is_valid_if_match, is_valid_if_none_match,
    parse_copy_range, parse_copy_source, parse_int_param, quote_etag,
};

/// Characters escaped under `encoding-type=url`. Slashes stay readable, as
/// S3 leaves path separators alone.
const KEY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

const STORAGE_CLASS: &str = "STANDARD";

fn url_encode_key(key: &str) -> String {
    utf8_percent_encode(key, KEY_ENCODE_SET).to_string()
}

impl SwiftGateway {
    fn owner(&self) -> Owner {
        Owner {
            id: Some(self.config.account.clone()),
            display_name: Some(self.config.account.clone()),
        }
    }

    fn initiator(&self) -> Initiator {
        Initiator {
            id: Some(self.config.account.clone()),
            display_name: Some(self.config.account.clone()),
        }
    }

    /// Validate a raw `partNumber` query value against the configured bound.
    fn parse_part_number(&self, raw: &str) -> GatewayResult<i32> {
        let max = self.config.max_upload_part_num;
        let invalid = || GatewayError::InvalidArgument {
            message: format!("Part number must be an integer between 1 and {max}, inclusive"),
        };
        let number: i32 = raw.parse().map_err(|_| invalid())?;
        if number < 1 || number > max {
            return Err(invalid());
        }
        Ok(number)
    }

    /// Validate a page-size query value, falling back to and clamping at the
    /// configured maximum.
    fn parse_page_size(&self, name: &str, raw: Option<&str>, max: i32) -> GatewayResult<i32> {
        match raw {
            Some(value) => Ok(parse_int_param(name, value)?.min(max)),
            None => Ok(max),
        }
    }

    pub(super) async fn check_bucket(&self, bucket: &str) -> GatewayResult<()> {
        match self.backend.head_container(bucket).await {
            Ok(()) => Ok(()),
            Err(BackendError::NotFound) => Err(GatewayError::NoSuchBucket {
                bucket: bucket.to_string(),
            }),
            Err(err) => Err(err.into()),
        }
    }

    /// Resolve the upload's state and require it to be active.
    async fn require_active(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
    ) -> GatewayResult<ObjectMeta> {
        let state =
            UploadState::query(&self.backend, &self.translator, bucket, key, upload_id).await?;
        match state {
            UploadState::Active { marker, .. } => Ok(marker),
            UploadState::Uninitiated | UploadState::Completed { .. } => {
                Err(GatewayError::NoSuchUpload {
                    upload_id: upload_id.to_string(),
                })
            }
        }
    }

    /// List the stored part objects of an upload, keyed by part number.
    ///
    /// Listing entries whose name suffix is not a part number (stray objects
    /// under the same prefix) are ignored.
    async fn stored_parts(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
    ) -> GatewayResult<BTreeMap<i32, SegmentInfo>> {
        let store = self.segment_store(bucket);
        let prefix = format!("{}/", self.translator.upload_marker(key, upload_id));
        let entries = store.list_all(&prefix, None).await?;

        let mut parts = BTreeMap::new();
        for entry in entries {
            if let Some(suffix) = entry.name.strip_prefix(&prefix)
                && let Ok(number) = suffix.parse::<i32>()
                && number >= 1
            {
                parts.insert(number, entry);
            }
        }
        Ok(parts)
    }

    pub(crate) async fn create_multipart_upload(
        &self,
        input: CreateMultipartUploadInput,
    ) -> GatewayResult<CreateMultipartUploadOutput> {
        validate_bucket_name(&input.bucket)?;
        validate_key(&input.key)?;
        self.check_bucket(&input.bucket).await?;

        let store = self.segment_store(&input.bucket);
        self.backend.create_container(store.container()).await?;

        let upload_id = generate_upload_id();
        let marker = self.translator.upload_marker(&input.key, &upload_id);
        let headers = PutHeaders {
            content_type: input.content_type,
            metadata: input.metadata,
        };
        store.put(&marker, bytes::Bytes::new(), headers).await?;

        tracing::debug!(
            bucket = %input.bucket,
            key = %input.key,
            upload_id = %upload_id,
            "initiated multipart upload"
        );

        Ok(CreateMultipartUploadOutput {
            bucket: Some(input.bucket),
            key: Some(input.key),
            upload_id: Some(upload_id),
        })
    }

    pub(crate) async fn upload_part(
        &self,
        input: UploadPartInput,
    ) -> GatewayResult<UploadPartOutput> {
        validate_key(&input.key)?;
        let part_number = self.parse_part_number(&input.part_number)?;
        check_content_md5(input.content_md5.as_deref(), &input.body)?;
        self.require_active(&input.bucket, &input.key, &input.upload_id)
            .await?;

        let store = self.segment_store(&input.bucket);
        let name = self
            .translator
            .part_object(&input.key, &input.upload_id, part_number);
        // Re-uploading a part number overwrites the previous object.
        let etag = store.put(&name, input.body, PutHeaders::default()).await?;

        tracing::debug!(
            bucket = %input.bucket,
            key = %input.key,
            upload_id = %input.upload_id,
            part_number,
            "stored part"
        );

        Ok(UploadPartOutput {
            e_tag: Some(quote_etag(&etag)),
        })
    }

    pub(crate) async fn upload_part_copy(
        &self,
        input: UploadPartCopyInput,
    ) -> GatewayResult<UploadPartCopyOutput> {
        validate_key(&input.key)?;
        let part_number = self.parse_part_number(&input.part_number)?;
        self.require_active(&input.bucket, &input.key, &input.upload_id)
            .await?;

        let (src_bucket, src_key, version_id) = parse_copy_source(&input.copy_source)?;
        if version_id.is_some() {
            return Err(GatewayError::NotImplemented {
                feature: "copying from a versioned source".to_string(),
            });
        }

        let (meta, body) = match self.backend.get_object(&src_bucket, &src_key).await {
            Ok(found) => found,
            Err(BackendError::NotFound) => {
                return Err(GatewayError::NoSuchKey { key: src_key });
            }
            Err(err) => return Err(err.into()),
        };

        if let Some(cond) = input.copy_source_if_match.as_deref()
            && !is_valid_if_match(&meta.etag, cond)
        {
            return Err(GatewayError::PreconditionFailed);
        }
        if let Some(cond) = input.copy_source_if_none_match.as_deref()
            && !is_valid_if_none_match(&meta.etag, cond)
        {
            return Err(GatewayError::PreconditionFailed);
        }
        if let Some(since) = input.copy_source_if_unmodified_since
            && meta.last_modified > since
        {
            return Err(GatewayError::PreconditionFailed);
        }
        if let Some(since) = input.copy_source_if_modified_since
            && meta.last_modified <= since
        {
            return Err(GatewayError::PreconditionFailed);
        }

        let payload = match input.copy_source_range.as_deref() {
            Some(range) => {
                let (start, end) = parse_copy_range(range, meta.content_length)?;
                #[allow(clippy::cast_possible_truncation)]
                body.slice(start as usize..=(end as usize))
            }
            None => body,
        };

        let store = self.segment_store(&input.bucket);
        let name = self
            .translator
            .part_object(&input.key, &input.upload_id, part_number);
        let etag = store.put(&name, payload, PutHeaders::default()).await?;

        tracing::debug!(
            bucket = %input.bucket,
            key = %input.key,
            upload_id = %input.upload_id,
            part_number,
            source = %input.copy_source,
            "copied part"
        );

        Ok(UploadPartCopyOutput {
            copy_part_result: Some(CopyPartResult {
                e_tag: Some(quote_etag(&etag)),
                last_modified: Some(Utc::now()),
            }),
        })
    }

    pub(crate) async fn list_parts(&self, input: ListPartsInput) -> GatewayResult<ListPartsOutput> {
        let max_parts = self.parse_page_size(
            "max-parts",
            input.max_parts.as_deref(),
            self.config.max_parts_listing,
        )?;
        let marker = match input.part_number_marker.as_deref() {
            Some(raw) => parse_int_param("part-number-marker", raw)?,
            None => 0,
        };
        self.require_active(&input.bucket, &input.key, &input.upload_id)
            .await?;

        let stored = self
            .stored_parts(&input.bucket, &input.key, &input.upload_id)
            .await?;

        // BTreeMap iteration gives ascending part numbers.
        let entries: Vec<(String, Part)> = stored
            .into_iter()
            .filter(|(number, _)| *number > marker)
            .map(|(number, info)| {
                let part = Part {
                    part_number: Some(number),
                    last_modified: Some(info.last_modified),
                    e_tag: Some(quote_etag(&info.hash)),
                    size: Some(i64::try_from(info.bytes).unwrap_or(i64::MAX)),
                };
                (number.to_string(), part)
            })
            .collect();

        #[allow(clippy::cast_sign_loss)]
        let page = crate::listing::paginate(entries, "", None, max_parts.max(0) as usize);

        let next_part_number_marker = if page.is_truncated {
            page.items
                .last()
                .and_then(|p| p.part_number)
                .map(|n| n.to_string())
        } else {
            None
        };

        Ok(ListPartsOutput {
            bucket: Some(input.bucket),
            key: Some(input.key),
            upload_id: Some(input.upload_id),
            part_number_marker: input.part_number_marker,
            next_part_number_marker,
            max_parts: Some(max_parts),
            is_truncated: Some(page.is_truncated),
            initiator: Some(self.initiator()),
            owner: Some(self.owner()),
            storage_class: Some(STORAGE_CLASS.to_string()),
            parts: page.items,
        })
    }

    pub(crate) async fn list_multipart_uploads(
        &self,
        input: ListMultipartUploadsInput,
    ) -> GatewayResult<ListMultipartUploadsOutput> {
        validate_bucket_name(&input.bucket)?;
        let max_uploads = self.parse_page_size(
            "max-uploads",
            input.max_uploads.as_deref(),
            self.config.max_multipart_listing,
        )?;
        if let Some(encoding) = input.encoding_type.as_deref()
            && encoding != "url"
        {
            return Err(GatewayError::InvalidArgument {
                message: "Invalid Encoding Method specified in Request".to_string(),
            });
        }
        self.check_bucket(&input.bucket).await?;

        let key_marker = input.key_marker.as_deref().unwrap_or("");
        let upload_id_marker = input.upload_id_marker.as_deref().unwrap_or("");

        // Resume the backend listing right after the marker pair. With only
        // a key marker, '~' sorts after every hex upload id for that key.
        let start_after = if key_marker.is_empty() {
            None
        } else if upload_id_marker.is_empty() {
            Some(format!("{key_marker}/~"))
        } else {
            Some(format!("{key_marker}/{upload_id_marker}"))
        };

        let store = self.segment_store(&input.bucket);
        let prefix = input.prefix.clone().unwrap_or_default();
        let entries = store.list_all(&prefix, start_after.as_deref()).await?;

        // Upload markers are the entries whose name ends in /<64 hex chars>;
        // part objects have a numeric suffix instead and fall out here.
        let candidates: Vec<(String, MultipartUpload)> = entries
            .into_iter()
            .filter_map(|entry| {
                let (key, upload_id) = entry.name.rsplit_once('/')?;
                if upload_id.len() != 64 || !upload_id.chars().all(|c| c.is_ascii_hexdigit()) {
                    return None;
                }
                if !key_marker.is_empty() {
                    let after_marker = key > key_marker
                        || (key == key_marker
                            && !upload_id_marker.is_empty()
                            && upload_id > upload_id_marker);
                    if !after_marker {
                        return None;
                    }
                }
                let upload = MultipartUpload {
                    key: Some(key.to_string()),
                    upload_id: Some(upload_id.to_string()),
                    initiator: Some(self.initiator()),
                    owner: Some(self.owner()),
                    storage_class: Some(STORAGE_CLASS.to_string()),
                    initiated: Some(entry.last_modified),
                };
                Some((key.to_string(), upload))
            })
            .collect();

        #[allow(clippy::cast_sign_loss)]
        let mut page = crate::listing::paginate(
            candidates,
            &prefix,
            input.delimiter.as_deref(),
            max_uploads.max(0) as usize,
        );

        let (next_key_marker, next_upload_id_marker) = if page.is_truncated {
            page.items
                .last()
                .map(|u| (u.key.clone(), u.upload_id.clone()))
                .unwrap_or_default()
        } else {
            (None, None)
        };

        let url_encode = input.encoding_type.as_deref() == Some("url");
        if url_encode {
            for upload in &mut page.items {
                if let Some(key) = upload.key.take() {
                    upload.key = Some(url_encode_key(&key));
                }
            }
            for group in &mut page.common_prefixes {
                if let Some(p) = group.prefix.take() {
                    group.prefix = Some(url_encode_key(&p));
                }
            }
        }

        Ok(ListMultipartUploadsOutput {
            bucket: Some(input.bucket),
            key_marker: input.key_marker,
            upload_id_marker: input.upload_id_marker,
            next_key_marker,
            next_upload_id_marker,
            max_uploads: Some(max_uploads),
            delimiter: input.delimiter,
            prefix: input.prefix,
            is_truncated: Some(page.is_truncated),
            encoding_type: input.encoding_type,
            uploads: page.items,
            common_prefixes: page.common_prefixes,
        })
    }

    pub(crate) async fn complete_multipart_upload(
        &self,
        input: CompleteMultipartUploadInput,
    ) -> GatewayResult<CompleteMultipartUploadOutput> {
        self.check_bucket(&input.bucket).await?;
        let marker_meta = self
            .require_active(&input.bucket, &input.key, &input.upload_id)
            .await?;

        if input.body.is_empty() {
            return Err(GatewayError::InvalidRequest {
                message: "You must specify at least one part".to_string(),
            });
        }
        check_content_md5(input.content_md5.as_deref(), &input.body)?;

        let claimed: CompletedMultipartUpload =
            from_xml(&input.body).map_err(|err| GatewayError::MalformedXml {
                detail: err.to_string(),
            })?;

        let stored = self
            .stored_parts(&input.bucket, &input.key, &input.upload_id)
            .await?;
        let store = self.segment_store(&input.bucket);
        let manifest = manifest::assemble(&claimed.parts, &stored, store.container())?;

        let headers = PutHeaders {
            content_type: marker_meta.content_type,
            metadata: marker_meta.metadata,
        };
        let receipt = match self
            .backend
            .put_manifest(&input.bucket, &input.key, &manifest.segments, headers)
            .await
        {
            Ok(receipt) => receipt,
            Err(BackendError::SegmentTooSmall(message)) => {
                return Err(GatewayError::EntityTooSmall { message });
            }
            Err(err) => return Err(err.into()),
        };

        if !receipt.errors.is_empty() {
            let lines: Vec<String> = receipt
                .errors
                .iter()
                .map(|(path, status)| format!("{path}: {status}"))
                .collect();
            let message = lines.join("\n");
            // A vanished segment means the claimed part no longer exists;
            // anything else is a bad request.
            let all_missing = receipt.errors.iter().all(|(_, status)| status.starts_with("404"));
            return Err(if all_missing {
                GatewayError::InvalidPart { message }
            } else {
                GatewayError::InvalidRequest { message }
            });
        }

        // The manifest owns the data now; the scaffolding can go. Failures
        // here leave garbage, not corruption, so they only get logged.
        let marker_name = self.translator.upload_marker(&input.key, &input.upload_id);
        if let Err(err) = store.delete(&marker_name).await {
            tracing::warn!(error = %err, object = %marker_name, "failed to clean up upload marker");
        }
        for info in stored.values() {
            if let Err(err) = store.delete(&info.name).await {
                tracing::warn!(error = %err, object = %info.name, "failed to clean up part object");
            }
        }

        tracing::debug!(
            bucket = %input.bucket,
            key = %input.key,
            upload_id = %input.upload_id,
            etag = %manifest.etag,
            parts = manifest.segments.len(),
            "completed multipart upload"
        );

        Ok(CompleteMultipartUploadOutput {
            location: Some(format!("/{}/{}", input.bucket, input.key)),
            bucket: Some(input.bucket),
            key: Some(input.key),
            e_tag: Some(quote_etag(&manifest.etag)),
        })
    }

    pub(crate) async fn abort_multipart_upload(
        &self,
        input: AbortMultipartUploadInput,
    ) -> GatewayResult<AbortMultipartUploadOutput> {
        self.require_active(&input.bucket, &input.key, &input.upload_id)
            .await?;

        let stored = self
            .stored_parts(&input.bucket, &input.key, &input.upload_id)
            .await?;
        let store = self.segment_store(&input.bucket);

        // Objects already gone are fine; a concurrent abort won.
        for info in stored.values() {
            store.delete(&info.name).await?;
        }
        let marker_name = self.translator.upload_marker(&input.key, &input.upload_id);
        store.delete(&marker_name).await?;

        tracing::debug!(
            bucket = %input.bucket,
            key = %input.key,
            upload_id = %input.upload_id,
            "aborted multipart upload"
        );

        Ok(AbortMultipartUploadOutput {})
    }
}
