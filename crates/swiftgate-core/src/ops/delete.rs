//! Multi-object delete handler.

use futures::StreamExt;
use futures::stream;

use swiftgate_model::input::DeleteObjectsInput;
use swiftgate_model::output::DeleteObjectsOutput;
use swiftgate_model::types::{Delete, DeleteError, DeletedObject};
use swiftgate_xml::from_xml;

use crate::backend::BackendError;
use crate::error::{GatewayError, GatewayResult};
use crate::gateway::SwiftGateway;
use crate::paths::{validate_bucket_name, validate_key};
use crate::utils::check_content_md5;

enum KeyOutcome {
    Deleted(DeletedObject),
    Failed(DeleteError),
}

impl SwiftGateway {
    pub(crate) async fn delete_objects(
        &self,
        input: DeleteObjectsInput,
    ) -> GatewayResult<DeleteObjectsOutput> {
        validate_bucket_name(&input.bucket)?;

        if input.body.is_empty() {
            return Err(GatewayError::MissingRequestBody);
        }
        check_content_md5(input.content_md5.as_deref(), &input.body)?;

        let delete: Delete = from_xml(&input.body).map_err(|err| GatewayError::MalformedXml {
            detail: err.to_string(),
        })?;

        if delete.objects.len() > self.config.max_multi_delete_objects {
            return Err(GatewayError::MalformedXml {
                detail: format!(
                    "request exceeds the maximum of {} objects",
                    self.config.max_multi_delete_objects
                ),
            });
        }
        for object in &delete.objects {
            if object.key.is_empty() {
                return Err(GatewayError::UserKeyMustBeSpecified);
            }
            if object.version_id.is_some() {
                return Err(GatewayError::NotImplemented {
                    feature: "deleting a specific object version".to_string(),
                });
            }
        }

        self.check_bucket(&input.bucket).await?;

        let quiet = delete.quiet.unwrap_or(false);
        let keys: Vec<String> = delete.objects.into_iter().map(|o| o.key).collect();

        // Bounded concurrency; `buffered` keeps results in request order.
        let outcomes: Vec<KeyOutcome> = stream::iter(keys)
            .map(|key| self.delete_single_object(&input.bucket, key))
            .buffered(self.config.multi_delete_concurrency)
            .collect()
            .await;

        let mut output = DeleteObjectsOutput::default();
        for outcome in outcomes {
            match outcome {
                KeyOutcome::Deleted(deleted) => {
                    if !quiet {
                        output.deleted.push(deleted);
                    }
                }
                KeyOutcome::Failed(error) => output.errors.push(error),
            }
        }

        tracing::debug!(
            bucket = %input.bucket,
            deleted = output.deleted.len(),
            failed = output.errors.len(),
            quiet,
            "handled multi-object delete"
        );

        Ok(output)
    }

    /// Delete one key. Per-key failures become result entries, never
    /// request-level errors; a missing key counts as deleted.
    async fn delete_single_object(&self, bucket: &str, key: String) -> KeyOutcome {
        if let Err(err) = validate_key(&key) {
            let s3 = err.into_s3_error();
            return KeyOutcome::Failed(DeleteError {
                key: Some(key),
                code: Some(s3.code.as_str().to_string()),
                message: Some(s3.message),
            });
        }

        match self.backend.delete_object_cascade(bucket, &key).await {
            Ok(receipt) if receipt.errors.is_empty() => {
                KeyOutcome::Deleted(DeletedObject { key: Some(key) })
            }
            Ok(receipt) => {
                // The object is gone but some manifest segments survived.
                let lines: Vec<String> = receipt
                    .errors
                    .iter()
                    .map(|(path, status)| format!("{status}: {path}"))
                    .collect();
                KeyOutcome::Failed(DeleteError {
                    key: Some(key),
                    code: Some("SLODeleteError".to_string()),
                    message: Some(lines.join("\n")),
                })
            }
            Err(BackendError::NotFound) => KeyOutcome::Deleted(DeletedObject { key: Some(key) }),
            Err(err) => {
                tracing::error!(error = %err, bucket = %bucket, key = %key, "delete failed");
                KeyOutcome::Failed(DeleteError {
                    key: Some(key),
                    code: Some("InternalError".to_string()),
                    message: Some("Internal server error".to_string()),
                })
            }
        }
    }
}
