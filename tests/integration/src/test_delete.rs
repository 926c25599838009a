//! Multi-object delete tests.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use bytes::Bytes;

    use swiftgate_core::backend::memory::InMemoryBackend;
    use swiftgate_core::backend::{
        BackendError, CascadeDeleteReceipt, ListQuery, ManifestReceipt, ObjectMeta, PutHeaders,
        SegmentInfo, SwiftBackend,
    };
    use swiftgate_core::manifest::ManifestSegment;
    use swiftgate_core::{GatewayConfig, GatewayError, SwiftGateway};
    use swiftgate_model::input::DeleteObjectsInput;
    use swiftgate_model::request::{S3MultipartRequest, S3MultipartResponse};

    use crate::{complete_body, initiate, setup, upload_part};

    fn delete_body(keys: &[&str], quiet: bool) -> Bytes {
        let mut xml = String::from("<Delete>");
        if quiet {
            xml.push_str("<Quiet>true</Quiet>");
        }
        for key in keys {
            xml.push_str(&format!("<Object><Key>{key}</Key></Object>"));
        }
        xml.push_str("</Delete>");
        Bytes::from(xml)
    }

    async fn delete_objects(
        gateway: &SwiftGateway,
        bucket: &str,
        body: Bytes,
    ) -> Result<swiftgate_model::output::DeleteObjectsOutput, GatewayError> {
        let response = gateway
            .handle(S3MultipartRequest::DeleteObjects(DeleteObjectsInput {
                bucket: bucket.to_string(),
                content_md5: None,
                body,
            }))
            .await?;
        let S3MultipartResponse::DeleteObjects(output) = response else {
            panic!("unexpected response variant");
        };
        Ok(output)
    }

    #[tokio::test]
    async fn test_should_report_results_in_request_order() {
        let env = setup(&["bucket"]).await;
        for key in ["c", "a", "b"] {
            env.backend
                .put_object("bucket", key, Bytes::from_static(b"x"), PutHeaders::default())
                .await
                .unwrap();
        }

        let output = delete_objects(
            &env.gateway,
            "bucket",
            delete_body(&["c", "missing", "a", "b"], false),
        )
        .await
        .expect("delete objects");

        let keys: Vec<&str> = output
            .deleted
            .iter()
            .map(|d| d.key.as_deref().unwrap())
            .collect();
        // Missing keys report as deleted; order is the request order.
        assert_eq!(keys, vec!["c", "missing", "a", "b"]);
        assert!(output.errors.is_empty());

        for key in ["a", "b", "c"] {
            assert!(env.backend.head_object("bucket", key).await.is_err());
        }
    }

    #[tokio::test]
    async fn test_should_delete_completed_upload_with_its_segments() {
        let env = setup(&["bucket"]).await;
        let upload_id = initiate(&env, "bucket", "key").await;
        let etag = upload_part(&env, "bucket", "key", &upload_id, 1, b"data").await;
        env.gateway
            .handle(S3MultipartRequest::CompleteMultipartUpload(
                swiftgate_model::input::CompleteMultipartUploadInput {
                    bucket: "bucket".to_string(),
                    key: "key".to_string(),
                    upload_id,
                    content_md5: None,
                    body: complete_body(&[(1, &etag)]),
                },
            ))
            .await
            .expect("complete");

        let output = delete_objects(&env.gateway, "bucket", delete_body(&["key"], false))
            .await
            .expect("delete manifest object");
        assert_eq!(output.deleted.len(), 1);
        assert!(env.backend.head_object("bucket", "key").await.is_err());
    }

    #[tokio::test]
    async fn test_should_suppress_deleted_in_quiet_mode() {
        let env = setup(&["bucket"]).await;
        env.backend
            .put_object("bucket", "a", Bytes::from_static(b"x"), PutHeaders::default())
            .await
            .unwrap();

        let output = delete_objects(&env.gateway, "bucket", delete_body(&["a", "missing"], true))
            .await
            .expect("quiet delete");
        assert!(output.deleted.is_empty());
        assert!(output.errors.is_empty());
    }

    #[tokio::test]
    async fn test_should_reject_delete_on_missing_bucket() {
        let env = setup(&[]).await;
        let err = delete_objects(&env.gateway, "nobucket", delete_body(&["a"], false))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::NoSuchBucket { .. }));
    }

    /// A backend whose cascading delete leaves segments behind for one key.
    struct StubbornSegments {
        inner: InMemoryBackend,
        failing_key: String,
    }

    #[async_trait]
    impl SwiftBackend for StubbornSegments {
        async fn head_container(&self, container: &str) -> Result<(), BackendError> {
            self.inner.head_container(container).await
        }

        async fn create_container(&self, container: &str) -> Result<(), BackendError> {
            self.inner.create_container(container).await
        }

        async fn head_object(
            &self,
            container: &str,
            object: &str,
        ) -> Result<ObjectMeta, BackendError> {
            self.inner.head_object(container, object).await
        }

        async fn get_object(
            &self,
            container: &str,
            object: &str,
        ) -> Result<(ObjectMeta, Bytes), BackendError> {
            self.inner.get_object(container, object).await
        }

        async fn put_object(
            &self,
            container: &str,
            object: &str,
            body: Bytes,
            headers: PutHeaders,
        ) -> Result<String, BackendError> {
            self.inner.put_object(container, object, body, headers).await
        }

        async fn delete_object(&self, container: &str, object: &str) -> Result<(), BackendError> {
            self.inner.delete_object(container, object).await
        }

        async fn delete_object_cascade(
            &self,
            container: &str,
            object: &str,
        ) -> Result<CascadeDeleteReceipt, BackendError> {
            if object == self.failing_key {
                return Ok(CascadeDeleteReceipt {
                    response_status: "409 Conflict".to_string(),
                    errors: vec![(
                        format!("/{container}+segments/{object}/stuck/1"),
                        "409 Conflict".to_string(),
                    )],
                });
            }
            self.inner.delete_object_cascade(container, object).await
        }

        async fn list_container(
            &self,
            container: &str,
            query: &ListQuery,
        ) -> Result<Vec<SegmentInfo>, BackendError> {
            self.inner.list_container(container, query).await
        }

        async fn put_manifest(
            &self,
            container: &str,
            object: &str,
            segments: &[ManifestSegment],
            headers: PutHeaders,
        ) -> Result<ManifestReceipt, BackendError> {
            self.inner.put_manifest(container, object, segments, headers).await
        }
    }

    #[tokio::test]
    async fn test_should_report_segment_cleanup_failures_per_key() {
        let backend = Arc::new(StubbornSegments {
            inner: InMemoryBackend::new(),
            failing_key: "stuck".to_string(),
        });
        backend.inner.create_container("bucket").await.unwrap();
        for key in ["fine", "stuck"] {
            backend
                .inner
                .put_object("bucket", key, Bytes::from_static(b"x"), PutHeaders::default())
                .await
                .unwrap();
        }
        let gateway = SwiftGateway::new(GatewayConfig::default(), backend);

        let output = delete_objects(&gateway, "bucket", delete_body(&["fine", "stuck"], false))
            .await
            .expect("partial delete");

        assert_eq!(output.deleted.len(), 1);
        assert_eq!(output.deleted[0].key.as_deref(), Some("fine"));
        assert_eq!(output.errors.len(), 1);
        let error = &output.errors[0];
        assert_eq!(error.key.as_deref(), Some("stuck"));
        assert_eq!(error.code.as_deref(), Some("SLODeleteError"));
        assert!(error.message.as_deref().unwrap().contains("409 Conflict"));
    }
}
