//! Error mapping and error document tests.

#[cfg(test)]
mod tests {
    use base64::Engine;
    use bytes::Bytes;

    use swiftgate_core::GatewayError;
    use swiftgate_model::error::S3ErrorCode;
    use swiftgate_model::input::{
        CreateMultipartUploadInput, UploadPartCopyInput, UploadPartInput,
    };
    use swiftgate_model::request::S3MultipartRequest;
    use swiftgate_xml::error_to_xml;

    use crate::{initiate, setup};

    #[tokio::test]
    async fn test_should_reject_invalid_bucket_names_and_keys() {
        let env = setup(&["bucket"]).await;

        let err = env
            .gateway
            .handle(S3MultipartRequest::CreateMultipartUpload(
                CreateMultipartUploadInput {
                    bucket: "Bad_Bucket".to_string(),
                    key: "key".to_string(),
                    ..Default::default()
                },
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidBucketName { .. }));
        assert_eq!(err.error_code(), S3ErrorCode::InvalidBucketName);

        let err = env
            .gateway
            .handle(S3MultipartRequest::CreateMultipartUpload(
                CreateMultipartUploadInput {
                    bucket: "bucket".to_string(),
                    key: "k".repeat(1025),
                    ..Default::default()
                },
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::KeyTooLong { length: 1025 }));
        assert_eq!(err.error_code(), S3ErrorCode::KeyTooLongError);
    }

    #[tokio::test]
    async fn test_should_reject_bad_part_digests() {
        let env = setup(&["bucket"]).await;
        let upload_id = initiate(&env, "bucket", "key").await;

        let wrong = base64::engine::general_purpose::STANDARD.encode([0u8; 16]);
        let err = env
            .gateway
            .handle(S3MultipartRequest::UploadPart(UploadPartInput {
                bucket: "bucket".to_string(),
                key: "key".to_string(),
                upload_id: upload_id.clone(),
                part_number: "1".to_string(),
                content_md5: Some(wrong),
                body: Bytes::from_static(b"payload"),
            }))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::BadDigest));
        assert_eq!(err.error_code(), S3ErrorCode::BadDigest);

        let err = env
            .gateway
            .handle(S3MultipartRequest::UploadPart(UploadPartInput {
                bucket: "bucket".to_string(),
                key: "key".to_string(),
                upload_id,
                part_number: "1".to_string(),
                content_md5: Some("***".to_string()),
                body: Bytes::from_static(b"payload"),
            }))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidDigest));
    }

    #[tokio::test]
    async fn test_should_map_copy_source_failures() {
        let env = setup(&["bucket", "source"]).await;
        let upload_id = initiate(&env, "bucket", "key").await;

        let err = env
            .gateway
            .handle(S3MultipartRequest::UploadPartCopy(UploadPartCopyInput {
                bucket: "bucket".to_string(),
                key: "key".to_string(),
                upload_id: upload_id.clone(),
                part_number: "1".to_string(),
                copy_source: "/source/nothing-here".to_string(),
                ..Default::default()
            }))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::NoSuchKey { .. }));

        let err = env
            .gateway
            .handle(S3MultipartRequest::UploadPartCopy(UploadPartCopyInput {
                bucket: "bucket".to_string(),
                key: "key".to_string(),
                upload_id,
                part_number: "1".to_string(),
                copy_source: "/source/obj?versionId=3".to_string(),
                ..Default::default()
            }))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::NotImplemented { .. }));
        assert_eq!(err.error_code(), S3ErrorCode::NotImplemented);
    }

    #[tokio::test]
    async fn test_should_render_error_documents() {
        let env = setup(&["bucket"]).await;
        let err = env
            .gateway
            .handle(S3MultipartRequest::UploadPart(UploadPartInput {
                bucket: "bucket".to_string(),
                key: "key".to_string(),
                upload_id: "a".repeat(64),
                part_number: "0".to_string(),
                content_md5: None,
                body: Bytes::new(),
            }))
            .await
            .unwrap_err();

        let s3 = err.into_s3_error();
        assert_eq!(s3.code, S3ErrorCode::InvalidArgument);
        assert_eq!(s3.status_code.as_u16(), 400);

        let doc = error_to_xml(
            s3.code.as_str(),
            &s3.message,
            Some("/bucket/key"),
            "tx0001",
        );
        let text = String::from_utf8(doc).unwrap();
        assert!(text.contains("<Code>InvalidArgument</Code>"));
        assert!(text.contains(
            "Part number must be an integer between 1 and 10000, inclusive"
        ));
        assert!(text.contains("<Resource>/bucket/key</Resource>"));
        assert!(text.contains("<RequestId>tx0001</RequestId>"));
    }

    #[tokio::test]
    async fn test_should_map_not_found_statuses() {
        let env = setup(&[]).await;
        let err = env
            .gateway
            .handle(S3MultipartRequest::CreateMultipartUpload(
                CreateMultipartUploadInput {
                    bucket: "absent".to_string(),
                    key: "key".to_string(),
                    ..Default::default()
                },
            ))
            .await
            .unwrap_err();
        let s3 = err.into_s3_error();
        assert_eq!(s3.code, S3ErrorCode::NoSuchBucket);
        assert_eq!(s3.status_code.as_u16(), 404);
    }
}
