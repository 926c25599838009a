//! ListParts and ListMultipartUploads tests.

#[cfg(test)]
mod tests {
    use swiftgate_core::GatewayError;
    use swiftgate_model::input::{ListMultipartUploadsInput, ListPartsInput};
    use swiftgate_model::request::{S3MultipartRequest, S3MultipartResponse};

    use crate::{initiate, setup, upload_part};

    async fn list_parts(
        env: &crate::TestEnv,
        input: ListPartsInput,
    ) -> Result<swiftgate_model::output::ListPartsOutput, GatewayError> {
        let response = env
            .gateway
            .handle(S3MultipartRequest::ListParts(input))
            .await?;
        let S3MultipartResponse::ListParts(output) = response else {
            panic!("unexpected response variant");
        };
        Ok(output)
    }

    async fn list_uploads(
        env: &crate::TestEnv,
        input: ListMultipartUploadsInput,
    ) -> Result<swiftgate_model::output::ListMultipartUploadsOutput, GatewayError> {
        let response = env
            .gateway
            .handle(S3MultipartRequest::ListMultipartUploads(input))
            .await?;
        let S3MultipartResponse::ListMultipartUploads(output) = response else {
            panic!("unexpected response variant");
        };
        Ok(output)
    }

    #[tokio::test]
    async fn test_should_list_parts_in_numeric_order() {
        let env = setup(&["bucket"]).await;
        let upload_id = initiate(&env, "bucket", "key").await;

        // Part 10 sorts before part 2 lexicographically; the listing must
        // come back numeric.
        for number in [10, 2, 1] {
            upload_part(&env, "bucket", "key", &upload_id, number, b"data").await;
        }

        let output = list_parts(
            &env,
            ListPartsInput {
                bucket: "bucket".to_string(),
                key: "key".to_string(),
                upload_id: upload_id.clone(),
                part_number_marker: None,
                max_parts: None,
            },
        )
        .await
        .expect("list parts");

        let numbers: Vec<i32> = output.parts.iter().filter_map(|p| p.part_number).collect();
        assert_eq!(numbers, vec![1, 2, 10]);
        assert_eq!(output.is_truncated, Some(false));
        assert_eq!(output.max_parts, Some(1000));
        assert_eq!(output.storage_class.as_deref(), Some("STANDARD"));
    }

    #[tokio::test]
    async fn test_should_truncate_parts_and_resume_from_marker() {
        let env = setup(&["bucket"]).await;
        let upload_id = initiate(&env, "bucket", "key").await;
        for number in 1..=4 {
            upload_part(&env, "bucket", "key", &upload_id, number, b"data").await;
        }

        // max-parts one less than the part count forces truncation.
        let first = list_parts(
            &env,
            ListPartsInput {
                bucket: "bucket".to_string(),
                key: "key".to_string(),
                upload_id: upload_id.clone(),
                part_number_marker: None,
                max_parts: Some("3".to_string()),
            },
        )
        .await
        .expect("first page");

        assert_eq!(first.parts.len(), 3);
        assert_eq!(first.is_truncated, Some(true));
        let marker = first.next_part_number_marker.clone().expect("next marker");
        assert_eq!(marker, "3");

        let second = list_parts(
            &env,
            ListPartsInput {
                bucket: "bucket".to_string(),
                key: "key".to_string(),
                upload_id,
                part_number_marker: Some(marker),
                max_parts: Some("3".to_string()),
            },
        )
        .await
        .expect("second page");

        let numbers: Vec<i32> = second.parts.iter().filter_map(|p| p.part_number).collect();
        assert_eq!(numbers, vec![4]);
        assert_eq!(second.is_truncated, Some(false));
        assert!(second.next_part_number_marker.is_none());
    }

    #[tokio::test]
    async fn test_should_reject_numeric_params_beyond_i32() {
        let env = setup(&["bucket"]).await;
        let upload_id = initiate(&env, "bucket", "key").await;

        // 2^31 overflows a 32-bit signed integer.
        let err = list_parts(
            &env,
            ListPartsInput {
                bucket: "bucket".to_string(),
                key: "key".to_string(),
                upload_id: upload_id.clone(),
                part_number_marker: None,
                max_parts: Some("2147483648".to_string()),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidArgument { ref message }
            if message == "Provided max-parts not an integer or within integer range"));

        let err = list_parts(
            &env,
            ListPartsInput {
                bucket: "bucket".to_string(),
                key: "key".to_string(),
                upload_id,
                part_number_marker: Some("-5".to_string()),
                max_parts: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidArgument { ref message }
            if message == "Provided part-number-marker not an integer or within integer range"));

        let err = list_uploads(
            &env,
            ListMultipartUploadsInput {
                bucket: "bucket".to_string(),
                max_uploads: Some("ten".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidArgument { ref message }
            if message == "Provided max-uploads not an integer or within integer range"));
    }

    #[tokio::test]
    async fn test_should_clamp_oversized_page_sizes() {
        let env = setup(&["bucket"]).await;
        let upload_id = initiate(&env, "bucket", "key").await;
        upload_part(&env, "bucket", "key", &upload_id, 1, b"data").await;

        let output = list_parts(
            &env,
            ListPartsInput {
                bucket: "bucket".to_string(),
                key: "key".to_string(),
                upload_id,
                part_number_marker: None,
                max_parts: Some("2000000".to_string()),
            },
        )
        .await
        .expect("list parts");
        assert_eq!(output.max_parts, Some(1000));
    }

    #[tokio::test]
    async fn test_should_list_uploads_without_part_objects() {
        let env = setup(&["bucket"]).await;
        let id_a = initiate(&env, "bucket", "alpha").await;
        let id_b = initiate(&env, "bucket", "beta").await;
        // Part objects share the prefix but must not surface as uploads.
        upload_part(&env, "bucket", "alpha", &id_a, 1, b"data").await;

        let output = list_uploads(
            &env,
            ListMultipartUploadsInput {
                bucket: "bucket".to_string(),
                ..Default::default()
            },
        )
        .await
        .expect("list uploads");

        let found: Vec<(&str, &str)> = output
            .uploads
            .iter()
            .map(|u| (u.key.as_deref().unwrap(), u.upload_id.as_deref().unwrap()))
            .collect();
        assert_eq!(found, vec![("alpha", id_a.as_str()), ("beta", id_b.as_str())]);
        assert_eq!(output.is_truncated, Some(false));
    }

    #[tokio::test]
    async fn test_should_group_uploads_by_delimiter() {
        let env = setup(&["bucket"]).await;
        initiate(&env, "bucket", "photos/2024/a.jpg").await;
        initiate(&env, "bucket", "photos/2025/b.jpg").await;
        initiate(&env, "bucket", "top.txt").await;

        let output = list_uploads(
            &env,
            ListMultipartUploadsInput {
                bucket: "bucket".to_string(),
                delimiter: Some("/".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("list uploads");

        let keys: Vec<&str> = output
            .uploads
            .iter()
            .map(|u| u.key.as_deref().unwrap())
            .collect();
        assert_eq!(keys, vec!["top.txt"]);
        let groups: Vec<&str> = output
            .common_prefixes
            .iter()
            .map(|p| p.prefix.as_deref().unwrap())
            .collect();
        assert_eq!(groups, vec!["photos/"]);

        // Narrowing with a prefix exposes the next level of groups.
        let output = list_uploads(
            &env,
            ListMultipartUploadsInput {
                bucket: "bucket".to_string(),
                prefix: Some("photos/".to_string()),
                delimiter: Some("/".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("list uploads under prefix");
        let groups: Vec<&str> = output
            .common_prefixes
            .iter()
            .map(|p| p.prefix.as_deref().unwrap())
            .collect();
        assert_eq!(groups, vec!["photos/2024/", "photos/2025/"]);
    }

    #[tokio::test]
    async fn test_should_resume_uploads_from_key_and_id_markers() {
        let env = setup(&["bucket"]).await;
        let mut ids = vec![
            initiate(&env, "bucket", "key").await,
            initiate(&env, "bucket", "key").await,
        ];
        ids.sort();
        let id_zz = initiate(&env, "bucket", "zz").await;

        let first = list_uploads(
            &env,
            ListMultipartUploadsInput {
                bucket: "bucket".to_string(),
                max_uploads: Some("1".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("first page");
        assert_eq!(first.is_truncated, Some(true));
        assert_eq!(first.next_key_marker.as_deref(), Some("key"));
        assert_eq!(first.next_upload_id_marker.as_deref(), Some(ids[0].as_str()));

        let second = list_uploads(
            &env,
            ListMultipartUploadsInput {
                bucket: "bucket".to_string(),
                key_marker: first.next_key_marker.clone(),
                upload_id_marker: first.next_upload_id_marker.clone(),
                ..Default::default()
            },
        )
        .await
        .expect("second page");
        let found: Vec<&str> = second
            .uploads
            .iter()
            .map(|u| u.upload_id.as_deref().unwrap())
            .collect();
        assert_eq!(found, vec![ids[1].as_str(), id_zz.as_str()]);

        // A key marker alone skips every upload for that key.
        let after_key = list_uploads(
            &env,
            ListMultipartUploadsInput {
                bucket: "bucket".to_string(),
                key_marker: Some("key".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("after key marker");
        let found: Vec<&str> = after_key
            .uploads
            .iter()
            .map(|u| u.key.as_deref().unwrap())
            .collect();
        assert_eq!(found, vec!["zz"]);
    }

    #[tokio::test]
    async fn test_should_url_encode_keys_when_requested() {
        let env = setup(&["bucket"]).await;
        initiate(&env, "bucket", "a key+b").await;

        let output = list_uploads(
            &env,
            ListMultipartUploadsInput {
                bucket: "bucket".to_string(),
                encoding_type: Some("url".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("list uploads");
        assert_eq!(output.uploads[0].key.as_deref(), Some("a%20key%2Bb"));
        assert_eq!(output.encoding_type.as_deref(), Some("url"));

        let err = list_uploads(
            &env,
            ListMultipartUploadsInput {
                bucket: "bucket".to_string(),
                encoding_type: Some("base64".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidArgument { .. }));
    }
}
