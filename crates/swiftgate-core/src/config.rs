//! Gateway configuration.
//!
//! Provides [`GatewayConfig`] for configuring the multipart gateway.
//! Configuration is an explicit value passed to [`crate::SwiftGateway::new`];
//! there is no process-wide configuration object.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Multipart gateway configuration.
///
/// All fields have sensible defaults matching the S3 protocol limits.
/// Configuration can be loaded from environment variables via
/// [`GatewayConfig::from_env`].
///
/// # Examples
///
/// ```
/// use swiftgate_core::config::GatewayConfig;
///
/// let config = GatewayConfig::default();
/// assert_eq!(config.max_upload_part_num, 10_000);
/// assert_eq!(config.multi_delete_concurrency, 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct GatewayConfig {
    /// The store account all buckets map to.
    #[builder(default = String::from("AUTH_s3"))]
    pub account: String,

    /// Highest part number accepted by UploadPart.
    #[builder(default = 10_000)]
    pub max_upload_part_num: i32,

    /// Default and maximum page size for ListParts.
    #[builder(default = 1_000)]
    pub max_parts_listing: i32,

    /// Default and maximum page size for ListMultipartUploads.
    #[builder(default = 1_000)]
    pub max_multipart_listing: i32,

    /// Minimum size (in bytes) of every segment except the last, enforced by
    /// the backend when the manifest is written.
    #[builder(default = 5_242_880)]
    pub min_segment_size: u64,

    /// Number of backend deletes in flight during a DeleteObjects request.
    #[builder(default = 2)]
    pub multi_delete_concurrency: usize,

    /// Maximum number of keys accepted in one DeleteObjects request.
    #[builder(default = 1_000)]
    pub max_multi_delete_objects: usize,

    /// Interval (in milliseconds) between keep-alive bytes while a slow
    /// completion is in progress.
    #[builder(default = 10_000)]
    pub heartbeat_interval_ms: u64,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            account: String::from("AUTH_s3"),
            max_upload_part_num: 10_000,
            max_parts_listing: 1_000,
            max_multipart_listing: 1_000,
            min_segment_size: 5_242_880,
            multi_delete_concurrency: 2,
            max_multi_delete_objects: 1_000,
            heartbeat_interval_ms: 10_000,
            log_level: String::from("info"),
        }
    }
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables (falling back to defaults):
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `SWIFTGATE_ACCOUNT` | `AUTH_s3` |
    /// | `SWIFTGATE_MAX_UPLOAD_PART_NUM` | `10000` |
    /// | `SWIFTGATE_MAX_PARTS_LISTING` | `1000` |
    /// | `SWIFTGATE_MAX_MULTIPART_LISTING` | `1000` |
    /// | `SWIFTGATE_MIN_SEGMENT_SIZE` | `5242880` |
    /// | `SWIFTGATE_MULTI_DELETE_CONCURRENCY` | `2` |
    /// | `SWIFTGATE_MAX_MULTI_DELETE_OBJECTS` | `1000` |
    /// | `SWIFTGATE_HEARTBEAT_INTERVAL_MS` | `10000` |
    /// | `LOG_LEVEL` | `info` |
    ///
    /// # Examples
    ///
    /// ```
    /// use swiftgate_core::config::GatewayConfig;
    ///
    /// let config = GatewayConfig::from_env();
    /// assert!(!config.account.is_empty());
    /// ```
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("SWIFTGATE_ACCOUNT") {
            config.account = v;
        }
        if let Ok(v) = std::env::var("SWIFTGATE_MAX_UPLOAD_PART_NUM") {
            if let Ok(n) = v.parse::<i32>() {
                config.max_upload_part_num = n;
            }
        }
        if let Ok(v) = std::env::var("SWIFTGATE_MAX_PARTS_LISTING") {
            if let Ok(n) = v.parse::<i32>() {
                config.max_parts_listing = n;
            }
        }
        if let Ok(v) = std::env::var("SWIFTGATE_MAX_MULTIPART_LISTING") {
            if let Ok(n) = v.parse::<i32>() {
                config.max_multipart_listing = n;
            }
        }
        if let Ok(v) = std::env::var("SWIFTGATE_MIN_SEGMENT_SIZE") {
            if let Ok(n) = v.parse::<u64>() {
                config.min_segment_size = n;
            }
        }
        if let Ok(v) = std::env::var("SWIFTGATE_MULTI_DELETE_CONCURRENCY") {
            if let Ok(n) = v.parse::<usize>() {
                config.multi_delete_concurrency = n.max(1);
            }
        }
        if let Ok(v) = std::env::var("SWIFTGATE_MAX_MULTI_DELETE_OBJECTS") {
            if let Ok(n) = v.parse::<usize>() {
                config.max_multi_delete_objects = n;
            }
        }
        if let Ok(v) = std::env::var("SWIFTGATE_HEARTBEAT_INTERVAL_MS") {
            if let Ok(n) = v.parse::<u64>() {
                config.heartbeat_interval_ms = n;
            }
        }
        if let Ok(v) = std::env::var("LOG_LEVEL") {
            config.log_level = v;
        }

        config
    }
}
