//! S3 multipart-upload gateway over a Swift-style object store.
//!
//! This crate translates the S3 multipart-upload protocol (initiate,
//! upload-part, list-parts, list-uploads, complete, abort) plus multi-object
//! delete onto an object store that has no native multipart concept. Uploads
//! are materialized as marker and part objects inside a reserved segments
//! container; completion validates the client's part list against the stored
//! segments and writes a large-object manifest to the destination key.
//!
//! # Architecture
//!
//! ```text
//! S3 HTTP layer (routing, XML, auth)
//!        |
//!        v
//! SwiftGateway (one dispatch per S3Operation)
//!        |
//!        v
//!  UploadState / SegmentStore / ManifestBuilder
//!        |
//!        v
//!  SwiftBackend (remote store; in-memory impl for tests)
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod gateway;
pub mod heartbeat;
pub mod listing;
pub mod manifest;
mod ops;
pub mod paths;
pub mod segments;
pub mod state;
pub mod utils;

pub use config::GatewayConfig;
pub use error::{GatewayError, GatewayResult};
pub use gateway::SwiftGateway;
