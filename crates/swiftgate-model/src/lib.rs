//! S3 wire-level data model for SwiftGate.
//!
//! This crate defines the subset of the S3 REST protocol that the gateway
//! implements: multipart uploads and multi-object delete. It contains the
//! error codes and [`S3Error`] type, the request/response DTOs, and the
//! closed [`S3Operation`] set that the gateway dispatches over.

pub mod error;
pub mod input;
pub mod operations;
pub mod output;
pub mod request;
pub mod types;

pub use error::{S3Error, S3ErrorCode};
pub use operations::S3Operation;
pub use request::{S3MultipartRequest, S3MultipartResponse};
