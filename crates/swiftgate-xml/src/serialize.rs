//! S3 XML serialization: converting model types to S3-compatible XML.
//!
//! Provides the [`S3Serialize`] trait and implementations for every response
//! document the gateway emits. Element order within each document matches
//! what AWS S3 produces.

use std::io::{self, Write};

use quick_xml::Writer;
use quick_xml::events::{BytesText, Event};

use swiftgate_model::output::{
    CompleteMultipartUploadOutput, CreateMultipartUploadOutput, DeleteObjectsOutput,
    ListMultipartUploadsOutput, ListPartsOutput, UploadPartCopyOutput,
};
use swiftgate_model::types::{
    CommonPrefix, CopyPartResult, DeleteError, DeletedObject, Initiator, MultipartUpload, Owner,
    Part,
};

use crate::error::XmlError;

/// The S3 XML namespace.
pub const S3_NAMESPACE: &str = "http://s3.amazonaws.com/doc/2006-03-01/";

/// Trait for serializing S3 types to XML.
///
/// Implementors write their content as child elements inside the current XML
/// context. The root element name and namespace are handled by the top-level
/// [`to_xml`] function.
///
/// Uses `io::Result` because `quick_xml::Writer` closures require `io::Result<()>`.
pub trait S3Serialize {
    /// Serialize this value as XML child elements into the given writer.
    ///
    /// # Errors
    ///
    /// Returns `io::Error` if writing to the underlying writer fails.
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()>;
}

/// Serialize a value as S3-compatible XML with declaration and namespace.
///
/// Produces a complete XML document with:
/// - XML declaration (`<?xml version="1.0" encoding="UTF-8"?>`)
/// - Root element with the S3 namespace
/// - Serialized content from the value
///
/// # Errors
///
/// Returns `XmlError` if serialization fails.
pub fn to_xml<T: S3Serialize>(root_element: &str, value: &T) -> Result<Vec<u8>, XmlError> {
    let mut buf = Vec::with_capacity(512);
    let mut writer = Writer::new(&mut buf);

    writer.write_event(Event::Decl(quick_xml::events::BytesDecl::new(
        "1.0",
        Some("UTF-8"),
        None,
    )))?;

    writer
        .create_element(root_element)
        .with_attribute(("xmlns", S3_NAMESPACE))
        .write_inner_content(|w| value.serialize_xml(w))?;

    Ok(buf)
}

// ---------------------------------------------------------------------------
// Helper functions for writing common XML patterns
// ---------------------------------------------------------------------------

/// Write a simple `<tag>text</tag>` element.
fn write_text_element<W: Write>(writer: &mut Writer<W>, tag: &str, text: &str) -> io::Result<()> {
    writer
        .create_element(tag)
        .write_text_content(BytesText::new(text))?;
    Ok(())
}

/// Write `<tag>text</tag>` only if the value is `Some`.
fn write_optional_text<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    value: Option<&str>,
) -> io::Result<()> {
    if let Some(v) = value {
        write_text_element(writer, tag, v)?;
    }
    Ok(())
}

/// Write `<tag>value</tag>` for an optional boolean.
fn write_optional_bool<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    value: Option<bool>,
) -> io::Result<()> {
    if let Some(v) = value {
        write_text_element(writer, tag, if v { "true" } else { "false" })?;
    }
    Ok(())
}

/// Write `<tag>value</tag>` for an optional i32.
fn write_optional_i32<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    value: Option<i32>,
) -> io::Result<()> {
    if let Some(v) = value {
        write_text_element(writer, tag, &v.to_string())?;
    }
    Ok(())
}

/// Write `<tag>value</tag>` for an optional i64.
fn write_optional_i64<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    value: Option<i64>,
) -> io::Result<()> {
    if let Some(v) = value {
        write_text_element(writer, tag, &v.to_string())?;
    }
    Ok(())
}

/// Write `<tag>iso8601</tag>` for an optional timestamp.
fn write_optional_timestamp<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    value: Option<&chrono::DateTime<chrono::Utc>>,
) -> io::Result<()> {
    if let Some(v) = value {
        write_text_element(writer, tag, &format_timestamp(v))?;
    }
    Ok(())
}

/// Format a `DateTime<Utc>` as ISO 8601 with milliseconds and `Z` suffix.
fn format_timestamp(dt: &chrono::DateTime<chrono::Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

// ---------------------------------------------------------------------------
// S3Serialize implementations for shared types
// ---------------------------------------------------------------------------

impl S3Serialize for Owner {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        writer.create_element("Owner").write_inner_content(|w| {
            write_optional_text(w, "ID", self.id.as_deref())?;
            write_optional_text(w, "DisplayName", self.display_name.as_deref())?;
            Ok(())
        })?;
        Ok(())
    }
}

impl S3Serialize for Initiator {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        writer
            .create_element("Initiator")
            .write_inner_content(|w| {
                write_optional_text(w, "ID", self.id.as_deref())?;
                write_optional_text(w, "DisplayName", self.display_name.as_deref())?;
                Ok(())
            })?;
        Ok(())
    }
}

impl S3Serialize for CommonPrefix {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        writer
            .create_element("CommonPrefixes")
            .write_inner_content(|w| {
                write_optional_text(w, "Prefix", self.prefix.as_deref())?;
                Ok(())
            })?;
        Ok(())
    }
}

impl S3Serialize for Part {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        writer.create_element("Part").write_inner_content(|w| {
            write_optional_i32(w, "PartNumber", self.part_number)?;
            write_optional_timestamp(w, "LastModified", self.last_modified.as_ref())?;
            write_optional_text(w, "ETag", self.e_tag.as_deref())?;
            write_optional_i64(w, "Size", self.size)?;
            Ok(())
        })?;
        Ok(())
    }
}

impl S3Serialize for MultipartUpload {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        writer.create_element("Upload").write_inner_content(|w| {
            write_optional_text(w, "Key", self.key.as_deref())?;
            write_optional_text(w, "UploadId", self.upload_id.as_deref())?;
            if let Some(ref initiator) = self.initiator {
                initiator.serialize_xml(w)?;
            }
            if let Some(ref owner) = self.owner {
                owner.serialize_xml(w)?;
            }
            write_optional_text(w, "StorageClass", self.storage_class.as_deref())?;
            write_optional_timestamp(w, "Initiated", self.initiated.as_ref())?;
            Ok(())
        })?;
        Ok(())
    }
}

impl S3Serialize for CopyPartResult {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        write_optional_text(writer, "ETag", self.e_tag.as_deref())?;
        write_optional_timestamp(writer, "LastModified", self.last_modified.as_ref())?;
        Ok(())
    }
}

impl S3Serialize for DeletedObject {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        writer.create_element("Deleted").write_inner_content(|w| {
            write_optional_text(w, "Key", self.key.as_deref())?;
            Ok(())
        })?;
        Ok(())
    }
}

impl S3Serialize for DeleteError {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        writer.create_element("Error").write_inner_content(|w| {
            write_optional_text(w, "Key", self.key.as_deref())?;
            write_optional_text(w, "Code", self.code.as_deref())?;
            write_optional_text(w, "Message", self.message.as_deref())?;
            Ok(())
        })?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// S3Serialize implementations for output types
// ---------------------------------------------------------------------------

impl S3Serialize for CreateMultipartUploadOutput {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        write_optional_text(writer, "Bucket", self.bucket.as_deref())?;
        write_optional_text(writer, "Key", self.key.as_deref())?;
        write_optional_text(writer, "UploadId", self.upload_id.as_deref())?;
        Ok(())
    }
}

impl S3Serialize for ListPartsOutput {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        write_optional_text(writer, "Bucket", self.bucket.as_deref())?;
        write_optional_text(writer, "Key", self.key.as_deref())?;
        write_optional_text(writer, "UploadId", self.upload_id.as_deref())?;
        write_optional_text(
            writer,
            "PartNumberMarker",
            self.part_number_marker.as_deref(),
        )?;
        write_optional_text(
            writer,
            "NextPartNumberMarker",
            self.next_part_number_marker.as_deref(),
        )?;
        write_optional_i32(writer, "MaxParts", self.max_parts)?;
        write_optional_bool(writer, "IsTruncated", self.is_truncated)?;
        if let Some(ref initiator) = self.initiator {
            initiator.serialize_xml(writer)?;
        }
        if let Some(ref owner) = self.owner {
            owner.serialize_xml(writer)?;
        }
        write_optional_text(writer, "StorageClass", self.storage_class.as_deref())?;
        for part in &self.parts {
            part.serialize_xml(writer)?;
        }
        Ok(())
    }
}

impl S3Serialize for ListMultipartUploadsOutput {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        write_optional_text(writer, "Bucket", self.bucket.as_deref())?;
        write_optional_text(writer, "KeyMarker", self.key_marker.as_deref())?;
        write_optional_text(writer, "UploadIdMarker", self.upload_id_marker.as_deref())?;
        write_optional_text(writer, "NextKeyMarker", self.next_key_marker.as_deref())?;
        write_optional_text(
            writer,
            "NextUploadIdMarker",
            self.next_upload_id_marker.as_deref(),
        )?;
        write_optional_i32(writer, "MaxUploads", self.max_uploads)?;
        write_optional_text(writer, "Delimiter", self.delimiter.as_deref())?;
        write_optional_text(writer, "Prefix", self.prefix.as_deref())?;
        write_optional_bool(writer, "IsTruncated", self.is_truncated)?;
        write_optional_text(writer, "EncodingType", self.encoding_type.as_deref())?;
        for upload in &self.uploads {
            upload.serialize_xml(writer)?;
        }
        for cp in &self.common_prefixes {
            cp.serialize_xml(writer)?;
        }
        Ok(())
    }
}

impl S3Serialize for CompleteMultipartUploadOutput {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        write_optional_text(writer, "Location", self.location.as_deref())?;
        write_optional_text(writer, "Bucket", self.bucket.as_deref())?;
        write_optional_text(writer, "Key", self.key.as_deref())?;
        write_optional_text(writer, "ETag", self.e_tag.as_deref())?;
        Ok(())
    }
}

impl S3Serialize for UploadPartCopyOutput {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        if let Some(ref result) = self.copy_part_result {
            result.serialize_xml(writer)?;
        }
        Ok(())
    }
}

impl S3Serialize for DeleteObjectsOutput {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        for deleted in &self.deleted {
            deleted.serialize_xml(writer)?;
        }
        for error in &self.errors {
            error.serialize_xml(writer)?;
        }
        Ok(())
    }
}
