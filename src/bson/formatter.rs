//! BSON value formatting for display and editing.

use chrono::SecondsFormat;
use mongodb::bson::spec::BinarySubtype;
use mongodb::bson::{Binary, Bson, DateTime, Document};
use serde_json::Value;

use crate::settings::{FormattingSettings, TimeZoneMode};

/// Get a human-readable type label for a BSON value.
pub fn bson_type_label(value: &Bson) -> &'static str {
    match value {
        Bson::Document(_) => "Document",
        Bson::Array(_) => "Array",
        Bson::String(_) => "String",
        Bson::Int32(_) => "Int32",
        Bson::Int64(_) => "Int64",
        Bson::Double(_) => "Double",
        Bson::Boolean(_) => "Bool",
        Bson::Null => "Null",
        Bson::ObjectId(_) => "ObjectId",
        Bson::DateTime(_) => "Date",
        Bson::Binary(bin) if is_uuid_subtype(bin.subtype) => "UUID",
        Bson::Binary(_) => "Binary",
        Bson::Decimal128(_) => "Decimal128",
        _ => "Value",
    }
}

/// Whether a binary value carries one of the two UUID subtypes.
pub fn is_uuid_subtype(subtype: BinarySubtype) -> bool {
    matches!(subtype, BinarySubtype::Uuid | BinarySubtype::UuidOld)
}

/// Whether a value is a simple scalar.
///
/// Nested documents and arrays are not simple, and neither is binary data,
/// except binary carrying a UUID subtype.
pub fn is_simple_value(value: &Bson) -> bool {
    match value {
        Bson::String(_)
        | Bson::Boolean(_)
        | Bson::Int32(_)
        | Bson::Int64(_)
        | Bson::Double(_)
        | Bson::Decimal128(_)
        | Bson::ObjectId(_)
        | Bson::DateTime(_)
        | Bson::Timestamp(_)
        | Bson::Symbol(_)
        | Bson::Null => true,
        Bson::Binary(bin) => is_uuid_subtype(bin.subtype),
        _ => false,
    }
}

/// Textual rendering of a simple scalar, `None` for non-scalar values.
pub fn scalar_text(value: &Bson, settings: &FormattingSettings) -> Option<String> {
    match value {
        Bson::String(s) => Some(s.clone()),
        Bson::Int32(n) => Some(n.to_string()),
        Bson::Int64(n) => Some(n.to_string()),
        Bson::Double(n) => Some(n.to_string()),
        Bson::Boolean(b) => Some(b.to_string()),
        Bson::Null => Some("null".to_string()),
        Bson::ObjectId(oid) => Some(oid.to_hex()),
        Bson::Decimal128(dec) => Some(dec.to_string()),
        Bson::Symbol(s) => Some(s.clone()),
        Bson::Timestamp(ts) => Some(format!("Timestamp({}, {})", ts.time, ts.increment)),
        Bson::DateTime(dt) => Some(format_datetime(*dt, settings.time_zone)),
        Bson::Binary(bin) if is_uuid_subtype(bin.subtype) => Some(uuid_text(bin, settings)),
        _ => None,
    }
}

/// Display text used when a point-delete confirmation shows the target id.
pub fn id_display_text(id: &Bson, settings: &FormattingSettings) -> String {
    scalar_text(id, settings).unwrap_or_else(|| {
        let ext = id.clone().into_relaxed_extjson();
        serde_json::to_string(&ext).unwrap_or_else(|_| format!("{id:?}"))
    })
}

/// Serialize a document to the editable text shown in the editor dialog.
///
/// The output is pretty-printed relaxed Extended JSON with two overrides:
/// UUID-typed binary renders as `{"$uuid": ...}` decoded with the configured
/// encoding profile, and dates render as RFC3339 in the configured timezone.
/// `parse_editable_document` maps the unmodified output back to an equal
/// document.
pub fn document_to_editable_string(doc: &Document, settings: &FormattingSettings) -> String {
    let value = document_to_editable_value(doc, settings);
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| format!("{doc:?}"))
}

fn document_to_editable_value(doc: &Document, settings: &FormattingSettings) -> Value {
    Value::Object(
        doc.iter()
            .map(|(key, value)| (key.clone(), bson_to_editable_value(value, settings)))
            .collect(),
    )
}

fn bson_to_editable_value(value: &Bson, settings: &FormattingSettings) -> Value {
    match value {
        Bson::Document(doc) => document_to_editable_value(doc, settings),
        Bson::Array(items) => {
            Value::Array(items.iter().map(|item| bson_to_editable_value(item, settings)).collect())
        }
        Bson::Binary(bin) if is_uuid_subtype(bin.subtype) => {
            match bin.to_uuid_with_representation(settings.uuid_encoding.representation()) {
                Ok(uuid) => serde_json::json!({ "$uuid": uuid.to_string() }),
                // Subtype doesn't match the configured profile; keep the raw form.
                Err(_) => Bson::Binary(bin.clone()).into_relaxed_extjson(),
            }
        }
        Bson::DateTime(dt) => match editable_datetime(*dt, settings.time_zone) {
            Some(text) => serde_json::json!({ "$date": text }),
            // Outside the chrono-representable range.
            None => Bson::DateTime(*dt).into_relaxed_extjson(),
        },
        other => other.clone().into_relaxed_extjson(),
    }
}

/// Format a BSON date for display in the configured timezone.
pub fn format_datetime(dt: DateTime, mode: TimeZoneMode) -> String {
    editable_datetime(dt, mode).unwrap_or_else(|| {
        dt.try_to_rfc3339_string().unwrap_or_else(|_| format!("{dt:?}"))
    })
}

fn editable_datetime(dt: DateTime, mode: TimeZoneMode) -> Option<String> {
    let utc = chrono::DateTime::from_timestamp_millis(dt.timestamp_millis())?;
    Some(match mode {
        TimeZoneMode::Utc => utc.to_rfc3339_opts(SecondsFormat::Millis, true),
        TimeZoneMode::Local => {
            utc.with_timezone(&chrono::Local).to_rfc3339_opts(SecondsFormat::Millis, false)
        }
    })
}

fn uuid_text(bin: &Binary, settings: &FormattingSettings) -> String {
    match bin.to_uuid_with_representation(settings.uuid_encoding.representation()) {
        Ok(uuid) => uuid.to_string(),
        Err(_) => {
            let ext = Bson::Binary(bin.clone()).into_relaxed_extjson();
            serde_json::to_string(&ext).unwrap_or_else(|_| format!("{bin:?}"))
        }
    }
}
