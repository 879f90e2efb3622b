//! Parsing edited document text back into BSON.

use mongodb::bson::{self, Binary, Bson, DateTime, Document, Uuid};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::settings::FormattingSettings;

/// Parse editor text into a BSON document.
///
/// Accepts the relaxed Extended JSON produced by the formatter, plus JSON5
/// conveniences (unquoted keys, trailing commas) for hand-edited text. The
/// `$uuid` and `$date` overrides are decoded with the same settings the
/// formatter encoded them with, so unmodified text parses back to an equal
/// document.
pub fn parse_editable_document(input: &str, settings: &FormattingSettings) -> Result<Document> {
    let value: Value = json5::from_str(input)
        .map_err(|e| Error::Parse(e.to_string()))?;

    match value_to_bson(value, settings)? {
        Bson::Document(doc) => Ok(doc),
        _ => Err(Error::Parse("Root JSON must be a document".to_string())),
    }
}

fn value_to_bson(value: Value, settings: &FormattingSettings) -> Result<Bson> {
    match value {
        Value::Object(map) => {
            if map.len() == 1 {
                if let Some(Value::String(text)) = map.get("$uuid") {
                    return parse_uuid(text, settings);
                }
                if let Some(Value::String(text)) = map.get("$date") {
                    if let Ok(parsed) = chrono::DateTime::parse_from_rfc3339(text) {
                        return Ok(Bson::DateTime(DateTime::from_millis(
                            parsed.timestamp_millis(),
                        )));
                    }
                }
            }

            if map.keys().any(|key| key.starts_with('$')) {
                // Extended JSON type wrapper ($oid, $numberLong, $binary, ...).
                return bson::Bson::try_from(Value::Object(map))
                    .map_err(|e| Error::Parse(e.to_string()));
            }

            let mut doc = Document::new();
            for (key, item) in map {
                doc.insert(key, value_to_bson(item, settings)?);
            }
            Ok(Bson::Document(doc))
        }
        Value::Array(items) => {
            let mut array = Vec::with_capacity(items.len());
            for item in items {
                array.push(value_to_bson(item, settings)?);
            }
            Ok(Bson::Array(array))
        }
        leaf => bson::Bson::try_from(leaf).map_err(|e| Error::Parse(e.to_string())),
    }
}

fn parse_uuid(text: &str, settings: &FormattingSettings) -> Result<Bson> {
    let uuid = Uuid::parse_str(text).map_err(|e| Error::Parse(e.to_string()))?;
    let representation = settings.uuid_encoding.representation();
    Ok(Bson::Binary(Binary::from_uuid_with_representation(uuid, representation)))
}
