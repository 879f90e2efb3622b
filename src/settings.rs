//! Formatting settings applied when documents are rendered as text.

use mongodb::bson::uuid::UuidRepresentation;
use serde::{Deserialize, Serialize};

/// Document formatting settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct FormattingSettings {
    #[serde(default)]
    pub uuid_encoding: UuidEncoding,
    #[serde(default)]
    pub time_zone: TimeZoneMode,
}

/// Byte-order profile used when rendering UUID-typed binary values.
///
/// Legacy drivers stored UUIDs with driver-specific byte shuffling under the
/// old binary subtype; the profile decides how those bytes are decoded for
/// display and re-encoded after editing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum UuidEncoding {
    #[default]
    Standard,
    JavaLegacy,
    CSharpLegacy,
    PythonLegacy,
}

impl UuidEncoding {
    pub fn label(self) -> &'static str {
        match self {
            UuidEncoding::Standard => "Standard",
            UuidEncoding::JavaLegacy => "Java Legacy",
            UuidEncoding::CSharpLegacy => "C# Legacy",
            UuidEncoding::PythonLegacy => "Python Legacy",
        }
    }

    pub fn all() -> &'static [UuidEncoding] {
        &[
            UuidEncoding::Standard,
            UuidEncoding::JavaLegacy,
            UuidEncoding::CSharpLegacy,
            UuidEncoding::PythonLegacy,
        ]
    }

    /// The driver-level representation for this profile.
    pub fn representation(self) -> UuidRepresentation {
        match self {
            UuidEncoding::Standard => UuidRepresentation::Standard,
            UuidEncoding::JavaLegacy => UuidRepresentation::JavaLegacy,
            UuidEncoding::CSharpLegacy => UuidRepresentation::CSharpLegacy,
            UuidEncoding::PythonLegacy => UuidRepresentation::PythonLegacy,
        }
    }
}

/// Timezone used when rendering date values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum TimeZoneMode {
    #[default]
    Utc,
    Local,
}

impl TimeZoneMode {
    pub fn label(self) -> &'static str {
        match self {
            TimeZoneMode::Utc => "UTC",
            TimeZoneMode::Local => "Local Time",
        }
    }

    pub fn all() -> &'static [TimeZoneMode] {
        &[TimeZoneMode::Utc, TimeZoneMode::Local]
    }
}
