use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;

use crate::error::CoreError;

/// Responses of one assessment, keyed by question id.
pub type Responses = BTreeMap<String, ResponseItem>;

/// Ordinal outcome of one inventory item.
///
/// On the wire this is the bare number `1`, `0.5` or `0`; any other number is
/// rejected when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreValue {
    Achieved,
    Emerging,
    NotAchieved,
}

impl ScoreValue {
    pub fn value(&self) -> f64 {
        match self {
            ScoreValue::Achieved => 1.0,
            ScoreValue::Emerging => 0.5,
            ScoreValue::NotAchieved => 0.0,
        }
    }

    pub fn from_value(value: f64) -> Result<Self, CoreError> {
        if value == 1.0 {
            Ok(ScoreValue::Achieved)
        } else if value == 0.5 {
            Ok(ScoreValue::Emerging)
        } else if value == 0.0 {
            Ok(ScoreValue::NotAchieved)
        } else {
            Err(CoreError::InvalidScore(value))
        }
    }
}

impl Serialize for ScoreValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Integral ordinals go out as integers so the JSON reads `1` / `0`, not `1.0`.
        match self {
            ScoreValue::Achieved => serializer.serialize_u64(1),
            ScoreValue::Emerging => serializer.serialize_f64(0.5),
            ScoreValue::NotAchieved => serializer.serialize_u64(0),
        }
    }
}

impl<'de> Deserialize<'de> for ScoreValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScoreVisitor;

        impl Visitor<'_> for ScoreVisitor {
            type Value = ScoreValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a score ordinal of 1, 0.5 or 0")
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<ScoreValue, E> {
                ScoreValue::from_value(v).map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<ScoreValue, E> {
                self.visit_f64(v as f64)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<ScoreValue, E> {
                self.visit_f64(v as f64)
            }
        }

        deserializer.deserialize_any(ScoreVisitor)
    }
}

/// The recorded outcome for one question.
///
/// `answered_at` is `None` only for placeholder entries created by a note
/// written before the item was ever scored; such entries do not count as
/// answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ResponseItem {
    #[ts(type = "0 | 0.5 | 1")]
    pub score: ScoreValue,
    pub respondent_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answered_at: Option<jiff::Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ResponseItem {
    pub fn is_scored(&self) -> bool {
        self.answered_at.is_some()
    }
}
