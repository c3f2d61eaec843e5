//! Note domain model.
//!
//! # Responsibility
//! - Define the note record and its create-time draft shape.
//! - Own the closed category set used to partition notes for filtering.
//! - Provide the wire codec for optional due dates.
//!
//! # Invariants
//! - `id` is assigned by the store on creation and never reused.
//! - `category` serializes as its stable integer value (1..=3) on every
//!   wire shape; unrecognized integers are rejected at the boundary instead
//!   of being carried through as a never-matching filter.
//! - `due_date` is stored as a UTC instant; day-granularity truncation is a
//!   view concern and happens in the client layer.

use crate::model::validate::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Store-assigned note identifier.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = i64;

/// Closed category set for note filtering.
///
/// The integer values are the stable wire/storage representation; they must
/// not be renumbered once data exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Category {
    All,
    Work,
    Personal,
}

/// Display order of the category selector tabs.
pub const CATEGORY_TABS: [Category; 3] = [Category::All, Category::Work, Category::Personal];

impl Category {
    /// Stable integer value used on the wire and in the store column.
    pub fn as_i64(self) -> i64 {
        match self {
            Self::All => 1,
            Self::Work => 2,
            Self::Personal => 3,
        }
    }

    /// Parses the stable integer value back into the closed set.
    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            1 => Some(Self::All),
            2 => Some(Self::Work),
            3 => Some(Self::Personal),
            _ => None,
        }
    }

    /// User-facing tab label.
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Work => "Work",
            Self::Personal => "Personal",
        }
    }
}

impl From<Category> for i64 {
    fn from(value: Category) -> Self {
        value.as_i64()
    }
}

impl TryFrom<i64> for Category {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_i64(value).ok_or_else(|| ValidationError::UnknownCategory(value.to_string()))
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    /// Parses the textual form of the stable integer value (query strings).
    ///
    /// Anything that is not one of the recognized integers is rejected;
    /// there is no partial or case-insensitive matching.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let number = value
            .trim()
            .parse::<i64>()
            .map_err(|_| ValidationError::UnknownCategory(value.to_string()))?;
        Self::from_i64(number).ok_or_else(|| ValidationError::UnknownCategory(value.to_string()))
    }
}

/// A single task/reminder record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Store-assigned identifier; unique and never reused.
    pub id: NoteId,
    /// Email of the user the note belongs to. A plain attribute, not a
    /// referential constraint.
    #[serde(rename = "user_email")]
    pub owner: String,
    /// Free-form note content.
    pub text: String,
    /// Category tab the note is filed under.
    pub category: Category,
    /// Optional due instant, UTC.
    #[serde(default, with = "due_date_wire")]
    pub due_date: Option<DateTime<Utc>>,
}

/// Create-time note shape; the store assigns the `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    #[serde(rename = "user_email")]
    pub owner: String,
    pub text: String,
    pub category: Category,
    #[serde(default, with = "due_date_wire")]
    pub due_date: Option<DateTime<Utc>>,
}

/// Wire codec for optional due dates.
///
/// Input accepts an RFC 3339 instant or a plain `YYYY-MM-DD` date (mapped to
/// midnight UTC). Output is always an RFC 3339 instant.
pub mod due_date_wire {
    use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Parses one due-date wire value.
    pub fn parse(value: &str) -> Result<DateTime<Utc>, String> {
        if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
            return Ok(instant.with_timezone(&Utc));
        }
        if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
                return Ok(midnight.and_utc());
            }
        }
        Err(format!(
            "due date must be an RFC 3339 instant or a YYYY-MM-DD date, got `{value}`"
        ))
    }

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(instant) => {
                serializer.serialize_str(&instant.to_rfc3339_opts(SecondsFormat::Secs, true))
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(value) => parse(&value).map(Some).map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}
