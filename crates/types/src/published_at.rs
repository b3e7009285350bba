//! Publication timestamps.
//!
//! Posts carry an optional publication instant. It is always held in UTC at second precision
//! and rendered as `YYYY-MM-DD HH:mm:ss`. An unset timestamp renders as the empty string and
//! orders before every set timestamp.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SubsecRound, Utc};
use std::fmt;

/// Canonical `strftime` layout for publication timestamps.
pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Naive layouts, interpreted as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

/// Layouts carrying an explicit UTC offset.
const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Errors returned when a timestamp string cannot be understood.
#[derive(Debug, thiserror::Error)]
pub enum DateError {
    #[error("unrecognised date: {0}")]
    Unrecognised(String),
}

/// A publication instant, or the absence of one.
///
/// The derived ordering places unset values first, which is what "sinks to the bottom of a
/// descending list" needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PublishedAt(Option<DateTime<Utc>>);

impl PublishedAt {
    /// The unset timestamp.
    pub const UNSET: Self = Self(None);

    /// Wraps an instant, dropping sub-second precision.
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(Some(instant.trunc_subsecs(0)))
    }

    /// Parses a timestamp string.
    ///
    /// Blank input yields [`PublishedAt::UNSET`]. Timestamps without an offset are taken to be
    /// UTC; dates without a time are taken to be midnight UTC.
    ///
    /// # Errors
    ///
    /// Returns `DateError::Unrecognised` if the input matches none of the accepted layouts.
    pub fn parse(input: &str) -> Result<Self, DateError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(Self::UNSET);
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
            return Ok(Self::new(dt.with_timezone(&Utc)));
        }

        for format in OFFSET_DATETIME_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(input, format) {
                return Ok(Self::new(dt.with_timezone(&Utc)));
            }
        }

        for format in NAIVE_DATETIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
                return Ok(Self::new(naive.and_utc()));
            }
        }

        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(input, format) {
                if let Some(naive) = date.and_hms_opt(0, 0, 0) {
                    return Ok(Self::new(naive.and_utc()));
                }
            }
        }

        Err(DateError::Unrecognised(input.to_owned()))
    }

    /// Parses a timestamp string, mapping anything unrecognised to unset.
    pub fn parse_lenient(input: &str) -> Self {
        Self::parse(input).unwrap_or(Self::UNSET)
    }

    pub fn instant(&self) -> Option<DateTime<Utc>> {
        self.0
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }
}

impl From<DateTime<Utc>> for PublishedAt {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::new(instant)
    }
}

impl fmt::Display for PublishedAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(instant) => write!(f, "{}", instant.format(CANONICAL_DATE_FORMAT)),
            None => Ok(()),
        }
    }
}

impl serde::Serialize for PublishedAt {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for PublishedAt {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        match s {
            Some(s) => PublishedAt::parse(&s).map_err(serde::de::Error::custom),
            None => Ok(PublishedAt::UNSET),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(input: &str) -> String {
        PublishedAt::parse(input).unwrap().to_string()
    }

    #[test]
    fn canonical_input_is_a_fixed_point() {
        assert_eq!(fmt("2023-03-01 08:30:15"), "2023-03-01 08:30:15");
        assert_eq!(fmt(&fmt("2023-03-01 08:30:15")), "2023-03-01 08:30:15");
    }

    #[test]
    fn offsets_are_normalised_to_utc() {
        assert_eq!(fmt("2023-03-01T08:30:15+08:00"), "2023-03-01 00:30:15");
        assert_eq!(fmt("2023-03-01T08:30:15.999Z"), "2023-03-01 08:30:15");
        assert_eq!(fmt("2023-03-01 08:30:15 +0100"), "2023-03-01 07:30:15");
    }

    #[test]
    fn naive_and_date_only_inputs_are_utc() {
        assert_eq!(fmt("2023-01-01"), "2023-01-01 00:00:00");
        assert_eq!(fmt("2023/01/02 03:04:05"), "2023-01-02 03:04:05");
        assert_eq!(fmt("2023-01-02T03:04"), "2023-01-02 03:04:00");
    }

    #[test]
    fn blank_input_is_unset() {
        let unset = PublishedAt::parse("  ").unwrap();
        assert!(!unset.is_set());
        assert_eq!(unset.to_string(), "");
    }

    #[test]
    fn garbage_is_an_error_or_unset_when_lenient() {
        assert!(matches!(
            PublishedAt::parse("next tuesday"),
            Err(DateError::Unrecognised(_))
        ));
        assert_eq!(PublishedAt::parse_lenient("next tuesday"), PublishedAt::UNSET);
    }

    #[test]
    fn unset_orders_before_any_instant() {
        let early = PublishedAt::parse("1970-01-01").unwrap();
        assert!(PublishedAt::UNSET < early);
    }

    #[test]
    fn serializes_as_canonical_string() {
        let at = PublishedAt::parse("2023-01-01 10:00:00").unwrap();
        assert_eq!(
            serde_json::to_string(&at).unwrap(),
            "\"2023-01-01 10:00:00\""
        );
        assert_eq!(serde_json::to_string(&PublishedAt::UNSET).unwrap(), "\"\"");

        let back: PublishedAt = serde_json::from_str("\"2023-01-01 10:00:00\"").unwrap();
        assert_eq!(back, at);
        let null: PublishedAt = serde_json::from_str("null").unwrap();
        assert_eq!(null, PublishedAt::UNSET);
    }
}
