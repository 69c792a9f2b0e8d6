//! Serde adapters for backend timestamps.
//!
//! Use with `#[serde(with = "timestamp")]` or
//! `#[serde(with = "timestamp::option", default)]`. Values are always
//! written back as RFC 3339.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer, de};

use crate::format::parse_timestamp;

/// Serialize as RFC 3339 with a `Z` suffix.
///
/// # Errors
///
/// Propagates serializer errors.
pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// Deserialize from RFC 3339, a naive ISO date-time, or a plain date.
///
/// # Errors
///
/// Fails when the string matches none of the accepted forms.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {raw}")))
}

/// Adapter for `Option<DateTime<Utc>>`; `null` and missing map to `None`.
pub mod option {
    use super::{DateTime, Deserialize, Deserializer, SecondsFormat, Serializer, Utc, de};
    use crate::format::parse_timestamp;

    /// Serialize `Some` as RFC 3339 and `None` as `null`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Secs, true)),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize an optional timestamp.
    ///
    /// # Errors
    ///
    /// Fails when a present string is not a timestamp.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        raw.map(|s| {
            parse_timestamp(&s).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {s}")))
        })
        .transpose()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Stamped {
        #[serde(with = "super")]
        at: chrono::DateTime<chrono::Utc>,
        #[serde(with = "super::option", default)]
        seen: Option<chrono::DateTime<chrono::Utc>>,
    }

    #[test]
    fn test_accepts_naive_and_writes_rfc3339() {
        let parsed: Stamped = serde_json::from_str(r#"{"at":"2024-12-15T08:00:00"}"#).unwrap();
        assert_eq!(
            parsed.at,
            chrono::Utc.with_ymd_and_hms(2024, 12, 15, 8, 0, 0).unwrap()
        );
        assert!(parsed.seen.is_none());

        let json = serde_json::to_string(&parsed).unwrap();
        assert_eq!(json, r#"{"at":"2024-12-15T08:00:00Z","seen":null}"#);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(serde_json::from_str::<Stamped>(r#"{"at":"yesterday"}"#).is_err());
    }
}
