//! `HH:MM` time-of-day parsing and serde glue.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serializer};

use crate::error::ValidationError;

/// Parse a 24h `HH:MM` string. Seconds are not accepted.
pub fn parse(input: &str) -> Result<NaiveTime, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidTime(input.to_string()));
    }
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .map_err(|_| ValidationError::InvalidTime(input.to_string()))
}

/// Drop seconds and sub-seconds.
pub fn truncate(time: NaiveTime) -> NaiveTime {
    time.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time)
}

pub fn format(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(*time))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse(&s).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_times() {
        assert_eq!(parse("09:00").unwrap(), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(parse(" 23:59 ").unwrap(), NaiveTime::from_hms_opt(23, 59, 0).unwrap());
    }

    #[test]
    fn rejects_malformed_times() {
        for bad in ["", "24:00", "12:60", "noon", "12:00:30", "12"] {
            assert!(parse(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn truncate_drops_seconds() {
        let t = NaiveTime::from_hms_milli_opt(9, 0, 42, 500).unwrap();
        assert_eq!(truncate(t), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    }
}
