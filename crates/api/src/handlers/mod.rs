//! API handlers module

pub mod auth;
pub mod catalog;
pub mod drivers;
pub mod expeditions;
pub mod health;
pub mod responsibles;
pub mod suppliers;
pub mod transport_companies;
pub mod trucks;

use chrono::NaiveDate;
use regex_lite::Regex;
use serde::{Deserialize, Deserializer};
use std::sync::OnceLock;
use validator::ValidationError;

/// Deserialize `Option<Option<T>>` so that an explicit JSON `null` becomes
/// `Some(None)` while an absent field stays `None`.
///
/// Used with `#[serde(default, deserialize_with = "double_option")]` on patch
/// DTOs: presence decides whether a nullable column is written.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Deserialize an optional date, treating an empty string as absent.
///
/// The admin UI submits `""` for cleared date inputs.
pub(crate) fn empty_date_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

fn plate_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Accepts both the legacy (ABC1234 / ABC-1234) and Mercosul (ABC1D23) formats
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z]{3}-?[0-9][A-Za-z0-9][0-9]{2}$").expect("plate pattern is valid")
    })
}

/// Validate a truck plate in legacy or Mercosul format
pub(crate) fn validate_plate(plate: &str) -> Result<(), ValidationError> {
    if plate_regex().is_match(plate) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_plate"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plate_formats() {
        assert!(validate_plate("ABC1234").is_ok());
        assert!(validate_plate("ABC-1234").is_ok());
        assert!(validate_plate("ABC1D23").is_ok());
        assert!(validate_plate("AB1234").is_err());
        assert!(validate_plate("ABCD123").is_err());
        assert!(validate_plate("").is_err());
    }

    #[test]
    fn test_empty_date_as_none() {
        #[derive(Deserialize)]
        struct Probe {
            #[serde(default, deserialize_with = "empty_date_as_none")]
            date: Option<NaiveDate>,
        }

        let absent: Probe = serde_json::from_str("{}").unwrap();
        assert!(absent.date.is_none());

        let empty: Probe = serde_json::from_str(r#"{"date": ""}"#).unwrap();
        assert!(empty.date.is_none());

        let set: Probe = serde_json::from_str(r#"{"date": "2025-06-30"}"#).unwrap();
        assert_eq!(set.date, NaiveDate::from_ymd_opt(2025, 6, 30));
    }

    #[test]
    fn test_double_option_distinguishes_null_from_absent() {
        #[derive(Deserialize)]
        struct Probe {
            #[serde(default, deserialize_with = "double_option")]
            field: Option<Option<String>>,
        }

        let absent: Probe = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.field, None);

        let null: Probe = serde_json::from_str(r#"{"field": null}"#).unwrap();
        assert_eq!(null.field, Some(None));

        let set: Probe = serde_json::from_str(r#"{"field": "x"}"#).unwrap();
        assert_eq!(set.field, Some(Some("x".to_string())));
    }
}
