//! Filter value helpers: date literal detection and case normalisation.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Precision a date column is truncated to before comparing it with a partial literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateGranularity {
    Day,
    Minute,
    Second,
}

impl DateGranularity {
    fn shape_len(self) -> usize {
        match self {
            DateGranularity::Day => 10,
            DateGranularity::Minute => 16,
            DateGranularity::Second => 19,
        }
    }
}

const DATE_SHAPE: &[u8] = b"0000-00-00 00:00:00";

/// A value that parsed as `YYYY-MM-DD`, `YYYY-MM-DD HH:MM` or `YYYY-MM-DD HH:MM:SS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateLiteral {
    pub granularity: DateGranularity,
}

impl DateLiteral {
    /// Returns `None` for anything that is not exactly one of the three shapes
    /// or does not name a real calendar instant.
    pub fn parse(raw: &str) -> Option<Self> {
        let granularity = [
            DateGranularity::Day,
            DateGranularity::Minute,
            DateGranularity::Second,
        ]
        .into_iter()
        .find(|granularity| granularity.shape_len() == raw.len())?;

        let shaped = raw.bytes().zip(DATE_SHAPE).all(|(byte, &expected)| {
            if expected == b'0' {
                byte.is_ascii_digit()
            } else {
                byte == expected
            }
        });
        if !shaped {
            return None;
        }

        let calendar_valid = match granularity {
            DateGranularity::Day => NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_ok(),
            DateGranularity::Minute => NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M").is_ok(),
            DateGranularity::Second => {
                NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").is_ok()
            }
        };

        calendar_valid.then_some(Self { granularity })
    }
}

/// First slot that carries a value.
pub fn first_present(values: &[Option<String>]) -> Option<&str> {
    values.iter().flatten().next().map(String::as_str)
}

pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Upper-cased copy of `values`; the caller's slice is left untouched.
pub fn upper_cased(values: &[Option<String>]) -> Vec<Option<String>> {
    values
        .iter()
        .map(|value| value.as_deref().map(str::to_uppercase))
        .collect()
}
