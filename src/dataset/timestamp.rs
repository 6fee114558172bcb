//! @ai:module:intent Parse document timestamps with or without a zone
//! @ai:module:layer domain
//! @ai:module:public_api Timestamp
//! @ai:module:stateless true

use crate::error::{Error, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

/// @ai:intent A document timestamp; zone information is kept when present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    Zoned(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
}

impl Timestamp {
    /// @ai:intent Parse RFC 3339, naive ISO datetime, or a bare date (midnight)
    /// @ai:effects pure
    /// @ai:example ("2023-07-26T14:30:00+02:00") -> Zoned
    /// @ai:example ("2023-07-26") -> Naive(2023-07-26T00:00:00)
    pub fn parse(document_id: &str, value: &str) -> Result<Self> {
        let value = value.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
            return Ok(Timestamp::Zoned(dt));
        }

        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
                return Ok(Timestamp::Naive(dt));
            }
        }

        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(Timestamp::Naive)
            .ok_or_else(|| Error::InvalidTimestamp {
                id: document_id.to_string(),
                value: value.to_string(),
            })
    }

    /// @ai:intent Wall-clock time, ignoring the zone
    /// @ai:effects pure
    pub fn naive_local(&self) -> NaiveDateTime {
        match self {
            Timestamp::Zoned(dt) => dt.naive_local(),
            Timestamp::Naive(dt) => *dt,
        }
    }

    /// @ai:intent RFC 2822 style date header; the zone is omitted for naive timestamps
    /// @ai:effects pure
    /// @ai:example (2023-07-26T14:30:00+02:00) -> "Wed, 26 Jul 2023 14:30:00 +0200"
    pub fn email_date(&self) -> String {
        match self {
            Timestamp::Zoned(dt) => dt.format("%a, %d %b %Y %H:%M:%S %z").to_string(),
            Timestamp::Naive(dt) => dt.format("%a, %d %b %Y %H:%M:%S").to_string(),
        }
    }
}
