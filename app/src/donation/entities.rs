use crate::user::{Role, Username};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Timestamp format used in the donations document.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error)]
#[error("donation amount must be positive")]
pub struct AmountNotPositive;

/// A donated amount, guaranteed finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Amount(f64);

impl Amount {
    pub fn new(value: f64) -> Result<Self, AmountNotPositive> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(AmountNotPositive)
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Amount {
    type Error = AmountNotPositive;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for f64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// One timestamped monetary contribution by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Donation {
    pub amount: Amount,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// Per-user slice of the aggregate view.
#[derive(Debug)]
pub struct UserTotal {
    pub username: Username,
    pub role: Role,
    pub total: f64,
    pub count: usize,
}

/// Donation totals across all users. Derived at request time, never stored.
#[derive(Debug)]
pub struct Aggregate {
    pub users: Vec<UserTotal>,
    pub total: f64,
}

mod timestamp {
    use super::TIMESTAMP_FORMAT;
    use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(
        timestamp: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&timestamp.format(TIMESTAMP_FORMAT).to_string())
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let naive = NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT)
            .map_err(serde::de::Error::custom)?;
        Ok(Utc.from_utc_datetime(&naive))
    }
}
