//! Lifecycle status shared by awards and invoices.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Fulfilment status of an award or invoice record.
///
/// Stored as lowercase text in the record store with a CHECK constraint
/// matching this enumeration. New records default to [`RecordStatus::Planned`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    /// Planned but not yet ordered.
    #[default]
    Planned,
    /// Order placed with the vendor.
    Ordered,
    /// Order or payment approved by the office.
    Approved,
    /// Shipped or handed off by the vendor.
    Delivered,
    /// Received and checked into inventory.
    Received,
}

impl RecordStatus {
    /// Lowercase storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Ordered => "ordered",
            Self::Approved => "approved",
            Self::Delivered => "delivered",
            Self::Received => "received",
        }
    }
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when parsing an unknown status value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown record status: {value}")]
pub struct RecordStatusParseError {
    /// The rejected input.
    pub value: String,
}

impl std::str::FromStr for RecordStatus {
    type Err = RecordStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planned" => Ok(Self::Planned),
            "ordered" => Ok(Self::Ordered),
            "approved" => Ok(Self::Approved),
            "delivered" => Ok(Self::Delivered),
            "received" => Ok(Self::Received),
            other => Err(RecordStatusParseError {
                value: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("planned", RecordStatus::Planned)]
    #[case("ordered", RecordStatus::Ordered)]
    #[case("approved", RecordStatus::Approved)]
    #[case("delivered", RecordStatus::Delivered)]
    #[case("received", RecordStatus::Received)]
    fn parses_known_statuses(#[case] input: &str, #[case] expected: RecordStatus) {
        let parsed: RecordStatus = input.parse().expect("known status");
        assert_eq!(parsed, expected);
        assert_eq!(parsed.as_str(), input);
    }

    #[rstest]
    #[case("shipped")]
    #[case("Planned")]
    #[case("")]
    fn rejects_unknown_statuses(#[case] input: &str) {
        let err = input.parse::<RecordStatus>().expect_err("unknown status");
        assert_eq!(err.value, input);
    }

    #[rstest]
    fn defaults_to_planned() {
        assert_eq!(RecordStatus::default(), RecordStatus::Planned);
    }

    #[rstest]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&RecordStatus::Delivered).expect("serialise");
        assert_eq!(json, r#""delivered""#);
    }
}
