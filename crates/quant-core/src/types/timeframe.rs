//! Timeframe definitions for bar series.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DataError;

/// Session length of the bars in a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    /// Daily bars
    #[default]
    Daily,
    /// Weekly bars
    Weekly,
    /// Monthly bars
    Monthly,
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Timeframe::Daily => "daily",
            Timeframe::Weekly => "weekly",
            Timeframe::Monthly => "monthly",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Timeframe {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "d" | "1d" | "day" | "daily" => Ok(Timeframe::Daily),
            "w" | "1w" | "week" | "weekly" => Ok(Timeframe::Weekly),
            "m" | "1mo" | "month" | "monthly" => Ok(Timeframe::Monthly),
            _ => Err(DataError::InvalidTimeframe(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeframe_parse() {
        assert_eq!(Timeframe::from_str("1d").unwrap(), Timeframe::Daily);
        assert_eq!(Timeframe::from_str("Daily").unwrap(), Timeframe::Daily);
        assert_eq!(Timeframe::from_str("w").unwrap(), Timeframe::Weekly);
        assert_eq!(Timeframe::from_str("month").unwrap(), Timeframe::Monthly);
        assert!(Timeframe::from_str("5m").is_err());
    }

    #[test]
    fn test_timeframe_display_round_trips() {
        for tf in [Timeframe::Daily, Timeframe::Weekly, Timeframe::Monthly] {
            assert_eq!(Timeframe::from_str(&tf.to_string()).unwrap(), tf);
        }
    }
}
