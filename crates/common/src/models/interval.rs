use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParameterError;

/// Bar granularity accepted by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Interval {
    #[default]
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "1wk")]
    OneWeek,
}

impl Interval {
    pub const ALL: [Interval; 4] = [
        Interval::OneDay,
        Interval::OneHour,
        Interval::FiveMinutes,
        Interval::OneWeek,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::OneDay => "1d",
            Interval::OneHour => "1h",
            Interval::FiveMinutes => "5m",
            Interval::OneWeek => "1wk",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interval::ALL
            .into_iter()
            .find(|interval| interval.as_str() == s)
            .ok_or_else(|| ParameterError::UnknownInterval(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_provider_tokens() {
        assert_eq!("1d".parse::<Interval>(), Ok(Interval::OneDay));
        assert_eq!("1h".parse::<Interval>(), Ok(Interval::OneHour));
        assert_eq!("5m".parse::<Interval>(), Ok(Interval::FiveMinutes));
        assert_eq!("1wk".parse::<Interval>(), Ok(Interval::OneWeek));
    }

    #[test]
    fn rejects_unknown_token() {
        assert_eq!(
            "1w".parse::<Interval>(),
            Err(ParameterError::UnknownInterval("1w".to_string()))
        );
    }

    #[test]
    fn serializes_as_token() {
        let json = serde_json::to_string(&Interval::OneWeek).unwrap();
        assert_eq!(json, "\"1wk\"");
    }
}
