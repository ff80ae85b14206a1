use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A sales region in the regional revenue breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    Americas,
    #[serde(rename = "EMEA")]
    Emea,
    #[serde(rename = "APAC")]
    Apac,
}

impl Region {
    /// Every region, in the order their rows are emitted.
    pub const ALL: [Region; 3] = [Region::Americas, Region::Emea, Region::Apac];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Americas => "Americas",
            Region::Emea => "EMEA",
            Region::Apac => "APAC",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "americas" => Ok(Region::Americas),
            "emea" => Ok(Region::Emea),
            "apac" => Ok(Region::Apac),
            _ => Err(CoreError::InvalidInput("region".to_string(), s.to_string())),
        }
    }
}

/// The acquisition channel selected on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    #[default]
    All,
    Direct,
    Paid,
    Organic,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::All => "all",
            Channel::Direct => "direct",
            Channel::Paid => "paid",
            Channel::Organic => "organic",
        }
    }

    /// Human-readable label for selectors and table headers.
    pub fn label(&self) -> &'static str {
        match self {
            Channel::All => "All",
            Channel::Direct => "Direct",
            Channel::Paid => "Paid",
            Channel::Organic => "Organic",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Channel::All),
            "direct" => Ok(Channel::Direct),
            "paid" => Ok(Channel::Paid),
            "organic" => Ok(Channel::Organic),
            _ => Err(CoreError::InvalidInput("channel".to_string(), s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_order_and_names() {
        let names: Vec<&str> = Region::ALL.iter().map(|r| r.as_str()).collect();
        assert_eq!(names, vec!["Americas", "EMEA", "APAC"]);
    }

    #[test]
    fn test_region_serializes_with_display_name() {
        assert_eq!(serde_json::to_string(&Region::Emea).unwrap(), "\"EMEA\"");
        let parsed: Region = serde_json::from_str("\"APAC\"").unwrap();
        assert_eq!(parsed, Region::Apac);
    }

    #[test]
    fn test_channel_parse_is_case_insensitive() {
        assert_eq!("Paid".parse::<Channel>().unwrap(), Channel::Paid);
        assert_eq!(" ORGANIC ".parse::<Channel>().unwrap(), Channel::Organic);
        assert_eq!(Channel::default(), Channel::All);
    }

    #[test]
    fn test_unknown_channel_is_rejected() {
        let err = "email".parse::<Channel>().unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidInput("channel".to_string(), "email".to_string())
        );
    }
}
