//! Severity thresholds and the classification vocabulary of a comparison.

use crate::errors::{CompareError, CompareResult};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Percentage thresholds separating minor, moderate and major changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    #[serde(deserialize_with = "percentage")]
    pub minor_pct: f64,
    #[serde(deserialize_with = "percentage")]
    pub moderate_pct: f64,
    #[serde(deserialize_with = "percentage")]
    pub major_pct: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

/// Accepts a JSON number or a string holding one, such as `"3"`.
fn percentage<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(value) => Ok(value),
        NumberOrText::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("'{}' is not a percentage", text))),
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            minor_pct: 2.0,
            moderate_pct: 5.0,
            major_pct: 10.0,
        }
    }
}

impl Thresholds {
    /// Parses a JSON object overriding any subset of the default thresholds.
    pub fn with_overrides(json: &str) -> CompareResult<Self> {
        serde_json::from_str(json).map_err(CompareError::InvalidThresholds)
    }

    /// Severity of a change whose magnitude is `magnitude_pct` (a positive percentage).
    pub fn classify(&self, magnitude_pct: f64) -> Severity {
        if magnitude_pct >= self.major_pct {
            Severity::Major
        } else if magnitude_pct >= self.moderate_pct {
            Severity::Moderate
        } else {
            Severity::Minor
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    None,
    Minor,
    Moderate,
    Major,
}

impl Severity {
    pub fn name(&self) -> &'static str {
        match self {
            Severity::None => "none",
            Severity::Minor => "minor",
            Severity::Moderate => "moderate",
            Severity::Major => "major",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Severity::None),
            "minor" => Ok(Severity::Minor),
            "moderate" => Ok(Severity::Moderate),
            "major" => Ok(Severity::Major),
            other => Err(format!("unknown severity '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Regression,
    Improvement,
    Unchanged,
    Unknown,
}

impl Direction {
    pub fn name(&self) -> &'static str {
        match self {
            Direction::Regression => "regression",
            Direction::Improvement => "improvement",
            Direction::Unchanged => "unchanged",
            Direction::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
