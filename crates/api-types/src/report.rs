use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;
use uuid::Uuid;

/// Ordinal 1-5 rating used for crowd and noise levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(try_from = "u8", into = "u8")]
#[ts(type = "1 | 2 | 3 | 4 | 5")]
pub enum Level {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("level must be between 1 and 5, got {0}")]
pub struct InvalidLevel(pub i64);

impl Level {
    pub fn value(self) -> u8 {
        match self {
            Level::VeryLow => 1,
            Level::Low => 2,
            Level::Moderate => 3,
            Level::High => 4,
            Level::VeryHigh => 5,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl TryFrom<i64> for Level {
    type Error = InvalidLevel;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Level::VeryLow),
            2 => Ok(Level::Low),
            3 => Ok(Level::Moderate),
            4 => Ok(Level::High),
            5 => Ok(Level::VeryHigh),
            other => Err(InvalidLevel(other)),
        }
    }
}

impl TryFrom<u8> for Level {
    type Error = InvalidLevel;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Level::try_from(i64::from(value))
    }
}

impl TryFrom<i16> for Level {
    type Error = InvalidLevel;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        Level::try_from(i64::from(value))
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.value()
    }
}

impl From<Level> for i16 {
    fn from(level: Level) -> Self {
        i16::from(level.value())
    }
}

/// A user's snapshot of conditions at a workspace. Reports are never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Report {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub user_id: Uuid,
    #[sqlx(try_from = "i16")]
    pub crowd_level: Level,
    #[sqlx(try_from = "i16")]
    pub noise_level: Level,
    /// Measured download speed in Mbps.
    pub wifi_speed: Option<f64>,
    pub notes: Option<String>,
    pub reported_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReportRequest {
    pub workspace_id: Uuid,
    pub crowd_level: Level,
    pub noise_level: Level,
    #[serde(default)]
    #[ts(optional)]
    pub wifi_speed: Option<f64>,
    #[serde(default)]
    #[ts(optional)]
    pub notes: Option<String>,
}

/// Means over a workspace's most recent reports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct ReportAverages {
    pub avg_crowd_level: f64,
    pub avg_noise_level: f64,
    /// `None` when no report in the window measured wifi.
    pub avg_wifi_speed: Option<f64>,
}
