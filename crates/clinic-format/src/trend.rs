//! Percentage change between two samples.

use std::fmt;

use serde::Serialize;

/// Direction of change between two samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Neutral,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Up => "up",
            TrendDirection::Down => "down",
            TrendDirection::Neutral => "neutral",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendered magnitude (`50.0%`) plus direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trend {
    pub value: String,
    pub direction: TrendDirection,
}

impl Trend {
    fn new(value: impl Into<String>, direction: TrendDirection) -> Self {
        Self {
            value: value.into(),
            direction,
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.direction)
    }
}

/// Magnitude shown when the change has no finite percentage.
pub const UNDEFINED_CHANGE: &str = "N/A";

/// Computes the percentage change from `previous` to `current`.
///
/// - equal samples: `0%`, neutral
/// - otherwise `|current - previous| / previous * 100` with one decimal,
///   direction from the sign of the ratio
/// - `previous == 0`: [`UNDEFINED_CHANGE`], direction from the sign of `current`
/// - non-finite samples: [`UNDEFINED_CHANGE`], neutral
pub fn calculate_trend(current: f64, previous: f64) -> Trend {
    if !current.is_finite() || !previous.is_finite() {
        return Trend::new(UNDEFINED_CHANGE, TrendDirection::Neutral);
    }
    if current == previous {
        return Trend::new("0%", TrendDirection::Neutral);
    }
    if previous == 0.0 {
        let direction = if current > 0.0 {
            TrendDirection::Up
        } else {
            TrendDirection::Down
        };
        return Trend::new(UNDEFINED_CHANGE, direction);
    }

    let change = (current - previous) / previous * 100.0;
    let direction = if change > 0.0 {
        TrendDirection::Up
    } else {
        TrendDirection::Down
    };
    Trend::new(format!("{:.1}%", change.abs()), direction)
}
