use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{MaskError, MaskResult};

/// How time fields in schedule text are interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingMode {
    /// Values are absolute frame indices.
    #[default]
    Frame,
    /// Values are fractions of the total frame count.
    Percent,
}

impl TimingMode {
    /// Resolve a start time to a 0-based frame index.
    ///
    /// Percent values are scaled by `total_frames`, truncated, and moved back one frame so that
    /// `1.0` lands on the last frame rather than one past it.
    pub fn resolve_start(self, value: f64, total_frames: usize) -> MaskResult<usize> {
        check_time(value)?;
        Ok(match self {
            Self::Frame => value as usize,
            Self::Percent => ((value * total_frames as f64) as usize).saturating_sub(1),
        })
    }

    /// Resolve a duration to a frame count.
    pub fn resolve_span(self, value: f64, total_frames: usize) -> MaskResult<usize> {
        check_time(value)?;
        Ok(match self {
            Self::Frame => value as usize,
            Self::Percent => (value * total_frames as f64) as usize,
        })
    }
}

fn check_time(value: f64) -> MaskResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(MaskError::range(format!(
            "time value {value} must be finite and >= 0"
        )));
    }
    Ok(())
}

impl fmt::Display for TimingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Frame => "frame",
            Self::Percent => "percent",
        })
    }
}

impl FromStr for TimingMode {
    type Err = MaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "frame" | "frames" => Ok(Self::Frame),
            "percent" | "percentage" => Ok(Self::Percent),
            other => Err(MaskError::parse(format!("unknown timing mode '{other}'"))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/timing.rs"]
mod tests;
