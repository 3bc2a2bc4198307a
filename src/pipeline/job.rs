//! JSON run configuration.
//!
//! ```json
//! {
//!   "background": "0, 0, 0",
//!   "subject": { "color": "255, 255, 255" },
//!   "amplitude_length": "truncate",
//!   "mode": { "kind": "scheduled", "schedule": "(0, 2, (255, 0, 0)),", "timing": "frame" }
//! }
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::animation::ease::Ease;
use crate::animation::envelope::{PhaseDuration, RadiusRange, ThresholdEnvelope, ThresholdParams};
use crate::animation::signal::LengthPolicy;
use crate::foundation::core::{Fps, Rgb8};
use crate::foundation::error::{MaskError, MaskResult};
use crate::grow::grower::Quality;
use crate::mask::kernel::KernelShape;
use crate::schedule::dilation::{TriggerWindow, parse_palette};
use crate::schedule::timing::TimingMode;

/// A complete run description.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Job {
    /// Canvas color behind every layer.
    #[serde(default = "default_background")]
    pub background: Rgb8,
    /// Paint the ungrown mask on top in this color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<SubjectConfig>,
    /// Reconciliation of amplitude length with the mask frame count.
    #[serde(default)]
    pub amplitude_length: LengthPolicy,
    /// What drives the growth.
    pub mode: Mode,
}

fn default_background() -> Rgb8 {
    Rgb8::BLACK
}

/// Subject overlay settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubjectConfig {
    /// Overlay color.
    pub color: Rgb8,
}

/// Growth driver, tagged by `kind`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mode {
    /// Scripted dilation schedule text.
    Scheduled(ScheduledMode),
    /// Events spawned at upward amplitude crossings.
    AudioThreshold(AudioThresholdMode),
    /// Thresholded attack/decay envelope.
    Envelope(EnvelopeMode),
    /// Radius proportional to the amplitude.
    Proportional(ProportionalMode),
    /// One monotonic growth from a delay frame.
    Linear(LinearMode),
}

impl Mode {
    /// Tag as written in JSON.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Scheduled(_) => "scheduled",
            Self::AudioThreshold(_) => "audio_threshold",
            Self::Envelope(_) => "envelope",
            Self::Proportional(_) => "proportional",
            Self::Linear(_) => "linear",
        }
    }

    /// `true` when the mode reads an amplitude signal.
    pub fn needs_amplitude(&self) -> bool {
        matches!(
            self,
            Self::AudioThreshold(_) | Self::Envelope(_) | Self::Proportional(_)
        )
    }
}

/// Settings of [`Mode::Scheduled`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScheduledMode {
    /// `"(time, speed, (r, g, b)), ..."`.
    pub schedule: String,
    /// Interpretation of the time fields.
    pub timing: TimingMode,
    /// Grower quality factor.
    pub quality: f64,
}

impl Default for ScheduledMode {
    fn default() -> Self {
        Self {
            schedule: String::new(),
            timing: TimingMode::Frame,
            quality: 0.25,
        }
    }
}

/// Settings of [`Mode::AudioThreshold`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AudioThresholdMode {
    /// Palette text; blank uses the default palette.
    pub colors: String,
    /// Crossing level.
    pub threshold: f32,
    /// Growth speed of every spawned event.
    pub speed: u32,
    /// Grower quality factor.
    pub quality: f64,
    /// First frame scanned for crossings.
    pub start_frame: usize,
    /// Frame at which scanning stops; 0 scans to the end.
    pub end_frame: usize,
}

impl Default for AudioThresholdMode {
    fn default() -> Self {
        Self {
            colors: String::new(),
            threshold: 0.5,
            speed: 30,
            quality: 0.15,
            start_frame: 0,
            end_frame: 0,
        }
    }
}

impl AudioThresholdMode {
    /// Scan window; an `end_frame` of 0 means "until the end".
    pub fn window(&self) -> MaskResult<TriggerWindow> {
        TriggerWindow::new(
            self.start_frame,
            (self.end_frame > 0).then_some(self.end_frame),
        )
    }
}

/// Settings of [`Mode::Envelope`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EnvelopeMode {
    /// Kernel shape.
    pub shape: KernelShape,
    /// Radius at full progress.
    pub max_radius: f64,
    /// Radius floor.
    pub min_radius: f64,
    /// Attack level.
    pub threshold: f32,
    /// Attack length.
    pub attack: PhaseDuration,
    /// Decay length.
    pub decay: PhaseDuration,
    /// Frames per second for durations in seconds.
    pub fps: u32,
    /// Attack curve.
    pub attack_curve: Ease,
    /// Decay curve.
    pub decay_curve: Ease,
}

impl Default for EnvelopeMode {
    fn default() -> Self {
        let params = ThresholdParams::default();
        Self {
            shape: KernelShape::Circle,
            max_radius: 25.0,
            min_radius: 0.0,
            threshold: params.threshold,
            attack: params.attack,
            decay: params.decay,
            fps: 30,
            attack_curve: params.attack_curve,
            decay_curve: params.decay_curve,
        }
    }
}

impl EnvelopeMode {
    /// Resolved envelope.
    pub fn envelope(&self) -> MaskResult<ThresholdEnvelope> {
        ThresholdEnvelope::new(&ThresholdParams {
            threshold: self.threshold,
            attack: self.attack,
            decay: self.decay,
            attack_curve: self.attack_curve,
            decay_curve: self.decay_curve,
            fps: Fps::new(self.fps, 1)?,
        })
    }

    /// Validated radius bounds.
    pub fn radius(&self) -> MaskResult<RadiusRange> {
        RadiusRange::new(self.min_radius, self.max_radius)
    }
}

/// Settings of [`Mode::Proportional`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ProportionalMode {
    /// Kernel shape.
    pub shape: KernelShape,
    /// Radius at amplitude 1.
    pub max_radius: f64,
    /// Radius at amplitude 0.
    pub min_radius: f64,
}

impl Default for ProportionalMode {
    fn default() -> Self {
        Self {
            shape: KernelShape::Circle,
            max_radius: 25.0,
            min_radius: 0.0,
        }
    }
}

impl ProportionalMode {
    /// Validated radius bounds.
    pub fn radius(&self) -> MaskResult<RadiusRange> {
        RadiusRange::new(self.min_radius, self.max_radius)
    }
}

/// Settings of [`Mode::Linear`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LinearMode {
    /// Kernel shape.
    pub shape: KernelShape,
    /// Radius added per frame.
    pub speed: u32,
    /// Frames before growth starts.
    pub delay: usize,
}

impl Default for LinearMode {
    fn default() -> Self {
        Self {
            shape: KernelShape::Circle,
            speed: 1,
            delay: 0,
        }
    }
}

impl Job {
    /// Read and parse a job file.
    pub fn from_path(path: impl AsRef<Path>) -> MaskResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            anyhow::Error::new(e).context(format!("open job '{}'", path.display()))
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse a job from JSON.
    pub fn from_reader(reader: impl Read) -> MaskResult<Self> {
        serde_json::from_reader(reader).map_err(|e| MaskError::serde(e.to_string()))
    }

    /// Check every value that can be checked without the mask.
    pub fn validate(&self) -> MaskResult<()> {
        match &self.mode {
            Mode::Scheduled(m) => {
                if m.schedule.trim().is_empty() {
                    return Err(MaskError::validation("scheduled mode needs a schedule"));
                }
                Quality::new(m.quality)?;
            }
            Mode::AudioThreshold(m) => {
                if !m.threshold.is_finite() {
                    return Err(MaskError::validation("threshold must be finite"));
                }
                Quality::new(m.quality)?;
                m.window()?;
                parse_palette(&m.colors)?;
            }
            Mode::Envelope(m) => {
                m.envelope()?;
                m.radius()?;
            }
            Mode::Proportional(m) => {
                m.radius()?;
            }
            Mode::Linear(_) => {}
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/job.rs"]
mod tests;
