//! Per-frame growth envelopes.
//!
//! A [`GrowthEnvelope`] turns a trigger strategy into target radii:
//!
//! - [`Trigger::Scripted`]: every scheduled event grows linearly from its start frame and never
//!   decays. Events are independent and produce one radius timeline each.
//! - [`Trigger::Threshold`]: an attack/decay state machine driven by an amplitude signal.
//! - [`Trigger::Proportional`]: the radius follows the amplitude directly.

use crate::animation::ease::Ease;
use crate::animation::signal::{AmplitudeSignal, LengthPolicy};
use crate::foundation::core::Fps;
use crate::foundation::error::{MaskError, MaskResult};
use crate::schedule::dilation::DilationEvent;

/// Length of an attack or decay phase.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseDuration {
    /// Length in frames.
    Frames(f64),
    /// Length in seconds, converted with the envelope's frame rate.
    Seconds(f64),
}

impl PhaseDuration {
    /// Length in frames, at least 1.
    pub fn to_frames(self, fps: Fps) -> MaskResult<f64> {
        let raw = match self {
            Self::Frames(n) => n,
            Self::Seconds(s) => fps.secs_to_frames(s),
        };
        if !raw.is_finite() || raw < 0.0 {
            return Err(MaskError::range(format!(
                "phase duration {self:?} must be finite and >= 0"
            )));
        }
        Ok(raw.max(1.0))
    }
}

impl Default for PhaseDuration {
    fn default() -> Self {
        Self::Frames(1.0)
    }
}

/// User-facing parameters of the thresholded attack/decay envelope.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThresholdParams {
    /// Samples strictly above this start an attack.
    pub threshold: f32,
    /// Time from 0 to full progress.
    pub attack: PhaseDuration,
    /// Time from full progress back to 0.
    pub decay: PhaseDuration,
    /// Curve applied after each attack step.
    pub attack_curve: Ease,
    /// Curve applied after each decay step.
    pub decay_curve: Ease,
    /// Frame rate used for durations given in seconds.
    pub fps: Fps,
}

impl Default for ThresholdParams {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            attack: PhaseDuration::Seconds(0.5),
            decay: PhaseDuration::Seconds(0.5),
            attack_curve: Ease::Linear,
            decay_curve: Ease::Linear,
            fps: Fps::default(),
        }
    }
}

/// Validated thresholded envelope with per-frame step sizes resolved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThresholdEnvelope {
    threshold: f32,
    attack_step: f64,
    decay_step: f64,
    attack_curve: Ease,
    decay_curve: Ease,
}

impl ThresholdEnvelope {
    /// Resolve step sizes and check that both curves are monotonic.
    pub fn new(params: &ThresholdParams) -> MaskResult<Self> {
        if !params.threshold.is_finite() {
            return Err(MaskError::range("envelope threshold must be finite"));
        }
        for (what, curve) in [
            ("attack", params.attack_curve),
            ("decay", params.decay_curve),
        ] {
            if !curve.is_monotonic() {
                return Err(MaskError::range(format!(
                    "{what} curve '{curve}' is not monotonic and cannot drive an envelope"
                )));
            }
        }
        Ok(Self {
            threshold: params.threshold,
            attack_step: 1.0 / params.attack.to_frames(params.fps)?,
            decay_step: 1.0 / params.decay.to_frames(params.fps)?,
            attack_curve: params.attack_curve,
            decay_curve: params.decay_curve,
        })
    }

    /// Progress after each sample, starting from a fresh idle state.
    pub fn progress(&self, samples: &[f32]) -> Vec<f64> {
        let mut state = EnvelopeState::default();
        samples.iter().map(|&amp| state.advance(self, amp)).collect()
    }
}

/// Mutable per-run state of the thresholded envelope.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct EnvelopeState {
    /// `true` during the attack phase.
    pub dilating: bool,
    /// Eased fraction of the maximum radius reached, in `[0, 1]`.
    pub progress: f64,
}

impl EnvelopeState {
    /// Advance one frame with amplitude `amp` and return the new progress.
    ///
    /// A sample above the threshold starts an attack when idle; a sample at or below it starts
    /// the decay immediately, even mid-attack. Reaching full progress also ends the attack.
    pub fn advance(&mut self, env: &ThresholdEnvelope, amp: f32) -> f64 {
        // The current sample alone decides the phase; saturation only ends it early.
        self.dilating = amp > env.threshold;

        if self.dilating {
            self.progress = env.attack_curve.apply(self.progress + env.attack_step);
            if self.progress >= 1.0 {
                self.progress = 1.0;
                self.dilating = false;
            }
        } else {
            self.progress = env.decay_curve.apply(self.progress - env.decay_step);
            if self.progress <= 0.0 {
                self.progress = 0.0;
            }
        }
        self.progress
    }
}

/// Inclusive radius bounds for amplitude-driven envelopes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadiusRange {
    min: f64,
    max: f64,
}

impl RadiusRange {
    /// Validate `0 <= min <= max`.
    pub fn new(min: f64, max: f64) -> MaskResult<Self> {
        if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
            return Err(MaskError::range(format!(
                "radius range [{min}, {max}] must satisfy 0 <= min <= max"
            )));
        }
        Ok(Self { min, max })
    }

    /// Lower bound.
    pub fn min(self) -> f64 {
        self.min
    }

    /// Upper bound.
    pub fn max(self) -> f64 {
        self.max
    }
}

/// Selectable strategy driving a [`GrowthEnvelope`].
#[derive(Clone, Debug, PartialEq)]
pub enum Trigger {
    /// Linear growth from each event's start frame, one timeline per event.
    Scripted(Vec<DilationEvent>),
    /// Thresholded attack/decay; radius is `max(progress · max, min)`.
    Threshold {
        /// Resolved attack/decay envelope.
        envelope: ThresholdEnvelope,
        /// Radius bounds.
        radius: RadiusRange,
    },
    /// Radius is `min + amp · (max - min)`.
    Proportional {
        /// Radius bounds.
        radius: RadiusRange,
    },
}

/// Radius timeline of one scripted event.
#[derive(Clone, Debug, PartialEq)]
pub struct EventTimeline {
    /// The event this timeline belongs to.
    pub event: DilationEvent,
    /// Logical radius per frame; `None` before the event starts.
    pub radii: Vec<Option<f64>>,
}

/// Output of [`GrowthEnvelope::timeline`].
#[derive(Clone, Debug, PartialEq)]
pub enum Timeline {
    /// Independent per-event timelines in declaration order.
    Events(Vec<EventTimeline>),
    /// One radius per processed frame; frames past the end are left untouched and radii `<= 0`
    /// leave their frame unchanged.
    Shared(Vec<f64>),
}

/// Growth envelope parameterized by its trigger strategy.
#[derive(Clone, Debug, PartialEq)]
pub struct GrowthEnvelope {
    trigger: Trigger,
}

impl GrowthEnvelope {
    /// Wrap a trigger strategy.
    pub fn new(trigger: Trigger) -> Self {
        Self { trigger }
    }

    /// Strategy in use.
    pub fn trigger(&self) -> &Trigger {
        &self.trigger
    }

    /// Target radii for a run of `total_frames` frames.
    ///
    /// Amplitude-driven triggers require `signal`; it is reconciled with `total_frames` under
    /// `policy`.
    pub fn timeline(
        &self,
        total_frames: usize,
        signal: Option<&AmplitudeSignal>,
        policy: LengthPolicy,
    ) -> MaskResult<Timeline> {
        match &self.trigger {
            Trigger::Scripted(events) => Ok(Timeline::Events(
                events
                    .iter()
                    .map(|&event| EventTimeline {
                        event,
                        radii: scripted_radii(event.speed, event.start_frame, total_frames),
                    })
                    .collect(),
            )),
            Trigger::Threshold { envelope, radius } => {
                let samples = driving_samples(signal, total_frames, policy)?;
                let radii = envelope
                    .progress(samples)
                    .into_iter()
                    .map(|p| (p * radius.max()).max(radius.min()))
                    .collect();
                Ok(Timeline::Shared(radii))
            }
            Trigger::Proportional { radius } => {
                let samples = driving_samples(signal, total_frames, policy)?;
                let radii = samples
                    .iter()
                    .map(|&amp| radius.min() + f64::from(amp) * (radius.max() - radius.min()))
                    .collect();
                Ok(Timeline::Shared(radii))
            }
        }
    }
}

fn driving_samples(
    signal: Option<&AmplitudeSignal>,
    total_frames: usize,
    policy: LengthPolicy,
) -> MaskResult<&[f32]> {
    let signal = signal.ok_or_else(|| {
        MaskError::validation("amplitude-driven envelope needs an amplitude signal")
    })?;
    let usable = signal.usable_frames(total_frames, policy)?;
    Ok(&signal.samples()[..usable])
}

/// Logical radius per frame for one event: `speed · (f - start + 1)` from `start` on.
pub fn scripted_radii(speed: u32, start_frame: usize, total_frames: usize) -> Vec<Option<f64>> {
    let mut radius = 0.0;
    (0..total_frames)
        .map(|f| {
            if f < start_frame {
                return None;
            }
            radius += f64::from(speed);
            Some(radius)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/animation/envelope.rs"]
mod tests;
