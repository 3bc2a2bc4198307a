use crate::foundation::error::{MaskError, MaskResult};

/// One amplitude sample per frame, nominally in `[0, 1]`.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct AmplitudeSignal {
    samples: Vec<f32>,
}

impl AmplitudeSignal {
    /// Wrap samples; every sample must be finite.
    pub fn new(samples: Vec<f32>) -> MaskResult<Self> {
        if let Some(idx) = samples.iter().position(|s| !s.is_finite()) {
            return Err(MaskError::range(format!(
                "amplitude sample {idx} is not finite ({})",
                samples[idx]
            )));
        }
        Ok(Self { samples })
    }

    /// Samples in frame order.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// `true` when there are no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of frames that can be driven by this signal under `policy`.
    pub fn usable_frames(&self, frame_count: usize, policy: LengthPolicy) -> MaskResult<usize> {
        if policy == LengthPolicy::Strict && self.len() != frame_count {
            return Err(MaskError::shape(format!(
                "amplitude signal has {} samples but the mask has {frame_count} frames",
                self.len()
            )));
        }
        if self.is_empty() && frame_count > 0 {
            return Err(MaskError::shape("amplitude signal is empty"));
        }
        Ok(self.len().min(frame_count))
    }
}

/// How a signal whose length differs from the frame count is reconciled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthPolicy {
    /// Process up to the shorter length; later frames are left untouched.
    #[default]
    Truncate,
    /// Any mismatch is a [`MaskError::Shape`] error.
    Strict,
}

#[cfg(test)]
#[path = "../../tests/unit/animation/signal.rs"]
mod tests;
