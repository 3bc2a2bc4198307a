//! Morphological region grower.
//!
//! A logical radius `R` is realized through a [`Quality`] factor `q` as a structuring element of
//! radius `round(R · q)` applied `round(1 / q)` times. Factors below [`Quality::EPSILON`] switch
//! to square kernels of radius `round(R)` applied once.

use crate::animation::envelope::scripted_radii;
use crate::foundation::error::{MaskError, MaskResult};
use crate::mask::frames::{Mask, MaskFrame};
use crate::mask::kernel::{KernelCache, KernelShape};
use crate::mask::morph::{dilate, erode};

/// Speed/accuracy tradeoff of the grower, in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Quality(f64);

impl Quality {
    /// Factors below this use the square, single-iteration path.
    pub const EPSILON: f64 = 1e-6;

    /// Full quality: one application of a kernel of the logical radius.
    pub const FULL: Self = Self(1.0);

    /// Validate a factor in `[0, 1]`.
    pub fn new(factor: f64) -> MaskResult<Self> {
        if !factor.is_finite() || !(0.0..=1.0).contains(&factor) {
            return Err(MaskError::range(format!(
                "quality factor {factor} must be within [0, 1]"
            )));
        }
        Ok(Self(factor))
    }

    /// Raw factor.
    pub fn get(self) -> f64 {
        self.0
    }

    /// `true` when the factor is effectively zero.
    pub fn is_square(self) -> bool {
        self.0 < Self::EPSILON
    }

    /// Kernel shape actually used when `preferred` is requested.
    pub fn shape(self, preferred: KernelShape) -> KernelShape {
        if self.is_square() {
            KernelShape::Square
        } else {
            preferred
        }
    }

    /// How many times the realized kernel is applied per frame.
    pub fn iterations(self) -> usize {
        if self.is_square() {
            1
        } else {
            ((1.0 / self.0).round() as usize).max(1)
        }
    }

    /// Realized kernel radius for logical radius `radius`.
    pub fn kernel_radius(self, radius: f64) -> usize {
        let scaled = if self.is_square() {
            radius
        } else {
            radius * self.0
        };
        scaled.abs().round() as usize
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self::FULL
    }
}

/// What frames before an event's start frame contain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PreRoll {
    /// Empty frames.
    #[default]
    Empty,
    /// The ungrown source frame.
    Source,
}

/// Kernel and pre-roll settings shared by every frame of a run.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct GrowOptions {
    /// Radius/iteration tradeoff.
    pub quality: Quality,
    /// Requested kernel shape; overridden to square by a zero quality.
    pub shape: KernelShape,
    /// Content of frames before the start frame.
    pub pre_roll: PreRoll,
}

/// Bookkeeping of one grow run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrowReport {
    /// Kernel shape that was actually used.
    pub shape: KernelShape,
    /// Distinct structuring elements constructed.
    pub kernels_built: usize,
    /// First frame whose output was fully set, if any.
    pub saturated_at: Option<usize>,
}

/// Grow `mask` from `start_frame`, adding `speed` pixels of radius per frame, over
/// `total_frames` output frames with circular kernels.
pub fn grow(
    mask: &Mask,
    speed: u32,
    start_frame: usize,
    total_frames: usize,
    quality: Quality,
) -> MaskResult<Mask> {
    let opts = GrowOptions {
        quality,
        ..GrowOptions::default()
    };
    grow_with_report(mask, speed, start_frame, total_frames, &opts).map(|(out, _)| out)
}

/// [`grow`] with explicit options, also returning a [`GrowReport`].
pub fn grow_with_report(
    mask: &Mask,
    speed: u32,
    start_frame: usize,
    total_frames: usize,
    opts: &GrowOptions,
) -> MaskResult<(Mask, GrowReport)> {
    grow_timeline(mask, &scripted_radii(speed, start_frame, total_frames), opts)
}

/// Grow `mask` along a per-frame logical radius timeline; `None` entries are pre-roll frames.
///
/// The output has one frame per timeline entry. Frame `f` is grown from source frame `f`, or
/// from the last source frame when the mask is shorter. Once an output frame is fully set, it
/// and every later frame are full and no further morphology runs.
#[tracing::instrument(skip(mask, radii), fields(frames = radii.len(), dims = %mask.dims()))]
pub fn grow_timeline(
    mask: &Mask,
    radii: &[Option<f64>],
    opts: &GrowOptions,
) -> MaskResult<(Mask, GrowReport)> {
    if radii.is_empty() {
        return Err(MaskError::range("grow needs at least one output frame"));
    }
    let dims = mask.dims();
    let shape = opts.quality.shape(opts.shape);
    let iterations = opts.quality.iterations();
    let mut cache = KernelCache::new(shape);
    let mut frames = Vec::with_capacity(radii.len());
    let mut saturated_at = None;

    for (f, radius) in radii.iter().enumerate() {
        let source = mask
            .frame_or_last(f)
            .ok_or_else(|| MaskError::shape("mask must contain at least one frame"))?;
        let Some(radius) = *radius else {
            frames.push(match opts.pre_roll {
                PreRoll::Empty => MaskFrame::empty(dims),
                PreRoll::Source => source.clone(),
            });
            continue;
        };

        let kernel = cache.get_or_build(opts.quality.kernel_radius(radius));
        tracing::trace!(frame = f, radius, kernel_radius = kernel.radius(), "grow step");
        let out = if radius > 0.0 {
            dilate(source, kernel, iterations)
        } else {
            erode(source, kernel, iterations)
        };

        if out.is_full() {
            tracing::debug!(frame = f, "mask saturated, filling remaining frames");
            saturated_at = Some(f);
            frames.resize(radii.len(), MaskFrame::full(dims));
            break;
        }
        frames.push(out);
    }

    let report = GrowReport {
        shape,
        kernels_built: cache.built(),
        saturated_at,
    };
    Ok((Mask::new(frames)?, report))
}

/// Dilate each frame of `mask` by its own radius from `radii`.
///
/// Radii are floored to whole pixels and applied once. Frames with a radius `<= 0`, and frames
/// past the end of `radii`, are copied unchanged.
#[tracing::instrument(skip(mask, radii), fields(frames = mask.len(), radii = radii.len()))]
pub fn follow(mask: &Mask, radii: &[f64], shape: KernelShape) -> MaskResult<Mask> {
    let max_radius = radii
        .iter()
        .filter(|r| r.is_finite())
        .fold(0.0_f64, |acc, &r| acc.max(r.floor()));
    let cache = KernelCache::with_max_radius(shape, max_radius as usize);

    let mut out = mask.clone();
    for (f, (frame, &radius)) in out.frames_mut().iter_mut().zip(radii).enumerate() {
        if !radius.is_finite() || radius <= 0.0 {
            continue;
        }
        let Some(kernel) = cache.get(radius.floor() as usize) else {
            continue;
        };
        tracing::trace!(frame = f, radius, "follow step");
        *frame = dilate(frame, kernel, 1);
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/grow/grower.rs"]
mod tests;
