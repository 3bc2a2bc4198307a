//! End-to-end runs: growth driver → grower → compositor.

use crate::animation::envelope::{GrowthEnvelope, Timeline, Trigger};
use crate::animation::signal::{AmplitudeSignal, LengthPolicy};
use crate::composite::compositor::{ColorFrames, ColorLayer, SubjectOverlay, composite};
use crate::foundation::core::Rgb8;
use crate::foundation::error::{MaskError, MaskResult};
use crate::grow::grower::{GrowOptions, PreRoll, Quality, follow, grow_timeline, grow_with_report};
use crate::mask::frames::Mask;
use crate::mask::kernel::KernelShape;
use crate::pipeline::job::{Job, Mode};
use crate::schedule::dilation::{
    DilationEvent, events_from_amplitude, parse_dilation_schedule, parse_palette,
};

/// Colors shared by every render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Paint {
    /// Canvas color.
    pub background: Rgb8,
    /// Color of the ungrown subject overlay, if enabled.
    pub subject: Option<Rgb8>,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            background: Rgb8::BLACK,
            subject: None,
        }
    }
}

/// Run `job` over `mask`, producing one colored frame per mask frame.
#[tracing::instrument(skip_all, fields(mode = job.mode.name(), frames = mask.len(), dims = %mask.dims()))]
pub fn run_job(
    job: &Job,
    mask: &Mask,
    amplitude: Option<&AmplitudeSignal>,
) -> MaskResult<ColorFrames> {
    job.validate()?;
    let paint = Paint {
        background: job.background,
        subject: job.subject.map(|s| s.color),
    };
    let total = mask.len();

    match &job.mode {
        Mode::Scheduled(m) => {
            let events = parse_dilation_schedule(&m.schedule, m.timing, total)?;
            render_events(mask, &events, Quality::new(m.quality)?, paint)
        }
        Mode::AudioThreshold(m) => {
            let signal = require_signal(amplitude, job.mode.name())?;
            let usable = signal.usable_frames(total, job.amplitude_length)?;
            let palette = parse_palette(&m.colors)?;
            let events = events_from_amplitude(
                &signal.samples()[..usable],
                m.threshold,
                m.speed,
                &palette,
                m.window()?,
            );
            tracing::debug!(events = events.len(), "amplitude crossings scheduled");
            render_events(mask, &events, Quality::new(m.quality)?, paint)
        }
        Mode::Envelope(m) => {
            let env = GrowthEnvelope::new(Trigger::Threshold {
                envelope: m.envelope()?,
                radius: m.radius()?,
            });
            render_envelope(mask, &env, m.shape, amplitude, job.amplitude_length, paint)
        }
        Mode::Proportional(m) => {
            let env = GrowthEnvelope::new(Trigger::Proportional {
                radius: m.radius()?,
            });
            render_envelope(mask, &env, m.shape, amplitude, job.amplitude_length, paint)
        }
        Mode::Linear(m) => render_linear(mask, m.speed, m.delay, m.shape, paint),
    }
}

/// Grow one colored layer per scripted event and composite them in declaration order.
pub fn render_events(
    mask: &Mask,
    events: &[DilationEvent],
    quality: Quality,
    paint: Paint,
) -> MaskResult<ColorFrames> {
    let total = mask.len();
    let env = GrowthEnvelope::new(Trigger::Scripted(events.to_vec()));
    let Timeline::Events(timelines) = env.timeline(total, None, LengthPolicy::Truncate)? else {
        return Err(MaskError::validation(
            "scripted trigger produced a shared timeline",
        ));
    };

    let opts = GrowOptions {
        quality,
        ..GrowOptions::default()
    };
    let mut layers = Vec::with_capacity(timelines.len());
    for tl in &timelines {
        let (grown, report) = grow_timeline(mask, &tl.radii, &opts)?;
        tracing::debug!(
            start = tl.event.start_frame,
            speed = tl.event.speed,
            kernels = report.kernels_built,
            saturated_at = ?report.saturated_at,
            "event grown"
        );
        layers.push(ColorLayer {
            mask: grown,
            color: tl.event.color,
        });
    }
    paint_layers(mask, &layers, paint)
}

/// Dilate each frame by an amplitude-driven radius and paint the result white.
pub fn render_envelope(
    mask: &Mask,
    envelope: &GrowthEnvelope,
    shape: KernelShape,
    amplitude: Option<&AmplitudeSignal>,
    policy: LengthPolicy,
    paint: Paint,
) -> MaskResult<ColorFrames> {
    let Timeline::Shared(radii) = envelope.timeline(mask.len(), amplitude, policy)? else {
        return Err(MaskError::validation(
            "amplitude-driven render needs a shared radius timeline",
        ));
    };
    let grown = follow(mask, &radii, shape)?;
    paint_layers(
        mask,
        &[ColorLayer {
            mask: grown,
            color: Rgb8::WHITE,
        }],
        paint,
    )
}

/// Grow the mask once from `delay` at full quality and paint the result white.
pub fn render_linear(
    mask: &Mask,
    speed: u32,
    delay: usize,
    shape: KernelShape,
    paint: Paint,
) -> MaskResult<ColorFrames> {
    let opts = GrowOptions {
        quality: Quality::FULL,
        shape,
        pre_roll: PreRoll::Source,
    };
    let (grown, _) = grow_with_report(mask, speed, delay, mask.len(), &opts)?;
    paint_layers(
        mask,
        &[ColorLayer {
            mask: grown,
            color: Rgb8::WHITE,
        }],
        paint,
    )
}

fn paint_layers(mask: &Mask, layers: &[ColorLayer], paint: Paint) -> MaskResult<ColorFrames> {
    let subject = paint.subject.map(|color| SubjectOverlay { mask, color });
    composite(layers, paint.background, mask.len(), mask.dims(), subject)
}

fn require_signal<'a>(
    amplitude: Option<&'a AmplitudeSignal>,
    mode: &str,
) -> MaskResult<&'a AmplitudeSignal> {
    amplitude.ok_or_else(|| MaskError::validation(format!("{mode} mode needs an amplitude signal")))
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/run.rs"]
mod tests;
