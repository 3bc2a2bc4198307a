//! maskbloom animates a binary mask over a frame sequence by growing it.
//!
//! Growth is driven either by a scripted schedule of timed events or by an amplitude signal,
//! realized with cached structuring elements, and composited as colored layers:
//!
//! - Parse a schedule with [`parse_dilation_schedule`] or derive one with
//!   [`events_from_amplitude`]
//! - Turn a [`Trigger`] into per-frame radii with [`GrowthEnvelope`]
//! - Grow masks with [`grow`] / [`grow_timeline`] / [`follow`]
//! - Paint layers with [`composite`]
//!
//! [`run_job`] ties the steps together from a JSON [`Job`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod assets;
mod composite;
mod foundation;
mod grow;
mod mask;
mod pipeline;
mod schedule;

pub use crate::foundation::core::{Dims, Fps, Rgb8};
pub use crate::foundation::error::{MaskError, MaskResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::envelope::{
    EnvelopeState, EventTimeline, GrowthEnvelope, PhaseDuration, RadiusRange, ThresholdEnvelope,
    ThresholdParams, Timeline, Trigger, scripted_radii,
};
pub use crate::animation::signal::{AmplitudeSignal, LengthPolicy};
pub use crate::assets::io::{decode_mask_frame, load_amplitude, load_mask_dir, write_frames};
pub use crate::composite::compositor::{ColorFrames, ColorLayer, SubjectOverlay, composite};
pub use crate::grow::grower::{
    GrowOptions, GrowReport, PreRoll, Quality, follow, grow, grow_timeline, grow_with_report,
};
pub use crate::mask::frames::{Mask, MaskFrame};
pub use crate::mask::kernel::{KernelCache, KernelShape, StructuringElement};
pub use crate::mask::morph::{dilate, erode};
pub use crate::pipeline::job::{
    AudioThresholdMode, EnvelopeMode, Job, LinearMode, Mode, ProportionalMode, ScheduledMode,
    SubjectConfig,
};
pub use crate::pipeline::run::{Paint, render_envelope, render_events, render_linear, run_job};
pub use crate::schedule::dilation::{
    DEFAULT_PALETTE, DilationEvent, TriggerWindow, events_from_amplitude,
    format_dilation_schedule, parse_dilation_schedule, parse_palette,
};
pub use crate::schedule::timing::TimingMode;
pub use crate::schedule::weights::{WeightKeyframe, parse_weight_schedule};
