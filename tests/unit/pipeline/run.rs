use super::*;
use crate::animation::envelope::{PhaseDuration, RadiusRange};
use crate::foundation::core::Dims;
use crate::mask::frames::MaskFrame;
use crate::pipeline::job::{
    AudioThresholdMode, EnvelopeMode, LinearMode, ProportionalMode, ScheduledMode, SubjectConfig,
};

fn dot(width: usize, height: usize, frames: usize) -> Mask {
    let dims = Dims::new(width, height);
    let mut frame = MaskFrame::empty(dims);
    frame.set(width / 2, height / 2, true);
    Mask::repeat(frame, frames).unwrap()
}

fn job(mode: Mode) -> Job {
    Job {
        background: Rgb8::BLACK,
        subject: None,
        amplitude_length: LengthPolicy::Truncate,
        mode,
    }
}

const RED: [f32; 3] = [1.0, 0.0, 0.0];
const BLACK: [f32; 3] = [0.0, 0.0, 0.0];
const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

#[test]
fn scheduled_job_paints_grown_event() {
    let j = job(Mode::Scheduled(ScheduledMode {
        schedule: "(1, 1, (255, 0, 0)),".to_string(),
        quality: 1.0,
        ..ScheduledMode::default()
    }));
    let out = run_job(&j, &dot(5, 5, 3), None).unwrap();
    assert_eq!(out.frame_count(), 3);
    assert_eq!(out.pixel(0, 2, 2), Some(BLACK));
    assert_eq!(out.pixel(1, 2, 1), Some(RED));
    assert_eq!(out.pixel(1, 1, 1), Some(BLACK));
    assert_eq!(out.pixel(2, 1, 1), Some(RED));
}

#[test]
fn subject_overlay_stays_on_top() {
    let mut j = job(Mode::Scheduled(ScheduledMode {
        schedule: "(0, 1, (255, 0, 0)),".to_string(),
        quality: 1.0,
        ..ScheduledMode::default()
    }));
    j.subject = Some(SubjectConfig {
        color: Rgb8::WHITE,
    });
    let out = run_job(&j, &dot(5, 5, 2), None).unwrap();
    assert_eq!(out.pixel(0, 2, 2), Some(WHITE));
    assert_eq!(out.pixel(0, 2, 1), Some(RED));
}

#[test]
fn audio_threshold_spawns_events_at_crossings() {
    let j = job(Mode::AudioThreshold(AudioThresholdMode {
        colors: "(255, 0, 0)".to_string(),
        speed: 1,
        quality: 1.0,
        ..AudioThresholdMode::default()
    }));
    let signal = AmplitudeSignal::new(vec![0.0, 0.9, 0.9, 0.0]).unwrap();
    let out = run_job(&j, &dot(9, 9, 4), Some(&signal)).unwrap();
    assert_eq!(out.pixel(0, 4, 3), Some(BLACK));
    assert_eq!(out.pixel(1, 4, 3), Some(RED));
    assert_eq!(out.pixel(3, 4, 1), Some(RED));
}

#[test]
fn amplitude_modes_require_a_signal() {
    let j = job(Mode::AudioThreshold(AudioThresholdMode::default()));
    assert!(matches!(
        run_job(&j, &dot(3, 3, 2), None),
        Err(MaskError::Validation(_))
    ));
    let j = job(Mode::Proportional(ProportionalMode::default()));
    assert!(matches!(
        run_job(&j, &dot(3, 3, 2), None),
        Err(MaskError::Validation(_))
    ));
}

#[test]
fn strict_length_rejects_short_signal() {
    let mut j = job(Mode::Proportional(ProportionalMode::default()));
    j.amplitude_length = LengthPolicy::Strict;
    let signal = AmplitudeSignal::new(vec![0.5]).unwrap();
    assert!(matches!(
        run_job(&j, &dot(3, 3, 2), Some(&signal)),
        Err(MaskError::Shape(_))
    ));
}

#[test]
fn envelope_job_grows_and_shrinks_white_region() {
    let j = job(Mode::Envelope(EnvelopeMode {
        max_radius: 2.0,
        attack: PhaseDuration::Frames(1.0),
        decay: PhaseDuration::Frames(1.0),
        ..EnvelopeMode::default()
    }));
    let signal = AmplitudeSignal::new(vec![0.0, 1.0, 0.0]).unwrap();
    let out = run_job(&j, &dot(7, 7, 3), Some(&signal)).unwrap();
    assert_eq!(out.pixel(0, 3, 2), Some(BLACK));
    assert_eq!(out.pixel(1, 3, 1), Some(WHITE));
    assert_eq!(out.pixel(2, 3, 2), Some(BLACK));
    assert_eq!(out.pixel(2, 3, 3), Some(WHITE));
}

#[test]
fn truncated_signal_leaves_later_frames_ungrown() {
    let env = GrowthEnvelope::new(Trigger::Proportional {
        radius: RadiusRange::new(1.0, 1.0).unwrap(),
    });
    let signal = AmplitudeSignal::new(vec![1.0]).unwrap();
    let out = render_envelope(
        &dot(5, 5, 2),
        &env,
        KernelShape::Circle,
        Some(&signal),
        LengthPolicy::Truncate,
        Paint::default(),
    )
    .unwrap();
    assert_eq!(out.pixel(0, 2, 1), Some(WHITE));
    assert_eq!(out.pixel(1, 2, 1), Some(BLACK));
    assert_eq!(out.pixel(1, 2, 2), Some(WHITE));
}

#[test]
fn linear_job_keeps_source_during_delay() {
    let j = job(Mode::Linear(LinearMode {
        shape: KernelShape::Square,
        speed: 1,
        delay: 1,
    }));
    let out = run_job(&j, &dot(5, 5, 2), None).unwrap();
    assert_eq!(out.pixel(0, 2, 2), Some(WHITE));
    assert_eq!(out.pixel(0, 1, 1), Some(BLACK));
    assert_eq!(out.pixel(1, 1, 1), Some(WHITE));
}

#[test]
fn schedule_errors_abort_before_rendering() {
    let j = job(Mode::Scheduled(ScheduledMode {
        schedule: "(0, 1, (255, 0))".to_string(),
        ..ScheduledMode::default()
    }));
    assert!(matches!(
        run_job(&j, &dot(3, 3, 1), None),
        Err(MaskError::Parse(_))
    ));
}
