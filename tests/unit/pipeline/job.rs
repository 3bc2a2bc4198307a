use super::*;

fn job(json: &str) -> MaskResult<Job> {
    Job::from_reader(json.as_bytes())
}

#[test]
fn scheduled_job_fills_defaults() {
    let j = job(r#"{ "mode": { "kind": "scheduled", "schedule": "(0, 2, (255, 0, 0))," } }"#)
        .unwrap();
    assert_eq!(j.background, Rgb8::BLACK);
    assert_eq!(j.subject, None);
    assert_eq!(j.amplitude_length, LengthPolicy::Truncate);
    let Mode::Scheduled(m) = &j.mode else {
        panic!("expected scheduled mode");
    };
    assert_eq!(m.timing, TimingMode::Frame);
    assert_eq!(m.quality, 0.25);
    assert!(!j.mode.needs_amplitude());
    j.validate().unwrap();
}

#[test]
fn envelope_job_reads_durations_and_curves() {
    let j = job(
        r#"{
            "background": "10, 20, 30",
            "subject": { "color": "255, 255, 255" },
            "amplitude_length": "strict",
            "mode": {
                "kind": "envelope",
                "shape": "square",
                "max_radius": 12,
                "attack": { "frames": 4 },
                "decay": { "seconds": 0.25 },
                "attack_curve": "ease_out",
                "decay_curve": "ease-in"
            }
        }"#,
    )
    .unwrap();
    assert_eq!(j.background, Rgb8::new(10, 20, 30));
    assert_eq!(j.subject.unwrap().color, Rgb8::WHITE);
    assert_eq!(j.amplitude_length, LengthPolicy::Strict);
    let Mode::Envelope(m) = &j.mode else {
        panic!("expected envelope mode");
    };
    assert_eq!(m.shape, KernelShape::Square);
    assert_eq!(m.attack, PhaseDuration::Frames(4.0));
    assert_eq!(m.decay, PhaseDuration::Seconds(0.25));
    assert_eq!(m.attack_curve, Ease::SineOut);
    assert_eq!(m.decay_curve, Ease::SineIn);
    assert_eq!(m.threshold, 0.5);
    assert!(j.mode.needs_amplitude());
    j.validate().unwrap();
}

#[test]
fn validate_rejects_out_of_domain_values() {
    let j = job(r#"{ "mode": { "kind": "scheduled", "schedule": "  " } }"#).unwrap();
    assert!(matches!(j.validate(), Err(MaskError::Validation(_))));

    let j = job(r#"{ "mode": { "kind": "scheduled", "schedule": "(0,1,(1,2,3))", "quality": 2 } }"#)
        .unwrap();
    assert!(matches!(j.validate(), Err(MaskError::Range(_))));

    let j = job(r#"{ "mode": { "kind": "audio_threshold", "start_frame": 9, "end_frame": 3 } }"#)
        .unwrap();
    assert!(matches!(j.validate(), Err(MaskError::Range(_))));

    let j = job(r#"{ "mode": { "kind": "proportional", "min_radius": 5, "max_radius": 2 } }"#)
        .unwrap();
    assert!(matches!(j.validate(), Err(MaskError::Range(_))));

    let j = job(r#"{ "mode": { "kind": "envelope", "decay_curve": "bounce-out" } }"#).unwrap();
    assert!(matches!(j.validate(), Err(MaskError::Range(_))));

    let j = job(r#"{ "mode": { "kind": "audio_threshold", "colors": "(1, 2)" } }"#).unwrap();
    assert!(matches!(j.validate(), Err(MaskError::Parse(_))));
}

#[test]
fn audio_window_treats_zero_end_as_open() {
    let m = AudioThresholdMode {
        start_frame: 4,
        ..AudioThresholdMode::default()
    };
    assert_eq!(m.window().unwrap(), TriggerWindow::new(4, None).unwrap());
}

#[test]
fn malformed_json_is_a_serde_error() {
    assert!(matches!(job("{"), Err(MaskError::Serde(_))));
    assert!(matches!(
        job(r#"{ "mode": { "kind": "spiral" } }"#),
        Err(MaskError::Serde(_))
    ));
    assert!(matches!(
        job(r#"{ "background": "300, 0, 0", "mode": { "kind": "linear" } }"#),
        Err(MaskError::Serde(_))
    ));
}

#[test]
fn missing_job_file_is_reported_with_path() {
    let err = Job::from_path("does/not/exist.json").unwrap_err();
    assert!(err.to_string().contains("does/not/exist.json"));
}

#[test]
fn job_round_trips_through_json() {
    let j = Job {
        background: Rgb8::new(1, 2, 3),
        subject: None,
        amplitude_length: LengthPolicy::Truncate,
        mode: Mode::Linear(LinearMode {
            shape: KernelShape::Square,
            speed: 3,
            delay: 2,
        }),
    };
    let text = serde_json::to_string(&j).unwrap();
    assert_eq!(job(&text).unwrap(), j);
}
