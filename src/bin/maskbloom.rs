use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "maskbloom", version)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a job over a PNG mask sequence into numbered PNG frames.
    Run(RunArgs),
    /// Print a dilation schedule spawned by amplitude crossings.
    Schedule(ScheduleArgs),
    /// Print sampled values of an easing curve.
    Ease(EaseArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Job JSON.
    #[arg(long)]
    job: PathBuf,

    /// Directory of mask PNGs, read in file name order.
    #[arg(long)]
    masks: PathBuf,

    /// JSON array of per-frame amplitudes.
    #[arg(long)]
    amplitude: Option<PathBuf>,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ScheduleArgs {
    /// JSON array of per-frame amplitudes.
    #[arg(long)]
    amplitude: PathBuf,

    /// Crossing level.
    #[arg(long, default_value_t = 0.5)]
    threshold: f32,

    /// Growth speed of every event.
    #[arg(long, default_value_t = 30)]
    speed: u32,

    /// Palette text, e.g. "(255, 0, 0), (0, 0, 255)".
    #[arg(long, default_value = "")]
    colors: String,

    /// First frame scanned.
    #[arg(long, default_value_t = 0)]
    start_frame: usize,

    /// Frame at which scanning stops (0 = end of signal).
    #[arg(long, default_value_t = 0)]
    end_frame: usize,
}

#[derive(Parser, Debug)]
struct EaseArgs {
    /// Curve name, e.g. "ease-in-out" or "bounce_out".
    #[arg(long)]
    curve: String,

    /// Number of intervals sampled over [0, 1].
    #[arg(long, default_value_t = 10)]
    steps: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Schedule(args) => cmd_schedule(args),
        Command::Ease(args) => cmd_ease(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_amplitude(path: &Path) -> anyhow::Result<maskbloom::AmplitudeSignal> {
    maskbloom::load_amplitude(path)
        .with_context(|| format!("load amplitude '{}'", path.display()))
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let job = maskbloom::Job::from_path(&args.job)
        .with_context(|| format!("load job '{}'", args.job.display()))?;
    job.validate()?;

    let mask = maskbloom::load_mask_dir(&args.masks)
        .with_context(|| format!("load masks from '{}'", args.masks.display()))?;
    let amplitude = args.amplitude.as_deref().map(read_amplitude).transpose()?;
    if job.mode.needs_amplitude() && amplitude.is_none() {
        anyhow::bail!("mode '{}' needs --amplitude", job.mode.name());
    }

    let frames = maskbloom::run_job(&job, &mask, amplitude.as_ref())?;
    let written = maskbloom::write_frames(&frames, &args.out)?;

    eprintln!("wrote {} frames to {}", written.len(), args.out.display());
    Ok(())
}

fn cmd_schedule(args: ScheduleArgs) -> anyhow::Result<()> {
    let signal = read_amplitude(&args.amplitude)?;
    let palette = maskbloom::parse_palette(&args.colors).context("parse --colors")?;
    let window = maskbloom::TriggerWindow::new(
        args.start_frame,
        (args.end_frame > 0).then_some(args.end_frame),
    )?;
    let events = maskbloom::events_from_amplitude(
        signal.samples(),
        args.threshold,
        args.speed,
        &palette,
        window,
    );
    println!("{}", maskbloom::format_dilation_schedule(&events));
    Ok(())
}

fn cmd_ease(args: EaseArgs) -> anyhow::Result<()> {
    let ease: maskbloom::Ease = args.curve.parse()?;
    let steps = args.steps.max(1);
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        println!("{t:.4}\t{:.6}", ease.apply(t));
    }
    Ok(())
}
