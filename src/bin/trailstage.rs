use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use trailstage::{
    RecordingScheduler, RecordingSurface, Stage, StageConfig, ThresholdLadder, TrailView,
    TransitionPlan, Viewport,
};

#[derive(Parser, Debug)]
#[command(name = "trailstage", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a scripted event list and print the recorded commands as JSON.
    Replay(SessionArgs),
    /// Replay a script, then print the transition plan that would run next.
    Plan(PlanArgs),
}

#[derive(Parser, Debug)]
struct SessionArgs {
    /// Image manifest JSON.
    #[arg(long)]
    images: PathBuf,

    /// Event script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Stage config JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial viewport width.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Initial viewport height.
    #[arg(long, default_value_t = 800.0)]
    height: f64,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    #[command(flatten)]
    session: SessionArgs,

    /// Transition to plan.
    #[arg(long, value_enum)]
    transition: PlanKind,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PlanKind {
    Expand,
    Minimize,
}

#[derive(Debug, serde::Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum ScriptEvent {
    Move { x: f64, y: f64 },
    Expand,
    Minimize,
    /// The scheduler finished the running step.
    Complete,
    Resize { width: f64, height: f64 },
    RaiseThreshold,
    LowerThreshold,
}

type CliStage = Stage<RecordingSurface, RecordingScheduler>;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Replay(args) => cmd_replay(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_script(path: &Path) -> anyhow::Result<Vec<ScriptEvent>> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read script '{}'", path.display()))?;
    serde_json::from_str(&s).with_context(|| format!("parse script '{}'", path.display()))
}

fn build_stage(args: &SessionArgs) -> anyhow::Result<CliStage> {
    let images = trailstage::load_manifest(&args.images)?;
    let config = match &args.config {
        Some(path) => StageConfig::from_path(path)?,
        None => StageConfig::default(),
    };
    let viewport = Viewport::new(args.width, args.height)?;
    let stage = Stage::new(
        images,
        config,
        RecordingSurface::new(viewport),
        RecordingScheduler::new(),
    )?;
    Ok(stage)
}

fn replay(stage: &mut CliStage, events: Vec<ScriptEvent>) -> anyhow::Result<()> {
    let mut ladder = ThresholdLadder::default();
    ladder.seek(stage.config().get().threshold);
    for event in events {
        match event {
            ScriptEvent::Move { x, y } => {
                stage.on_pointer_move(x, y);
            }
            ScriptEvent::Expand => {
                stage.expand();
            }
            ScriptEvent::Minimize => {
                stage.minimize();
            }
            ScriptEvent::Complete => {
                if stage.flags().is_animating().get()
                    && let Some(step) = stage.scheduler().last_step().cloned()
                {
                    stage.surface_mut().finish_step(&step);
                }
                stage.complete_step();
            }
            ScriptEvent::Resize { width, height } => {
                stage.surface_mut().set_viewport(Viewport::new(width, height)?);
                stage.refresh();
            }
            ScriptEvent::RaiseThreshold => set_threshold(stage, ladder.raise()),
            ScriptEvent::LowerThreshold => set_threshold(stage, ladder.lower()),
        }
    }
    Ok(())
}

fn set_threshold(stage: &CliStage, threshold: f64) {
    let mut config = stage.config().get();
    config.threshold = threshold;
    stage.config().set(config);
}

#[derive(serde::Serialize)]
struct FlagsReport {
    is_open: bool,
    is_animating: bool,
    active: bool,
}

#[derive(serde::Serialize)]
struct ReplayReport<'a> {
    state: trailstage::SequencerState,
    flags: FlagsReport,
    counter: Option<String>,
    history: Vec<trailstage::HistorySample>,
    commands: &'a [trailstage::SurfaceCommand],
    steps: &'a [trailstage::TransitionStep],
}

fn cmd_replay(args: SessionArgs) -> anyhow::Result<()> {
    let events = load_script(&args.script)?;
    let mut stage = build_stage(&args)?;
    replay(&mut stage, events)?;

    let flags = stage.flags();
    let surface = stage.surface();
    let report = ReplayReport {
        state: stage.state(),
        flags: FlagsReport {
            is_open: flags.is_open().get(),
            is_animating: flags.is_animating().get(),
            active: flags.active().get(),
        },
        counter: stage.counter_label(),
        history: stage.history().get(),
        commands: surface.commands(),
        steps: stage.scheduler().steps(),
    };
    serde_json::to_writer_pretty(std::io::stdout().lock(), &report)
        .context("write replay report")?;
    println!();
    Ok(())
}

#[derive(serde::Serialize)]
struct StepReport {
    total_secs: f64,
    target_starts: Vec<f64>,
}

#[derive(serde::Serialize)]
struct PlanReport {
    plan: TransitionPlan,
    total_secs: f64,
    steps: Vec<StepReport>,
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let events = load_script(&args.session.script)?;
    let mut stage = build_stage(&args.session)?;
    replay(&mut stage, events)?;

    let config = stage.config().get();
    let history = stage.history().get();
    let view = TrailView::new(&history, &config);
    let plan = match args.transition {
        PlanKind::Expand => trailstage::expand_plan(&view),
        PlanKind::Minimize => {
            let viewport = trailstage::StageSurface::viewport(&*stage.surface());
            trailstage::minimize_plan(&view, viewport)
        }
    }
    .context("history is empty; nothing to plan")?;

    let steps = plan
        .steps
        .iter()
        .map(|s| {
            let n = s.targets.len();
            StepReport {
                total_secs: s.total_secs(),
                target_starts: (0..n).map(|i| s.timing.start_offset(i, n)).collect(),
            }
        })
        .collect();
    let report = PlanReport {
        total_secs: plan.total_secs(),
        steps,
        plan,
    };
    serde_json::to_writer_pretty(std::io::stdout().lock(), &report)
        .context("write plan report")?;
    println!();
    Ok(())
}
