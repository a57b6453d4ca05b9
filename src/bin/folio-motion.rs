use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use folio_motion::{
    PageDef, PageSession, PreferenceDetector, RevealState, ScrollState, SharedFlag, Viewport,
};

#[derive(Parser, Debug)]
#[command(name = "folio-motion", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate one frame and print it as JSON.
    Eval(EvalArgs),
    /// Sweep a scroll range and print the active section per step.
    Trace(TraceArgs),
}

#[derive(Parser, Debug)]
struct PageArgs {
    /// Input page JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Viewport as `WIDTHxHEIGHT`.
    #[arg(long, default_value = "1280x800", value_parser = parse_viewport)]
    viewport: Viewport,

    /// Simulate `prefers-reduced-motion: reduce`.
    #[arg(long, default_value_t = false)]
    reduced_motion: bool,
}

#[derive(Parser, Debug)]
struct EvalArgs {
    #[command(flatten)]
    page: PageArgs,

    /// Scroll offset in pixels.
    #[arg(long)]
    scroll: f64,

    /// Seconds elapsed since the scroll event (advances reveal transitions).
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Start in the dark theme.
    #[arg(long, default_value_t = false)]
    dark: bool,
}

#[derive(Parser, Debug)]
struct TraceArgs {
    #[command(flatten)]
    page: PageArgs,

    /// First scroll offset.
    #[arg(long, default_value_t = 0.0)]
    from: f64,

    /// Last scroll offset (inclusive).
    #[arg(long)]
    to: f64,

    /// Scroll increment per step.
    #[arg(long, default_value_t = 100.0)]
    step: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Eval(args) => cmd_eval(args),
        Command::Trace(args) => cmd_trace(args),
    }
}

fn parse_viewport(s: &str) -> Result<Viewport, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w: f64 = w.trim().parse().map_err(|e| format!("width: {e}"))?;
    let h: f64 = h.trim().parse().map_err(|e| format!("height: {e}"))?;
    Viewport::new(w, h).map_err(|e| e.to_string())
}

fn open_session(args: &PageArgs) -> anyhow::Result<PageSession> {
    let page = PageDef::from_path(&args.in_path)
        .with_context(|| format!("load page '{}'", args.in_path.display()))?;
    let detector = PreferenceDetector::with_breakpoint(
        page.narrow_breakpoint,
        SharedFlag::new(args.reduced_motion),
    );
    let session = PageSession::new(&page, detector)
        .with_context(|| format!("mount page '{}'", args.in_path.display()))?;
    Ok(session)
}

fn cmd_eval(args: EvalArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.scroll.is_finite() && args.time.is_finite() && args.time >= 0.0,
        "scroll and time must be finite, time >= 0"
    );
    let mut session = open_session(&args.page)?;
    if args.dark {
        session.toggle_theme();
    }

    session.scroll(ScrollState::new(args.scroll, args.page.viewport));
    session.tick(args.time);

    let frame = session.frame();
    let json = serde_json::to_string_pretty(&frame).context("serialize frame")?;
    println!("{json}");
    Ok(())
}

fn cmd_trace(args: TraceArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.step.is_finite() && args.step > 0.0,
        "--step must be > 0"
    );
    anyhow::ensure!(
        args.from.is_finite() && args.to.is_finite() && args.from <= args.to,
        "--from must not exceed --to"
    );
    let mut session = open_session(&args.page)?;

    let steps = ((args.to - args.from) / args.step).floor() as u64;
    for i in 0..=steps {
        let y = args.from + i as f64 * args.step;
        session.scroll(ScrollState::new(y, args.page.viewport).at_time(i as f64 / 60.0));
        let frame = session.frame();
        let revealed = frame
            .reveals
            .iter()
            .filter(|r| r.state == RevealState::Visible)
            .count();
        println!(
            "scroll={y:.0} active={} revealed={revealed}/{}",
            frame.active_section.as_deref().unwrap_or("-"),
            frame.reveals.len()
        );
    }
    Ok(())
}
