//! Real-time tour player.
//!
//! Drives a [`TourController`] with wall-clock frames, reads commands from stdin
//! and prints every notification as one JSON line on stdout.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use runtime::frame::Frame;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tour::defaults::molla_husrev_zones;
use tour::{BuildingId, FlightTicket, TourCommand, TourConfig, TourController, TourEvent};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod backend;
mod output;
mod renderer;

use backend::PlayerBackend;
use renderer::SimulatedRenderer;

#[derive(Parser, Debug)]
#[command(author, version, about = "Plays an interior tour in the terminal")]
struct Args {
    /// Building to enter
    #[arg(long, default_value_t = 1)]
    building: i64,

    /// Interior model asset to load with the building
    #[arg(long)]
    interior_model: Option<u64>,

    /// Zone backend base URL (built-in zones when omitted)
    #[arg(long)]
    backend_url: Option<String>,

    /// Tour configuration JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulation seconds per wall-clock second
    #[arg(long, default_value_t = 1.0)]
    time_scale: f64,

    /// Frames per wall-clock second
    #[arg(long, default_value_t = 30)]
    frame_hz: u32,

    /// Start the automatic tour right after entering
    #[arg(long)]
    autoplay: bool,

    /// Quit when the tour ends
    #[arg(long)]
    exit_on_end: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    anyhow::ensure!(
        args.time_scale.is_finite() && args.time_scale > 0.0,
        "--time-scale must be positive"
    );
    anyhow::ensure!(args.frame_hz > 0, "--frame-hz must be positive");

    let config = match &args.config {
        Some(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("reading {}", path.display()))?;
            TourConfig::from_json_str(&raw)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => TourConfig::default(),
    };

    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<FlightTicket>();
    let renderer = SimulatedRenderer::new(done_tx, args.time_scale);
    let backend = PlayerBackend::from_url(args.backend_url.as_deref());
    let mut ctl = TourController::new(config, renderer, backend, molla_husrev_zones());

    let building = BuildingId(args.building);
    ctl.enter_with_model(building, args.interior_model)
        .await
        .with_context(|| format!("entering building {building}"))?;
    if args.autoplay {
        ctl.start_auto_tour()?;
    }

    let mut frame = Frame::start(args.frame_hz, args.time_scale);
    let mut interval = tokio::time::interval(frame.wall_interval());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut out = std::io::stdout();

    loop {
        tokio::select! {
            _ = interval.tick() => {
                frame = frame.next();
                ctl.tick(frame.time);
            }
            Some(ticket) = done_rx.recv() => {
                ctl.transition_finished(ticket, Ok(()));
            }
            line = lines.next_line(), if stdin_open => match line.context("reading stdin")? {
                Some(line) if line.trim().eq_ignore_ascii_case("quit") => break,
                Some(line) if line.trim().is_empty() => {}
                Some(line) => match line.parse::<TourCommand>() {
                    Ok(cmd) => {
                        if let Err(err) = ctl.dispatch(cmd).await {
                            warn!("command failed: {err}");
                            output::write_rejection(&mut out, &line, &err)?;
                        }
                    }
                    Err(err) => {
                        warn!("{err}");
                        output::write_rejection(&mut out, &line, &err)?;
                    }
                },
                None => {
                    stdin_open = false;
                    // Piped input may just start the tour; keep playing if asked to.
                    if !(args.exit_on_end && ctl.is_autoplay()) {
                        break;
                    }
                }
            },
        }

        let events = ctl.drain_events();
        output::write_events(&mut out, &events)?;
        let ended = events
            .iter()
            .any(|e| matches!(e.event, TourEvent::TourEnded { .. }));
        if args.exit_on_end && ended {
            info!("tour ended, leaving");
            break;
        }
    }

    ctl.exit();
    output::write_events(&mut out, &ctl.drain_events())?;
    out.flush().context("flushing stdout")?;
    Ok(())
}
