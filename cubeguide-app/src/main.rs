//! Cubeguide - Camera-Guided Cube Solving Assistant
//!
//! Host binary: reads the six faces of a cube from a camera feed, asks an
//! external solver for a move sequence, then watches the cube until each
//! move has been performed.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use log::{error, info, warn};

use cubeguide_display::OverlayBackend;

mod config;
mod controller;
mod error;
mod input;
mod link;
mod renderer;
mod sensing;
mod solver;

use crate::config::{load_config, LoadedConfig};
use crate::controller::{Controller, SessionOutcome, SessionPhase};
use crate::error::AppError;
use crate::input::{spawn_keyboard, spawn_link, ChannelInput};
use crate::link::{LinkBackend, LogBackend, TeeBackend};
use crate::sensing::ReplaySource;
use crate::solver::CommandSolver;

#[derive(Parser, Debug)]
#[command(name = "cubeguide")]
#[command(author, version, about = "Guide a person through solving a cube in front of a camera", long_about = None)]
struct Args {
    /// Calibration and session settings (TOML)
    #[arg(long, short)]
    config: PathBuf,

    /// Recorded camera samples, one frame per line
    #[arg(long, short)]
    frames: PathBuf,

    /// Solver program; receives the 54-letter facelet string as last argument
    #[arg(long, short)]
    solver: PathBuf,

    /// Extra argument passed to the solver before the facelets (repeatable)
    #[arg(long = "solver-arg", allow_hyphen_values = true)]
    solver_args: Vec<String>,

    /// Write overlay frames to this file or fifo for an external renderer
    #[arg(long)]
    overlay_out: Option<PathBuf>,

    /// Read key presses framed by an external renderer from this file or fifo
    #[arg(long)]
    renderer_input: Option<PathBuf>,

    /// Time between recorded frames
    #[arg(long, default_value_t = 33)]
    frame_interval_ms: u32,

    /// Replay frames at camera speed instead of as fast as possible
    #[arg(long)]
    realtime: bool,

    /// Do not read commands from stdin
    ///
    /// Stdin is read line by line: type `q` then Enter to abort, `r` then
    /// Enter to rescan.
    #[arg(long)]
    no_keyboard: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    info!("Cubeguide v{}", env!("CARGO_PKG_VERSION"));

    let loaded = load_config(&args.config)?;

    let outcome = match &args.overlay_out {
        Some(path) => {
            let writer = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(path)
                .map_err(|source| open_error(path, source))?;
            info!("Overlay frames go to {}", path.display());
            let backend = TeeBackend::new(LinkBackend::new(BufWriter::new(writer)), LogBackend);
            run_session(&args, loaded, backend)?
        }
        None => run_session(&args, loaded, LogBackend)?,
    };

    Ok(report(&outcome))
}

/// Wire the sources to a controller and run one session
fn run_session<B: OverlayBackend>(
    args: &Args,
    loaded: LoadedConfig,
    backend: B,
) -> Result<SessionOutcome, AppError> {
    let LoadedConfig {
        calibration,
        session,
    } = loaded;

    let frames = File::open(&args.frames).map_err(|source| open_error(&args.frames, source))?;
    let mut source = ReplaySource::new(BufReader::new(frames), session.layout, args.frame_interval_ms);
    if args.realtime {
        source = source.realtime();
    }

    let solver = CommandSolver::new(&args.solver, args.solver_args.clone());

    let (input, tx) = ChannelInput::new();
    if let Some(path) = &args.renderer_input {
        let reader = File::open(path).map_err(|source| open_error(path, source))?;
        spawn_link(reader, tx.clone());
        info!("Renderer input from {}", path.display());
    }
    if !args.no_keyboard {
        spawn_keyboard(BufReader::new(io::stdin()), tx);
        info!("Type 'q' then Enter to abort, 'r' then Enter to rescan");
    }

    let mut controller = Controller::new(source, solver, input, backend, calibration, session);
    Ok(controller.run())
}

fn open_error(path: &Path, source: io::Error) -> AppError {
    AppError::Open {
        path: path.to_path_buf(),
        source,
    }
}

fn report(outcome: &SessionOutcome) -> ExitCode {
    match outcome.phase {
        SessionPhase::Solved => {
            info!("Solved in {} moves", outcome.moves_done);
            ExitCode::SUCCESS
        }
        SessionPhase::Aborted => {
            warn!(
                "Aborted ({:?}) after {}/{} moves",
                outcome.cancel_reason, outcome.moves_done, outcome.moves_total
            );
            if let Some(state) = &outcome.committed {
                info!("Last confirmed front face: {:?}", state.front().cells());
            }
            ExitCode::FAILURE
        }
        SessionPhase::Scanning | SessionPhase::Solving => {
            error!("Session stopped while {:?}", outcome.phase);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_help_explains_line_input() {
        let help = Args::command().render_long_help().to_string();
        assert!(help.contains("then Enter to abort"));
    }

    #[test]
    fn test_parse_minimal_args() {
        let args = Args::try_parse_from(["cubeguide", "-c", "cal.toml", "-f", "run.frames", "-s", "solve"])
            .unwrap();
        assert_eq!(args.frame_interval_ms, 33);
        assert!(!args.no_keyboard);
        assert!(args.solver_args.is_empty());
    }
}
