//! Headless cutscene player.
//!
//! `cutscene [OPTIONS.toml] [--trace PATH] [--realtime]`

use std::path::{Path, PathBuf};

use cutscene::engine::CutsceneEngine;
use cutscene::error::CutsceneError;
use cutscene::options::Options;
use cutscene::render::TraceSink;

struct Args {
    options: Option<PathBuf>,
    trace: Option<PathBuf>,
    realtime: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        options: None,
        trace: None,
        realtime: false,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--realtime" => args.realtime = true,
            "--trace" => {
                let path = iter
                    .next()
                    .ok_or_else(|| "--trace needs a path".to_owned())?;
                args.trace = Some(PathBuf::from(path));
            }
            flag if flag.starts_with("--") => {
                return Err(format!("unknown flag {flag}"));
            }
            path if args.options.is_none() => {
                args.options = Some(PathBuf::from(path));
            }
            extra => return Err(format!("unexpected argument {extra}")),
        }
    }
    Ok(args)
}

fn load_options(path: Option<&Path>) -> Result<Options, CutsceneError> {
    match path {
        Some(path) => {
            log::info!("options: {}", path.display());
            Options::load(path)
        }
        None => Ok(Options::default()),
    }
}

fn run(args: &Args) -> Result<(), CutsceneError> {
    let mut options = load_options(args.options.as_deref())?;
    if args.realtime {
        options.playback.realtime = true;
    }
    let playback = options.playback.clone();

    let mut engine = CutsceneEngine::new(options)?;
    if let Some(path) = &args.trace {
        log::info!("trace: {}", path.display());
        engine = engine.with_sink(TraceSink::create(path, playback.trace_stride)?);
    }

    let summary = engine.run_to_end(&playback);
    log::info!(
        "{} beats, {} frames, {:.2}s",
        summary.beats_entered,
        summary.frames,
        summary.simulated.as_secs_f32()
    );
    Ok(())
}

fn main() {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            log::error!("{e}");
            log::error!(
                "Usage: cutscene [OPTIONS.toml] [--trace PATH] [--realtime]"
            );
            std::process::exit(2);
        }
    };

    if let Err(e) = run(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
