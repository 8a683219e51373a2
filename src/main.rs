use std::path::{Path, PathBuf};
use std::time::SystemTime;

use argh::FromArgs;
use log::LevelFilter;

use spinny::config::Config;
use spinny::geometry::Size;
use spinny::scene::SceneKind;
use spinny::window::{Params, Window};

const DEFAULT_LOG_PATH: &str = concat!(concat!("/tmp/", spinny::prog_name!()), ".log");

fn setup_logger(level: LevelFilter, log_file: impl AsRef<Path>) -> anyhow::Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}][{}] {}",
                humantime::format_rfc3339_seconds(SystemTime::now()),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(
            fern::Dispatch::new()
                .level(LevelFilter::Warn)
                .chain(std::io::stderr()),
        )
        .chain(fern::log_file(log_file)?)
        .apply()?;
    Ok(())
}

#[derive(FromArgs)]
/// Spinning GLES demo paced by wayland frame callbacks. F11 toggles fullscreen.
struct Args {
    /// start in fullscreen mode
    #[argh(switch, short = 'f')]
    fullscreen: bool,
    /// windowed size as WIDTHxHEIGHT
    #[argh(option, short = 'g')]
    geometry: Option<Size>,
    /// increases log verbosity
    #[argh(switch, short = 'v')]
    verbose: bool,
    /// only log warnings and errors
    #[argh(switch, short = 'q')]
    quiet: bool,
    /// file to write logs to
    #[argh(option)]
    log_file: Option<PathBuf>,
    /// path to config file
    #[argh(option)]
    config_file: Option<PathBuf>,
    /// scene to draw: triangle (default), cube or icosahedron
    #[argh(positional)]
    scene: Option<SceneKind>,
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut config = Config::load(args.config_file)?;
    if args.fullscreen {
        config.override_fullscreen(true);
    }
    if let Some(size) = args.geometry {
        config.override_size(size);
    }
    if let Some(scene) = args.scene {
        config.override_scene(scene);
    }

    let scene: SceneKind = config.param();
    let params: Params = config.param();
    log::info!(
        "starting {:?} at {}{}",
        scene,
        params.size,
        if params.fullscreen { " (fullscreen)" } else { "" }
    );

    let (window, event_loop) = Window::new(params, scene.build())?;
    window.run(event_loop)
}

fn main() {
    let args: Args = argh::from_env();

    let level = match (args.verbose, args.quiet) {
        (true, _) => LevelFilter::Debug,
        (_, true) => LevelFilter::Warn,
        _ => LevelFilter::Info,
    };
    let log_file = args
        .log_file
        .clone()
        .unwrap_or_else(|| DEFAULT_LOG_PATH.into());
    let has_logger = setup_logger(level, &log_file)
        .map_err(|e| eprintln!("failed to set up logging to {}: {}", log_file.display(), e))
        .is_ok();

    if let Err(err) = run(args) {
        if has_logger {
            log::error!("{:#}", err);
        } else {
            eprintln!("Error: {:#}", err);
        }
        std::process::exit(1);
    }
}
