/// spin3d - rotate a wireframe cube with the arrow keys
///
/// Controls:
///   - Up / Down: rotate around the X axis
///   - Left / Right: rotate around the Y axis
///   - Escape or closing the window: quit
use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use spin3d_core::{Controller, Surface, DEFAULT_TICK_RATE};
use spin3d_terminal::TerminalSurface;
use spin3d_window::logging::{init_logging, LoggingConfig};
use spin3d_window::{WindowSurface, WINDOW_TITLE};

/// Largest accepted viewport side, in pixels.
const MAX_SIDE: i64 = 16384;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Backend {
    /// Native window
    Window,
    /// Current terminal, drawn with half-block characters
    Terminal,
}

#[derive(Parser, Debug)]
#[command(name = "spin3d", version, about = "Simulation of 3D point rotation")]
struct Cli {
    /// Viewport width in pixels
    #[arg(long, default_value_t = 640, value_parser = clap::value_parser!(u32).range(1..=MAX_SIDE))]
    width: u32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 480, value_parser = clap::value_parser!(u32).range(1..=MAX_SIDE))]
    height: u32,

    /// Ticks per second (0 disables throttling)
    #[arg(long, default_value_t = DEFAULT_TICK_RATE)]
    tick_rate: u32,

    /// Where to draw
    #[arg(long, value_enum, default_value_t = Backend::Window)]
    backend: Backend,

    /// Seed for the background fade colors
    #[arg(long)]
    seed: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Log filter in env_logger syntax, e.g. "spin3d_core=trace"; overrides RUST_LOG
    #[arg(long, value_name = "FILTER")]
    log: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The terminal backend shares the tty with stderr; keep it quiet by default.
    let default_level = match (cli.verbose, cli.backend) {
        (true, _) => log::LevelFilter::Debug,
        (false, Backend::Window) => log::LevelFilter::Info,
        (false, Backend::Terminal) => log::LevelFilter::Warn,
    };
    init_logging(LoggingConfig {
        env_filter: cli.log.clone(),
        default_level,
    });

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    info!(
        "starting {:?} backend at {}x{}, {} ticks/s",
        cli.backend, cli.width, cli.height, cli.tick_rate
    );

    match cli.backend {
        Backend::Window => {
            let surface = WindowSurface::new(cli.width, cli.height, WINDOW_TITLE)
                .context("failed to open window")?;
            run(surface, rng, cli.tick_rate)
        }
        Backend::Terminal => {
            let surface = TerminalSurface::new(cli.width, cli.height)
                .context("failed to initialise terminal")?;
            run(surface, rng, cli.tick_rate)
        }
    }
}

fn run<S: Surface>(surface: S, rng: StdRng, tick_rate: u32) -> anyhow::Result<()> {
    let mut controller = Controller::with_tick_rate(surface, rng, tick_rate)
        .context("failed to draw the first frame")?;
    controller.run().context("simulation stopped")?;
    info!("goodbye");
    Ok(())
}
