use std::error::Error;

use clap::Parser;
use kiss3d::window::Window;
use tracing::info;

use kepler_conics::astro::{Orbit, SamplingMode, TrajectorySampler};
use kepler_conics::consts::{
    FPS, HEIGHT, INITIAL_ANGULAR_MOMENTUM, NUM_POINTS, TRIM_FRACTION, WIDTH,
};
use kepler_conics::gui::{Panel, Simulation};
use kepler_conics::logging::init_logging;
use kepler_conics::view::{SceneConfig, ViewportConfig};

/// Interactive orbit graph. Up/Down change the eccentricity, Left/Right the
/// velocity, T moves the satellite to the next orbit, R resets and Space
/// pauses.
#[derive(Debug, Parser)]
struct Args {
    #[arg(long, default_value_t = WIDTH)]
    width: u32,
    #[arg(long, default_value_t = HEIGHT)]
    height: u32,
    /// Starting eccentricity of the controlled orbit, within [-2, 2]
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    eccentricity: f64,
    #[arg(short = 'l', long, default_value_t = INITIAL_ANGULAR_MOMENTUM)]
    angular_momentum: f64,
    /// Circular reference orbits, each given as a fraction of the starting
    /// angular momentum
    #[arg(short, long = "reference", default_values_t = vec![0.8])]
    references: Vec<f64>,
    #[arg(short, long, default_value_t = NUM_POINTS)]
    num_points: usize,
    #[arg(long, default_value_t = TRIM_FRACTION)]
    trim: f64,
    #[arg(long, value_enum, default_value_t = SamplingMode::PreserveOrder)]
    mode: SamplingMode,
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();
    let args = Args::parse();

    let reference_orbits = args
        .references
        .iter()
        .map(|k| Orbit::new(0.0, k * args.angular_momentum))
        .collect::<Result<Vec<_>, _>>()?;

    let config = SceneConfig {
        viewport: ViewportConfig::with_size(args.width as f64, args.height as f64),
        sampler: TrajectorySampler::new(args.num_points, args.trim, args.mode)?,
        initial_orbit: Orbit::new(args.eccentricity, args.angular_momentum)?,
        reference_orbits,
        ..Default::default()
    };
    let panel = Panel::new(config)?;
    info!(
        shape = %panel.scene.orbit().shape(),
        orbits = panel.scene.orbits().count(),
        "starting simulator"
    );

    let mut window = Window::new_with_size("Orbit Graph", args.width, args.height);
    window.set_framerate_limit(Some(FPS));
    window.render_loop(Simulation::new(panel));
    Ok(())
}
