use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use kepler_conics::astro::{Orbit, SamplingMode, TrajectorySampler};
use kepler_conics::consts::{
    HEIGHT, INITIAL_ANGULAR_MOMENTUM, NUM_POINTS, TRIM_FRACTION, WIDTH,
};
use kepler_conics::logging::init_logging;
use kepler_conics::render::{BitmapSurface, RenderSurface, Rgb};
use kepler_conics::view::{plot_trajectory, ViewportConfig, ViewportScaler};

const COLORS: [Rgb; 3] = [Rgb::WHITE, Rgb::LIGHT_BLUE, Rgb::GRAY];

/// Draws several orbits at one shared scale into a PNG.
#[derive(Debug, Parser)]
struct Args {
    /// Eccentricity of each orbit; repeat for more than one
    #[arg(
        short,
        long = "ecc",
        allow_negative_numbers = true,
        default_values_t = vec![1.0, 1.9, 0.0]
    )]
    eccentricities: Vec<f64>,
    #[arg(short = 'l', long, default_value_t = INITIAL_ANGULAR_MOMENTUM)]
    angular_momentum: f64,
    #[arg(short, long, default_value = "plots/orbits.png")]
    output: PathBuf,
    #[arg(long, default_value_t = WIDTH)]
    width: u32,
    #[arg(long, default_value_t = HEIGHT)]
    height: u32,
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

    let orbits = args
        .eccentricities
        .iter()
        .map(|&e| Orbit::new(e, args.angular_momentum))
        .collect::<Result<Vec<_>, _>>()?;
    let sampler = TrajectorySampler::new(args.num_points, args.trim, args.mode)?;

    // No widgets in a still image, so the whole height is fair game
    let viewport = ViewportConfig {
        gui_y: args.height as f64 + 1.0,
        ..ViewportConfig::with_size(args.width as f64, args.height as f64)
    };
    let scaler = ViewportScaler::new(viewport)?;
    let projection = scaler.scale(&orbits)?;

    if let Some(dir) = args.output.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let mut surface = BitmapSurface::new(&args.output, args.width, args.height);
    surface.clear(Rgb::BLACK);

    for (i, orbit) in orbits.iter().enumerate() {
        let color = COLORS[i % COLORS.len()];
        let trajectory = sampler.sample(orbit);
        info!(
            eccentricity = orbit.eccentricity(),
            shape = %trajectory.shape(),
            points = trajectory.len(),
            "plotting orbit"
        );
        plot_trajectory(&mut surface, &trajectory, &projection, &viewport, color);

        let caption = format!("{} (e = {})", orbit.shape(), orbit.eccentricity());
        surface.label(&caption, 10.0, 10.0 + 20.0 * i as f64, color);
    }

    surface.present()?;
    info!(path = %args.output.display(), "wrote plot");
    Ok(())
}
