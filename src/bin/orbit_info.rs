use std::error::Error;

use clap::Parser;

use kepler_conics::astro::{Orbit, SamplingMode, TrajectorySampler};
use kepler_conics::consts::{
    COMET_MASS, EARTH_MASS, INITIAL_ANGULAR_MOMENTUM, NUM_POINTS, TRIM_FRACTION,
};
use kepler_conics::logging::init_logging;

#[derive(Debug, Parser)]
struct Args {
    #[arg(allow_negative_numbers = true)]
    eccentricity: f64,
    #[arg(short = 'l', long, default_value_t = INITIAL_ANGULAR_MOMENTUM)]
    angular_momentum: f64,
    #[arg(long, default_value_t = EARTH_MASS)]
    primary_mass: f64,
    #[arg(long, default_value_t = COMET_MASS)]
    secondary_mass: f64,
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

    let orbit = Orbit::with_masses(
        args.eccentricity,
        args.angular_momentum,
        args.primary_mass,
        args.secondary_mass,
    )?;
    let sampler = TrajectorySampler::new(args.num_points, args.trim, args.mode)?;
    let trajectory = sampler.sample(&orbit);

    println!("Orbital characteristics for e = {}", orbit.eccentricity());
    println!("- Shape: {}", orbit.shape());
    println!("- Bound: {}", orbit.shape().is_bound());
    println!("- Reduced mass: {}", orbit.reduced_mass());
    println!("- Gravitational parameter: {}", orbit.gamma());
    println!("- Angular momentum: {}", orbit.angular_momentum());
    println!("- Conic parameter: {}", orbit.conic_parameter());
    println!("- Periapsis direction radius: {:?}", orbit.try_radius_at(0.0));
    println!("- Energy: {}", orbit.energy());
    println!(
        "- Samples kept: {} of {} ({:?})",
        trajectory.len(),
        sampler.num_points(),
        sampler.mode()
    );
    println!("- Farthest sample: {:?}", trajectory.max_distance());
    Ok(())
}
