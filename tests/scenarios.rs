use std::f64::consts::PI;

use approx::assert_relative_eq;
use nalgebra::Vector2;

use kepler_conics::astro::{Orbit, OrbitShape, SamplingMode, TrajectorySampler};
use kepler_conics::consts::{COMET_MASS, EARTH_MASS, INITIAL_ANGULAR_MOMENTUM};
use kepler_conics::view::{Satellite, ViewportConfig, ViewportScaler};

fn orbit_with_periapsis(radius: f64) -> Orbit {
    let mut orbit = Orbit::default();
    orbit.set_conic_parameter(radius).unwrap();
    orbit
}

#[test]
fn earth_comet_circle() {
    let orbit =
        Orbit::with_masses(0.0, INITIAL_ANGULAR_MOMENTUM, EARTH_MASS, COMET_MASS).unwrap();
    assert_eq!(orbit.shape(), OrbitShape::Circle);

    let c0 = orbit.radius_at(0.0);
    assert_relative_eq!(c0, 25_087_689.177_519_448, max_relative = 1e-9);
    assert_relative_eq!(orbit.radius_at(PI), c0);
    assert_relative_eq!(orbit.radius_at(1.234), c0);
    assert!(orbit.energy() < 0.0);
}

#[test]
fn ellipse_keeps_every_sample() {
    let orbit = Orbit::new(0.3, INITIAL_ANGULAR_MOMENTUM).unwrap();
    for mode in [SamplingMode::PreserveOrder, SamplingMode::SortAndTrim] {
        let trajectory = TrajectorySampler::default().with_mode(mode).sample(&orbit);
        assert_eq!(trajectory.shape(), OrbitShape::Ellipse);
        assert_eq!(trajectory.len(), 300);
    }
}

#[test]
fn hyperbola_loses_its_far_tail() {
    let orbit = Orbit::new(1.7, INITIAL_ANGULAR_MOMENTUM).unwrap();

    // Same sweep as the sampler, untrimmed
    let step = 2.0 * PI / 300.0;
    let mut phi = 0.0;
    let mut radii = vec![];
    for _ in 0..300 {
        phi += step;
        radii.push(orbit.radius_at(phi).abs());
    }
    radii.sort_by(|a, b| a.total_cmp(b));
    let p90 = radii[269];

    for mode in [SamplingMode::PreserveOrder, SamplingMode::SortAndTrim] {
        let trajectory = TrajectorySampler::default().with_mode(mode).sample(&orbit);
        assert!(trajectory.len() <= 270);
        let farthest = trajectory.max_distance().unwrap();
        assert!(farthest <= p90 * (1.0 + 1e-12), "{} > {}", farthest, p90);
    }
}

#[test]
fn scale_follows_largest_orbit() {
    let scaler = ViewportScaler::new(ViewportConfig::default()).unwrap();
    let orbits = [orbit_with_periapsis(100.0), orbit_with_periapsis(500.0)];

    let projection = scaler.scale(&orbits).unwrap();
    assert_relative_eq!(projection.factor, 500.0 / (800.0 / 2.6), max_relative = 1e-12);
    assert_relative_eq!(projection.factor, 1.625, max_relative = 1e-12);
    assert_eq!(ViewportScaler::orbit_with_max_radius(&orbits).unwrap(), 1);
}

#[test]
fn satellite_wraps_around() {
    let orbit = Orbit::default();
    let sampler = TrajectorySampler::new(4, 0.1, SamplingMode::default()).unwrap();
    let scaler = ViewportScaler::new(ViewportConfig::default()).unwrap();
    let projection = scaler.scale([&orbit]).unwrap();
    let mut satellite = Satellite::new(orbit, sampler, projection, Vector2::new(40.0, 40.0));

    let cursors: Vec<_> = (0..5)
        .map(|_| {
            satellite.advance().unwrap();
            satellite.cursor()
        })
        .collect();
    assert_eq!(cursors, vec![1, 2, 3, 0, 1]);
}
