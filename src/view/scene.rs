use nalgebra::Vector2;
use tracing::{debug, warn};

use super::satellite::Satellite;
use super::viewport::{Projection, ViewportConfig, ViewportScaler};
use crate::astro::{Orbit, Trajectory, TrajectorySampler};
use crate::consts::{SAT_HEIGHT, SAT_WIDTH};
use crate::error::Result;
use crate::render::{RenderSurface, Rgb, SpriteHandle};

/// Values read off the widgets once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    pub eccentricity: f64,
    /// Multiplier on the angular momentum of the initial orbit
    pub velocity: f64,
}

#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub viewport: ViewportConfig,
    pub sampler: TrajectorySampler,
    pub sprite_size: Vector2<f64>,
    /// Starting point for the orbit the widgets control
    pub initial_orbit: Orbit,
    /// Fixed orbits drawn alongside for comparison
    pub reference_orbits: Vec<Orbit>,
    pub background: Rgb,
    pub orbit_color: Rgb,
    pub reference_color: Rgb,
    pub text_color: Rgb,
}

impl Default for SceneConfig {
    fn default() -> Self {
        SceneConfig {
            viewport: ViewportConfig::default(),
            sampler: TrajectorySampler::default(),
            sprite_size: Vector2::new(SAT_WIDTH as f64, SAT_HEIGHT as f64),
            initial_orbit: Orbit::default(),
            reference_orbits: vec![],
            background: Rgb::BLACK,
            orbit_color: Rgb::WHITE,
            reference_color: Rgb::BLUE,
            text_color: Rgb::WHITE,
        }
    }
}

impl SceneConfig {
    pub fn initial_input(&self) -> FrameInput {
        FrameInput {
            eccentricity: self.initial_orbit.eccentricity(),
            velocity: 1.0,
        }
    }
}

/// An orbit together with its most recent sampling.
#[derive(Debug, Clone)]
struct Track {
    orbit: Orbit,
    trajectory: Trajectory,
    color: Rgb,
}

impl Track {
    fn new(orbit: Orbit, sampler: &TrajectorySampler, color: Rgb) -> Self {
        Track {
            trajectory: sampler.sample(&orbit),
            orbit,
            color,
        }
    }
}

/// Everything drawn in one window: a widget-controlled orbit, some fixed
/// reference orbits, and a satellite following one of them.
///
/// The scene owns all of its state, and only talks to the outside world through
/// [FrameInput] and [RenderSurface].
pub struct OrbitScene {
    config: SceneConfig,
    scaler: ViewportScaler,
    /// `tracks[0]` is the controlled orbit
    tracks: Vec<Track>,
    satellite: Satellite,
    /// Which track the satellite follows
    satellite_track: usize,
    projection: Option<Projection>,
}

impl OrbitScene {
    pub fn new(config: SceneConfig) -> Result<Self> {
        let scaler = ViewportScaler::new(config.viewport)?;

        let mut tracks = vec![Track::new(
            config.initial_orbit.clone(),
            &config.sampler,
            config.orbit_color,
        )];
        for orbit in config.reference_orbits.iter() {
            tracks.push(Track::new(
                orbit.clone(),
                &config.sampler,
                config.reference_color,
            ));
        }

        let projection = scaler.scale(tracks.iter().map(|t| &t.orbit))?;
        let satellite = Satellite::new(
            config.initial_orbit.clone(),
            config.sampler,
            projection,
            config.sprite_size,
        );

        Ok(OrbitScene {
            config,
            scaler,
            tracks,
            satellite,
            satellite_track: 0,
            projection: Some(projection),
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn satellite(&self) -> &Satellite {
        &self.satellite
    }

    /// The controlled orbit
    pub fn orbit(&self) -> &Orbit {
        &self.tracks[0].orbit
    }

    pub fn orbits(&self) -> impl Iterator<Item = &Orbit> + '_ {
        self.tracks.iter().map(|t| &t.orbit)
    }

    pub fn trajectories(&self) -> impl Iterator<Item = &Trajectory> + '_ {
        self.tracks.iter().map(|t| &t.trajectory)
    }

    /// Scale used for the last frame, if it could be computed.
    pub fn projection(&self) -> Option<&Projection> {
        self.projection.as_ref()
    }

    /// Runs one frame: repaint, apply the widget values, resample, rescale,
    /// move the satellite and draw everything.
    pub fn tick(&mut self, input: &FrameInput, surface: &mut dyn RenderSurface) {
        surface.clear(self.config.background);

        if self.apply_input(input) {
            self.resample(0);
        }
        self.rescale();

        if let Err(e) = self.satellite.advance() {
            warn!("satellite is not moving this frame: {}", e);
        }

        self.draw(surface);
    }

    /// Draws the current state without moving anything.
    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        let projection = match self.projection {
            Some(projection) => projection,
            None => return,
        };

        for track in self.tracks.iter() {
            plot_trajectory(
                surface,
                &track.trajectory,
                &projection,
                &self.config.viewport,
                track.color,
            );
        }

        if !self.satellite.trajectory().is_empty() {
            surface.blit(SpriteHandle::SATELLITE, self.satellite.rect());
        }

        let orbit = self.orbit();
        let text = [
            format!("{}", orbit.shape()),
            format!("e = {:.2}", orbit.eccentricity()),
            format!("L = {:.3e}", orbit.angular_momentum()),
            format!("E = {:.3e}", orbit.energy()),
        ];
        for (i, line) in text.iter().enumerate() {
            surface.label(line, 10.0, 10.0 + 20.0 * i as f64, self.config.text_color);
        }
    }

    /// Moves the satellite over to the next orbit in the scene.
    pub fn transfer(&mut self) {
        self.satellite_track = (self.satellite_track + 1) % self.tracks.len();
        let orbit = self.tracks[self.satellite_track].orbit.clone();
        self.satellite.set_orbit(orbit);
        debug!(track = self.satellite_track, "transferred satellite");
    }

    /// Puts the controlled orbit back where it started.
    pub fn reset(&mut self) {
        self.tracks[0].orbit = self.config.initial_orbit.clone();
        self.resample(0);
        self.rescale();
    }

    /// Returns whether the controlled orbit changed.
    #[allow(clippy::float_cmp)]
    fn apply_input(&mut self, input: &FrameInput) -> bool {
        let orbit = &mut self.tracks[0].orbit;
        let mut changed = false;

        if input.eccentricity != orbit.eccentricity() {
            match orbit.set_eccentricity(input.eccentricity) {
                Ok(()) => changed = true,
                Err(e) => warn!("ignoring eccentricity: {}", e),
            }
        }

        let angular_momentum = input.velocity * self.config.initial_orbit.angular_momentum();
        if angular_momentum != orbit.angular_momentum() {
            match orbit.set_angular_momentum(angular_momentum) {
                Ok(()) => changed = true,
                Err(e) => warn!("ignoring velocity: {}", e),
            }
        }

        changed
    }

    fn resample(&mut self, idx: usize) {
        let track = &mut self.tracks[idx];
        track.trajectory = self.config.sampler.sample(&track.orbit);
        if self.satellite_track == idx {
            self.satellite.set_orbit(track.orbit.clone());
        }
    }

    /// One scale for every orbit and the satellite.
    fn rescale(&mut self) {
        match self.scaler.scale(self.tracks.iter().map(|t| &t.orbit)) {
            Ok(projection) => {
                self.satellite.set_projection(projection);
                self.projection = Some(projection);
            }
            Err(e) => {
                warn!("skipping orbits this frame: {}", e);
                self.projection = None;
            }
        }
    }
}

/// Plots every point of the trajectory that lands above the widget band.
pub fn plot_trajectory(
    surface: &mut dyn RenderSurface,
    trajectory: &Trajectory,
    projection: &Projection,
    viewport: &ViewportConfig,
    color: Rgb,
) {
    for point in trajectory.points() {
        let pixel = projection.to_pixel(point);
        if viewport.is_drawable(&pixel) {
            surface.plot(pixel.x as i32, pixel.y as i32, color);
        }
    }
}
