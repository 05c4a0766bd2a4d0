use nalgebra::{Point2, Vector2};
use tracing::debug;

use super::viewport::Projection;
use crate::astro::{Orbit, Trajectory, TrajectorySampler};
use crate::error::{OrbitError, Result};
use crate::render::PixelRect;

/// A marker that walks around a precomputed trajectory, one point per tick.
///
/// The walk is cyclic and never ends: after the last point it starts over at
/// the first. Moving to a new orbit is an instantaneous jump back to the start
/// of the new trajectory.
#[derive(Debug, Clone)]
pub struct Satellite {
    orbit: Orbit,
    trajectory: Trajectory,
    sampler: TrajectorySampler,
    projection: Projection,
    sprite_size: Vector2<f64>,
    cursor: usize,
    /// Top-left corner of the sprite, in pixels
    position: Point2<f64>,
}

impl Satellite {
    pub fn new(
        orbit: Orbit,
        sampler: TrajectorySampler,
        projection: Projection,
        sprite_size: Vector2<f64>,
    ) -> Self {
        let trajectory = sampler.sample(&orbit);
        let mut satellite = Satellite {
            orbit,
            trajectory,
            sampler,
            projection,
            sprite_size,
            cursor: 0,
            position: Point2::origin(),
        };
        satellite.position = satellite.locate();
        satellite
    }

    pub fn orbit(&self) -> &Orbit {
        &self.orbit
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Where the sprite's top-left corner goes this frame.
    pub fn position(&self) -> Point2<f64> {
        self.position
    }

    /// The sprite's footprint, centered on the current trajectory point.
    pub fn rect(&self) -> PixelRect {
        PixelRect::new(
            self.position.x,
            self.position.y,
            self.sprite_size.x,
            self.sprite_size.y,
        )
    }

    /// Moves to the next point, wrapping around to the first.
    pub fn advance(&mut self) -> Result<()> {
        if self.trajectory.is_empty() {
            return Err(OrbitError::EmptyTrajectory);
        }
        self.cursor = (self.cursor + 1) % self.trajectory.len();
        self.position = self.locate();
        Ok(())
    }

    /// Starts over on a freshly sampled trajectory of `orbit`.
    pub fn set_orbit(&mut self, orbit: Orbit) {
        self.trajectory = self.sampler.sample(&orbit);
        self.orbit = orbit;
        self.cursor = 0;
        self.position = self.locate();
        debug!(
            shape = %self.trajectory.shape(),
            points = self.trajectory.len(),
            "satellite moved to new orbit"
        );
    }

    /// Adopts this frame's scale. The satellite stays at the same trajectory
    /// point.
    pub fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
        self.position = self.locate();
    }

    fn locate(&self) -> Point2<f64> {
        // Before there's a trajectory to follow, sit at the periapsis direction
        let point = match self.trajectory.get(self.cursor) {
            Some(point) => *point,
            None => Point2::new(self.orbit.radius_at(0.0), 0.0),
        };
        self.projection.to_pixel(&point) - self.sprite_size / 2.0
    }
}
