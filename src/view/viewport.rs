use nalgebra::Point2;
use tracing::debug;

use crate::astro::{Orbit, Trajectory};
use crate::consts::{GUI_Y, HEIGHT, SCALING_CONST, VERTICAL_CENTER, WIDTH};
use crate::error::{OrbitError, Result};

/// The drawable window, in pixels. Everything from `gui_y` down belongs to
/// the widgets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportConfig {
    pub width: f64,
    pub height: f64,
    pub gui_y: f64,
    /// The largest orbit spans `width / margin` pixels from its focus. Must be
    /// at least 2 to fit on screen.
    pub margin: f64,
    /// Height of the focus, as a fraction of the space above the widgets
    pub vertical_center: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        ViewportConfig {
            width: WIDTH as f64,
            height: HEIGHT as f64,
            gui_y: GUI_Y,
            margin: SCALING_CONST,
            vertical_center: VERTICAL_CENTER,
        }
    }
}

impl ViewportConfig {
    /// Same proportions as the default layout, at a different size.
    pub fn with_size(width: f64, height: f64) -> Self {
        ViewportConfig {
            width,
            height,
            gui_y: height - height / 7.0,
            ..Default::default()
        }
    }

    /// Where the focus lands on screen
    pub fn origin(&self) -> Point2<f64> {
        Point2::new(self.width / 2.0, self.gui_y * self.vertical_center)
    }

    /// Whether a trajectory point at this pixel should be drawn: on screen, and
    /// above the widget band.
    pub fn is_drawable(&self, pixel: &Point2<f64>) -> bool {
        (0.0..self.width).contains(&pixel.x) && pixel.y >= 0.0 && pixel.y < self.gui_y - 1.0
    }
}

/// Maps physical coordinates to pixels: divide by `factor`, then shift the
/// focus to `origin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub factor: f64,
    pub origin: Point2<f64>,
}

impl Projection {
    pub fn to_pixel(&self, point: &Point2<f64>) -> Point2<f64> {
        self.origin + point.coords / self.factor
    }

    pub fn to_physical(&self, pixel: &Point2<f64>) -> Point2<f64> {
        Point2::from((pixel - self.origin) * self.factor)
    }
}

/// Picks one scale for every orbit drawn in a frame, so that orbits of very
/// different sizes keep their relative proportions. The orbit with the largest
/// radius at phi = 0 fills the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportScaler {
    viewport: ViewportConfig,
}

impl ViewportScaler {
    pub fn new(viewport: ViewportConfig) -> Result<Self> {
        if !(viewport.width > 0.0 && viewport.height > 0.0) {
            return Err(OrbitError::InvalidInput(format!(
                "viewport must have positive size, was {}x{}",
                viewport.width, viewport.height
            )));
        }
        if !(viewport.margin >= 2.0) {
            return Err(OrbitError::InvalidInput(format!(
                "margin must be at least 2, was {}",
                viewport.margin
            )));
        }
        Ok(ViewportScaler { viewport })
    }

    pub fn viewport(&self) -> &ViewportConfig {
        &self.viewport
    }

    /// Largest `|r(0)|` over the orbits.
    pub fn max_radius<'a>(orbits: impl IntoIterator<Item = &'a Orbit>) -> Result<f64> {
        let idx_and_radius = Self::find_max_radius(orbits)?;
        Ok(idx_and_radius.1)
    }

    /// Index of the orbit that sets the scale.
    pub fn orbit_with_max_radius<'a>(orbits: impl IntoIterator<Item = &'a Orbit>) -> Result<usize> {
        let idx_and_radius = Self::find_max_radius(orbits)?;
        Ok(idx_and_radius.0)
    }

    fn find_max_radius<'a>(orbits: impl IntoIterator<Item = &'a Orbit>) -> Result<(usize, f64)> {
        orbits
            .into_iter()
            .map(|orbit| orbit.radius_at(0.0).abs())
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (idx, r)| match best {
                Some((_, best_r)) if best_r >= r => best,
                _ => Some((idx, r)),
            })
            .ok_or_else(|| OrbitError::InvalidInput("no orbits to scale".to_owned()))
    }

    pub fn scale<'a>(&self, orbits: impl IntoIterator<Item = &'a Orbit>) -> Result<Projection> {
        let max_radius = Self::max_radius(orbits)?;
        self.projection_for(max_radius)
    }

    /// Same as [ViewportScaler::scale], but sizes the view to the farthest
    /// sampled point instead of the radius at phi = 0.
    pub fn scale_trajectories<'a>(
        &self,
        trajectories: impl IntoIterator<Item = &'a Trajectory>,
    ) -> Result<Projection> {
        let mut any = false;
        let mut max_distance: f64 = 0.0;
        for trajectory in trajectories {
            any = true;
            if let Some(d) = trajectory.max_distance() {
                max_distance = max_distance.max(d);
            }
        }
        if !any {
            return Err(OrbitError::InvalidInput("no trajectories to scale".to_owned()));
        }
        self.projection_for(max_distance)
    }

    fn projection_for(&self, max_radius: f64) -> Result<Projection> {
        if !(max_radius.is_finite() && max_radius > 0.0) {
            return Err(OrbitError::InvalidInput(format!(
                "can't fit a radius of {} on screen",
                max_radius
            )));
        }

        let factor = max_radius / (self.viewport.width / self.viewport.margin);
        debug!(max_radius, factor, "scaled viewport");
        Ok(Projection {
            factor,
            origin: self.viewport.origin(),
        })
    }
}
