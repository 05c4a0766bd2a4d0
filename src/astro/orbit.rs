use std::fmt;

use crate::consts::{
    ASYMPTOTE_RADIUS, COMET_MASS, EARTH_MASS, INITIAL_ANGULAR_MOMENTUM, NEWTON_G,
};
use crate::error::{OrbitError, Result};

/// The four conic sections an orbit can trace out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrbitShape {
    Circle,
    Ellipse,
    Parabola,
    Hyperbola,
}

impl OrbitShape {
    /// Classifies an eccentricity. The boundaries are compared exactly, since
    /// slider steps land right on 0 and +-1.
    #[allow(clippy::float_cmp)]
    pub fn of(eccentricity: f64) -> Self {
        let e = eccentricity.abs();
        if eccentricity == 0.0 {
            OrbitShape::Circle
        } else if e < 1.0 {
            OrbitShape::Ellipse
        } else if e == 1.0 {
            OrbitShape::Parabola
        } else {
            OrbitShape::Hyperbola
        }
    }

    /// Circles and ellipses have negative energy, and stay bound.
    pub fn is_bound(&self) -> bool {
        matches!(self, OrbitShape::Circle | OrbitShape::Ellipse)
    }
}

impl fmt::Display for OrbitShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrbitShape::Circle => "CIRCLE",
            OrbitShape::Ellipse => "ELLIPSE",
            OrbitShape::Parabola => "PARABOLA",
            OrbitShape::Hyperbola => "HYPERBOLA",
        };
        f.write_str(name)
    }
}

/// A body of mass `m2` orbiting a body of mass `m1`, described by the general
/// Kepler orbit equation
///
/// ```text
/// r(phi) = C / (1 + e cos(phi))
/// C = L^2 / (gamma * mu)
/// gamma = G m1 m2
/// mu = m1 m2 / (m1 + m2)
/// ```
///
/// The masses are fixed at construction. Eccentricity and angular momentum can
/// be changed at any time, but any [Trajectory](super::Trajectory) sampled
/// before the change is stale and has to be resampled.
#[derive(Debug, Clone, PartialEq)]
pub struct Orbit {
    primary_mass: f64,
    secondary_mass: f64,
    gamma: f64,
    reduced_mass: f64,
    angular_momentum: f64,
    eccentricity: f64,
    /// Semi-latus rectum, always positive
    conic_parameter: f64,
}

impl Default for Orbit {
    fn default() -> Self {
        let gamma = NEWTON_G * EARTH_MASS * COMET_MASS;
        let reduced_mass = EARTH_MASS * COMET_MASS / (EARTH_MASS + COMET_MASS);
        Orbit {
            primary_mass: EARTH_MASS,
            secondary_mass: COMET_MASS,
            gamma,
            reduced_mass,
            angular_momentum: INITIAL_ANGULAR_MOMENTUM,
            eccentricity: 0.0,
            conic_parameter: INITIAL_ANGULAR_MOMENTUM.powi(2) / (gamma * reduced_mass),
        }
    }
}

impl Orbit {
    /// An orbit of a comet around the Earth.
    pub fn new(eccentricity: f64, angular_momentum: f64) -> Result<Self> {
        Self::with_masses(eccentricity, angular_momentum, EARTH_MASS, COMET_MASS)
    }

    pub fn with_masses(
        eccentricity: f64,
        angular_momentum: f64,
        primary_mass: f64,
        secondary_mass: f64,
    ) -> Result<Self> {
        for (name, mass) in [("primary", primary_mass), ("secondary", secondary_mass)] {
            if !(mass.is_finite() && mass > 0.0) {
                return Err(OrbitError::InvalidInput(format!(
                    "{} mass must be positive, was {}",
                    name, mass
                )));
            }
        }
        check_eccentricity(eccentricity)?;
        check_positive("angular momentum", angular_momentum)?;

        let gamma = NEWTON_G * primary_mass * secondary_mass;
        let reduced_mass = primary_mass * secondary_mass / (primary_mass + secondary_mass);

        let mut orbit = Orbit {
            primary_mass,
            secondary_mass,
            gamma,
            reduced_mass,
            angular_momentum,
            eccentricity,
            conic_parameter: 0.0,
        };
        orbit.conic_parameter = orbit.conic_parameter_for(angular_momentum);
        Ok(orbit)
    }

    // -- Parameters --

    pub fn primary_mass(&self) -> f64 {
        self.primary_mass
    }

    pub fn secondary_mass(&self) -> f64 {
        self.secondary_mass
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    pub fn reduced_mass(&self) -> f64 {
        self.reduced_mass
    }

    pub fn angular_momentum(&self) -> f64 {
        self.angular_momentum
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn conic_parameter(&self) -> f64 {
        self.conic_parameter
    }

    pub fn shape(&self) -> OrbitShape {
        OrbitShape::of(self.eccentricity)
    }

    // -- Mutators. Each of these invalidates previously sampled trajectories. --

    pub fn set_eccentricity(&mut self, eccentricity: f64) -> Result<()> {
        check_eccentricity(eccentricity)?;
        self.eccentricity = eccentricity;
        Ok(())
    }

    /// Also recomputes the conic parameter.
    pub fn set_angular_momentum(&mut self, angular_momentum: f64) -> Result<()> {
        check_positive("angular momentum", angular_momentum)?;
        self.angular_momentum = angular_momentum;
        self.conic_parameter = self.conic_parameter_for(angular_momentum);
        Ok(())
    }

    /// Sets C directly, leaving the angular momentum alone.
    pub fn set_conic_parameter(&mut self, conic_parameter: f64) -> Result<()> {
        check_positive("conic parameter", conic_parameter)?;
        self.conic_parameter = conic_parameter;
        Ok(())
    }

    fn conic_parameter_for(&self, angular_momentum: f64) -> f64 {
        angular_momentum.powi(2) / (self.gamma * self.reduced_mass)
    }

    // -- Geometry --

    /// Distance from the focus at polar angle `phi`, or `None` where the
    /// denominator `1 + e cos(phi)` is exactly zero.
    #[allow(clippy::float_cmp)]
    pub fn try_radius_at(&self, phi: f64) -> Option<f64> {
        let denominator = 1.0 + self.eccentricity * phi.cos();
        if denominator == 0.0 {
            None
        } else {
            Some(self.conic_parameter / denominator)
        }
    }

    /// Distance from the focus at polar angle `phi`.
    ///
    /// Where the denominator vanishes (a parabola pointing straight at its
    /// open end) this returns [ASYMPTOTE_RADIUS] instead. That value is not
    /// physical; the sampler trims it away as an asymptotic artifact.
    pub fn radius_at(&self, phi: f64) -> f64 {
        self.try_radius_at(phi).unwrap_or(ASYMPTOTE_RADIUS)
    }

    /// Total energy of the relative motion. Negative for bound orbits, zero for
    /// parabolas, positive for hyperbolas.
    pub fn energy(&self) -> f64 {
        self.gamma.powi(2) * self.reduced_mass * (self.eccentricity.powi(2) - 1.0)
            / (2.0 * self.angular_momentum.powi(2))
    }
}

fn check_eccentricity(eccentricity: f64) -> Result<()> {
    if eccentricity.is_finite() {
        Ok(())
    } else {
        Err(OrbitError::InvalidInput(format!(
            "eccentricity must be finite, was {}",
            eccentricity
        )))
    }
}

fn check_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(OrbitError::InvalidInput(format!(
            "{} must be positive, was {}",
            name, value
        )))
    }
}
