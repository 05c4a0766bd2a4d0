use std::f64::consts::PI;

use clap::ValueEnum;
use nalgebra::Point2;
use tracing::{debug, trace};

use super::orbit::{Orbit, OrbitShape};
use crate::consts::{NUM_POINTS, TRIM_FRACTION};
use crate::error::{OrbitError, Result};

/// How the sampler disposes of samples near an asymptote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SamplingMode {
    /// Keep the samples in angular order. Parabolas lose the single sample
    /// closest to the discontinuity, hyperbolas lose their largest-magnitude
    /// samples in place.
    #[default]
    PreserveOrder,
    /// Sort by radius and cut off the tail. Parabolas sort by signed radius,
    /// hyperbolas by absolute radius. The result is in radius order, not
    /// angular order.
    SortAndTrim,
}

/// Points traced out by one snapshot of an [Orbit], in physical units with the
/// focus at the origin.
///
/// Trajectories are never edited. When the orbit changes, sample a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    shape: OrbitShape,
    points: Vec<Point2<f64>>,
}

impl Trajectory {
    pub fn shape(&self) -> OrbitShape {
        self.shape
    }

    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Point2<f64>> {
        self.points.get(idx)
    }

    /// Largest distance of any point from the focus, if there are any points.
    pub fn max_distance(&self) -> Option<f64> {
        self.points
            .iter()
            .map(|p| p.coords.norm())
            .max_by(|a, b| a.total_cmp(b))
    }
}

#[derive(Debug, Clone, Copy)]
struct PolarSample {
    /// `None` when the sample lands exactly on the asymptote
    radius: Option<f64>,
    phi: f64,
}

impl PolarSample {
    /// Radius used for ordering. Samples on the asymptote are infinitely far.
    fn signed_key(&self) -> f64 {
        self.radius.unwrap_or(f64::INFINITY)
    }

    fn abs_key(&self) -> f64 {
        self.radius.map_or(f64::INFINITY, f64::abs)
    }

    /// `None` if either coordinate isn't representable.
    fn to_cartesian(self) -> Option<Point2<f64>> {
        let radius = self.radius?;
        let x = radius * self.phi.cos();
        let y = radius * self.phi.sin();
        if x.is_finite() && y.is_finite() {
            Some(Point2::new(x, y))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectorySampler {
    num_points: usize,
    trim: f64,
    mode: SamplingMode,
}

impl Default for TrajectorySampler {
    fn default() -> Self {
        TrajectorySampler {
            num_points: NUM_POINTS,
            trim: TRIM_FRACTION,
            mode: SamplingMode::default(),
        }
    }
}

impl TrajectorySampler {
    pub fn new(num_points: usize, trim: f64, mode: SamplingMode) -> Result<Self> {
        if num_points == 0 {
            return Err(OrbitError::InvalidInput(
                "need at least one sample per revolution".to_owned(),
            ));
        }
        if !(0.0..1.0).contains(&trim) {
            return Err(OrbitError::InvalidInput(format!(
                "trim fraction must be in [0, 1), was {}",
                trim
            )));
        }
        Ok(TrajectorySampler {
            num_points,
            trim,
            mode,
        })
    }

    pub fn num_points(&self) -> usize {
        self.num_points
    }

    pub fn trim(&self) -> f64 {
        self.trim
    }

    pub fn mode(&self) -> SamplingMode {
        self.mode
    }

    pub fn with_mode(self, mode: SamplingMode) -> Self {
        Self { mode, ..self }
    }

    pub fn sample(&self, orbit: &Orbit) -> Trajectory {
        let shape = orbit.shape();
        let mut samples = self.sweep(orbit);

        match self.mode {
            SamplingMode::PreserveOrder => self.drop_in_place(shape, &mut samples),
            SamplingMode::SortAndTrim => self.sort_and_trim(shape, &mut samples),
        }

        let kept = samples.len();
        let points: Vec<_> = samples
            .into_iter()
            .filter_map(|s| {
                let pt = s.to_cartesian();
                if pt.is_none() {
                    trace!(radius = ?s.radius, phi = s.phi, "dropping unrepresentable sample");
                }
                pt
            })
            .collect();

        debug!(
            %shape,
            eccentricity = orbit.eccentricity(),
            mode = ?self.mode,
            trimmed = self.num_points - kept,
            overflowed = kept - points.len(),
            points = points.len(),
            "sampled trajectory"
        );

        Trajectory { shape, points }
    }

    /// One revolution, starting one increment past zero and ending at 2pi.
    /// The angle accumulates, so the last sample can fall a hair short of 2pi.
    fn sweep(&self, orbit: &Orbit) -> Vec<PolarSample> {
        let increment = 2.0 * PI / self.num_points as f64;
        let mut phi = 0.0;
        (0..self.num_points)
            .map(|_| {
                phi += increment;
                PolarSample {
                    radius: orbit.try_radius_at(phi),
                    phi,
                }
            })
            .collect()
    }

    /// How many samples survive trimming, truncating towards zero.
    fn keep_count(&self, len: usize) -> usize {
        let len = len as f64;
        (len - len * self.trim) as usize
    }

    fn sort_and_trim(&self, shape: OrbitShape, samples: &mut Vec<PolarSample>) {
        match shape {
            OrbitShape::Circle | OrbitShape::Ellipse => return,
            OrbitShape::Parabola => {
                samples.sort_by(|a, b| a.signed_key().total_cmp(&b.signed_key()))
            }
            OrbitShape::Hyperbola => {
                samples.sort_by(|a, b| a.abs_key().total_cmp(&b.abs_key()))
            }
        }
        samples.truncate(self.keep_count(samples.len()));
    }

    fn drop_in_place(&self, shape: OrbitShape, samples: &mut Vec<PolarSample>) {
        match shape {
            OrbitShape::Circle | OrbitShape::Ellipse => {}
            OrbitShape::Parabola => {
                // Drop the one sample closest to the discontinuity. For e = 1
                // and an even sample count that's the one at the midpoint of
                // the sweep, phi = pi.
                let nearest = samples
                    .iter()
                    .enumerate()
                    .max_by(|(_, a), (_, b)| a.signed_key().total_cmp(&b.signed_key()))
                    .map(|(idx, _)| idx);
                if let Some(idx) = nearest {
                    samples.remove(idx);
                }
            }
            OrbitShape::Hyperbola => {
                // Same set of samples as sort_and_trim keeps, minus the reordering
                let mut ranked: Vec<usize> = (0..samples.len()).collect();
                ranked.sort_by(|&i, &j| samples[i].abs_key().total_cmp(&samples[j].abs_key()));

                let mut keep = vec![false; samples.len()];
                for &idx in &ranked[..self.keep_count(samples.len())] {
                    keep[idx] = true;
                }

                let mut flags = keep.into_iter();
                samples.retain(|_| flags.next().unwrap_or(false));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::consts::INITIAL_ANGULAR_MOMENTUM;

    fn orbit(eccentricity: f64) -> Orbit {
        Orbit::new(eccentricity, INITIAL_ANGULAR_MOMENTUM).unwrap()
    }

    fn sampler(mode: SamplingMode) -> TrajectorySampler {
        TrajectorySampler::default().with_mode(mode)
    }

    #[test]
    fn test_sweep_skips_zero() {
        let sampler = TrajectorySampler::new(4, 0.1, SamplingMode::PreserveOrder).unwrap();
        let samples = sampler.sweep(&orbit(0.0));
        let phis: Vec<_> = samples.iter().map(|s| s.phi).collect();
        assert_relative_eq!(phis[0], PI / 2.0);
        assert_relative_eq!(phis[1], PI);
        assert_relative_eq!(phis[2], 3.0 * PI / 2.0);
        assert_relative_eq!(phis[3], 2.0 * PI);
    }

    #[test]
    fn test_circle_is_a_circle() {
        let orbit = orbit(0.0);
        for mode in [SamplingMode::PreserveOrder, SamplingMode::SortAndTrim] {
            let trajectory = sampler(mode).sample(&orbit);
            assert_eq!(trajectory.len(), 300);
            assert_eq!(trajectory.shape(), OrbitShape::Circle);
            for p in trajectory.points() {
                assert_relative_eq!(p.coords.norm(), orbit.conic_parameter(), max_relative = 1e-12);
            }
            // Last sample closes the loop at phi = 2pi
            let last = trajectory.points()[299];
            assert_relative_eq!(last.x, orbit.conic_parameter(), max_relative = 1e-12);
        }
    }

    #[test]
    fn test_ellipse_is_untrimmed() {
        for mode in [SamplingMode::PreserveOrder, SamplingMode::SortAndTrim] {
            let trajectory = sampler(mode).sample(&orbit(0.3));
            assert_eq!(trajectory.len(), 300);
        }
    }

    #[test]
    fn test_parabola_preserve_order_drops_midpoint() {
        let orbit = orbit(1.0);
        let trajectory = sampler(SamplingMode::PreserveOrder).sample(&orbit);
        assert_eq!(trajectory.len(), 299);

        // Still in angular order: the polar angle increases monotonically
        let angles: Vec<_> = trajectory
            .points()
            .iter()
            .map(|p| p.y.atan2(p.x).rem_euclid(2.0 * PI))
            .collect();
        for pair in angles[..angles.len() - 1].windows(2) {
            assert!(pair[0] < pair[1], "{:?}", pair);
        }
    }

    #[test]
    fn test_mirrored_parabola_preserve_order() {
        let orbit = orbit(-1.0);
        let trajectory = sampler(SamplingMode::PreserveOrder).sample(&orbit);
        assert_eq!(trajectory.len(), 299);

        // The asymptote for e = -1 is at phi = 2pi, the very last sample, so
        // the periapsis at phi = pi keeps its place halfway round
        let periapsis = trajectory.points()[149];
        assert_relative_eq!(
            periapsis.coords.norm(),
            orbit.conic_parameter() / 2.0,
            max_relative = 1e-12
        );
        assert!(periapsis.x < 0.0);
        for p in trajectory.points() {
            assert!(p.coords.norm() >= orbit.conic_parameter() / 2.0 * (1.0 - 1e-12));
        }

        let last = trajectory.points()[298];
        let increment = 2.0 * PI / 300.0;
        assert_relative_eq!(
            last.y.atan2(last.x).rem_euclid(2.0 * PI),
            2.0 * PI - increment,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_parabola_sort_and_trim() {
        let orbit = orbit(1.0);
        let trajectory = sampler(SamplingMode::SortAndTrim).sample(&orbit);
        assert_eq!(trajectory.len(), 270);

        // Sorted by distance from the focus, starting with the periapsis. The
        // sample on the asymptote went out with the tail.
        let distances: Vec<_> = trajectory.points().iter().map(|p| p.coords.norm()).collect();
        assert_relative_eq!(distances[0], orbit.conic_parameter() / 2.0, max_relative = 1e-9);
        for pair in distances.windows(2) {
            assert!(pair[0] <= pair[1] * (1.0 + 1e-12));
        }
    }

    #[test]
    fn test_hyperbola_trimming() {
        let orbit = orbit(1.7);
        let mut untrimmed: Vec<_> = sampler(SamplingMode::PreserveOrder)
            .sweep(&orbit)
            .iter()
            .map(|s| s.abs_key())
            .collect();
        untrimmed.sort_by(|a, b| a.total_cmp(b));
        let percentile_90 = untrimmed[(untrimmed.len() * 9) / 10 - 1];

        let sorted = sampler(SamplingMode::SortAndTrim).sample(&orbit);
        let in_place = sampler(SamplingMode::PreserveOrder).sample(&orbit);
        for trajectory in [&sorted, &in_place] {
            assert!(trajectory.len() <= 270);
            assert!(trajectory.len() >= 260);
            assert!(trajectory.max_distance().unwrap() <= percentile_90 * (1.0 + 1e-12));
        }

        // Both modes keep the same points
        assert_eq!(sorted.len(), in_place.len());
        for p in in_place.points() {
            assert!(sorted.points().contains(p));
        }
    }

    #[test]
    fn test_unrepresentable_samples_are_dropped() {
        let overflowed = PolarSample {
            radius: Some(f64::INFINITY),
            phi: 1.0,
        };
        assert_eq!(overflowed.to_cartesian(), None);

        let asymptote = PolarSample {
            radius: None,
            phi: PI,
        };
        assert_eq!(asymptote.to_cartesian(), None);

        let fine = PolarSample {
            radius: Some(2.0),
            phi: 0.0,
        };
        assert_eq!(fine.to_cartesian(), Some(Point2::new(2.0, 0.0)));
    }

    #[test]
    fn test_sample_drops_overflowed_points() {
        // Near the far end the radius runs past f64::MAX
        let mut orbit = orbit(-0.5);
        orbit.set_conic_parameter(1.5e308).unwrap();

        let trajectory = sampler(SamplingMode::PreserveOrder).sample(&orbit);
        assert_eq!(trajectory.shape(), OrbitShape::Ellipse);
        assert!(!trajectory.is_empty());
        assert!(trajectory.len() < 300);
        for p in trajectory.points() {
            assert!(p.x.is_finite() && p.y.is_finite(), "{:?}", p);
        }
    }

    #[test]
    fn test_invalid_settings() {
        assert!(TrajectorySampler::new(0, 0.1, SamplingMode::SortAndTrim).is_err());
        assert!(TrajectorySampler::new(300, 1.0, SamplingMode::SortAndTrim).is_err());
        assert!(TrajectorySampler::new(300, -0.1, SamplingMode::SortAndTrim).is_err());
        assert!(TrajectorySampler::new(300, 0.0, SamplingMode::SortAndTrim).is_ok());
    }
}
