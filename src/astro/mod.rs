//! A module for evaluating two-body Kepler orbits in closed form.
//!
//! The two important structs in this module are:
//! - [Orbit], which holds the physical parameters of a two-body system and
//!   evaluates the polar conic equation `r(phi) = C / (1 + e cos(phi))`.
//! - [TrajectorySampler], which sweeps an [Orbit] through one revolution and
//!   produces a [Trajectory] of planar points, trimming the samples that run
//!   off towards an asymptote.

mod orbit;
mod sampler;

pub use orbit::{Orbit, OrbitShape};
pub use sampler::{SamplingMode, Trajectory, TrajectorySampler};
