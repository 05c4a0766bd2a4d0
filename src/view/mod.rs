//! Getting orbits onto the screen: a shared scale for every orbit in a frame,
//! the satellite that walks along one of them, and the scene that runs each
//! frame in order.

mod satellite;
mod scene;
mod viewport;

pub use satellite::Satellite;
pub use scene::{plot_trajectory, FrameInput, OrbitScene, SceneConfig};
pub use viewport::{Projection, ViewportConfig, ViewportScaler};
