pub mod astro;
pub mod consts;
pub mod error;
pub mod gui;
pub mod logging;
pub mod render;
pub mod view;

pub use error::{OrbitError, Result};
