// Newton's gravitational constant, in N m^2 / kg^2
pub const NEWTON_G: f64 = 6.67430e-11;

// Default two-body setup: a comet around the Earth
pub const EARTH_MASS: f64 = 5.97219e24;
pub const COMET_MASS: f64 = 1e13;
pub const INITIAL_ANGULAR_MOMENTUM: f64 = 1e24;

// Viewport, in pixels
pub const WIDTH: u32 = 800;
pub const HEIGHT: u32 = 800;
pub const GUI_Y: f64 = HEIGHT as f64 - HEIGHT as f64 / 7.0;
pub const FPS: u64 = 60;

// 2 fits a circle exactly, slightly more leaves a margin
pub const SCALING_CONST: f64 = 2.6;

// Where the focus sits vertically, as a fraction of the height
pub const VERTICAL_CENTER: f64 = 0.5;

// Distance returned by the radius function where 1 + e cos(phi) = 0.
// Deliberately the viewport width, not a physical value.
pub const ASYMPTOTE_RADIUS: f64 = WIDTH as f64;

// Sampling
pub const NUM_POINTS: usize = 300;
pub const TRIM_FRACTION: f64 = 0.1;

// Satellite sprite, in pixels
pub const SAT_WIDTH: u32 = 40;
pub const SAT_HEIGHT: u32 = 40;

// Widgets
pub const SLIDER_WIDTH: f64 = 400.0;
pub const SLIDER_HEIGHT: f64 = 20.0;
