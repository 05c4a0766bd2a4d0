use kiss3d::event::Key;
use tracing::debug;

use crate::error::{OrbitError, Result};
use crate::render::{PixelRect, RenderSurface, Rgb, SpriteHandle};

const KNOB_WIDTH: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub initial: f64,
    pub step: f64,
}

impl SliderConfig {
    pub const ECCENTRICITY: SliderConfig = SliderConfig {
        min: -2.0,
        max: 2.0,
        initial: 0.0,
        step: 0.1,
    };

    /// Multiplier on the starting angular momentum
    pub const VELOCITY: SliderConfig = SliderConfig {
        min: 0.5,
        max: 1.5,
        initial: 1.0,
        step: 0.05,
    };
}

/// A value that moves in fixed steps between two bounds.
///
/// The value always sits on the grid `n * step` for a whole number `n`,
/// computed fresh instead of accumulated. With a step of 0.1 the slider lands
/// on exactly 0 and ±1 from any starting point. A starting value between grid
/// points is snapped to the nearest one.
#[derive(Debug, Clone)]
pub struct Slider {
    label: String,
    config: SliderConfig,
    index: i64,
    initial_index: i64,
    min_index: i64,
    max_index: i64,
}

impl Slider {
    pub fn new(label: &str, config: SliderConfig) -> Result<Self> {
        let SliderConfig {
            min,
            max,
            initial,
            step,
        } = config;
        if !(step > 0.0 && step.is_finite()) {
            return Err(OrbitError::InvalidInput(format!(
                "slider step must be positive, was {}",
                step
            )));
        }
        if !(min <= initial && initial <= max) {
            return Err(OrbitError::InvalidInput(format!(
                "slider starts at {}, outside [{}, {}]",
                initial, min, max
            )));
        }

        // Small fudge so that a bound sitting exactly on a step isn't lost to
        // rounding in the division
        let min_index = (min / step - 1e-9).ceil() as i64;
        let max_index = (max / step + 1e-9).floor() as i64;
        let initial_index = ((initial / step).round() as i64).clamp(min_index, max_index);

        let slider = Slider {
            label: label.to_owned(),
            config,
            index: initial_index,
            initial_index,
            min_index,
            max_index,
        };
        if (slider.value() - initial).abs() > 1e-9 * step {
            debug!(
                label,
                initial,
                snapped = slider.value(),
                "slider start is off the step grid"
            );
        }
        Ok(slider)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    pub fn value(&self) -> f64 {
        self.index as f64 * self.config.step
    }

    pub fn increment(&mut self) {
        self.nudge(1);
    }

    pub fn decrement(&mut self) {
        self.nudge(-1);
    }

    pub fn nudge(&mut self, steps: i64) {
        self.index = (self.index + steps).clamp(self.min_index, self.max_index);
    }

    pub fn reset(&mut self) {
        self.index = self.initial_index;
    }

    /// How far along the track the knob sits, from 0 to 1.
    pub fn fraction(&self) -> f64 {
        let span = self.config.max - self.config.min;
        if span > 0.0 {
            ((self.value() - self.config.min) / span).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Draws the track with its left end at `(x, y)`, the knob, and a caption.
    pub fn draw(&self, surface: &mut dyn RenderSurface, x: f64, y: f64, width: f64, height: f64) {
        for i in 0..(width as i32) {
            surface.plot(x as i32 + i, (y + height / 2.0) as i32, Rgb::GRAY);
        }

        let knob_x = x + self.fraction() * width - KNOB_WIDTH / 2.0;
        surface.blit(
            SpriteHandle::SLIDER_KNOB,
            PixelRect::new(knob_x, y, KNOB_WIDTH, height),
        );

        let caption = format!("{}: {:.2}", self.label, self.value());
        surface.label(&caption, x + width + 15.0, y, Rgb::WHITE);
    }
}

/// Something to click, bound to a key since there's no mouse picking.
pub struct Button<T> {
    label: String,
    key: Key,
    on_click: Box<dyn FnMut(&mut T)>,
}

impl<T> Button<T> {
    pub fn new(label: &str, key: Key, on_click: impl FnMut(&mut T) + 'static) -> Self {
        Button {
            label: label.to_owned(),
            key,
            on_click: Box::new(on_click),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn key(&self) -> Key {
        self.key
    }

    pub fn click(&mut self, target: &mut T) {
        (self.on_click)(target)
    }
}
