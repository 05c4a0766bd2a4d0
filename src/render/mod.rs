//! The boundary between the orbit scene and whatever draws it.
//!
//! The scene only ever hands out pixel coordinates; surfaces own their pixel
//! buffers, windows and sprite images.

mod bitmap;

pub use bitmap::BitmapSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLUE: Rgb = Rgb(0, 36, 156);
    pub const LIGHT_BLUE: Rgb = Rgb(0, 59, 255);
    pub const GRAY: Rgb = Rgb(128, 128, 128);

    /// Components scaled to [0, 1]
    pub fn to_unit(self) -> [f32; 3] {
        [self.0, self.1, self.2].map(|c| c as f32 / 255.0)
    }
}

/// Opaque reference to an image the surface knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteHandle(pub u32);

impl SpriteHandle {
    pub const SATELLITE: SpriteHandle = SpriteHandle(0);
    pub const SLIDER_KNOB: SpriteHandle = SpriteHandle(1);
}

/// Axis-aligned rectangle in pixels, y pointing down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        PixelRect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

pub trait RenderSurface {
    /// Repaints the whole surface.
    fn clear(&mut self, color: Rgb);

    fn plot(&mut self, x: i32, y: i32, color: Rgb);

    fn blit(&mut self, sprite: SpriteHandle, rect: PixelRect);

    /// Text with its top-left corner at `(x, y)`.
    fn label(&mut self, _text: &str, _x: f64, _y: f64, _color: Rgb) {}
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawCall {
        Clear(Rgb),
        Plot(i32, i32, Rgb),
        Blit(SpriteHandle, PixelRect),
        Label(String),
    }

    /// Remembers everything it was asked to draw.
    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub calls: Vec<DrawCall>,
    }

    impl RecordingSurface {
        pub fn plots(&self) -> impl Iterator<Item = (i32, i32, Rgb)> + '_ {
            self.calls.iter().filter_map(|c| match c {
                DrawCall::Plot(x, y, color) => Some((*x, *y, *color)),
                _ => None,
            })
        }

        pub fn blits(&self) -> impl Iterator<Item = (SpriteHandle, PixelRect)> + '_ {
            self.calls.iter().filter_map(|c| match c {
                DrawCall::Blit(sprite, rect) => Some((*sprite, *rect)),
                _ => None,
            })
        }

        pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
            self.calls.iter().filter_map(|c| match c {
                DrawCall::Label(text) => Some(text.as_str()),
                _ => None,
            })
        }
    }

    impl RenderSurface for RecordingSurface {
        fn clear(&mut self, color: Rgb) {
            self.calls.push(DrawCall::Clear(color));
        }

        fn plot(&mut self, x: i32, y: i32, color: Rgb) {
            self.calls.push(DrawCall::Plot(x, y, color));
        }

        fn blit(&mut self, sprite: SpriteHandle, rect: PixelRect) {
            self.calls.push(DrawCall::Blit(sprite, rect));
        }

        fn label(&mut self, text: &str, _x: f64, _y: f64, _color: Rgb) {
            self.calls.push(DrawCall::Label(text.to_owned()));
        }
    }
}
