use std::rc::Rc;

use kiss3d::text::Font;
use kiss3d::window::Window;
use nalgebra::{Point2, Point3, Vector2};

use crate::render::{PixelRect, RenderSurface, Rgb, SpriteHandle};

// Text positions are in physical pixels, everything else in logical ones.
// Same factor of 2 as the window's hidpi scale on the machines we've tried.
const TEXT_SCALE: f32 = 2.0;
const TEXT_SIZE: f32 = 36.0;

/// Draws into a kiss3d window using its planar (2D) overlay.
///
/// Planar coordinates put the origin at the center of the window with y
/// pointing up, so every pixel coordinate gets flipped on the way in.
pub struct WindowSurface<'a> {
    window: &'a mut Window,
    font: Rc<Font>,
}

impl<'a> WindowSurface<'a> {
    pub fn new(window: &'a mut Window, font: Rc<Font>) -> Self {
        WindowSurface { window, font }
    }

    fn to_planar(&self, x: f64, y: f64) -> Point2<f32> {
        let half_width = self.window.width() as f64 / 2.0;
        let half_height = self.window.height() as f64 / 2.0;
        Point2::new((x - half_width) as f32, (half_height - y) as f32)
    }

    fn line(&mut self, a: (f64, f64), b: (f64, f64), color: &Point3<f32>) {
        let a = self.to_planar(a.0, a.1);
        let b = self.to_planar(b.0, b.1);
        self.window.draw_planar_line(&a, &b, color);
    }
}

impl RenderSurface for WindowSurface<'_> {
    fn clear(&mut self, color: Rgb) {
        let [r, g, b] = color.to_unit();
        self.window.set_background_color(r, g, b);
    }

    fn plot(&mut self, x: i32, y: i32, color: Rgb) {
        let a = self.to_planar(x as f64, y as f64);
        let b = a + Vector2::new(1.0, 0.0);
        self.window
            .draw_planar_line(&a, &b, &Point3::from(color.to_unit()));
    }

    fn blit(&mut self, sprite: SpriteHandle, rect: PixelRect) {
        let (left, top, right, bottom) = (rect.x, rect.y, rect.right(), rect.bottom());
        let color = match sprite {
            SpriteHandle::SATELLITE => Point3::from(Rgb::LIGHT_BLUE.to_unit()),
            _ => Point3::from(Rgb::WHITE.to_unit()),
        };

        self.line((left, top), (right, top), &color);
        self.line((right, top), (right, bottom), &color);
        self.line((right, bottom), (left, bottom), &color);
        self.line((left, bottom), (left, top), &color);

        if sprite == SpriteHandle::SATELLITE {
            self.line((left, top), (right, bottom), &color);
            self.line((left, bottom), (right, top), &color);
        }
    }

    fn label(&mut self, text: &str, x: f64, y: f64, color: Rgb) {
        self.window.draw_text(
            text,
            &Point2::new(x as f32 * TEXT_SCALE, y as f32 * TEXT_SCALE),
            TEXT_SIZE,
            &self.font,
            &Point3::from(color.to_unit()),
        );
    }
}
