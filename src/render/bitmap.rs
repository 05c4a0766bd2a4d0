use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::warn;

use super::{PixelRect, RenderSurface, Rgb, SpriteHandle};

/// Draws into an image file. Nothing is written until [BitmapSurface::present].
pub struct BitmapSurface<'a> {
    root: DrawingArea<BitMapBackend<'a>, Shift>,
}

impl<'a> BitmapSurface<'a> {
    pub fn new(path: &'a Path, width: u32, height: u32) -> Self {
        BitmapSurface {
            root: BitMapBackend::new(path, (width, height)).into_drawing_area(),
        }
    }

    pub fn present(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.root.present()?;
        Ok(())
    }
}

fn color(rgb: Rgb) -> RGBColor {
    RGBColor(rgb.0, rgb.1, rgb.2)
}

impl RenderSurface for BitmapSurface<'_> {
    fn clear(&mut self, rgb: Rgb) {
        if let Err(e) = self.root.fill(&color(rgb)) {
            warn!("failed to clear bitmap: {}", e);
        }
    }

    fn plot(&mut self, x: i32, y: i32, rgb: Rgb) {
        // Out-of-bounds pixels are silently ignored by the backend
        if let Err(e) = self.root.draw_pixel((x, y), &color(rgb)) {
            warn!("failed to plot ({}, {}): {}", x, y, e);
        }
    }

    fn blit(&mut self, sprite: SpriteHandle, rect: PixelRect) {
        // There are no images here, so every sprite is a flat block
        let rgb = match sprite {
            SpriteHandle::SATELLITE => Rgb::LIGHT_BLUE,
            _ => Rgb::GRAY,
        };
        let corners = [
            (rect.x as i32, rect.y as i32),
            (rect.right() as i32, rect.bottom() as i32),
        ];
        if let Err(e) = self.root.draw(&Rectangle::new(corners, color(rgb).filled())) {
            warn!("failed to blit {:?}: {}", sprite, e);
        }
    }

    fn label(&mut self, text: &str, x: f64, y: f64, rgb: Rgb) {
        let style = ("sans-serif", 16).into_font().color(&color(rgb));
        let text = Text::new(text.to_owned(), (x as i32, y as i32), style);
        if let Err(e) = self.root.draw(&text) {
            warn!("failed to draw label: {}", e);
        }
    }
}
