//! CPU compositing of frames into an image.
//!
//! Used for headless snapshots. The canvas keeps its contents between frames
//! exactly like the on-screen canvas does, so the translucent fade leaves
//! trails behind moving particles.

use crate::draw::{DrawPrimitive, Frame};
use crate::error::RenderError;
use image::{ImageFormat, Rgba, RgbaImage};
use std::path::Path;

/// Persistent RGBA canvas, initially opaque black.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255])),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Composite one frame: fade first, then every primitive in order.
    pub fn draw(&mut self, frame: &Frame) {
        self.fade(frame.fade.alpha);
        for primitive in &frame.primitives {
            self.fill_circle(primitive);
        }
    }

    /// Blend black over the whole canvas at `alpha` percent.
    ///
    /// Rounds toward zero so faint trails decay all the way to black.
    pub fn fade(&mut self, alpha: f64) {
        let keep = 1.0 - (alpha / 100.0).clamp(0.0, 1.0) as f32;
        for pixel in self.image.pixels_mut() {
            for channel in &mut pixel.0[..3] {
                *channel = (*channel as f32 * keep) as u8;
            }
        }
    }

    /// Alpha-blend a filled disc.
    pub fn fill_circle(&mut self, primitive: &DrawPrimitive) {
        let radius = primitive.radius();
        if radius.is_nan() || radius <= 0.0 {
            return;
        }
        let [r, g, b, a] = primitive.color.to_rgba();
        if a <= 0.0 {
            return;
        }

        let (w, h) = (self.width() as f64, self.height() as f64);
        let x0 = (primitive.x - radius).floor().max(0.0);
        let x1 = (primitive.x + radius).ceil().min(w);
        let y0 = (primitive.y - radius).floor().max(0.0);
        let y1 = (primitive.y + radius).ceil().min(h);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let r2 = radius * radius;
        for py in y0 as u32..y1 as u32 {
            let dy = py as f64 + 0.5 - primitive.y;
            for px in x0 as u32..x1 as u32 {
                let dx = px as f64 + 0.5 - primitive.x;
                if dx * dx + dy * dy > r2 {
                    continue;
                }
                let dst = self.image.get_pixel_mut(px, py);
                for (channel, src) in dst.0[..3].iter_mut().zip([r, g, b]) {
                    let blended = src * 255.0 * a + *channel as f32 * (1.0 - a);
                    *channel = blended.round().clamp(0.0, 255.0) as u8;
                }
            }
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Write the canvas as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        if self.width() == 0 || self.height() == 0 {
            return Err(RenderError::EmptyCanvas);
        }
        self.image.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}
