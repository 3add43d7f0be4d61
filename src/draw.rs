//! Draw primitives handed to renderers.
//!
//! A [`Frame`] is everything a renderer needs for one display refresh: a
//! translucent black fill over the previous contents, then one filled
//! circle per particle in pool order.

use crate::color::Hsba;
use crate::pool::Viewport;

/// Full-viewport black fill issued before the particles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeFill {
    pub viewport: Viewport,
    /// Opacity, 0-100.
    pub alpha: f64,
}

/// One filled circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawPrimitive {
    pub x: f64,
    pub y: f64,
    pub diameter: f64,
    pub color: Hsba,
}

impl DrawPrimitive {
    #[inline]
    pub fn radius(&self) -> f64 {
        self.diameter * 0.5
    }
}

/// Output of one simulation step.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Index of the simulated frame, starting at 0.
    pub index: u64,
    pub fade: FadeFill,
    pub primitives: Vec<DrawPrimitive>,
}

impl Frame {
    #[inline]
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}
