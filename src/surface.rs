//! The drawing surface the particle field paints onto.

use std::fmt;

use serde::Deserialize;

/// A straight-alpha colour, rendered as a CSS `rgba()` string.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

/// Minimal 2D surface: its size, a clear, and a glowing filled circle.
pub trait Surface {
    /// Current pixel dimensions as `(width, height)`.
    fn size(&self) -> (f64, f64);

    fn clear(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Fill a circle and surround it with a soft glow of `blur` pixels in the same colour.
    fn fill_glow_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba, blur: f64);
}
