//! Math utilities and types
//!
//! Provides the small set of 2D math types the UI layer works with.

pub use nalgebra::{Vector2, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 4D vector type (also used for RGBA colors in the 0..1 range)
pub type Vec4 = Vector4<f32>;

/// Fully transparent black, used to clear UI surfaces
pub fn clear_color() -> Vec4 {
    Vec4::zeros()
}

/// Convert an RGBA color in the 0..1 range to 8-bit channels
pub fn color_to_rgba8(color: &Vec4) -> [u8; 4] {
    let to_byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z), to_byte(color.w)]
}

/// Axis-aligned rectangle in pixels (or normalized units for texture coordinates)
///
/// The origin is the top-left corner, `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width (may be zero)
    pub width: f32,
    /// Height (may be zero)
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle at the origin with the given size
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// The full `(0, 0, 1, 1)` texture coordinate range
    pub const fn unit() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    /// Left edge
    pub fn x_min(&self) -> f32 {
        self.x
    }

    /// Right edge
    pub fn x_max(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge
    pub fn y_min(&self) -> f32 {
        self.y
    }

    /// Bottom edge
    pub fn y_max(&self) -> f32 {
        self.y + self.height
    }

    /// Top-left corner
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Width and height
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Width divided by height, or `None` for a zero-height rectangle
    pub fn aspect(&self) -> Option<f32> {
        if self.height == 0.0 {
            None
        } else {
            Some(self.width / self.height)
        }
    }

    /// True if the rectangle covers no area
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check whether a point lies inside (right/bottom edges exclusive)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x_min() && point.x < self.x_max()
            && point.y >= self.y_min() && point.y < self.y_max()
    }

    /// Overlapping area of two rectangles, `None` if they do not overlap
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let x_min = self.x_min().max(other.x_min());
        let y_min = self.y_min().max(other.y_min());
        let x_max = self.x_max().min(other.x_max());
        let y_max = self.y_max().min(other.y_max());

        if x_max <= x_min || y_max <= y_min {
            return None;
        }
        Some(Self::new(x_min, y_min, x_max - x_min, y_max - y_min))
    }
}
