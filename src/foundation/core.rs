use crate::foundation::error::{OutlineError, OutlineResult};

pub use glam::{Mat4, Vec2, Vec3, Vec4};

/// Pixel dimensions of a render target.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameSize {
    /// The empty size.
    pub const ZERO: Self = Self {
        width: 0,
        height: 0,
    };

    /// Build a size from pixel dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `true` when either dimension is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width over height, or `None` for a degenerate size.
    pub fn aspect(self) -> Option<f32> {
        if self.is_empty() {
            return None;
        }
        Some(self.width as f32 / self.height as f32)
    }

    pub(crate) fn width_i32(self) -> i32 {
        i32::try_from(self.width).unwrap_or(i32::MAX)
    }

    pub(crate) fn height_i32(self) -> i32 {
        i32::try_from(self.height).unwrap_or(i32::MAX)
    }

    /// Rect covering the whole target.
    pub fn full_rect(self) -> IRect {
        IRect::new(0, 0, self.width_i32(), self.height_i32())
    }
}

/// Integer screen-space rectangle in pixels: origin plus extent.
///
/// A rect with zero (or negative) width or height is empty and signals "nothing to draw"
/// to the passes that consume it.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct IRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Horizontal extent.
    pub width: i32,
    /// Vertical extent.
    pub height: i32,
}

impl IRect {
    /// The empty rect at the origin.
    pub const ZERO: Self = Self {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    /// Build a rect from origin and extent.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rect from inclusive-min / exclusive-max corners.
    pub fn from_min_max(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Exclusive right edge.
    pub fn max_x(self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    pub fn max_y(self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// `true` for zero or negative width or height.
    pub fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Pixel count; zero when empty.
    pub fn area(self) -> u64 {
        if self.is_empty() {
            return 0;
        }
        u64::from(self.width.unsigned_abs()) * u64::from(self.height.unsigned_abs())
    }

    /// Grow the rect by `amount` pixels on every side, clamped to `[0, frame]`.
    pub fn expanded(self, amount: i32, frame: FrameSize) -> Self {
        let min_x = self.x.saturating_sub(amount).max(0);
        let min_y = self.y.saturating_sub(amount).max(0);
        let max_x = self.max_x().saturating_add(amount).min(frame.width_i32());
        let max_y = self.max_y().saturating_add(amount).min(frame.height_i32());
        Self::from_min_max(min_x, min_y, max_x, max_y)
    }
}

/// Linear RGB color with components in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgb {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
}

impl Rgb {
    /// Build a color from components.
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Components as `[r, g, b]`.
    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Check every component is finite and in `[0, 1]`; `what` names the field in the error.
    pub fn validate(self, what: &str) -> OutlineResult<()> {
        for c in self.to_array() {
            if !c.is_finite() || !(0.0..=1.0).contains(&c) {
                return Err(OutlineError::validation(format!(
                    "{what} components must be in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
