use core::ops::Mul;

use super::{Rect, Vec2};

/// 2D affine transform in logical pixels.
///
/// Maps `(x, y)` to `(a·x + c·y + tx, b·x + d·y + ty)`. The field order
/// matches `tiny_skia::Transform::from_row(sx, ky, kx, sy, tx, ty)`.
///
/// Multiplication follows matrix order: `m * n` applies `n` first, then `m`.
/// Canvas operations pre-concatenate, so the most recently pushed operation
/// is the first one applied to drawn geometry.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Affine2 {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Affine2 {
    pub const IDENTITY: Self = Self { a: 1.0, b: 0.0, c: 0.0, d: 1.0, tx: 0.0, ty: 0.0 };

    #[inline]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    #[inline]
    pub const fn translation(dx: f32, dy: f32) -> Self {
        Self { tx: dx, ty: dy, ..Self::IDENTITY }
    }

    #[inline]
    pub const fn scaling(sx: f32, sy: f32) -> Self {
        Self { a: sx, d: sy, ..Self::IDENTITY }
    }

    /// Rotation by `degrees` around the origin. Clockwise on a y-down canvas.
    #[inline]
    pub fn rotation(degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self { a: cos, b: sin, c: -sin, d: cos, tx: 0.0, ty: 0.0 }
    }

    /// Rotation by `degrees` around `pivot`.
    pub fn rotation_about(degrees: f32, pivot: Vec2) -> Self {
        Self::translation(pivot.x, pivot.y)
            * Self::rotation(degrees)
            * Self::translation(-pivot.x, -pivot.y)
    }

    /// Scale by `(sx, sy)` keeping `pivot` fixed.
    pub fn scaling_about(sx: f32, sy: f32, pivot: Vec2) -> Self {
        Self::translation(pivot.x, pivot.y)
            * Self::scaling(sx, sy)
            * Self::translation(-pivot.x, -pivot.y)
    }

    /// Maps the box `(0, 0)..src` onto `dst`.
    ///
    /// Used to stretch an image of pixel size `src` into its bounds.
    pub fn fit(src: Vec2, dst: Rect) -> Self {
        let sx = if src.x > 0.0 { dst.size.x / src.x } else { 0.0 };
        let sy = if src.y > 0.0 { dst.size.y / src.y } else { 0.0 };
        Self::translation(dst.origin.x, dst.origin.y) * Self::scaling(sx, sy)
    }

    #[inline]
    pub fn map_point(self, p: Vec2) -> Vec2 {
        Vec2::new(
            self.a * p.x + self.c * p.y + self.tx,
            self.b * p.x + self.d * p.y + self.ty,
        )
    }

    #[inline]
    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        [self.a, self.b, self.c, self.d, self.tx, self.ty].iter().all(|v| v.is_finite())
    }
}

impl Default for Affine2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Affine2 {
    type Output = Affine2;

    #[inline]
    fn mul(self, rhs: Affine2) -> Affine2 {
        Affine2 {
            a: self.a * rhs.a + self.c * rhs.b,
            b: self.b * rhs.a + self.d * rhs.b,
            c: self.a * rhs.c + self.c * rhs.d,
            d: self.b * rhs.c + self.d * rhs.d,
            tx: self.a * rhs.tx + self.c * rhs.ty + self.tx,
            ty: self.b * rhs.tx + self.d * rhs.ty + self.ty,
        }
    }
}
