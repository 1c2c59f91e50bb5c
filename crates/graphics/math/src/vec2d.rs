use std::ops;

/// An ordered pair of 32-bit floats.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    #[inline]
    #[must_use]
    pub fn length(&self) -> f32 {
        self.x.hypot(self.y)
    }

    #[inline]
    #[must_use]
    pub fn length_squared(&self) -> f32 {
        self.dot(*self)
    }

    /// The unit vector pointing in the same direction as `self`.
    ///
    /// Returns the zero vector if `self` is the zero vector.
    #[inline]
    #[must_use]
    pub fn normalize(&self) -> Self {
        let length = self.length();
        if length <= f32::EPSILON {
            Self::zero()
        } else {
            *self * length.recip()
        }
    }

    #[inline]
    #[must_use]
    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// The `z` component of the 3D cross product of `self` and `other`
    /// extended into the `xy` plane.
    #[inline]
    #[must_use]
    pub fn cross(&self, other: Self) -> f32 {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    #[must_use]
    pub fn lerp(&self, other: Self, t: f32) -> Self {
        Self {
            x: crate::lerp(self.x, other.x, t),
            y: crate::lerp(self.y, other.y, t),
        }
    }

    /// The normal perpendicular to this vector, rotated 90 degrees
    /// counterclockwise (in a y-down canvas coordinate system this points
    /// to the left of the direction `self` describes).
    #[inline]
    #[must_use]
    pub fn perpendicular(&self) -> Self {
        Self::new(-self.y, self.x)
    }

    #[inline]
    #[must_use]
    pub fn min(&self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y))
    }

    #[inline]
    #[must_use]
    pub fn max(&self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y))
    }
}

impl ops::Add for Vec2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl ops::Sub for Vec2 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl ops::Neg for Vec2 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl ops::Mul<f32> for Vec2 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl ops::Div<f32> for Vec2 {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f32) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

/// A 3x3 affine transformation matrix acting on [Vec2].
///
/// The bottom row of a general 3x3 matrix is always `[0, 0, 1]` for an
/// affine map, so it is stored but never consulted by [Mat3::apply_to].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat3([[f32; 3]; 3]);

impl Mat3 {
    #[inline]
    #[must_use]
    pub const fn identity() -> Self {
        Self([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }

    #[inline]
    #[must_use]
    pub const fn translate(by: Vec2) -> Self {
        Self([[1.0, 0.0, by.x], [0.0, 1.0, by.y], [0.0, 0.0, 1.0]])
    }

    #[inline]
    #[must_use]
    pub const fn scale(x: f32, y: f32) -> Self {
        Self([[x, 0.0, 0.0], [0.0, y, 0.0], [0.0, 0.0, 1.0]])
    }

    /// A rotation matrix for `angle` (radians), counterclockwise around the origin.
    #[inline]
    #[must_use]
    pub fn rotation(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self([[cos, -sin, 0.0], [sin, cos, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Compose `self` and `other` so that applying the result is equivalent
    /// to applying `other` first, then `self`.
    #[must_use]
    pub fn chain(&self, other: &Self) -> Self {
        let mut result = [[0.0; 3]; 3];
        for row in 0..3 {
            for col in 0..3 {
                result[row][col] = (0..3).map(|k| self.0[row][k] * other.0[k][col]).sum();
            }
        }
        Self(result)
    }

    #[inline]
    #[must_use]
    pub fn apply_to(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            self.0[0][0] * point.x + self.0[0][1] * point.y + self.0[0][2],
            self.0[1][0] * point.x + self.0[1][1] * point.y + self.0[1][2],
        )
    }
}

impl Default for Mat3 {
    #[inline]
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::{Mat3, Vec2};

    #[test]
    fn length() {
        assert_eq!(Vec2::new(3.0, 4.0).length(), 5.0);
    }

    #[test]
    fn dot_product() {
        assert_eq!(Vec2::new(1.0, 0.0).dot(Vec2::new(0.0, 1.0)), 0.0);
        assert_eq!(Vec2::new(2.0, 3.0).dot(Vec2::new(4.0, 5.0)), 23.0);
    }

    #[test]
    fn normalize() {
        let n = Vec2::new(3.0, 4.0).normalize();
        assert!((n.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn identity_is_noop() {
        let p = Vec2::new(2.0, 3.0);
        assert_eq!(Mat3::identity().apply_to(p), p);
    }

    #[test]
    fn translate() {
        let m = Mat3::translate(Vec2::new(1.0, 2.0));
        assert_eq!(m.apply_to(Vec2::new(4.0, -3.0)), Vec2::new(5.0, -1.0));
    }

    #[test]
    fn scale() {
        let m = Mat3::scale(2.0, -1.0);
        assert_eq!(m.apply_to(Vec2::new(2.0, 2.0)), Vec2::new(4.0, -2.0));
    }

    #[test]
    fn rotation_quarter_turn() {
        let m = Mat3::rotation(std::f32::consts::FRAC_PI_2);
        let p = m.apply_to(Vec2::new(1.0, 0.0));
        assert!((p.x - 0.0).abs() < 1e-6);
        assert!((p.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn chain_order() {
        let translate = Mat3::translate(Vec2::new(10.0, 0.0));
        let scale = Mat3::scale(2.0, 2.0);
        // scale-then-translate: (1,1) -> (2,2) -> (12,2)
        let combined = translate.chain(&scale);
        assert_eq!(combined.apply_to(Vec2::new(1.0, 1.0)), Vec2::new(12.0, 2.0));
    }
}
