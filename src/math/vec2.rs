//! 2D vectors: `Vec2` for floating point, `Vec2i` for screen-space pixels.

use super::{impl_vector_approx, impl_vector_ops};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    pub const ONE: Self = Self { x: 1.0, y: 1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Scales to unit length. A zero vector yields NaN components.
    pub fn normalize(&self) -> Self {
        *self * (1.0 / self.magnitude())
    }

    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }
}

impl_vector_ops!(Vec2, f32, x, y);
impl_vector_approx!(Vec2, x, y);

/// Integer pixel coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Vec2i {
    pub x: i32,
    pub y: i32,
}

impl Vec2i {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn dot(&self, other: Self) -> i32 {
        self.x * other.x + self.y * other.y
    }
}

impl_vector_ops!(Vec2i, i32, x, y);

impl From<Vec2i> for Vec2 {
    fn from(v: Vec2i) -> Self {
        Vec2::new(v.x as f32, v.y as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn normalize_has_unit_length() {
        let v = Vec2::new(3.0, -4.0);
        assert_relative_eq!(v.magnitude(), 5.0);
        assert_relative_eq!(v.normalize().magnitude(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn integer_vectors_use_elementwise_arithmetic() {
        let a = Vec2i::new(4, 6);
        let b = Vec2i::new(1, 2);
        assert_eq!(a - b, Vec2i::new(3, 4));
        assert_eq!(a * b, Vec2i::new(4, 12));
        assert_eq!(a / 2, Vec2i::new(2, 3));
        assert_eq!(a.dot(b), 16);
    }
}
