//! Linear algebra for the rendering pipeline.
//!
//! # Convention
//! - Vectors are **column vectors** on the right: `M * v`
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//! - Right-handed world space, camera looks down -Z
//!
//! Everything here is a `Copy` value type. Degenerate inputs (normalizing a
//! zero vector, inverting a singular matrix) produce well-typed results instead
//! of errors, see the individual methods.

pub mod mat4;
pub mod matrix;
pub mod vec2;
pub mod vec3;
pub mod vec4;

pub use mat4::Mat4;
pub use matrix::{Mat2, Mat3, Matrix};
pub use vec2::{Vec2, Vec2i};
pub use vec3::{Vec3, Vec3i};
pub use vec4::Vec4;

/// Implements the elementwise operator set shared by every vector type:
/// vector +,-,*,/ vector, vector *,/ scalar, negation and the `*Assign` forms.
macro_rules! impl_vector_ops {
    ($name:ident, $scalar:ty, $($field:ident),+) => {
        impl std::ops::Add for $name {
            type Output = $name;

            #[inline]
            fn add(self, rhs: $name) -> $name {
                $name { $($field: self.$field + rhs.$field),+ }
            }
        }

        impl std::ops::Sub for $name {
            type Output = $name;

            #[inline]
            fn sub(self, rhs: $name) -> $name {
                $name { $($field: self.$field - rhs.$field),+ }
            }
        }

        /// Component-wise (Hadamard) product.
        impl std::ops::Mul for $name {
            type Output = $name;

            #[inline]
            fn mul(self, rhs: $name) -> $name {
                $name { $($field: self.$field * rhs.$field),+ }
            }
        }

        /// Component-wise division.
        impl std::ops::Div for $name {
            type Output = $name;

            #[inline]
            fn div(self, rhs: $name) -> $name {
                $name { $($field: self.$field / rhs.$field),+ }
            }
        }

        impl std::ops::Mul<$scalar> for $name {
            type Output = $name;

            #[inline]
            fn mul(self, rhs: $scalar) -> $name {
                $name { $($field: self.$field * rhs),+ }
            }
        }

        impl std::ops::Div<$scalar> for $name {
            type Output = $name;

            #[inline]
            fn div(self, rhs: $scalar) -> $name {
                $name { $($field: self.$field / rhs),+ }
            }
        }

        impl std::ops::Neg for $name {
            type Output = $name;

            #[inline]
            fn neg(self) -> $name {
                $name { $($field: -self.$field),+ }
            }
        }

        impl std::ops::AddAssign for $name {
            #[inline]
            fn add_assign(&mut self, rhs: $name) {
                $(self.$field += rhs.$field;)+
            }
        }

        impl std::ops::SubAssign for $name {
            #[inline]
            fn sub_assign(&mut self, rhs: $name) {
                $(self.$field -= rhs.$field;)+
            }
        }

        impl std::ops::MulAssign<$scalar> for $name {
            #[inline]
            fn mul_assign(&mut self, rhs: $scalar) {
                $(self.$field *= rhs;)+
            }
        }

        impl std::ops::DivAssign<$scalar> for $name {
            #[inline]
            fn div_assign(&mut self, rhs: $scalar) {
                $(self.$field /= rhs;)+
            }
        }
    };
}

/// Implements the `approx` comparison traits for a float vector type.
macro_rules! impl_vector_approx {
    ($name:ident, $($field:ident),+) => {
        impl approx::AbsDiffEq for $name {
            type Epsilon = f32;

            fn default_epsilon() -> f32 {
                f32::EPSILON
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
                $(approx::AbsDiffEq::abs_diff_eq(&self.$field, &other.$field, epsilon))&&+
            }
        }

        impl approx::RelativeEq for $name {
            fn default_max_relative() -> f32 {
                f32::EPSILON
            }

            fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
                $(approx::RelativeEq::relative_eq(
                    &self.$field,
                    &other.$field,
                    epsilon,
                    max_relative,
                ))&&+
            }
        }
    };
}

pub(crate) use impl_vector_approx;
pub(crate) use impl_vector_ops;

