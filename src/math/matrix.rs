//! Dense `R x C` matrix with the shape fixed in the type.
//!
//! Storage is `data[row][col]`. Shape mismatches (adding a 3x3 to a 4x4,
//! multiplying a 2x3 by a 2x3) do not compile, the const generic parameters
//! carry the dimensions.
//!
//! Determinant, adjoint and inverse use recursive cofactor expansion. That is
//! O(n!) and only meant for the small (<= 4x4) matrices used by the pipeline.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix<const R: usize, const C: usize> {
    data: [[f32; C]; R],
}

pub type Mat2 = Matrix<2, 2>;
pub type Mat3 = Matrix<3, 3>;

impl<const R: usize, const C: usize> Matrix<R, C> {
    pub const fn new(data: [[f32; C]; R]) -> Self {
        Self { data }
    }

    /// All elements zero.
    pub const fn zero() -> Self {
        Self {
            data: [[0.0; C]; R],
        }
    }

    pub const fn rows(&self) -> usize {
        R
    }

    pub const fn columns(&self) -> usize {
        C
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }

    /// Set element at [row][col].
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[row][col] = value;
    }

    pub fn as_rows(&self) -> &[[f32; C]; R] {
        &self.data
    }

    pub fn transpose(&self) -> Matrix<C, R> {
        let mut result = Matrix::<C, R>::zero();
        for row in 0..R {
            for col in 0..C {
                result.data[col][row] = self.data[row][col];
            }
        }
        result
    }
}

impl<const N: usize> Matrix<N, N> {
    pub fn identity() -> Self {
        Self::scaled_identity(1.0)
    }

    fn scaled_identity(scale: f32) -> Self {
        let mut result = Self::zero();
        for i in 0..N {
            result.data[i][i] = scale;
        }
        result
    }

    pub fn determinant(&self) -> f32 {
        determinant(&self.flatten(), N)
    }

    /// Transpose of the cofactor matrix.
    pub fn adjoint(&self) -> Self {
        let mut adjoint = Self::zero();
        if N == 1 {
            adjoint.data[0][0] = 1.0;
            return adjoint;
        }

        let flat = self.flatten();
        for row in 0..N {
            for col in 0..N {
                let sign = if (row + col) % 2 == 0 { 1.0 } else { -1.0 };
                let minor = minor(&flat, N, row, col);
                // Swapping indices here transposes the cofactor matrix.
                adjoint.data[col][row] = sign * determinant(&minor, N - 1);
            }
        }
        adjoint
    }

    /// Returns `adjoint / determinant`.
    ///
    /// A singular matrix (determinant exactly zero) is returned unchanged.
    /// Use [`Matrix::is_invertible`] when the distinction matters.
    pub fn inverse(&self) -> Self {
        let det = self.determinant();
        if det == 0.0 {
            return *self;
        }
        self.adjoint() / det
    }

    pub fn is_invertible(&self) -> bool {
        self.determinant() != 0.0
    }

    fn flatten(&self) -> Vec<f32> {
        self.data.iter().flatten().copied().collect()
    }
}

/// Determinant of the row-major `n x n` matrix in `m`.
fn determinant(m: &[f32], n: usize) -> f32 {
    match n {
        0 => 1.0,
        1 => m[0],
        2 => m[0] * m[3] - m[1] * m[2],
        _ => {
            let mut det = 0.0;
            let mut sign = 1.0;
            for col in 0..n {
                det += sign * m[col] * determinant(&minor(m, n, 0, col), n - 1);
                sign = -sign;
            }
            det
        }
    }
}

/// Copies `m` without row `skip_row` and column `skip_col`.
fn minor(m: &[f32], n: usize, skip_row: usize, skip_col: usize) -> Vec<f32> {
    let mut result = Vec::with_capacity((n - 1) * (n - 1));
    for row in (0..n).filter(|&r| r != skip_row) {
        for col in (0..n).filter(|&c| c != skip_col) {
            result.push(m[row * n + col]);
        }
    }
    result
}

impl<const R: usize, const C: usize> Default for Matrix<R, C> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const R: usize, const C: usize> Index<(usize, usize)> for Matrix<R, C> {
    type Output = f32;

    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        &self.data[row][col]
    }
}

impl<const R: usize, const C: usize> IndexMut<(usize, usize)> for Matrix<R, C> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f32 {
        &mut self.data[row][col]
    }
}

impl<const R: usize, const C: usize> Add for Matrix<R, C> {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl<const R: usize, const C: usize> AddAssign for Matrix<R, C> {
    fn add_assign(&mut self, rhs: Self) {
        for (row, rhs_row) in self.data.iter_mut().zip(rhs.data.iter()) {
            for (value, rhs_value) in row.iter_mut().zip(rhs_row.iter()) {
                *value += rhs_value;
            }
        }
    }
}

impl<const R: usize, const C: usize> Sub for Matrix<R, C> {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self {
        self -= rhs;
        self
    }
}

impl<const R: usize, const C: usize> SubAssign for Matrix<R, C> {
    fn sub_assign(&mut self, rhs: Self) {
        for (row, rhs_row) in self.data.iter_mut().zip(rhs.data.iter()) {
            for (value, rhs_value) in row.iter_mut().zip(rhs_row.iter()) {
                *value -= rhs_value;
            }
        }
    }
}

impl<const R: usize, const C: usize> Neg for Matrix<R, C> {
    type Output = Self;

    fn neg(self) -> Self {
        self * -1.0
    }
}

/// Matrix product. The inner dimension `C` must agree, so `(R x C) * (C x K)`
/// is the only shape that type-checks.
impl<const R: usize, const C: usize, const K: usize> Mul<Matrix<C, K>> for Matrix<R, C> {
    type Output = Matrix<R, K>;

    fn mul(self, rhs: Matrix<C, K>) -> Matrix<R, K> {
        let mut result = Matrix::<R, K>::zero();
        for row in 0..R {
            for col in 0..K {
                let mut sum = 0.0;
                for i in 0..C {
                    sum += self.data[row][i] * rhs.data[i][col];
                }
                result.data[row][col] = sum;
            }
        }
        result
    }
}

impl<const R: usize, const C: usize> Mul<f32> for Matrix<R, C> {
    type Output = Self;

    fn mul(mut self, rhs: f32) -> Self {
        self *= rhs;
        self
    }
}

impl<const R: usize, const C: usize> MulAssign<f32> for Matrix<R, C> {
    fn mul_assign(&mut self, rhs: f32) {
        for value in self.data.iter_mut().flatten() {
            *value *= rhs;
        }
    }
}

impl<const R: usize, const C: usize> Div<f32> for Matrix<R, C> {
    type Output = Self;

    fn div(mut self, rhs: f32) -> Self {
        for value in self.data.iter_mut().flatten() {
            *value /= rhs;
        }
        self
    }
}

impl<const R: usize, const C: usize> approx::AbsDiffEq for Matrix<R, C> {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.data
            .iter()
            .flatten()
            .zip(other.data.iter().flatten())
            .all(|(a, b)| approx::AbsDiffEq::abs_diff_eq(a, b, epsilon))
    }
}

impl<const R: usize, const C: usize> approx::RelativeEq for Matrix<R, C> {
    fn default_max_relative() -> f32 {
        f32::EPSILON
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.data
            .iter()
            .flatten()
            .zip(other.data.iter().flatten())
            .all(|(a, b)| approx::RelativeEq::relative_eq(a, b, epsilon, max_relative))
    }
}

impl<const R: usize, const C: usize> fmt::Display for Matrix<R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.data {
            for (col, value) in row.iter().enumerate() {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{value:>10.6}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
