//! Quaternion value type for attitude representation
//!
//! Scalar-first convention: q = [q0, q1, q2, q3] with scalar part q0 and
//! vector part (q1, q2, q3). Quaternion multiplication is computed as a
//! matrix-vector product with the Q-matrix, an antisymmetric 4x4 matrix
//! built from the components:
//!
//! ```text
//! Q(q) = [q0  -q1  -q2  -q3]
//!        [q1   q0  -q3   q2]
//!        [q2   q3   q0  -q1]
//!        [q3  -q2   q1   q0]
//!
//! p ⊗ r = Q(p) * r
//! ```
//!
//! The conjugate, the Q-matrix, and the 3x3 rotation matrix are computed
//! once at construction and cached; a `Quaternion` is immutable afterward
//! and every operation returns a new value.
//!
//! Frame convention: for a unit quaternion describing the attitude of a
//! body frame relative to a reference frame, the cached rotation matrix
//! R(q) maps body-frame coordinates to reference-frame coordinates, and
//! R(q)^T maps back. The sandwich products agree: q ⊗ (0, v) ⊗ q* = R v
//! and q* ⊗ (0, v) ⊗ q = R^T v.

use std::fmt;
use std::ops::{Index, Mul};

use nalgebra::{Matrix3, Matrix4, Vector3, Vector4};
use thiserror::Error;

/// Norm threshold below which `normalize` and `inverse` are rejected
pub const NORM_EPSILON: f64 = 1e-12;

/// Errors from quaternion construction and arithmetic
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuaternionError {
    /// Component slice passed to the constructor was not length 4
    #[error("quaternion must have exactly 4 components, got {got}")]
    InvalidLength { got: usize },
    /// Scalar multiplication operand was NaN or infinite
    #[error("scalar operand must be a finite real number, got {0}")]
    NonFiniteScalar(f64),
    /// Right-hand operand of a quaternion product was not length 4
    #[error("right-hand operand must have exactly 4 components, got {got}")]
    OperandLength { got: usize },
    /// Vector passed to a rotation/transformation was not length 3
    #[error("vector must have exactly 3 components, got {got}")]
    VectorDimension { got: usize },
    /// Norm too close to zero to normalize or invert
    #[error("norm {0} is too close to zero to normalize or invert")]
    DegenerateNorm(f64),
}

/// Quaternion [q0, q1, q2, q3] with eagerly cached conjugate, Q-matrix,
/// and rotation matrix
///
/// Immutable value type: arithmetic never mutates the receiver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    q: Vector4<f64>,
    conj: Vector4<f64>,
    q_mat: Matrix4<f64>,
    rot: Matrix3<f64>,
}

/// Conjugate components: (q0, -q1, -q2, -q3)
fn conjugate_of(q: &Vector4<f64>) -> Vector4<f64> {
    Vector4::new(q[0], -q[1], -q[2], -q[3])
}

/// Q-matrix of the components, used for quaternion multiplication
fn q_matrix_of(q: &Vector4<f64>) -> Matrix4<f64> {
    let (q0, q1, q2, q3) = (q[0], q[1], q[2], q[3]);
    Matrix4::new(
        q0, -q1, -q2, -q3,
        q1, q0, -q3, q2,
        q2, q3, q0, -q1,
        q3, -q2, q1, q0,
    )
}

/// Body-to-reference rotation matrix R(q) ∈ SO(3) for unit q
///
/// Closed-form expansion of the Hamilton rotation formula.
fn rotation_matrix_of(q: &Vector4<f64>) -> Matrix3<f64> {
    let (q0, q1, q2, q3) = (q[0], q[1], q[2], q[3]);
    Matrix3::new(
        q0 * q0 + q1 * q1 - q2 * q2 - q3 * q3,
        2.0 * (q1 * q2 - q0 * q3),
        2.0 * (q1 * q3 + q0 * q2),
        2.0 * (q1 * q2 + q0 * q3),
        q0 * q0 - q1 * q1 + q2 * q2 - q3 * q3,
        2.0 * (q2 * q3 - q0 * q1),
        2.0 * (q1 * q3 - q0 * q2),
        2.0 * (q2 * q3 + q0 * q1),
        q0 * q0 - q1 * q1 - q2 * q2 + q3 * q3,
    )
}

/// Length-checked conversion of a raw slice into a 3-vector
fn vector3_from(v: &[f64]) -> Result<Vector3<f64>, QuaternionError> {
    if v.len() != 3 {
        return Err(QuaternionError::VectorDimension { got: v.len() });
    }
    Ok(Vector3::new(v[0], v[1], v[2]))
}

impl Quaternion {
    /// Construct from components, eagerly computing the cached artifacts
    pub fn new(q0: f64, q1: f64, q2: f64, q3: f64) -> Self {
        Self::from_vector(Vector4::new(q0, q1, q2, q3))
    }

    /// Identity quaternion (1, 0, 0, 0), the no-rotation element
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }

    /// Construct from a component vector
    pub fn from_vector(q: Vector4<f64>) -> Self {
        Self {
            q,
            conj: conjugate_of(&q),
            q_mat: q_matrix_of(&q),
            rot: rotation_matrix_of(&q),
        }
    }

    /// Construct from a component slice
    ///
    /// # Errors
    /// [`QuaternionError::InvalidLength`] unless the slice has exactly
    /// 4 elements.
    pub fn from_slice(components: &[f64]) -> Result<Self, QuaternionError> {
        if components.len() != 4 {
            return Err(QuaternionError::InvalidLength {
                got: components.len(),
            });
        }
        Ok(Self::new(
            components[0],
            components[1],
            components[2],
            components[3],
        ))
    }

    /// Component count, always 4
    pub fn len(&self) -> usize {
        4
    }

    /// Components as a 4-vector
    pub fn as_vector(&self) -> &Vector4<f64> {
        &self.q
    }

    /// Conjugate: (q0, -q1, -q2, -q3)
    pub fn conjugate(&self) -> Self {
        Self::from_vector(self.conj)
    }

    /// The cached Q-matrix
    pub fn q_matrix(&self) -> &Matrix4<f64> {
        &self.q_mat
    }

    /// The cached body-to-reference rotation matrix
    pub fn rotation_matrix(&self) -> &Matrix3<f64> {
        &self.rot
    }

    /// Reference-to-body rotation matrix, the transpose of
    /// [`rotation_matrix`](Self::rotation_matrix)
    pub fn inverse_rotation_matrix(&self) -> Matrix3<f64> {
        self.rot.transpose()
    }

    /// Euclidean norm of the component vector
    pub fn norm(&self) -> f64 {
        self.q.norm()
    }

    /// Squared norm, avoiding the square root
    pub fn norm_squared(&self) -> f64 {
        self.q.norm_squared()
    }

    /// Multiply all four components by a scalar
    pub fn scale(&self, k: f64) -> Self {
        Self::from_vector(self.q * k)
    }

    /// Scalar multiplication that rejects non-finite operands
    ///
    /// The operand type is enforced statically (`Mul` exists only for
    /// `f64`); this checked form additionally rejects NaN and infinities.
    ///
    /// # Errors
    /// [`QuaternionError::NonFiniteScalar`] if `k` is NaN or infinite.
    pub fn try_scale(&self, k: f64) -> Result<Self, QuaternionError> {
        if !k.is_finite() {
            return Err(QuaternionError::NonFiniteScalar(k));
        }
        Ok(self.scale(k))
    }

    /// Hamilton product self ⊗ rhs, computed as Q(self) * rhs
    ///
    /// Non-commutative.
    pub fn hamilton_product(&self, rhs: &Self) -> Self {
        Self::from_vector(self.q_mat * rhs.q)
    }

    /// Hamilton product with a raw component slice
    ///
    /// # Errors
    /// [`QuaternionError::OperandLength`] unless the slice has exactly
    /// 4 elements.
    pub fn product_slice(&self, rhs: &[f64]) -> Result<Self, QuaternionError> {
        if rhs.len() != 4 {
            return Err(QuaternionError::OperandLength { got: rhs.len() });
        }
        let rhs = Vector4::new(rhs[0], rhs[1], rhs[2], rhs[3]);
        Ok(Self::from_vector(self.q_mat * rhs))
    }

    /// Unit quaternion with the same direction
    ///
    /// # Errors
    /// [`QuaternionError::DegenerateNorm`] when the norm is below
    /// [`NORM_EPSILON`].
    pub fn normalize(&self) -> Result<Self, QuaternionError> {
        let n = self.norm();
        if n < NORM_EPSILON {
            return Err(QuaternionError::DegenerateNorm(n));
        }
        Ok(Self::from_vector(self.q / n))
    }

    /// Inverse: conjugate / norm², so that q ⊗ inv(q) = (1, 0, 0, 0)
    ///
    /// # Errors
    /// [`QuaternionError::DegenerateNorm`] when the norm is below
    /// [`NORM_EPSILON`].
    pub fn inverse(&self) -> Result<Self, QuaternionError> {
        let n = self.norm();
        if n < NORM_EPSILON {
            return Err(QuaternionError::DegenerateNorm(n));
        }
        Ok(Self::from_vector(self.conj / (n * n)))
    }

    /// Rotate a body-frame vector into the reference frame: R(q) * v
    ///
    /// # Errors
    /// [`QuaternionError::VectorDimension`] unless `v` has exactly
    /// 3 elements.
    pub fn rotate(&self, v: &[f64]) -> Result<Vector3<f64>, QuaternionError> {
        let v = vector3_from(v)?;
        Ok(self.rot * v)
    }

    /// Transform a reference-frame vector into the body frame: R(q)^T * v
    ///
    /// # Errors
    /// [`QuaternionError::VectorDimension`] unless `v` has exactly
    /// 3 elements.
    pub fn transform(&self, v: &[f64]) -> Result<Vector3<f64>, QuaternionError> {
        let v = vector3_from(v)?;
        Ok(self.rot.transpose() * v)
    }

    /// Rotate a vector by the sandwich product q ⊗ (0, v) ⊗ q*
    ///
    /// Embeds `v` as a pure quaternion and takes the vector part of the
    /// result. Agrees with [`rotate`](Self::rotate) for unit quaternions.
    ///
    /// # Errors
    /// [`QuaternionError::VectorDimension`] unless `v` has exactly
    /// 3 elements.
    pub fn rotate_vector(&self, v: &[f64]) -> Result<Vector3<f64>, QuaternionError> {
        let v = vector3_from(v)?;
        let pure = Self::new(0.0, v.x, v.y, v.z);
        let w = self.hamilton_product(&pure.hamilton_product(&self.conjugate()));
        Ok(Vector3::new(w.q[1], w.q[2], w.q[3]))
    }

    /// Rotate a vector by the mirrored sandwich product q* ⊗ (0, v) ⊗ q
    ///
    /// Agrees with [`transform`](Self::transform) for unit quaternions.
    ///
    /// # Errors
    /// [`QuaternionError::VectorDimension`] unless `v` has exactly
    /// 3 elements.
    pub fn inverse_rotate_vector(&self, v: &[f64]) -> Result<Vector3<f64>, QuaternionError> {
        let v = vector3_from(v)?;
        let pure = Self::new(0.0, v.x, v.y, v.z);
        let w = self.conjugate().hamilton_product(&pure.hamilton_product(self));
        Ok(Vector3::new(w.q[1], w.q[2], w.q[3]))
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<[f64; 4]> for Quaternion {
    fn from(c: [f64; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

impl From<Vector4<f64>> for Quaternion {
    fn from(q: Vector4<f64>) -> Self {
        Self::from_vector(q)
    }
}

impl TryFrom<&[f64]> for Quaternion {
    type Error = QuaternionError;

    fn try_from(components: &[f64]) -> Result<Self, Self::Error> {
        Self::from_slice(components)
    }
}

/// Bounds-checked component access, i in 0..4
impl Index<usize> for Quaternion {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.q[i]
    }
}

/// Hamilton product q ⊗ r
impl Mul for Quaternion {
    type Output = Quaternion;

    fn mul(self, rhs: Quaternion) -> Quaternion {
        self.hamilton_product(&rhs)
    }
}

/// Scalar multiplication q * k
impl Mul<f64> for Quaternion {
    type Output = Quaternion;

    fn mul(self, k: f64) -> Quaternion {
        self.scale(k)
    }
}

/// Scalar multiplication k * q, commutative with q * k
impl Mul<Quaternion> for f64 {
    type Output = Quaternion;

    fn mul(self, q: Quaternion) -> Quaternion {
        q.scale(self)
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Quaternion([{},{},{},{}])",
            self.q[0], self.q[1], self.q[2], self.q[3]
        )
    }
}
