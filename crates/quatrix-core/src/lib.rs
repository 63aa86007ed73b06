//! # quatrix Core
//!
//! Quaternion algebra for 3D attitude work: construction, normalization,
//! conjugation, inversion, scalar and Hamilton multiplication, rotation
//! matrix derivation, and vector rotation between a body frame and a
//! reference frame.
//!
//! Quaternions are immutable values. The conjugate, the 4x4 Q-matrix used
//! for multiplication, and the 3x3 rotation matrix are computed eagerly at
//! construction and cached for the value's lifetime.
//!
//! ## Modules
//!
//! - [`math::quaternion`]: the [`Quaternion`] value type and its arithmetic
//! - [`math::rotation`]: body/reference frame rotation helpers

pub mod math;

// Common type aliases
use nalgebra::{Matrix3, Matrix4, Vector3, Vector4};

/// 3D vector type
pub type Vec3 = Vector3<f64>;

/// 4D vector type (quaternion components)
pub type Vec4 = Vector4<f64>;

/// 3x3 matrix type (rotation matrices)
pub type Mat3 = Matrix3<f64>;

/// 4x4 matrix type (Q-matrices)
pub type Mat4 = Matrix4<f64>;

pub use math::quaternion::{Quaternion, QuaternionError, NORM_EPSILON};
pub use math::rotation::{body_to_reference, reference_to_body, rotation_matrix_between};
