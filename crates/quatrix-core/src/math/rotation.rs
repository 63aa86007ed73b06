//! Frame rotation helpers
//!
//! Free-function API for moving vectors between the body frame and the
//! reference frame described by a quaternion. Both directions delegate to
//! the sandwich products on [`Quaternion`], which agree with the cached
//! rotation matrix for unit quaternions:
//!
//! ```text
//! body_to_reference:  v' = q ⊗ (0, v) ⊗ q*  = R(q) v
//! reference_to_body:  v' = q* ⊗ (0, v) ⊗ q  = R(q)^T v
//! ```

use nalgebra::{Matrix3, Vector3};

use crate::math::quaternion::{Quaternion, QuaternionError};

/// Express a body-frame vector in the reference frame
///
/// # Errors
/// [`QuaternionError::VectorDimension`] unless `v` has exactly 3 elements.
pub fn body_to_reference(q: &Quaternion, v: &[f64]) -> Result<Vector3<f64>, QuaternionError> {
    q.rotate_vector(v)
}

/// Express a reference-frame vector in the body frame
///
/// # Errors
/// [`QuaternionError::VectorDimension`] unless `v` has exactly 3 elements.
pub fn reference_to_body(q: &Quaternion, v: &[f64]) -> Result<Vector3<f64>, QuaternionError> {
    q.inverse_rotate_vector(v)
}

/// Body-to-reference rotation matrix of a quaternion
pub fn rotation_matrix_between(q: &Quaternion) -> Matrix3<f64> {
    *q.rotation_matrix()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_4;

    /// Unit quaternion for a rotation about the z-axis
    fn yaw_quaternion(angle: f64) -> Quaternion {
        Quaternion::new((angle / 2.0).cos(), 0.0, 0.0, (angle / 2.0).sin())
    }

    #[test]
    fn test_frame_round_trip() {
        let q = yaw_quaternion(2.0 * FRAC_PI_4);
        let v = [1.0, 2.0, 3.0];

        let in_reference = body_to_reference(&q, &v).unwrap();
        let back = reference_to_body(&q, in_reference.as_slice()).unwrap();

        assert_relative_eq!(back, Vector3::new(1.0, 2.0, 3.0), epsilon = 1e-10);
    }

    #[test]
    fn test_frame_maps_are_transposes() {
        let q = yaw_quaternion(0.7);
        let v = [0.3, -1.2, 0.8];

        let forward = body_to_reference(&q, &v).unwrap();
        let matrix_forward = rotation_matrix_between(&q) * Vector3::new(0.3, -1.2, 0.8);
        assert_relative_eq!(forward, matrix_forward, epsilon = 1e-10);

        let backward = reference_to_body(&q, &v).unwrap();
        let matrix_backward =
            rotation_matrix_between(&q).transpose() * Vector3::new(0.3, -1.2, 0.8);
        assert_relative_eq!(backward, matrix_backward, epsilon = 1e-10);
    }

    #[test]
    fn test_rotation_matrix_orthogonal() {
        let q = yaw_quaternion(1.0);
        let r = rotation_matrix_between(&q);

        assert_relative_eq!(r * r.transpose(), Matrix3::identity(), epsilon = 1e-10);
        assert_relative_eq!(r.determinant(), 1.0, epsilon = 1e-10);
    }
}
