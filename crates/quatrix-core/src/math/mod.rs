//! Mathematical core of quatrix
//!
//! Implements the quaternion value type and the frame rotation helpers
//! built on it.

pub mod quaternion;
pub mod rotation;

pub use quaternion::*;
pub use rotation::*;
