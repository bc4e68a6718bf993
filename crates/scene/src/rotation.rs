//! Euler rotation matrices shared by the packer and the shader contract.
//!
//! The composition order is fixed at `R = Rz * Ry * Rx` (column vectors,
//! right-handed elementary rotations). The shader only ever receives the
//! transpose of `R`, which it uses to bring world-space query points into an
//! object's unrotated local frame.

use glam::{Mat3, Vec3};

/// Builds `Rz(z) * Ry(y) * Rx(x)` from a triple of Euler angles in radians.
#[must_use]
pub fn euler_rotation(angles: Vec3) -> Mat3 {
    Mat3::from_rotation_z(angles.z) * Mat3::from_rotation_y(angles.y) * Mat3::from_rotation_x(angles.x)
}

/// Inverse of [`euler_rotation`].
///
/// The elementary rotations are orthonormal, so the inverse is the transpose.
#[must_use]
pub fn inverse_rotation(angles: Vec3) -> Mat3 {
    euler_rotation(angles).transpose()
}
