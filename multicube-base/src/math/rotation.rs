//! Helpers for rotations of the world about the origin.

use core::f64::consts::FRAC_1_SQRT_2;

use euclid::Angle;

use crate::math::{FreeCoordinate, FreeRotation, FreeVector};

/// Quaternion component magnitudes which occur in the 24 rotations that map the
/// coordinate axes onto each other.
const RIGHT_ANGLE_COMPONENTS: [FreeCoordinate; 4] = [0.0, 0.5, FRAC_1_SQRT_2, 1.0];

/// Constructs the rotation by `degrees` about `axis`, following the right-hand rule.
///
/// `axis` need not be normalized.
#[inline]
pub fn rotation_about(axis: FreeVector, degrees: FreeCoordinate) -> FreeRotation {
    FreeRotation::around_axis(axis, Angle::degrees(degrees))
}

/// Rounds a rotation which is known to be a composition of quarter turns about the
/// coordinate axes to exactly that rotation, discarding accumulated rounding error.
///
/// If `rotation` is not near such a rotation, the result is still a valid rotation but
/// otherwise unspecified.
#[inline]
#[must_use]
pub fn snap_to_right_angles(rotation: &FreeRotation) -> FreeRotation {
    let snap = |c: FreeCoordinate| {
        let magnitude = RIGHT_ANGLE_COMPONENTS
            .into_iter()
            .min_by(|a, b| (c.abs() - a).abs().total_cmp(&(c.abs() - b).abs()))
            .unwrap_or(0.0);
        magnitude.copysign(c)
    };
    let mut q = FreeRotation::quaternion(
        snap(rotation.i),
        snap(rotation.j),
        snap(rotation.k),
        snap(rotation.r),
    );
    // q and -q are the same rotation; prefer the form with non-negative real part.
    if q.r < 0.0 {
        q = FreeRotation::quaternion(-q.i, -q.j, -q.k, -q.r);
    }
    let q = q.normalize();
    let error = (q.i - rotation.i).abs()
        + (q.j - rotation.j).abs()
        + (q.k - rotation.k).abs()
        + (q.r - rotation.r).abs();
    // Comparing against both signs of the input quaternion.
    let error_negated = (q.i + rotation.i).abs()
        + (q.j + rotation.j).abs()
        + (q.k + rotation.k).abs()
        + (q.r + rotation.r).abs();
    if error.min(error_negated) > 0.01 {
        log::warn!("snapping rotation {rotation:?} which is not near a right angle");
    }
    q
}
