//! Numeric types used for coordinates and related quantities.

use euclid::{Point3D, Rotation3D, Size3D, Vector3D};

/// Unit marker for the world coordinate system shared by the shell, the player, and
/// the backdrop.
///
/// The coordinate system is right-handed with +Y up; the player starts out on the
/// face whose outward normal is +Z.
#[expect(clippy::exhaustive_enums)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum World {}

/// Coordinates in continuous world space.
pub type FreeCoordinate = f64;

/// Positions in world space.
pub type FreePoint = Point3D<FreeCoordinate, World>;

/// Displacements in world space.
pub type FreeVector = Vector3D<FreeCoordinate, World>;

/// Sizes of boxes in world space.
pub type FreeSize = Size3D<FreeCoordinate, World>;

/// A rotation of world space about the origin, stored as a unit quaternion.
pub type FreeRotation = Rotation3D<FreeCoordinate, World, World>;

/// Lattice coordinate of a shell cell, as a count of cells along one axis.
pub type CellCoordinate = u16;
