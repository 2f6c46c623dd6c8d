use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;

use euclid::{Point3D, Vector3D};

use crate::math::{Axis, FreeCoordinate, FreePoint, FreeRotation, FreeSize, FreeVector};

/// Axis-Aligned Box data type.
///
/// Boxes are closed: both [`Aab::contains()`] and [`Aab::intersects()`] count the
/// boundary as part of the box, so two boxes that merely touch do intersect.
#[derive(Copy, Clone, PartialEq)]
pub struct Aab {
    // The upper >= lower checks reject NaNs, so no NaN can be stored here.
    lower_bounds: FreePoint,
    upper_bounds: FreePoint,
}

impl Aab {
    /// Constructs an [`Aab`] from individual coordinates.
    #[inline]
    #[track_caller]
    pub fn new(
        lx: FreeCoordinate,
        hx: FreeCoordinate,
        ly: FreeCoordinate,
        hy: FreeCoordinate,
        lz: FreeCoordinate,
        hz: FreeCoordinate,
    ) -> Self {
        Self::from_lower_upper(Point3D::new(lx, ly, lz), Point3D::new(hx, hy, hz))
    }

    /// Constructs an [`Aab`] from most-negative and most-positive corner points.
    ///
    /// Panics if the points are not in the proper order or if they are NaN.
    #[inline]
    #[track_caller]
    pub fn from_lower_upper(
        lower_bounds: impl Into<FreePoint>,
        upper_bounds: impl Into<FreePoint>,
    ) -> Self {
        match Self::checked_from_lower_upper(lower_bounds.into(), upper_bounds.into()) {
            Ok(aab) => aab,
            Err(error) => panic!("{error}"),
        }
    }

    /// Constructs an [`Aab`] from most-negative and most-positive corner points.
    ///
    /// Returns an error if the points are not in the proper order or if they are NaN.
    #[inline]
    pub fn checked_from_lower_upper(
        lower_bounds: FreePoint,
        upper_bounds: FreePoint,
    ) -> Result<Self, InvalidAabError> {
        if lower_bounds.x <= upper_bounds.x
            && lower_bounds.y <= upper_bounds.y
            && lower_bounds.z <= upper_bounds.z
        {
            Ok(Self {
                lower_bounds,
                upper_bounds,
            })
        } else {
            Err(InvalidAabError {
                lower_bounds,
                upper_bounds,
            })
        }
    }

    /// Constructs a cube-shaped [`Aab`] with the given center and edge length.
    ///
    /// ```
    /// use multicube_base::math::{Aab, FreePoint};
    ///
    /// assert_eq!(
    ///     Aab::centered_cube(FreePoint::new(1.0, 0.0, 0.0), 1.0),
    ///     Aab::new(0.5, 1.5, -0.5, 0.5, -0.5, 0.5),
    /// );
    /// ```
    #[inline]
    #[track_caller]
    pub fn centered_cube(center: FreePoint, edge: FreeCoordinate) -> Self {
        let half = Vector3D::splat(edge / 2.0);
        Self::from_lower_upper(center - half, center + half)
    }

    /// Returns the smallest [`Aab`] containing all of the given points, or [`None`] if
    /// there are no points.
    #[inline]
    pub fn bounding_points(points: impl IntoIterator<Item = FreePoint>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (lower, upper) = points.fold((first, first), |(lower, upper), p| {
            (lower.min(p), upper.max(p))
        });
        Self::checked_from_lower_upper(lower, upper).ok()
    }

    /// The most negative corner of the box.
    #[inline]
    pub const fn lower_bounds_p(&self) -> FreePoint {
        self.lower_bounds
    }

    /// The most positive corner of the box.
    #[inline]
    pub const fn upper_bounds_p(&self) -> FreePoint {
        self.upper_bounds
    }

    /// Size of the box in each axis; equivalent to
    /// `self.upper_bounds() - self.lower_bounds()`.
    #[inline]
    pub fn size(&self) -> FreeSize {
        FreeSize::from(self.upper_bounds - self.lower_bounds)
    }

    /// The center of the enclosed volume.
    ///
    /// ```
    /// use multicube_base::math::{Aab, FreePoint};
    ///
    /// let aab = Aab::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
    /// assert_eq!(aab.center(), FreePoint::new(1.5, 3.5, 5.5));
    /// ```
    #[inline]
    pub fn center(&self) -> FreePoint {
        (self.lower_bounds + self.upper_bounds.to_vector()) * 0.5
    }

    /// Iterates over the eight corner points of the box.
    /// The ordering is deterministic but not currently declared stable.
    #[inline]
    pub fn corner_points(
        self,
    ) -> impl DoubleEndedIterator<Item = FreePoint> + ExactSizeIterator + FusedIterator {
        let l = self.lower_bounds;
        let u = self.upper_bounds;
        (0..8).map(move |i| {
            Point3D::new(
                if i & 1 == 0 { l.x } else { u.x },
                if i & 2 == 0 { l.y } else { u.y },
                if i & 4 == 0 { l.z } else { u.z },
            )
        })
    }

    /// Returns whether this AAB, including the boundary, contains the point.
    #[inline]
    pub fn contains(&self, point: FreePoint) -> bool {
        Axis::ALL.into_iter().all(|axis| {
            self.lower_bounds[axis] <= point[axis] && point[axis] <= self.upper_bounds[axis]
        })
    }

    /// Returns whether this AAB, including the boundary, intersects the other AAB.
    ///
    /// ```
    /// use multicube_base::math::Aab;
    ///
    /// let a = Aab::new(0.0, 1.0, 0.0, 1.0, 0.0, 1.0);
    /// assert!(a.intersects(Aab::new(1.0, 2.0, 0.0, 1.0, 0.0, 1.0))); // touching
    /// assert!(!a.intersects(Aab::new(1.5, 2.0, 0.0, 1.0, 0.0, 1.0)));
    /// ```
    #[inline]
    pub fn intersects(&self, other: Aab) -> bool {
        for axis in Axis::ALL {
            let intersection_min = self.lower_bounds[axis].max(other.lower_bounds[axis]);
            let intersection_max = self.upper_bounds[axis].min(other.upper_bounds[axis]);
            match intersection_min.partial_cmp(&intersection_max) {
                Some(Ordering::Less | Ordering::Equal) => {}
                _ => return false,
            }
        }
        true
    }

    /// Translate this box by the specified offset.
    ///
    /// Note that due to rounding error, the result may not have the same size.
    #[inline]
    #[must_use]
    #[track_caller] // in case of NaN
    pub fn translate(self, offset: FreeVector) -> Self {
        Self::from_lower_upper(self.lower_bounds + offset, self.upper_bounds + offset)
    }

    /// Returns the axis-aligned bounds of this box after it has been rotated about the
    /// world origin.
    ///
    /// For rotations by multiples of 90° this is the rotated box itself, up to rounding
    /// error; otherwise it is larger.
    #[inline]
    #[must_use]
    pub fn rotate_bounds(self, rotation: &FreeRotation) -> Self {
        Self::bounding_points(self.corner_points().map(|p| rotation.transform_point3d(p)))
            .unwrap_or(self)
    }
}

impl fmt::Debug for Aab {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Aab {
            lower_bounds: l,
            upper_bounds: u,
        } = *self;
        f.debug_tuple("Aab")
            .field(&(l.x..=u.x))
            .field(&(l.y..=u.y))
            .field(&(l.z..=u.z))
            .finish()
    }
}

/// [`Aab`] rejects NaN values, so it can implement [`Eq`]
/// even though it contains floats.
impl Eq for Aab {}

/// Error when an [`Aab`] cannot be constructed from the given corner points.
#[derive(Clone, Copy, Debug, displaydoc::Display, PartialEq)]
#[displaydoc(
    "invalid AAB points that are misordered or NaN: lower {lower_bounds:?} upper {upper_bounds:?}"
)]
pub struct InvalidAabError {
    lower_bounds: FreePoint,
    upper_bounds: FreePoint,
}

impl core::error::Error for InvalidAabError {}
