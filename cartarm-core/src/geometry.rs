use nalgebra::{Matrix3, Rotation2, Translation2, Vector2};

use crate::Point;

/// Construct a homogeneous point `(x, y, 1)`.
#[inline]
pub fn point(x: f64, y: f64) -> Point {
    Point::new(x, y, 1.0)
}

/// Planar affine transform acting on homogeneous points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Transform {
    /// Pure translation by `(dx, dy)`.
    Translation(f64, f64),
    /// Pure rotation in radians about the origin of the local frame.
    Rotation(f64),
}

impl Transform {
    /// Rotation from an angle in degrees.
    #[inline]
    pub fn from_degrees(angle: f64) -> Self {
        Self::Rotation(angle.to_radians())
    }

    /// The 3x3 homogeneous matrix of this transform.
    pub fn to_homogeneous(&self) -> Matrix3<f64> {
        match *self {
            Self::Translation(dx, dy) => Translation2::from(Vector2::new(dx, dy)).to_homogeneous(),
            Self::Rotation(theta) => Rotation2::new(theta).to_homogeneous(),
        }
    }

    /// Apply the transform to a homogeneous point.
    #[inline]
    pub fn apply(&self, local: &Point) -> Point {
        self.to_homogeneous() * local
    }
}

impl std::fmt::Display for Transform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Translation(dx, dy) => write!(f, "Translation ({:.2}, {:.2})", dx, dy),
            Self::Rotation(theta) => write!(
                f,
                "Rotation {:.2}rad {:.0}°",
                theta,
                theta.to_degrees()
            ),
        }
    }
}
