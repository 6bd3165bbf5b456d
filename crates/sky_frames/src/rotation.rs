//! Named 3×3 frame rotations.
//!
//! Elementary rotations follow the passive (frame-rotating) convention used
//! throughout the IAU/SOFA literature: `rot_z(a)` turns the coordinate axes by
//! `+a` about z, so a fixed direction's longitude decreases by `a`.

use nalgebra::{Matrix3, Vector3};

/// Reference frames a [`FrameRotation`] can connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frame {
    /// International Celestial Reference System.
    Icrs,
    /// Dynamical mean equator and equinox of J2000.0 (FK5 to within its errors).
    MeanJ2000,
    /// Mean equator and equinox of date.
    MeanOfDate,
    /// True equator and equinox of date.
    TrueOfDate,
    /// Celestial intermediate frame (origin at the CIO).
    Intermediate,
    /// Terrestrial intermediate frame, Earth-rotating.
    Terrestrial,
    /// Local horizon: x north, y east, z zenith.
    Horizon,
}

/// Passive rotation about the x axis.
pub fn rot_x(angle_rad: f64) -> Matrix3<f64> {
    let (s, c) = angle_rad.sin_cos();
    Matrix3::new(1.0, 0.0, 0.0, 0.0, c, s, 0.0, -s, c)
}

/// Passive rotation about the y axis.
pub fn rot_y(angle_rad: f64) -> Matrix3<f64> {
    let (s, c) = angle_rad.sin_cos();
    Matrix3::new(c, 0.0, -s, 0.0, 1.0, 0.0, s, 0.0, c)
}

/// Passive rotation about the z axis.
pub fn rot_z(angle_rad: f64) -> Matrix3<f64> {
    let (s, c) = angle_rad.sin_cos();
    Matrix3::new(c, s, 0.0, -s, c, 0.0, 0.0, 0.0, 1.0)
}

/// A rotation matrix tagged with the frames it maps between.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRotation {
    pub from: Frame,
    pub to: Frame,
    pub matrix: Matrix3<f64>,
}

impl FrameRotation {
    pub fn new(from: Frame, to: Frame, matrix: Matrix3<f64>) -> Self {
        Self { from, to, matrix }
    }

    pub fn identity(frame: Frame) -> Self {
        Self::new(frame, frame, Matrix3::identity())
    }

    /// Rotate a vector expressed in `from` into `to`.
    pub fn apply(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.matrix * v
    }

    /// Compose `self` followed by `next`.
    ///
    /// The chain must be contiguous: `next.from == self.to`.
    pub fn then(&self, next: &FrameRotation) -> FrameRotation {
        debug_assert_eq!(
            self.to, next.from,
            "frame chain broken: {:?} -> {:?}",
            self.to, next.from
        );
        FrameRotation::new(self.from, next.to, next.matrix * self.matrix)
    }

    /// Inverse rotation (transpose), with the frame pair swapped.
    pub fn inverse(&self) -> FrameRotation {
        FrameRotation::new(self.to, self.from, self.matrix.transpose())
    }

    /// Largest element of `MᵀM − I`; zero for an exact rotation.
    pub fn orthogonality_error(&self) -> f64 {
        (self.matrix.transpose() * self.matrix - Matrix3::identity()).amax()
    }
}
