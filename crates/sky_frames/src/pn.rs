//! Combined precession–nutation (NP) and bias–precession–nutation (NPB).

use crate::bias::frame_bias;
use crate::nutation::{NutationTerms, nutation_matrix, nutation_terms};
use crate::precession::precession_matrix;
use crate::rotation::FrameRotation;

/// All celestial rotations for one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrecessionNutation {
    /// Julian centuries of TT since J2000.0.
    pub t: f64,
    pub nutation_terms: NutationTerms,
    /// Mean J2000 → mean of date.
    pub precession: FrameRotation,
    /// Mean of date → true of date.
    pub nutation: FrameRotation,
    /// Mean J2000 → true of date.
    pub np: FrameRotation,
    /// ICRS → true of date.
    pub npb: FrameRotation,
}

impl PrecessionNutation {
    /// Evaluate every matrix at `t` (Julian centuries of TT).
    pub fn at(t: f64) -> Self {
        Self::with_nutation(t, nutation_terms(t))
    }

    /// Reuse nutation terms already computed for this instant.
    pub fn with_nutation(t: f64, terms: NutationTerms) -> Self {
        let precession = precession_matrix(t);
        let nutation = nutation_matrix(&terms);
        let np = precession.then(&nutation);
        let npb = frame_bias().then(&np);
        Self {
            t,
            nutation_terms: terms,
            precession,
            nutation,
            np,
            npb,
        }
    }
}
