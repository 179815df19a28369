//! The accepted-sample record.

use crate::model::Draw;

/// A feasible sample with the density it was accepted at.
///
/// Densities are kept in log space. In high dimensions or narrow regions the
/// plain density easily leaves the range of `f64`, while its logarithm stays
/// finite; [`density`](Self::density) and
/// [`inverse_density`](Self::inverse_density) may saturate to `0` or `inf`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Coordinates in `[0, 1]^n`.
    pub coordinates: Vec<f64>,
    /// Log density of the local model the point was drawn from.
    pub log_density: f64,
}

impl Point {
    /// Density of the local model at this point.
    #[must_use]
    pub fn density(&self) -> f64 {
        self.log_density.exp()
    }

    /// Reciprocal of [`density`](Self::density).
    #[must_use]
    pub fn inverse_density(&self) -> f64 {
        (-self.log_density).exp()
    }
}

impl From<Draw> for Point {
    /// # Panics
    ///
    /// Panics if the draw's log density is not finite.
    fn from(draw: Draw) -> Self {
        assert!(
            usable_log_density(draw.log_density),
            "accepted point has unusable log density {}",
            draw.log_density
        );
        Self {
            coordinates: draw.point,
            log_density: draw.log_density,
        }
    }
}

/// A finite log density, so it can serve as a selection weight.
pub(crate) fn usable_log_density(log_density: f64) -> bool {
    log_density.is_finite()
}
