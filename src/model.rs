//! Axis-aligned Gaussian proposal distributions built from detected edges.

use nalgebra::{DMatrix, DVector};

use crate::config::{DegenerateAxisPolicy, SamplerConfig};
use crate::edge::EdgeDetector;
use crate::error::{Error, Result};
use crate::region::FeasibilityOracle;
use crate::rng_util;

/// A candidate point together with the log density it was drawn (or scored) at.
#[derive(Clone, Debug, PartialEq)]
pub struct Draw {
    /// Coordinates of the candidate.
    pub point: Vec<f64>,
    /// Model log density at `point`.
    pub log_density: f64,
}

impl Draw {
    /// Model density at `point`; saturates to `0` or `inf` out of range.
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

/// A normal distribution centered at a feasible point whose spread on each
/// axis matches how far the region extends along that axis.
///
/// The mean stays at the origin even when the edges are asymmetric, so the
/// mode of the proposal is always a known-feasible point.
///
/// # Examples
///
/// ```
/// use feasible::{EdgeDetector, FeasibleRegion, LocalGaussianModel, SamplerConfig};
///
/// let region = FeasibleRegion::new(vec![0.5, 0.5]).unwrap();
/// let config = SamplerConfig::default();
/// let detector = EdgeDetector::new(&region, config.edge_iterations);
/// let model = LocalGaussianModel::new(&[0.5, 0.5], &detector, &config).unwrap();
///
/// let mut rng = fastrand::Rng::with_seed(1);
/// let draws = model.sample(4, &mut rng);
/// assert_eq!(draws.len(), 4);
/// assert!(draws.iter().all(|d| d.log_density.is_finite()));
/// ```
#[derive(Clone, Debug)]
pub struct LocalGaussianModel {
    mean: DVector<f64>,
    covariance: DMatrix<f64>,
    /// Square roots of the covariance diagonal.
    std_devs: Vec<f64>,
    /// `-0.5 * n * ln(2π) - Σ ln σ_i`
    log_norm: f64,
}

impl LocalGaussianModel {
    /// Detects edges around `origin` and fits a diagonal normal to them.
    ///
    /// # Errors
    ///
    /// Propagates `Error::DimensionMismatch` and `Error::InvalidOrigin` from
    /// edge detection. Returns `Error::DegenerateModel` when an axis collapses
    /// under [`DegenerateAxisPolicy::Reject`] or the covariance is not
    /// positive definite.
    pub fn new<O: FeasibilityOracle + ?Sized>(
        origin: &[f64],
        detector: &EdgeDetector<'_, O>,
        config: &SamplerConfig,
    ) -> Result<Self> {
        let edges = detector.detect_edges(origin)?;
        let mut half_widths = edges.half_widths();

        for (axis, hw) in half_widths.iter_mut().enumerate() {
            if *hw >= config.min_half_width {
                continue;
            }
            match config.degenerate_axes {
                DegenerateAxisPolicy::Floor => {
                    trace_debug!(axis, half_width = *hw, "widening collapsed axis");
                    *hw = config.min_half_width;
                }
                DegenerateAxisPolicy::Reject => {
                    return Err(Error::DegenerateModel {
                        axis,
                        half_width: *hw,
                    });
                }
            }
        }

        Self::from_half_widths(origin, &half_widths)
    }

    /// Builds the model directly from per-axis half-widths.
    ///
    /// # Errors
    ///
    /// Returns `Error::DimensionMismatch` if the lengths differ and
    /// `Error::DegenerateModel` if the covariance is not positive definite.
    pub fn from_half_widths(origin: &[f64], half_widths: &[f64]) -> Result<Self> {
        if half_widths.len() != origin.len() {
            return Err(Error::DimensionMismatch {
                expected: origin.len(),
                got: half_widths.len(),
            });
        }

        if let Some((axis, &half_width)) = half_widths
            .iter()
            .enumerate()
            .find(|&(_, &h)| !(h > 0.0 && h.is_finite()))
        {
            return Err(Error::DegenerateModel { axis, half_width });
        }

        let variances =
            DVector::from_iterator(half_widths.len(), half_widths.iter().map(|h| h * h));
        let covariance = DMatrix::from_diagonal(&variances);

        // Squaring can still underflow to zero for extremely narrow axes.
        let eigen = covariance.clone().symmetric_eigen();
        if eigen.eigenvalues.iter().any(|&lambda| lambda <= 0.0) {
            let axis = variances.iter().position(|&v| v <= 0.0).unwrap_or(0);
            return Err(Error::DegenerateModel {
                axis,
                half_width: half_widths[axis],
            });
        }

        let std_devs: Vec<f64> = variances.iter().map(|v| v.sqrt()).collect();
        #[allow(clippy::cast_precision_loss)]
        let n = origin.len() as f64;
        let log_norm = -0.5 * n * (core::f64::consts::TAU).ln()
            - std_devs.iter().map(|s| s.ln()).sum::<f64>();

        Ok(Self {
            mean: DVector::from_column_slice(origin),
            covariance,
            std_devs,
            log_norm,
        })
    }

    /// Number of dimensions.
    #[must_use]
    pub fn n_dims(&self) -> usize {
        self.mean.len()
    }

    /// The center of the distribution.
    #[must_use]
    pub fn mean(&self) -> &[f64] {
        self.mean.as_slice()
    }

    /// The diagonal covariance matrix.
    #[must_use]
    pub fn covariance(&self) -> &DMatrix<f64> {
        &self.covariance
    }

    /// Standard deviation on each axis.
    #[must_use]
    pub fn std_devs(&self) -> &[f64] {
        &self.std_devs
    }

    /// Returns the log density at `x`.
    ///
    /// # Panics
    ///
    /// Panics if `x.len() != self.n_dims()`.
    #[must_use]
    pub fn log_density(&self, x: &[f64]) -> f64 {
        assert_eq!(
            x.len(),
            self.n_dims(),
            "Point dimension {} doesn't match model dimension {}",
            x.len(),
            self.n_dims()
        );

        let quad: f64 = x
            .iter()
            .zip(self.mean.iter())
            .zip(&self.std_devs)
            .map(|((xi, mi), si)| {
                let z = (xi - mi) / si;
                z * z
            })
            .sum();
        self.log_norm - 0.5 * quad
    }

    /// Returns the density at `x`.
    ///
    /// # Panics
    ///
    /// Panics if `x.len() != self.n_dims()`.
    #[must_use]
    pub fn density(&self, x: &[f64]) -> f64 {
        self.log_density(x).exp()
    }

    /// Draws `count` candidates, each with its log density.
    pub fn sample(&self, count: usize, rng: &mut fastrand::Rng) -> Vec<Draw> {
        (0..count)
            .map(|_| {
                let point: Vec<f64> = self
                    .mean
                    .iter()
                    .zip(&self.std_devs)
                    .map(|(m, s)| m + s * rng_util::standard_normal(rng))
                    .collect();
                self.score(point)
            })
            .collect()
    }

    /// Scores externally supplied points.
    ///
    /// # Panics
    ///
    /// Panics if any point has the wrong dimension.
    #[must_use]
    pub fn sample_at(&self, points: &[Vec<f64>]) -> Vec<Draw> {
        points.iter().map(|p| self.score(p.clone())).collect()
    }

    fn score(&self, point: Vec<f64>) -> Draw {
        Draw {
            log_density: self.log_density(&point),
            point,
        }
    }
}
