//! Boundary detection by bisection along rays.
//!
//! From a feasible origin, each search walks a ray that certainly leaves the
//! unit hypercube and bisects it a fixed number of times. The last point known
//! to be feasible is reported as the edge in that direction.

use crate::error::{Error, Result};
use crate::region::FeasibilityOracle;

/// Outcome of a single ray search.
#[derive(Clone, Debug, PartialEq)]
pub struct Probe {
    /// The boundary estimate, in absolute coordinates.
    pub point: Vec<f64>,
    /// Whether the final midpoint tested feasible and became `point`. When
    /// `false`, `point` is the last midpoint confirmed earlier, or the origin
    /// if none was. `point` itself is feasible either way.
    pub feasible: bool,
}

/// Detected boundary points along every Cartesian axis.
#[derive(Clone, Debug, PartialEq)]
pub struct Edges {
    /// `positive[i]` is the edge found moving along `+e_i`.
    pub positive: Vec<Vec<f64>>,
    /// `negative[i]` is the edge found moving along `-e_i`.
    pub negative: Vec<Vec<f64>>,
}

impl Edges {
    /// Half the distance between the positive and negative edge on each axis.
    #[must_use]
    pub fn half_widths(&self) -> Vec<f64> {
        self.positive
            .iter()
            .zip(&self.negative)
            .enumerate()
            .map(|(axis, (pos, neg))| (pos[axis] - neg[axis]).abs() / 2.0)
            .collect()
    }
}

/// Estimates how far the feasible region extends around a point.
///
/// # Examples
///
/// ```
/// use feasible::{EdgeDetector, FeasibleRegion};
///
/// let region = FeasibleRegion::new(vec![0.5, 0.5])
///     .unwrap()
///     .with_predicate(|x| x[0] <= 0.75);
/// let detector = EdgeDetector::new(&region, 20);
///
/// let edges = detector.detect_edges(&[0.5, 0.5]).unwrap();
/// assert!((edges.positive[0][0] - 0.75).abs() < 1e-5);
/// assert!(edges.negative[0][0] < 1e-5);
/// ```
pub struct EdgeDetector<'a, O: FeasibilityOracle + ?Sized> {
    oracle: &'a O,
    iterations: u32,
}

impl<'a, O: FeasibilityOracle + ?Sized> EdgeDetector<'a, O> {
    /// Creates a detector that bisects each ray `iterations` times.
    pub fn new(oracle: &'a O, iterations: u32) -> Self {
        Self { oracle, iterations }
    }

    /// The oracle this detector queries.
    pub fn oracle(&self) -> &'a O {
        self.oracle
    }

    /// Searches along `+e_i` and `-e_i` for every axis `i`.
    ///
    /// # Errors
    ///
    /// Returns `Error::DimensionMismatch` if `origin` has the wrong length and
    /// `Error::InvalidOrigin` if it is not feasible. Both are checked before
    /// any search starts.
    pub fn detect_edges(&self, origin: &[f64]) -> Result<Edges> {
        self.check_origin(origin)?;

        let n = origin.len();
        let mut positive = Vec::with_capacity(n);
        let mut negative = Vec::with_capacity(n);
        let mut direction = vec![0.0; n];

        for axis in 0..n {
            direction[axis] = 1.0;
            positive.push(self.bisect(origin, &direction).point);
            direction[axis] = -1.0;
            negative.push(self.bisect(origin, &direction).point);
            direction[axis] = 0.0;
        }

        Ok(Edges { positive, negative })
    }

    /// Searches along an arbitrary direction.
    ///
    /// # Errors
    ///
    /// Returns `Error::DimensionMismatch` if either vector has the wrong
    /// length, `Error::InvalidOrigin` if `origin` is not feasible, and
    /// `Error::ZeroDirection` if `direction` has no non-zero component.
    pub fn detect_along(&self, origin: &[f64], direction: &[f64]) -> Result<Probe> {
        self.check_origin(origin)?;
        if direction.len() != origin.len() {
            return Err(Error::DimensionMismatch {
                expected: origin.len(),
                got: direction.len(),
            });
        }
        if direction.iter().all(|&d| d == 0.0) {
            return Err(Error::ZeroDirection);
        }
        Ok(self.bisect(origin, direction))
    }

    fn check_origin(&self, origin: &[f64]) -> Result<()> {
        let expected = self.oracle.dimension();
        if origin.len() != expected {
            return Err(Error::DimensionMismatch {
                expected,
                got: origin.len(),
            });
        }
        if !self.oracle.is_feasible(origin) {
            return Err(Error::InvalidOrigin {
                point: origin.to_vec(),
            });
        }
        Ok(())
    }

    /// Bisects the segment from `origin` to a point outside the unit cube.
    ///
    /// `origin` must already be known feasible.
    fn bisect(&self, origin: &[f64], direction: &[f64]) -> Probe {
        let scale = direction.iter().fold(0.0_f64, |m, d| m.max(d.abs()));
        let mut left = origin.to_vec();
        let mut right: Vec<f64> = origin
            .iter()
            .zip(direction)
            .map(|(o, d)| o + d / scale)
            .collect();
        let mut mid = vec![0.0; origin.len()];
        let mut feasible = false;

        for _ in 0..self.iterations {
            for ((m, l), r) in mid.iter_mut().zip(&left).zip(&right) {
                *m = 0.5 * (l + r);
            }
            feasible = self.oracle.is_feasible(&mid);
            if feasible {
                core::mem::swap(&mut left, &mut mid);
            } else {
                core::mem::swap(&mut right, &mut mid);
            }
        }

        Probe {
            point: left,
            feasible,
        }
    }
}
