//! Feasible regions and the [`FeasibilityOracle`] trait.
//!
//! The sampling engine never inspects constraints directly. It only asks an
//! oracle whether a coordinate vector is feasible, how many dimensions the
//! space has, and for one known feasible point to start from.

use core::fmt;

use crate::error::{Error, Result};

/// A membership test for a subregion of the closed unit hypercube.
///
/// Implementations must be pure: the same vector always yields the same
/// answer, and a vector with any coordinate outside `[0, 1]` is infeasible.
pub trait FeasibilityOracle {
    /// Number of coordinates in every point of the space.
    fn dimension(&self) -> usize;

    /// A point known to satisfy the region.
    fn example(&self) -> &[f64];

    /// Returns `true` when `x` lies in the region.
    fn is_feasible(&self, x: &[f64]) -> bool;
}

impl<T: FeasibilityOracle + ?Sized> FeasibilityOracle for &T {
    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn example(&self) -> &[f64] {
        (**self).example()
    }

    fn is_feasible(&self, x: &[f64]) -> bool {
        (**self).is_feasible(x)
    }
}

type Predicate = Box<dyn Fn(&[f64]) -> bool + Send + Sync>;

/// A region of `[0, 1]^n` defined by an example point and a list of predicates.
///
/// A point is feasible when it lies in the unit hypercube and every predicate
/// accepts it. Predicates run in insertion order and evaluation stops at the
/// first rejection.
///
/// # Examples
///
/// ```
/// use feasible::{FeasibilityOracle, FeasibleRegion};
///
/// let region = FeasibleRegion::new(vec![0.25, 0.25])
///     .unwrap()
///     .with_predicate(|x| x[0] + x[1] <= 1.0);
///
/// assert!(region.is_feasible(&[0.4, 0.5]));
/// assert!(!region.is_feasible(&[0.8, 0.5]));
/// assert!(!region.is_feasible(&[-0.1, 0.5]));
/// ```
pub struct FeasibleRegion {
    example: Vec<f64>,
    predicates: Vec<Predicate>,
}

impl FeasibleRegion {
    /// Creates an unconstrained region (the whole unit hypercube) around `example`.
    ///
    /// # Errors
    ///
    /// Returns `Error::DimensionMismatch` if `example` is empty and
    /// `Error::InvalidOrigin` if it lies outside `[0, 1]^n`.
    pub fn new(example: Vec<f64>) -> Result<Self> {
        if example.is_empty() {
            return Err(Error::DimensionMismatch {
                expected: 1,
                got: 0,
            });
        }
        if !in_unit_cube(&example) {
            return Err(Error::InvalidOrigin { point: example });
        }
        Ok(Self {
            example,
            predicates: Vec::new(),
        })
    }

    /// Adds a predicate to the region.
    ///
    /// The example point is not re-checked here; call [`validate`](Self::validate)
    /// once all predicates are in place.
    #[must_use]
    pub fn with_predicate(
        mut self,
        predicate: impl Fn(&[f64]) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.predicates.push(Box::new(predicate));
        self
    }

    /// Checks that the example point satisfies every predicate.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidOrigin` if it does not.
    pub fn validate(self) -> Result<Self> {
        if self.is_feasible(&self.example) {
            Ok(self)
        } else {
            Err(Error::InvalidOrigin {
                point: self.example,
            })
        }
    }

    /// Number of predicates defining the region.
    #[must_use]
    pub fn n_predicates(&self) -> usize {
        self.predicates.len()
    }
}

impl FeasibilityOracle for FeasibleRegion {
    fn dimension(&self) -> usize {
        self.example.len()
    }

    fn example(&self) -> &[f64] {
        &self.example
    }

    fn is_feasible(&self, x: &[f64]) -> bool {
        x.len() == self.example.len()
            && in_unit_cube(x)
            && self.predicates.iter().all(|predicate| predicate(x))
    }
}

impl fmt::Debug for FeasibleRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeasibleRegion")
            .field("example", &self.example)
            .field("n_predicates", &self.predicates.len())
            .finish()
    }
}

fn in_unit_cube(x: &[f64]) -> bool {
    x.iter().all(|v| (0.0..=1.0).contains(v))
}
