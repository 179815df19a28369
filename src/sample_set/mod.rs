//! The growing collection of accepted samples.

use crate::config::SamplerConfig;
use crate::edge::EdgeDetector;
use crate::error::Result;
use crate::model::LocalGaussianModel;
use crate::point::Point;
use crate::region::{FeasibilityOracle, FeasibleRegion};

mod builder;
mod diffuse;
mod export;
mod grow;
mod persistence;

pub use builder::SampleSetBuilder;
pub use diffuse::{DiffusionReport, StopReason};
#[cfg(feature = "serde")]
pub use persistence::SampleSetSnapshot;

/// Running totals over every candidate search a sample set has performed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Completed searches (one per accepted point).
    pub searches: u64,
    /// Candidates drawn across all batches.
    pub candidates: u64,
    /// Batch escalations triggered by fully rejected batches.
    pub escalations: u64,
}

/// An ordered set of feasible points spreading through a region.
///
/// The set starts with the region's example point, grows by sampling around
/// existing members, and can then be diffused: members in dense clusters are
/// replaced by new draws, which evens out coverage over time.
///
/// Every member satisfies the region at all times.
///
/// # Examples
///
/// ```
/// use feasible::{FeasibilityOracle, FeasibleRegion, SampleSet};
///
/// let region = FeasibleRegion::new(vec![0.25, 0.25])
///     .unwrap()
///     .with_predicate(|x| x[0] + x[1] <= 1.0);
///
/// let mut set = SampleSet::builder().seed(42).build(&region).unwrap();
/// set.grow(50).unwrap();
/// set.diffuse_n(20).unwrap();
///
/// let rows = set.export_coordinates();
/// assert_eq!(rows.len(), 50);
/// assert!(rows.iter().all(|x| region.is_feasible(x)));
/// ```
pub struct SampleSet<O: FeasibilityOracle> {
    region: O,
    points: Vec<Point>,
    config: SamplerConfig,
    rng: fastrand::Rng,
    stats: SearchStats,
}

impl<O: FeasibilityOracle> SampleSet<O> {
    /// Seeds a set with the region's example point, using default settings
    /// and an entropy-seeded random source.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidOrigin` if the example point is infeasible, or
    /// any error from building the example's local model.
    pub fn new(region: O) -> Result<Self> {
        SampleSetBuilder::new().build(region)
    }

    /// Scores the example point against its own model and stores it as the
    /// only member.
    pub(crate) fn seeded(region: O, config: SamplerConfig, rng: fastrand::Rng) -> Result<Self> {
        let origin = region.example().to_vec();
        let detector = EdgeDetector::new(&region, config.edge_iterations);
        let model = LocalGaussianModel::new(&origin, &detector, &config)?;
        let seed = model.sample_at(core::slice::from_ref(&origin)).swap_remove(0);

        trace_debug!(log_density = seed.log_density, "seeded sample set");

        Ok(Self {
            region,
            points: vec![Point::from(seed)],
            config,
            rng,
            stats: SearchStats::default(),
        })
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`: a set holds at least its seed point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The members, in insertion order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The region being sampled.
    pub fn region(&self) -> &O {
        &self.region
    }

    /// The active settings.
    #[must_use]
    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Totals over every search run so far.
    #[must_use]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Coordinates of every member, in current order.
    #[must_use]
    pub fn export_coordinates(&self) -> Vec<Vec<f64>> {
        self.points.iter().map(|p| p.coordinates.clone()).collect()
    }
}

impl SampleSet<FeasibleRegion> {
    /// Returns a builder for configuring the sampler.
    ///
    /// The builder works with any [`FeasibilityOracle`]; this impl only pins
    /// the type parameter so `SampleSet::builder()` needs no annotation.
    #[must_use]
    pub fn builder() -> SampleSetBuilder {
        SampleSetBuilder::new()
    }
}

impl<O: FeasibilityOracle> core::fmt::Debug for SampleSet<O> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SampleSet")
            .field("dimension", &self.region.dimension())
            .field("len", &self.points.len())
            .field("config", &self.config)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
