use crate::config::{DegenerateAxisPolicy, SamplerConfig, search_resolution};
use crate::error::Result;
use crate::region::FeasibilityOracle;

use super::SampleSet;

/// A builder for constructing [`SampleSet`] instances with a fluent API.
///
/// Created via [`SampleSet::builder()`]. Settings are validated when
/// [`build`](Self::build) is called.
///
/// # Defaults
///
/// - seed: none (entropy-seeded random source)
/// - `initial_batch_size`: 10
/// - `batch_growth`: 10
/// - `max_escalations`: 5
/// - `edge_iterations`: 24
/// - `degenerate_axes`: [`DegenerateAxisPolicy::Floor`]
/// - `min_half_width`: the edge search resolution, `2^-edge_iterations`
///
/// # Examples
///
/// ```
/// use feasible::{FeasibleRegion, SampleSet};
///
/// let region = FeasibleRegion::new(vec![0.5, 0.5]).unwrap();
/// let set = SampleSet::builder()
///     .seed(7)
///     .initial_batch_size(20)
///     .max_escalations(Some(3))
///     .edge_iterations(16)
///     .build(region)
///     .unwrap();
///
/// assert_eq!(set.config().initial_batch_size, 20);
/// assert_eq!(set.len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct SampleSetBuilder {
    config: SamplerConfig,
    min_half_width: Option<f64>,
    seed: Option<u64>,
}

impl SampleSetBuilder {
    /// Create a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: SamplerConfig::default(),
            min_half_width: None,
            seed: None,
        }
    }

    /// Seed the random source for reproducible runs.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of candidates in the first batch of each search.
    #[must_use]
    pub fn initial_batch_size(mut self, size: usize) -> Self {
        self.config.initial_batch_size = size;
        self
    }

    /// Factor applied to the batch size after a fully rejected batch.
    #[must_use]
    pub fn batch_growth(mut self, factor: usize) -> Self {
        self.config.batch_growth = factor;
        self
    }

    /// Escalations allowed before a search fails; `None` never gives up.
    #[must_use]
    pub fn max_escalations(mut self, max: Option<usize>) -> Self {
        self.config.max_escalations = max;
        self
    }

    /// Bisection steps per edge search.
    #[must_use]
    pub fn edge_iterations(mut self, iterations: u32) -> Self {
        self.config.edge_iterations = iterations;
        self
    }

    /// How collapsed axes are handled.
    #[must_use]
    pub fn degenerate_axes(mut self, policy: DegenerateAxisPolicy) -> Self {
        self.config.degenerate_axes = policy;
        self
    }

    /// Smallest half-width accepted on any axis.
    ///
    /// Defaults to the search resolution of the configured edge iterations.
    #[must_use]
    pub fn min_half_width(mut self, width: f64) -> Self {
        self.min_half_width = Some(width);
        self
    }

    /// Replace every setting at once.
    #[must_use]
    pub fn config(mut self, config: SamplerConfig) -> Self {
        self.min_half_width = Some(config.min_half_width);
        self.config = config;
        self
    }

    /// Resolve and validate the settings without building a set.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if any setting is out of range.
    pub fn resolve(&self) -> Result<SamplerConfig> {
        let mut config = self.config.clone();
        config.min_half_width = self
            .min_half_width
            .unwrap_or_else(|| search_resolution(config.edge_iterations));
        config.validate()?;
        Ok(config)
    }

    pub(super) fn rng(&self) -> fastrand::Rng {
        match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        }
    }

    /// Build the [`SampleSet`], seeded with the region's example point.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` for bad settings and
    /// `Error::InvalidOrigin` if the region's example point is infeasible.
    pub fn build<O: FeasibilityOracle>(self, region: O) -> Result<SampleSet<O>> {
        let config = self.resolve()?;
        SampleSet::seeded(region, config, self.rng())
    }
}

impl Default for SampleSetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::region::FeasibleRegion;

    #[test]
    fn test_builder_defaults() {
        let config = SampleSetBuilder::new().resolve().unwrap();
        assert_eq!(config, SamplerConfig::default());
    }

    #[test]
    fn test_builder_floor_follows_iterations() {
        let config = SampleSetBuilder::new().edge_iterations(10).resolve().unwrap();
        assert!((config.min_half_width - 1.0 / 1024.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_builder_explicit_floor_wins() {
        let config = SampleSetBuilder::new()
            .edge_iterations(10)
            .min_half_width(0.01)
            .resolve()
            .unwrap();
        assert!((config.min_half_width - 0.01).abs() < f64::EPSILON);
    }

    #[test]
    fn test_builder_rejects_invalid_settings() {
        let region = FeasibleRegion::new(vec![0.5]).unwrap();
        let result = SampleSet::builder().initial_batch_size(0).build(&region);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));

        let result = SampleSet::builder().edge_iterations(0).build(&region);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_builder_rejects_excessive_iterations_by_name() {
        // The derived floor would underflow to zero at this depth.
        let result = SampleSetBuilder::new().edge_iterations(2000).resolve();
        let Err(Error::InvalidConfig(message)) = result else {
            panic!("2000 iterations accepted");
        };
        assert!(message.contains("iterations"), "{message}");
        assert!(!message.contains("half-width"), "{message}");
    }

    #[test]
    fn test_builder_applies_settings() {
        let region = FeasibleRegion::new(vec![0.5]).unwrap();
        let set = SampleSet::builder()
            .batch_growth(4)
            .max_escalations(None)
            .degenerate_axes(DegenerateAxisPolicy::Reject)
            .build(&region)
            .unwrap();

        assert_eq!(set.config().batch_growth, 4);
        assert_eq!(set.config().max_escalations, None);
        assert_eq!(set.config().degenerate_axes, DegenerateAxisPolicy::Reject);
    }
}
