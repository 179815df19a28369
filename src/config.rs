//! Tuning knobs for edge detection, local models and candidate search.

use crate::error::{Error, Result};

/// Default number of candidates drawn in the first batch of a search.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Default factor by which a fully rejected batch grows.
pub const DEFAULT_BATCH_GROWTH: usize = 10;

/// Default cap on batch escalations before a search gives up.
pub const DEFAULT_MAX_ESCALATIONS: usize = 5;

/// Default number of bisection steps per edge search.
pub const DEFAULT_EDGE_ITERATIONS: u32 = 24;

/// Largest accepted number of bisection steps per edge search. The search
/// resolution `2^-k` underflows to zero past about 1074.
pub const MAX_EDGE_ITERATIONS: u32 = 1000;

/// What a local model does with an axis whose detected width collapsed.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum DegenerateAxisPolicy {
    /// Widen the axis to [`SamplerConfig::min_half_width`].
    #[default]
    Floor,
    /// Fail with [`Error::DegenerateModel`](crate::Error::DegenerateModel).
    Reject,
}

/// Settings shared by every search a [`SampleSet`](crate::SampleSet) runs.
///
/// Built through [`SampleSet::builder`](crate::SampleSet::builder); the
/// defaults reproduce the classic behavior (batches of 10 growing tenfold,
/// 24 bisection steps) with a bounded number of escalations.
#[derive(Clone, Debug, PartialEq)]
pub struct SamplerConfig {
    /// Candidates drawn in the first batch of each search.
    pub initial_batch_size: usize,
    /// Multiplier applied to the batch size after a fully rejected batch.
    pub batch_growth: usize,
    /// Escalations allowed before [`Error::SearchExhausted`]; `None` retries forever.
    pub max_escalations: Option<usize>,
    /// Bisection steps per edge search.
    pub edge_iterations: u32,
    /// Handling of zero-width axes.
    pub degenerate_axes: DegenerateAxisPolicy,
    /// Smallest half-width a local model accepts on any axis.
    pub min_half_width: f64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            initial_batch_size: DEFAULT_BATCH_SIZE,
            batch_growth: DEFAULT_BATCH_GROWTH,
            max_escalations: Some(DEFAULT_MAX_ESCALATIONS),
            edge_iterations: DEFAULT_EDGE_ITERATIONS,
            degenerate_axes: DegenerateAxisPolicy::Floor,
            min_half_width: search_resolution(DEFAULT_EDGE_ITERATIONS),
        }
    }
}

impl SamplerConfig {
    /// Checks that every setting is usable.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` describing the first bad setting.
    pub fn validate(&self) -> Result<()> {
        if self.initial_batch_size == 0 {
            return Err(Error::InvalidConfig(
                "initial batch size must be positive".into(),
            ));
        }
        if self.batch_growth < 2 {
            return Err(Error::InvalidConfig(format!(
                "batch growth must be at least 2, got {}",
                self.batch_growth
            )));
        }
        if self.edge_iterations == 0 {
            return Err(Error::InvalidConfig(
                "edge search needs at least one iteration".into(),
            ));
        }
        if self.edge_iterations > MAX_EDGE_ITERATIONS {
            return Err(Error::InvalidConfig(format!(
                "edge search allows at most {MAX_EDGE_ITERATIONS} iterations, got {}",
                self.edge_iterations
            )));
        }
        if !(self.min_half_width > 0.0 && self.min_half_width.is_finite()) {
            return Err(Error::InvalidConfig(format!(
                "minimum half-width must be positive and finite, got {}",
                self.min_half_width
            )));
        }
        Ok(())
    }
}

/// Width of the interval left after `iterations` bisections of the unit ray.
pub(crate) fn search_resolution(iterations: u32) -> f64 {
    0.5_f64.powi(i32::try_from(iterations).unwrap_or(i32::MAX))
}
