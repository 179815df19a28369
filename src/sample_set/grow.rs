use core::ops::ControlFlow;

use crate::edge::EdgeDetector;
use crate::error::{Error, Result};
use crate::model::LocalGaussianModel;
use crate::point::{Point, usable_log_density};
use crate::region::FeasibilityOracle;
use crate::selection::dart_throw;

use super::SampleSet;

impl<O: FeasibilityOracle> SampleSet<O> {
    /// Grow (or shrink) the set to exactly `target` members.
    ///
    /// A larger target appends new points found by
    /// [`find_next_entry`](Self::find_next_entry). A smaller one keeps the
    /// first `target` members in insertion order, unchanged.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidTargetCount` if `target` is zero, leaving the
    /// set untouched. Propagates search failures such as
    /// `Error::SearchExhausted`; points accepted before the failure are kept.
    pub fn grow(&mut self, target: usize) -> Result<()> {
        self.grow_while(target, |_| ControlFlow::Continue(()))
            .map(|_| ())
    }

    /// Like [`grow`](Self::grow), but consults `control` before every search.
    ///
    /// A break stops growth early with the points accepted so far, so the
    /// set may end up shorter than `target`. Returns the number of points
    /// appended.
    ///
    /// # Errors
    ///
    /// Same as [`grow`](Self::grow).
    ///
    /// # Examples
    ///
    /// ```
    /// use std::ops::ControlFlow;
    ///
    /// use feasible::{FeasibleRegion, SampleSet};
    ///
    /// let region = FeasibleRegion::new(vec![0.5, 0.5]).unwrap();
    /// let mut set = SampleSet::builder().seed(2).build(region).unwrap();
    ///
    /// let added = set
    ///     .grow_while(100, |set| {
    ///         if set.len() < 4 {
    ///             ControlFlow::Continue(())
    ///         } else {
    ///             ControlFlow::Break(())
    ///         }
    ///     })
    ///     .unwrap();
    /// assert_eq!(added, 3);
    /// assert_eq!(set.len(), 4);
    /// ```
    pub fn grow_while(
        &mut self,
        target: usize,
        mut control: impl FnMut(&Self) -> ControlFlow<()>,
    ) -> Result<usize> {
        if target == 0 {
            return Err(Error::InvalidTargetCount(target));
        }

        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("grow", from = self.points.len(), target).entered();

        if self.points.len() >= target {
            self.points.truncate(target);
            return Ok(0);
        }

        let start = self.points.len();
        self.points.reserve_exact(target - start);
        let report_every = (target / 10).max(1);

        while self.points.len() < target {
            if control(self).is_break() {
                trace_info!(accepted = self.points.len(), target, "growth stopped early");
                break;
            }

            let point = self.find_next_entry()?;
            self.points.push(point);

            let accepted = self.points.len();
            if accepted % report_every == 0 || accepted == target {
                trace_info!(accepted, target, "growth progress");
            }
        }

        Ok(self.points.len() - start)
    }

    /// Find one new feasible point without adding it to the set.
    ///
    /// A parent is chosen with probability proportional to its inverse
    /// density, so members sitting in the tails of their own proposal are
    /// favored and the cloud spreads outward. Candidates are drawn in batches
    /// from a fresh local model at the parent; the first feasible candidate in
    /// draw order wins. A batch with no feasible candidate is redrawn
    /// `batch_growth` times larger.
    ///
    /// # Errors
    ///
    /// Returns `Error::SearchExhausted` once `max_escalations` batches in a
    /// row were fully rejected, or any error from building the local model.
    pub fn find_next_entry(&mut self) -> Result<Point> {
        let log_weights: Vec<f64> = self.points.iter().map(|p| -p.log_density).collect();
        let parent = dart_throw(&log_weights, &mut self.rng);

        let detector = EdgeDetector::new(&self.region, self.config.edge_iterations);
        let model = LocalGaussianModel::new(
            &self.points[parent].coordinates,
            &detector,
            &self.config,
        )?;

        let mut batch_size = self.config.initial_batch_size;
        let mut escalations = 0;

        loop {
            let batch = model.sample(batch_size, &mut self.rng);
            self.stats.candidates += batch.len() as u64;

            if let Some(draw) = batch
                .into_iter()
                .filter(|draw| usable_log_density(draw.log_density))
                .find(|draw| self.region.is_feasible(&draw.point))
            {
                self.stats.searches += 1;
                return Ok(Point::from(draw));
            }

            if let Some(max) = self.config.max_escalations
                && escalations >= max
            {
                return Err(Error::SearchExhausted {
                    escalations,
                    batch_size,
                });
            }

            escalations += 1;
            self.stats.escalations += 1;
            batch_size = batch_size.saturating_mul(self.config.batch_growth);
            trace_debug!(parent, escalations, batch_size, "batch rejected, escalating");
        }
    }
}
