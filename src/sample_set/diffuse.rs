use core::ops::ControlFlow;
use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;
use std::time::Instant;

use crate::error::Result;
use crate::region::FeasibilityOracle;
use crate::selection::dart_throw;

use super::SampleSet;

/// Why a timed diffusion run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The wall-clock budget ran out.
    Budget,
    /// The cancellation flag was raised.
    Cancelled,
}

/// Summary of a timed diffusion run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiffusionReport {
    /// Completed replacement steps.
    pub steps: usize,
    /// Wall-clock time spent.
    pub elapsed: Duration,
    /// What ended the run.
    pub reason: StopReason,
}

impl<O: FeasibilityOracle> SampleSet<O> {
    /// Replace one member with a freshly found point.
    ///
    /// The member to replace is chosen with probability proportional to its
    /// density, so points in crowded regions are the likeliest to move. The
    /// set size never changes. Returns the index that was overwritten.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`find_next_entry`](Self::find_next_entry); the
    /// set is left unchanged in that case.
    pub fn diffuse(&mut self) -> Result<usize> {
        let log_weights: Vec<f64> = self.points.iter().map(|p| p.log_density).collect();
        let target = dart_throw(&log_weights, &mut self.rng);
        let point = self.find_next_entry()?;
        self.points[target] = point;
        Ok(target)
    }

    /// Run `steps` diffusion steps.
    ///
    /// # Errors
    ///
    /// Stops at the first failing step and returns its error.
    pub fn diffuse_n(&mut self, steps: usize) -> Result<()> {
        for _ in 0..steps {
            self.diffuse()?;
        }
        Ok(())
    }

    /// Diffuse until `control` breaks.
    ///
    /// `control` is consulted before every step and never during one, so a
    /// started step always completes. Returns the number of completed steps.
    ///
    /// # Errors
    ///
    /// Stops at the first failing step and returns its error.
    pub fn diffuse_while(
        &mut self,
        mut control: impl FnMut(&Self) -> ControlFlow<()>,
    ) -> Result<usize> {
        let mut steps = 0;
        while let ControlFlow::Continue(()) = control(self) {
            self.diffuse()?;
            steps += 1;
        }
        Ok(steps)
    }

    /// Diffuse until `budget` elapses or `cancel` is raised.
    ///
    /// Both conditions are checked between steps. Cancellation is a normal
    /// stop: the set keeps every replacement made so far.
    ///
    /// # Errors
    ///
    /// Stops at the first failing step and returns its error.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::atomic::AtomicBool;
    /// use std::time::Duration;
    ///
    /// use feasible::{FeasibleRegion, SampleSet, StopReason};
    ///
    /// let region = FeasibleRegion::new(vec![0.5, 0.5]).unwrap();
    /// let mut set = SampleSet::builder().seed(3).build(region).unwrap();
    /// set.grow(10).unwrap();
    ///
    /// let cancel = AtomicBool::new(false);
    /// let report = set.diffuse_for(Duration::from_millis(20), &cancel).unwrap();
    /// assert_eq!(report.reason, StopReason::Budget);
    /// assert_eq!(set.len(), 10);
    /// ```
    pub fn diffuse_for(&mut self, budget: Duration, cancel: &AtomicBool) -> Result<DiffusionReport> {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!(
            "diffuse",
            budget_secs = budget.as_secs_f64(),
            len = self.points.len()
        )
        .entered();

        let start = Instant::now();
        let mut reason = StopReason::Budget;

        let steps = self.diffuse_while(|_| {
            if cancel.load(Ordering::Relaxed) {
                reason = StopReason::Cancelled;
                ControlFlow::Break(())
            } else if start.elapsed() >= budget {
                reason = StopReason::Budget;
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })?;

        let report = DiffusionReport {
            steps,
            elapsed: start.elapsed(),
            reason,
        };
        trace_info!(steps, reason = ?report.reason, "diffusion finished");
        Ok(report)
    }
}
