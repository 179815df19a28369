#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Approximately uniform sampling of implicitly defined regions of the unit
//! hypercube.
//!
//! A region is known only through a membership test and one feasible example
//! point. Starting from that point, a [`SampleSet`] spreads outward: it picks
//! an existing member, measures how far the region extends along each axis
//! with a bisection [`EdgeDetector`], fits a [`LocalGaussianModel`] to those
//! extents and draws candidates from it until one is feasible. Once grown,
//! the set can be *diffused*, replacing members in crowded areas, which
//! evens out coverage the longer it runs.
//!
//! # Getting Started
//!
//! ```
//! use feasible::prelude::*;
//!
//! let region = FeasibleRegion::from_source(
//!     "2\n0.5 0.5\nx0 + x1 <= 1\n",
//! )
//! .unwrap();
//!
//! let mut set = SampleSet::builder().seed(7).build(&region).unwrap();
//! set.grow(100).unwrap();
//! set.diffuse_n(50).unwrap();
//!
//! assert_eq!(set.len(), 100);
//! assert!(set.points().iter().all(|p| region.is_feasible(&p.coordinates)));
//! ```
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`FeasibilityOracle`] | The membership test the engine samples against. |
//! | [`FeasibleRegion`] | An oracle built from predicates, in code or from a constraint source. |
//! | [`EdgeDetector`] | Bisection search for the region boundary along a ray. |
//! | [`LocalGaussianModel`] | Axis-aligned normal proposal fitted to detected edges. |
//! | [`SampleSet`] | The growing, diffusing collection of accepted [`Point`]s. |
//! | [`SamplerConfig`] | Batch sizes, escalation cap, bisection depth, degenerate-axis policy. |
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `cli` | The `feasible` binary (enables `tracing`) | on |
//! | `serde` | `Serialize`/`Deserialize` on [`Point`], [`SampleSet::save`]/[`SampleSet::load`] | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) during growth and diffusion | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

pub mod config;
mod constraints;
mod edge;
mod error;
mod model;
mod point;
mod region;
mod rng_util;
mod sample_set;
mod selection;

pub use config::{DegenerateAxisPolicy, SamplerConfig};
pub use edge::{EdgeDetector, Edges, Probe};
pub use error::{Error, Result};
pub use model::{Draw, LocalGaussianModel};
pub use point::Point;
pub use region::{FeasibilityOracle, FeasibleRegion};
#[cfg(feature = "serde")]
pub use sample_set::SampleSetSnapshot;
pub use sample_set::{DiffusionReport, SampleSet, SampleSetBuilder, SearchStats, StopReason};

/// Convenient wildcard import for the most common types.
///
/// ```
/// use feasible::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{DegenerateAxisPolicy, SamplerConfig};
    pub use crate::error::{Error, Result};
    pub use crate::point::Point;
    pub use crate::region::{FeasibilityOracle, FeasibleRegion};
    #[cfg(feature = "serde")]
    pub use crate::sample_set::SampleSetSnapshot;
    pub use crate::sample_set::{
        DiffusionReport, SampleSet, SampleSetBuilder, SearchStats, StopReason,
    };
}
