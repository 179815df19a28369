#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when a search origin or seed point does not satisfy the region.
    #[error("invalid origin: point {point:?} is not feasible")]
    InvalidOrigin {
        /// The rejected coordinates.
        point: Vec<f64>,
    },

    /// Returned when a vector's length differs from the region's dimension.
    #[error("dimension mismatch: expected {expected} coordinates but got {got}")]
    DimensionMismatch {
        /// The dimension of the region.
        expected: usize,
        /// The length of the supplied vector.
        got: usize,
    },

    /// Returned when an edge search is requested along the zero vector.
    #[error("search direction must have at least one non-zero component")]
    ZeroDirection,

    /// Returned when a local model cannot be built because an axis collapsed.
    #[error("degenerate model: axis {axis} has half-width {half_width}")]
    DegenerateModel {
        /// The offending axis.
        axis: usize,
        /// The detected half-width on that axis.
        half_width: f64,
    },

    /// Returned when every candidate batch was rejected, up to the escalation cap.
    #[error(
        "search exhausted: no feasible candidate after {escalations} escalations (last batch size {batch_size})"
    )]
    SearchExhausted {
        /// The number of batch-size escalations performed.
        escalations: usize,
        /// The size of the last rejected batch.
        batch_size: usize,
    },

    /// Returned when a sample set is asked to hold fewer than one point.
    #[error("invalid target count: {0} must be at least 1")]
    InvalidTargetCount(usize),

    /// Returned when sampler settings are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Returned when a constraint source is malformed.
    #[error("parse error on line {line}: {message}")]
    Parse {
        /// The 1-based line in the constraint source.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// Returned when a constraint source or snapshot cannot be read or written.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = core::result::Result<T, Error>;
