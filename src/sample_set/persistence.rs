#[cfg(feature = "serde")]
use std::path::Path;

#[cfg(feature = "serde")]
use crate::error::{Error, Result};
#[cfg(feature = "serde")]
use crate::point::{Point, usable_log_density};
#[cfg(feature = "serde")]
use crate::region::FeasibilityOracle;

#[cfg(feature = "serde")]
use super::export::write_atomically;
#[cfg(feature = "serde")]
use super::{SampleSet, SampleSetBuilder};

#[cfg(feature = "serde")]
const SNAPSHOT_VERSION: u32 = 1;

/// A serializable snapshot of a sample set's members.
///
/// The region holds compiled predicates and cannot be serialized, so only the
/// points travel. Restoring pairs them with a region again and checks every
/// point against it.
///
/// # Schema versioning
///
/// The `version` field enables future schema evolution without breaking
/// existing files. The current version is `1`.
///
/// # Random state
///
/// The random source is not included. A restored set draws from whatever
/// seed the restoring builder carries.
#[cfg(feature = "serde")]
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SampleSetSnapshot {
    /// Schema version for forward compatibility.
    pub version: u32,
    /// Dimension of the sampled region.
    pub dimension: usize,
    /// Members in insertion order.
    pub points: Vec<Point>,
}

#[cfg(feature = "serde")]
impl<O: FeasibilityOracle> SampleSet<O> {
    /// Capture the current members.
    #[must_use]
    pub fn snapshot(&self) -> SampleSetSnapshot {
        SampleSetSnapshot {
            version: SNAPSHOT_VERSION,
            dimension: self.region.dimension(),
            points: self.points.clone(),
        }
    }

    /// Save the members to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be created or written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let snapshot = self.snapshot();
        write_atomically(path.as_ref(), |writer| {
            serde_json::to_writer_pretty(writer, &snapshot).map_err(std::io::Error::other)
        })?;
        Ok(())
    }

    /// Load a set saved with [`save`](Self::save) and attach it to `region`.
    ///
    /// Settings and the random seed come from `builder`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read or parsed, plus every
    /// error of [`SampleSetBuilder::restore`].
    ///
    /// # Examples
    ///
    /// ```
    /// use feasible::{FeasibleRegion, SampleSet};
    ///
    /// let region = FeasibleRegion::new(vec![0.5, 0.5])
    ///     .unwrap()
    ///     .with_predicate(|x| x[0] <= x[1] + 0.25);
    /// let mut set = SampleSet::builder().seed(1).build(&region).unwrap();
    /// set.grow(8).unwrap();
    ///
    /// let path = std::env::temp_dir().join("feasible-doc-snapshot.json");
    /// set.save(&path).unwrap();
    ///
    /// let restored = SampleSet::load(&path, &region, SampleSet::builder()).unwrap();
    /// assert_eq!(restored.points(), set.points());
    /// # std::fs::remove_file(&path).unwrap();
    /// ```
    pub fn load(path: impl AsRef<Path>, region: O, builder: SampleSetBuilder) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let snapshot: SampleSetSnapshot = serde_json::from_reader(std::io::BufReader::new(file))
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        builder.restore(snapshot, region)
    }
}

#[cfg(feature = "serde")]
impl SampleSetBuilder {
    /// Rebuild a set from a snapshot instead of seeding a fresh one.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidConfig` for bad settings or an unsupported snapshot
    ///   version
    /// - `Error::InvalidTargetCount` if the snapshot holds no points
    /// - `Error::DimensionMismatch` if the snapshot or any point disagrees
    ///   with the region's dimension
    /// - `Error::InvalidOrigin` for any point the region rejects or whose
    ///   stored log density is not finite
    pub fn restore<O: FeasibilityOracle>(
        self,
        snapshot: SampleSetSnapshot,
        region: O,
    ) -> Result<SampleSet<O>> {
        let config = self.resolve()?;

        if snapshot.version != SNAPSHOT_VERSION {
            return Err(Error::InvalidConfig(format!(
                "unsupported snapshot version {}",
                snapshot.version
            )));
        }
        if snapshot.points.is_empty() {
            return Err(Error::InvalidTargetCount(0));
        }

        let expected = region.dimension();
        if snapshot.dimension != expected {
            return Err(Error::DimensionMismatch {
                expected,
                got: snapshot.dimension,
            });
        }

        for point in &snapshot.points {
            if point.coordinates.len() != expected {
                return Err(Error::DimensionMismatch {
                    expected,
                    got: point.coordinates.len(),
                });
            }
            if !usable_log_density(point.log_density) || !region.is_feasible(&point.coordinates)
            {
                return Err(Error::InvalidOrigin {
                    point: point.coordinates.clone(),
                });
            }
        }

        trace_debug!(len = snapshot.points.len(), "restored sample set");

        Ok(SampleSet {
            rng: self.rng(),
            region,
            points: snapshot.points,
            config,
            stats: super::SearchStats::default(),
        })
    }
}
