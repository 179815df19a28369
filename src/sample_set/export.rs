use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::region::FeasibilityOracle;

use super::SampleSet;

impl<O: FeasibilityOracle> SampleSet<O> {
    /// Write the coordinates as a plain matrix: one row per member,
    /// space-delimited, no header.
    ///
    /// Values use Rust's shortest round-trip formatting, so reading a row
    /// back yields the exact stored coordinates.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if writing fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use feasible::{FeasibleRegion, SampleSet};
    ///
    /// let region = FeasibleRegion::new(vec![0.5, 0.25]).unwrap();
    /// let set = SampleSet::new(region).unwrap();
    ///
    /// let mut buf = Vec::new();
    /// set.write_matrix(&mut buf).unwrap();
    /// assert_eq!(String::from_utf8(buf).unwrap(), "0.5 0.25\n");
    /// ```
    pub fn write_matrix(&self, mut writer: impl Write) -> std::io::Result<()> {
        for point in &self.points {
            let mut values = point.coordinates.iter();
            if let Some(first) = values.next() {
                write!(writer, "{first}")?;
            }
            for value in values {
                write!(writer, " {value}")?;
            }
            writeln!(writer)?;
        }
        writer.flush()
    }

    /// Write the matrix to `path`.
    ///
    /// The file is replaced atomically, so readers never see a partial
    /// matrix.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be created, written or renamed.
    pub fn save_matrix(&self, path: impl AsRef<Path>) -> Result<()> {
        write_atomically(path.as_ref(), |writer| self.write_matrix(writer))?;
        Ok(())
    }
}

/// Write through a sibling temp file, then rename it over `path`.
pub(crate) fn write_atomically(
    path: &Path,
    write: impl FnOnce(&mut BufWriter<std::fs::File>) -> std::io::Result<()>,
) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    let mut writer = BufWriter::new(std::fs::File::create(&tmp_path)?);
    if let Err(e) = write(&mut writer).and_then(|()| writer.flush()) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e);
    }
    drop(writer);
    std::fs::rename(&tmp_path, path)
}
