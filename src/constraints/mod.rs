//! Loading regions from constraint sources.
//!
//! A constraint source is line oriented. Blank lines and `#` comments are
//! skipped; the first remaining line holds the dimension `n`, the second the
//! example point, and every further line one predicate:
//!
//! ```text
//! # a triangle in the unit square
//! 2
//! [0.25, 0.25]
//! x0 + x1 <= 1
//! 0.1 <= x[0] <= 0.9   # chained comparisons
//! ```
//!
//! Predicates use `x[i]` or `xi` for coordinates, the usual arithmetic
//! operators with `^`/`**` for powers, comparisons, `and`/`or`/`not` (or
//! `&&`/`||`/`!`), the constants `pi`, `e`, `true`, `false` and the
//! functions `abs sqrt exp ln log sin cos tan min max pow`. Each predicate is
//! compiled once, type checked, and range checked against `n`.

mod expr;
mod lexer;
mod parser;

use std::path::Path;

use crate::error::{Error, Result};
use crate::region::FeasibleRegion;

use self::parser::parse_predicate;

impl FeasibleRegion {
    /// Parses a region from constraint source text.
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse` with the 1-based line of the first malformed
    /// line, and `Error::InvalidOrigin` if the example point lies outside the
    /// unit hypercube or violates a predicate.
    ///
    /// # Examples
    ///
    /// ```
    /// use feasible::{FeasibilityOracle, FeasibleRegion};
    ///
    /// let region = FeasibleRegion::from_source(
    ///     "2\n0.5 0.5\n(x0 - 0.5)^2 + (x1 - 0.5)^2 <= 0.25\n",
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(region.dimension(), 2);
    /// assert!(region.is_feasible(&[0.6, 0.6]));
    /// assert!(!region.is_feasible(&[0.0, 0.0]));
    /// ```
    pub fn from_source(source: &str) -> Result<Self> {
        let mut lines = source
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, strip_comment(line).trim()))
            .filter(|(_, line)| !line.is_empty());

        let last_line = source.lines().count().max(1);
        let (line, text) = lines.next().ok_or_else(|| Error::Parse {
            line: last_line,
            message: "missing dimension".to_string(),
        })?;
        let dimension = parse_dimension(text).map_err(|message| Error::Parse { line, message })?;

        let (line, text) = lines.next().ok_or_else(|| Error::Parse {
            line: last_line,
            message: "missing example point".to_string(),
        })?;
        let example =
            parse_example(text, dimension).map_err(|message| Error::Parse { line, message })?;

        let mut region = Self::new(example)?;
        for (line, text) in lines {
            let predicate =
                parse_predicate(text, dimension).map_err(|message| Error::Parse { line, message })?;
            region = region.with_predicate(move |x| predicate.eval(x));
        }

        trace_debug!(
            dimension,
            predicates = region.n_predicates(),
            "loaded constraint source"
        );
        region.validate()
    }

    /// Reads and parses a constraint file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read, otherwise the errors
    /// of [`from_source`](Self::from_source).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_source(&source)
    }
}

fn strip_comment(line: &str) -> &str {
    line.split_once('#').map_or(line, |(content, _)| content)
}

fn parse_dimension(text: &str) -> core::result::Result<usize, String> {
    match text.parse::<usize>() {
        Ok(0) => Err("dimension must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("expected a positive integer dimension, found '{text}'")),
    }
}

/// Accepts whitespace and/or commas between values, optionally in brackets.
fn parse_example(text: &str, dimension: usize) -> core::result::Result<Vec<f64>, String> {
    let inner = text
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(text);

    let example = inner
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|field| !field.is_empty())
        .map(|field| {
            field
                .parse::<f64>()
                .map_err(|_| format!("invalid coordinate '{field}'"))
        })
        .collect::<core::result::Result<Vec<f64>, String>>()?;

    if example.len() == dimension {
        Ok(example)
    } else {
        Err(format!(
            "expected {dimension} coordinates in the example point, found {}",
            example.len()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::FeasibilityOracle;

    #[test]
    fn test_parse_example_formats() {
        assert_eq!(parse_example("0.1 0.2", 2).unwrap(), vec![0.1, 0.2]);
        assert_eq!(parse_example("0.1,0.2", 2).unwrap(), vec![0.1, 0.2]);
        assert_eq!(parse_example("[0.1, 0.2]", 2).unwrap(), vec![0.1, 0.2]);
        assert!(parse_example("0.1", 2).unwrap_err().contains("expected 2"));
        assert!(parse_example("0.1 abc", 2).unwrap_err().contains("'abc'"));
    }

    #[test]
    fn test_parse_dimension() {
        assert_eq!(parse_dimension("3"), Ok(3));
        assert!(parse_dimension("0").is_err());
        assert!(parse_dimension("-2").is_err());
        assert!(parse_dimension("two").is_err());
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let source = "\
# header comment

3   # dimension
0.2 0.2 0.2
# a predicate follows
x0 + x1 + x2 <= 1   # simplex
";
        let region = FeasibleRegion::from_source(source).unwrap();
        assert_eq!(region.dimension(), 3);
        assert_eq!(region.n_predicates(), 1);
        assert!(region.is_feasible(&[0.3, 0.3, 0.3]));
        assert!(!region.is_feasible(&[0.5, 0.5, 0.5]));
    }

    #[test]
    fn test_error_line_numbers() {
        let source = "2\n\n0.5 0.5\nx0 < 1\nx0 <\n";
        let err = FeasibleRegion::from_source(source).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 5, .. }), "{err}");
    }

    #[test]
    fn test_missing_sections() {
        assert!(matches!(
            FeasibleRegion::from_source(""),
            Err(Error::Parse { line: 1, .. })
        ));
        assert!(matches!(
            FeasibleRegion::from_source("# only a comment\n2\n"),
            Err(Error::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn test_infeasible_example_is_invalid_origin() {
        let err = FeasibleRegion::from_source("1\n0.8\nx0 <= 0.5\n").unwrap_err();
        assert!(matches!(err, Error::InvalidOrigin { .. }));

        let err = FeasibleRegion::from_source("1\n1.5\n").unwrap_err();
        assert!(matches!(err, Error::InvalidOrigin { .. }));
    }

    #[test]
    fn test_from_file_missing_is_io_error() {
        let result = FeasibleRegion::from_file("/nonexistent/feasible/constraints.txt");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
