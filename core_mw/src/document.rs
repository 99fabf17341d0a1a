//! The JSON file stored next to each annotated image
//!
//! ```json
//! {
//!   "dimensions": { "width": 2, "height": 1 },
//!   "cells": [[9, 12]]
//! }
//! ```

use anyhow::{anyhow, Context, Error};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

/// The persisted form of a grid
///
/// Cells are plain integers here; use [`GridDocument::validate`] before trusting them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDocument {
    pub dimensions: Dimensions,
    /// Indexed by `cells[y][x]`
    pub cells: Vec<Vec<u8>>,
}

impl GridDocument {
    pub fn new(width: usize, height: usize, cells: Vec<Vec<u8>>) -> Self {
        Self {
            dimensions: Dimensions { width, height },
            cells,
        }
    }

    /// Parse a document; fails on malformed JSON, missing fields, or cells that are not
    /// integers in 0-255
    pub fn from_json(text: &str) -> Result<Self, Error> {
        serde_json::from_str(text).context("Invalid grid data format")
    }

    /// Pretty-printed with two space indentation
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn read(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn write(&self, path: &Path) -> Result<(), Error> {
        fs::write(path, self.to_json()?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Saved grid configuration to {}", path.display());
        Ok(())
    }

    /// Check that the document describes exactly an `expected_width` by `expected_height` grid
    /// with every cell in 0-15
    ///
    /// ```
    /// use core_mw::document::GridDocument;
    ///
    /// let doc = GridDocument::new(2, 1, vec![vec![9, 16]]);
    /// let v = doc.validate(2, 1);
    /// assert_eq!(
    ///     format!("{}", v.unwrap_err()),
    ///     "Cell (1, 0) has wall mask 16, expected 0-15"
    /// );
    /// ```
    pub fn validate(&self, expected_width: usize, expected_height: usize) -> Result<(), Error> {
        let Dimensions { width, height } = self.dimensions;
        if width != expected_width || height != expected_height {
            return Err(anyhow!(
                "Grid data is {width}x{height}, expected {expected_width}x{expected_height}"
            ));
        }
        if self.cells.len() != height {
            return Err(anyhow!(
                "Grid data has {} rows, expected {height}",
                self.cells.len()
            ));
        }
        for (y, row) in self.cells.iter().enumerate() {
            if row.len() != width {
                return Err(anyhow!(
                    "Row {y} has {} cells, expected {width}",
                    row.len()
                ));
            }
            if let Some((x, bits)) = row.iter().enumerate().find(|(_, bits)| **bits > 15) {
                return Err(anyhow!(
                    "Cell ({x}, {y}) has wall mask {bits}, expected 0-15"
                ));
            }
        }
        Ok(())
    }

    pub fn is_valid(&self, expected_width: usize, expected_height: usize) -> bool {
        self.validate(expected_width, expected_height).is_ok()
    }
}

/// Free-standing form of [`GridDocument::validate`]
pub fn validate_document(
    doc: &GridDocument,
    expected_width: usize,
    expected_height: usize,
) -> Result<(), Error> {
    doc.validate(expected_width, expected_height)
}

pub fn validate(doc: &GridDocument, expected_width: usize, expected_height: usize) -> bool {
    doc.is_valid(expected_width, expected_height)
}

/// Parse and validate in one step; false for anything that isn't a well formed document of the
/// expected size
pub fn validate_json(text: &str, expected_width: usize, expected_height: usize) -> bool {
    GridDocument::from_json(text).is_ok_and(|doc| doc.is_valid(expected_width, expected_height))
}

/// Where the grid for an image is stored: the image path with its extension replaced by `.json`
///
/// ```
/// use core_mw::document::sidecar_path;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(sidecar_path(Path::new("mazes/a.png")), PathBuf::from("mazes/a.json"));
/// assert_eq!(sidecar_path(Path::new("maze")), PathBuf::from("maze.json"));
/// ```
pub fn sidecar_path(image: &Path) -> PathBuf {
    image.with_extension("json")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{"dimensions":{"width":2,"height":2},"cells":[[9,12],[3,6]]}"#;

    #[test]
    fn parse_sample() {
        let doc = GridDocument::from_json(SAMPLE).unwrap();
        assert_eq!(doc.dimensions, Dimensions { width: 2, height: 2 });
        assert_eq!(doc.cells, vec![vec![9, 12], vec![3, 6]]);
        assert!(doc.is_valid(2, 2));
    }

    #[test]
    fn pretty_output() {
        let doc = GridDocument::new(1, 1, vec![vec![15]]);
        assert_eq!(
            doc.to_json().unwrap(),
            "{\n  \"dimensions\": {\n    \"width\": 1,\n    \"height\": 1\n  },\n  \"cells\": [\n    [\n      15\n    ]\n  ]\n}"
        );
    }

    #[test]
    fn malformed_json() {
        let v = GridDocument::from_json("{\"dimensions\":");
        assert!(v.is_err());
        assert_eq!(format!("{}", v.unwrap_err()), "Invalid grid data format");

        assert!(GridDocument::from_json(r#"{"cells":[[0]]}"#).is_err());
        assert!(
            GridDocument::from_json(r#"{"dimensions":{"width":1,"height":1},"cells":[[1.5]]}"#)
                .is_err()
        );
        assert!(
            GridDocument::from_json(r#"{"dimensions":{"width":1,"height":1},"cells":[[-1]]}"#)
                .is_err()
        );
    }

    #[test]
    fn dimension_mismatch() {
        let doc = GridDocument::from_json(SAMPLE).unwrap();
        let v = doc.validate(3, 2);
        assert!(v.is_err());
        assert_eq!(
            format!("{}", v.unwrap_err()),
            "Grid data is 2x2, expected 3x2"
        );
    }

    #[test]
    fn shape_mismatch() {
        let mut doc = GridDocument::from_json(SAMPLE).unwrap();
        doc.cells.push(vec![0, 0]);
        assert_eq!(
            format!("{}", doc.validate(2, 2).unwrap_err()),
            "Grid data has 3 rows, expected 2"
        );

        let mut doc = GridDocument::from_json(SAMPLE).unwrap();
        doc.cells[1].pop();
        assert_eq!(
            format!("{}", doc.validate(2, 2).unwrap_err()),
            "Row 1 has 1 cells, expected 2"
        );
    }

    #[test]
    fn free_validators() {
        let doc = GridDocument::from_json(SAMPLE).unwrap();
        assert!(validate(&doc, 2, 2));
        assert!(!validate(&doc, 1, 1));
        assert!(validate_document(&doc, 2, 2).is_ok());
    }

    #[test]
    fn validate_json_text() {
        assert!(validate_json(SAMPLE, 2, 2));
        assert!(!validate_json(SAMPLE, 2, 3));
        assert!(!validate_json("not json", 2, 2));
        assert!(!validate_json(
            r#"{"dimensions":{"width":1,"height":1},"cells":[[16]]}"#,
            1,
            1
        ));
    }

    #[test]
    fn sidecar_replaces_last_extension() {
        assert_eq!(
            sidecar_path(Path::new("/data/maze.v2.jpeg")),
            PathBuf::from("/data/maze.v2.json")
        );
    }

    #[test]
    fn write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid_config.json");
        let doc = GridDocument::from_json(SAMPLE).unwrap();

        doc.write(&path).unwrap();
        assert_eq!(GridDocument::read(&path).unwrap(), doc);
    }

    #[test]
    fn read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let v = GridDocument::read(&path);
        assert!(v.is_err());
        assert!(format!("{}", v.unwrap_err()).starts_with("Failed to read"));
    }
}
