//! Mesh file I/O.
//!
//! This module provides functions for loading and saving meshes in various formats.
//!
//! # Supported Formats
//!
//! | Format | Extension | Load | Save | Selection |
//! |--------|-----------|------|------|-----------|
//! | Wavefront OBJ | `.obj` | ✓ | ✗ | ✗ |
//! | PLY | `.ply` | ✓ | ✓ | vertex and edge `selected` |
//!
//! # Usage
//!
//! The easiest way to load and save meshes is using the automatic format detection:
//!
//! ```no_run
//! use loopspan::io::{load, read_selection, save};
//! use loopspan::mesh::EdgeMesh;
//!
//! let mut mesh: EdgeMesh = load("outline.obj").unwrap();
//! mesh.select_vertices(read_selection("picked.txt").unwrap()).unwrap();
//! save(&mesh, "outline.ply").unwrap();
//! ```

pub mod obj;
pub mod ply;

use std::fs;
use std::path::Path;

use crate::error::{MeshError, Result};
use crate::mesh::{EdgeMesh, MeshIndex};

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Wavefront OBJ format.
    Obj,
    /// PLY (Stanford polygon) format.
    Ply,
}

impl Format {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Format> {
        match ext.to_lowercase().as_str() {
            "obj" => Some(Format::Obj),
            "ply" => Some(Format::Ply),
            _ => None,
        }
    }

    /// Detect format from file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Format> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Format::from_extension)
    }
}

fn detect(path: &Path) -> Result<Format> {
    Format::from_path(path).ok_or_else(|| MeshError::UnsupportedFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    })
}

/// Load a mesh from a file with automatic format detection.
///
/// The format is determined by the file extension.
pub fn load<P: AsRef<Path>, I: MeshIndex>(path: P) -> Result<EdgeMesh<I>> {
    let path = path.as_ref();
    match detect(path)? {
        Format::Obj => obj::load(path),
        Format::Ply => ply::load(path),
    }
}

/// Save a mesh to a file with automatic format detection.
///
/// The format is determined by the file extension. Only PLY keeps the
/// selection, so saving to OBJ is an error.
pub fn save<P: AsRef<Path>, I: MeshIndex>(mesh: &EdgeMesh<I>, path: P) -> Result<()> {
    let path = path.as_ref();
    match detect(path)? {
        Format::Obj => obj::save(mesh, path),
        Format::Ply => ply::save(mesh, path),
    }
}

/// Read a list of vertex indices separated by whitespace and/or commas.
///
/// Lines starting with `#` are ignored.
pub fn read_selection<P: AsRef<Path>>(path: P) -> Result<Vec<usize>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    parse_selection(&text).map_err(|token| {
        MeshError::load(path, format!("invalid vertex index '{}'", token))
    })
}

fn parse_selection(text: &str) -> std::result::Result<Vec<usize>, String> {
    text.lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .flat_map(|line| line.split(|c: char| c == ',' || c.is_whitespace()))
        .filter(|token| !token.is_empty())
        .map(|token| token.parse::<usize>().map_err(|_| token.to_string()))
        .collect()
}
