//! Wavefront OBJ format support (load only).
//!
//! Reads vertex positions (`v`), polylines (`l`) and polygon faces (`f`).
//! Face boundaries become edges. OBJ has no notion of selection, so every
//! vertex loads unselected.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use nalgebra::Point3;

use crate::error::{MeshError, Result};
use crate::mesh::{build_from_edges, EdgeMesh, MeshIndex};

/// Load a mesh from an OBJ file.
///
/// # Example
///
/// ```no_run
/// use loopspan::io::obj;
/// use loopspan::mesh::EdgeMesh;
///
/// let mesh: EdgeMesh = obj::load("outline.obj").unwrap();
/// ```
pub fn load<P: AsRef<Path>, I: MeshIndex>(path: P) -> Result<EdgeMesh<I>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    parse(reader).map_err(|e| match e {
        ParseError::Io(err) => MeshError::Io(err),
        ParseError::Line(line, message) => {
            MeshError::load(path, format!("line {}: {}", line, message))
        }
        ParseError::Mesh(err) => MeshError::load(path, err.to_string()),
    })
}

/// OBJ cannot carry selection state; saving always fails.
pub fn save<P: AsRef<Path>, I: MeshIndex>(_mesh: &EdgeMesh<I>, path: P) -> Result<()> {
    Err(MeshError::SaveError {
        path: path.as_ref().to_path_buf(),
        message: "OBJ cannot store selection; save as .ply".to_string(),
    })
}

#[derive(Debug)]
enum ParseError {
    Io(std::io::Error),
    Line(usize, String),
    Mesh(MeshError),
}

fn parse<R: BufRead, I: MeshIndex>(reader: R) -> std::result::Result<EdgeMesh<I>, ParseError> {
    let mut positions: Vec<Point3<f64>> = Vec::new();
    let mut edges: Vec<[usize; 2]> = Vec::new();

    for (n, line) in reader.lines().enumerate() {
        let line = line.map_err(ParseError::Io)?;
        let lineno = n + 1;
        let mut tokens = line.split_whitespace();

        match tokens.next() {
            Some("v") => {
                let coords: Vec<f64> = tokens
                    .take(3)
                    .map(|t| t.parse::<f64>())
                    .collect::<std::result::Result<_, _>>()
                    .map_err(|e| ParseError::Line(lineno, format!("bad coordinate: {}", e)))?;
                if coords.len() != 3 {
                    return Err(ParseError::Line(lineno, "vertex needs 3 coordinates".into()));
                }
                positions.push(Point3::new(coords[0], coords[1], coords[2]));
            }
            Some("l") => {
                let indices = parse_indices(tokens, positions.len(), lineno)?;
                edges.extend(indices.windows(2).map(|w| [w[0], w[1]]));
            }
            Some("f") => {
                let indices = parse_indices(tokens, positions.len(), lineno)?;
                if indices.len() >= 2 {
                    edges.extend(indices.windows(2).map(|w| [w[0], w[1]]));
                    if indices.len() > 2 {
                        edges.push([indices[indices.len() - 1], indices[0]]);
                    }
                }
            }
            _ => {}
        }
    }

    // Polygons share edges; drop repeats and collapsed pairs.
    edges.retain(|e| e[0] != e[1]);
    build_from_edges(&positions, &edges).map_err(ParseError::Mesh)
}

/// Resolve OBJ element references (`i`, `i/t`, `i/t/n`, `i//n`) to 0-based
/// vertex indices. Negative indices count back from the last vertex read.
fn parse_indices<'a, T>(
    tokens: T,
    num_vertices: usize,
    lineno: usize,
) -> std::result::Result<Vec<usize>, ParseError>
where
    T: Iterator<Item = &'a str>,
{
    tokens
        .map(|token| {
            let head = token.split('/').next().unwrap_or(token);
            let raw: i64 = head
                .parse()
                .map_err(|_| ParseError::Line(lineno, format!("bad index '{}'", token)))?;
            let resolved = match raw {
                r if r > 0 => r - 1,
                r if r < 0 => num_vertices as i64 + r,
                _ => -1,
            };
            if resolved < 0 || resolved as usize >= num_vertices {
                return Err(ParseError::Line(
                    lineno,
                    format!("index {} out of range", raw),
                ));
            }
            Ok(resolved as usize)
        })
        .collect()
}
