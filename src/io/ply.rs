//! PLY (Stanford polygon) format support.
//!
//! This module provides loading and saving of meshes in the PLY format,
//! including vertex and edge selection flags.
//!
//! Recognised elements:
//!
//! - `vertex`: `x`, `y`, `z` and an optional integer `selected`;
//! - `edge`: `vertex1`, `vertex2` and an optional integer `selected`;
//! - `face`: `vertex_indices` (or `vertex_index`); boundaries become edges.
//!
//! Edges without an explicit `selected` flag, face boundaries included, are
//! selected iff both endpoints are.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use nalgebra::Point3;
use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Property};

use crate::error::{MeshError, Result};
use crate::mesh::{build_from_edges, to_edge_list, EdgeMesh, MeshIndex, VertexId};

/// Load a mesh from a PLY file.
///
/// # Example
///
/// ```no_run
/// use loopspan::io::ply;
/// use loopspan::mesh::EdgeMesh;
///
/// let mesh: EdgeMesh = ply::load("outline.ply").unwrap();
/// println!("{} selected", mesh.num_selected());
/// ```
pub fn load<P: AsRef<Path>, I: MeshIndex>(path: P) -> Result<EdgeMesh<I>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let parser = Parser::<DefaultElement>::new();
    let ply = parser
        .read_ply(&mut reader)
        .map_err(|e| MeshError::load(path, e.to_string()))?;

    // Vertices
    let vertex_element = ply
        .payload
        .get("vertex")
        .ok_or_else(|| MeshError::load(path, "PLY file has no vertex element"))?;

    let mut positions: Vec<Point3<f64>> = Vec::with_capacity(vertex_element.len());
    let mut vertex_selection: Vec<bool> = Vec::with_capacity(vertex_element.len());
    for vertex in vertex_element {
        let x = get_float_property(vertex, "x")
            .ok_or_else(|| MeshError::load(path, "vertex missing x coordinate"))?;
        let y = get_float_property(vertex, "y")
            .ok_or_else(|| MeshError::load(path, "vertex missing y coordinate"))?;
        let z = get_float_property(vertex, "z")
            .ok_or_else(|| MeshError::load(path, "vertex missing z coordinate"))?;
        positions.push(Point3::new(x, y, z));
        vertex_selection.push(get_int_property(vertex, "selected").is_some_and(|s| s != 0));
    }

    // Explicit edges
    let mut edges: Vec<[usize; 2]> = Vec::new();
    let mut edge_selection: Vec<Option<bool>> = Vec::new();
    if let Some(edge_element) = ply.payload.get("edge") {
        for edge in edge_element {
            let a = get_int_property(edge, "vertex1")
                .ok_or_else(|| MeshError::load(path, "edge missing vertex1"))?;
            let b = get_int_property(edge, "vertex2")
                .ok_or_else(|| MeshError::load(path, "edge missing vertex2"))?;
            let (a, b) = match (usize::try_from(a), usize::try_from(b)) {
                (Ok(a), Ok(b)) => (a, b),
                _ => return Err(MeshError::load(path, "negative edge vertex index")),
            };
            edges.push([a, b]);
            edge_selection.push(get_int_property(edge, "selected").map(|s| s != 0));
        }
    }

    // Face boundaries
    if let Some(face_element) = ply.payload.get("face") {
        for face in face_element {
            let indices = get_list_property(face, "vertex_indices")
                .or_else(|| get_list_property(face, "vertex_index"))
                .ok_or_else(|| MeshError::load(path, "face missing vertex_indices property"))?;
            let n = indices.len();
            if n < 2 {
                continue;
            }
            let closing = if n > 2 { n } else { 1 };
            for i in 0..closing {
                let pair = [indices[i], indices[(i + 1) % n]];
                if pair[0] != pair[1] {
                    edges.push(pair);
                    edge_selection.push(None);
                }
            }
        }
    }

    let mut mesh: EdgeMesh<I> = build_from_edges(&positions, &edges)
        .map_err(|e| MeshError::load(path, e.to_string()))?;

    for (i, &selected) in vertex_selection.iter().enumerate() {
        mesh.set_selected(VertexId::new(i), selected);
    }

    // Edges without their own flag follow their endpoints.
    mesh.flush_edge_selection();
    for (&[a, b], selected) in edges.iter().zip(&edge_selection) {
        if let (Some(e), Some(selected)) =
            (mesh.find_edge(VertexId::new(a), VertexId::new(b)), selected)
        {
            mesh.set_edge_selected(e, *selected);
        }
    }

    Ok(mesh)
}

fn get_float_property(element: &DefaultElement, name: &str) -> Option<f64> {
    match element.get(name)? {
        Property::Float(v) => Some(*v as f64),
        Property::Double(v) => Some(*v),
        Property::Int(v) => Some(*v as f64),
        Property::UInt(v) => Some(*v as f64),
        Property::Short(v) => Some(*v as f64),
        Property::UShort(v) => Some(*v as f64),
        Property::Char(v) => Some(*v as f64),
        Property::UChar(v) => Some(*v as f64),
        _ => None,
    }
}

fn get_int_property(element: &DefaultElement, name: &str) -> Option<i64> {
    match element.get(name)? {
        Property::Char(v) => Some(*v as i64),
        Property::UChar(v) => Some(*v as i64),
        Property::Short(v) => Some(*v as i64),
        Property::UShort(v) => Some(*v as i64),
        Property::Int(v) => Some(*v as i64),
        Property::UInt(v) => Some(*v as i64),
        _ => None,
    }
}

fn get_list_property(element: &DefaultElement, name: &str) -> Option<Vec<usize>> {
    match element.get(name)? {
        Property::ListInt(v) => Some(v.iter().map(|&x| x as usize).collect()),
        Property::ListUInt(v) => Some(v.iter().map(|&x| x as usize).collect()),
        Property::ListShort(v) => Some(v.iter().map(|&x| x as usize).collect()),
        Property::ListUShort(v) => Some(v.iter().map(|&x| x as usize).collect()),
        Property::ListChar(v) => Some(v.iter().map(|&x| x as usize).collect()),
        Property::ListUChar(v) => Some(v.iter().map(|&x| x as usize).collect()),
        _ => None,
    }
}

/// Save a mesh to a PLY file (ASCII format) with vertex and edge selection.
///
/// # Example
///
/// ```no_run
/// use loopspan::io::ply;
/// use loopspan::mesh::EdgeMesh;
///
/// let mesh: EdgeMesh = EdgeMesh::new();
/// ply::save(&mesh, "output.ply").unwrap();
/// ```
pub fn save<P: AsRef<Path>, I: MeshIndex>(mesh: &EdgeMesh<I>, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    let (positions, edges) = to_edge_list(mesh);

    // Write header
    writeln!(writer, "ply")?;
    writeln!(writer, "format ascii 1.0")?;
    writeln!(writer, "comment Generated by loopspan")?;
    writeln!(writer, "element vertex {}", positions.len())?;
    writeln!(writer, "property double x")?;
    writeln!(writer, "property double y")?;
    writeln!(writer, "property double z")?;
    writeln!(writer, "property uchar selected")?;
    writeln!(writer, "element edge {}", edges.len())?;
    writeln!(writer, "property int vertex1")?;
    writeln!(writer, "property int vertex2")?;
    writeln!(writer, "property uchar selected")?;
    writeln!(writer, "end_header")?;

    // Write vertices
    for (v, p) in mesh.vertex_ids().zip(&positions) {
        writeln!(writer, "{} {} {} {}", p.x, p.y, p.z, u8::from(mesh.is_selected(v)))?;
    }

    // Write edges
    for (e, [a, b]) in mesh.edge_ids().zip(&edges) {
        writeln!(writer, "{} {} {}", a, b, u8::from(mesh.edge(e).selected))?;
    }

    writer.flush()?;
    Ok(())
}
