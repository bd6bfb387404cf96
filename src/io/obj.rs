//! Wavefront OBJ format support.
//!
//! This module reads and writes the subset of OBJ that position transfer
//! needs: `v` lines for vertex positions, `vt` lines for texture
//! coordinates, and `f` lines for polygons of any arity. Corners written
//! as `v/vt` or `v/vt/vn` attach the referenced texture coordinate to the
//! corner; normals and all other directives are ignored. Negative
//! (relative) indices are not supported.
//!
//! On load, per-corner texture coordinates become a UV layer named
//! [`DEFAULT_UV_LAYER`](crate::mesh::DEFAULT_UV_LAYER). A file must be
//! consistently textured: mixing corners with and without `vt` references
//! is an error. On save, only the first UV layer is written.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use nalgebra::{Point2, Point3};

use crate::error::{Result, TransferError};
use crate::mesh::{PolyMesh, DEFAULT_UV_LAYER};

/// Load a mesh from an OBJ file.
///
/// # Example
///
/// ```no_run
/// use uvtransfer::io::obj;
///
/// let mesh = obj::load("model.obj").unwrap();
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<PolyMesh> {
    let path = path.as_ref();
    let file = File::open(path)?;
    parse_obj(BufReader::new(file), path)
}

/// Save a mesh to an OBJ file.
///
/// # Example
///
/// ```no_run
/// use uvtransfer::io::obj;
/// use uvtransfer::mesh::PolyMesh;
///
/// let mesh = PolyMesh::new();
/// obj::save(&mesh, "output.obj").unwrap();
/// ```
pub fn save<P: AsRef<Path>>(mesh: &PolyMesh, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_obj(&mut writer, mesh, path)?;
    writer.flush()?;
    Ok(())
}

fn parse_obj<R: BufRead>(reader: R, path: &Path) -> Result<PolyMesh> {
    let mut mesh = PolyMesh::new();
    let mut uvs: Vec<Point2<f64>> = Vec::new();
    let mut corner_uvs: Vec<Option<Point2<f64>>> = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;
        let mut parts = line.split_whitespace();

        match parts.next() {
            Some("v") => {
                let x = parse_number(parts.next(), line_no, path)?;
                let y = parse_number(parts.next(), line_no, path)?;
                let z = parse_number(parts.next(), line_no, path)?;
                mesh.add_vertex(Point3::new(x, y, z));
            }
            Some("vt") => {
                let u = parse_number(parts.next(), line_no, path)?;
                let v = parse_number(parts.next(), line_no, path)?;
                uvs.push(Point2::new(u, v));
            }
            Some("f") => {
                let mut corners = Vec::new();
                let mut face_uvs = Vec::new();
                for token in parts {
                    let mut fields = token.split('/');
                    let vertex_field = fields.next().unwrap_or(token);
                    let vertex =
                        parse_index(vertex_field, mesh.num_vertices(), "vertex", line_no, path)?;
                    corners.push(vertex);

                    match fields.next() {
                        Some("") | None => face_uvs.push(None),
                        Some(uv_field) => {
                            let t = parse_index(uv_field, uvs.len(), "texture", line_no, path)?;
                            face_uvs.push(Some(uvs[t]));
                        }
                    }
                }

                mesh.add_polygon(&corners)
                    .map_err(|e| TransferError::LoadError {
                        path: path.to_path_buf(),
                        message: format!("line {}: {}", line_no, e),
                    })?;
                corner_uvs.extend(face_uvs);
            }
            // Comments, normals, groups, materials and other directives.
            _ => {}
        }
    }

    if corner_uvs.iter().any(|uv| uv.is_some()) {
        if corner_uvs.iter().any(|uv| uv.is_none()) {
            return Err(TransferError::LoadError {
                path: path.to_path_buf(),
                message: "file mixes textured and untextured face corners".to_string(),
            });
        }
        let coords = corner_uvs.into_iter().flatten().collect();
        mesh.add_uv_layer(DEFAULT_UV_LAYER, coords)?;
    }

    Ok(mesh)
}

fn write_obj<W: Write>(writer: &mut W, mesh: &PolyMesh, path: &Path) -> Result<()> {
    let layer = match mesh.uv_layers().first() {
        Some(layer) if layer.len() != mesh.num_corners() => {
            return Err(TransferError::SaveError {
                path: path.to_path_buf(),
                message: format!(
                    "UV layer {} has {} coordinates for a mesh with {} corners",
                    layer.name(),
                    layer.len(),
                    mesh.num_corners()
                ),
            });
        }
        other => other,
    };

    for position in mesh.positions() {
        writeln!(writer, "v {} {} {}", position.x, position.y, position.z)?;
    }
    if let Some(layer) = layer {
        for (_, uv) in layer.iter() {
            writeln!(writer, "vt {} {}", uv.x, uv.y)?;
        }
    }

    // Texture indices follow the global corner order the layer is stored in.
    let mut corner = 0;
    for polygon in mesh.polygons() {
        write!(writer, "f")?;
        for vertex in polygon.vertices() {
            if layer.is_some() {
                corner += 1;
                write!(writer, " {}/{}", vertex.index() + 1, corner)?;
            } else {
                write!(writer, " {}", vertex.index() + 1)?;
            }
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn parse_number(token: Option<&str>, line_no: usize, path: &Path) -> Result<f64> {
    let token = token.ok_or_else(|| TransferError::LoadError {
        path: path.to_path_buf(),
        message: format!("line {}: missing coordinate", line_no),
    })?;
    token.parse().map_err(|_| TransferError::LoadError {
        path: path.to_path_buf(),
        message: format!("line {}: invalid number {:?}", line_no, token),
    })
}

/// Parse a 1-based OBJ index field into a 0-based index.
fn parse_index(
    field: &str,
    count: usize,
    what: &str,
    line_no: usize,
    path: &Path,
) -> Result<usize> {
    let index: usize = field.parse().map_err(|_| TransferError::LoadError {
        path: path.to_path_buf(),
        message: format!("line {}: invalid {} index {:?}", line_no, what, field),
    })?;
    if index == 0 || index > count {
        return Err(TransferError::LoadError {
            path: path.to_path_buf(),
            message: format!(
                "line {}: {} index {} out of range (have {})",
                line_no, what, index, count
            ),
        });
    }
    Ok(index - 1)
}
