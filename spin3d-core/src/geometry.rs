/// Geometry primitives for 3D rendering
use std::fmt;

use nalgebra::Point3;

/// Error raised when mesh construction data is inconsistent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshError {
    /// A triangle references a vertex index outside the vertex list
    IndexOutOfRange {
        triangle: usize,
        index: usize,
        vertex_count: usize,
    },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange {
                triangle,
                index,
                vertex_count,
            } => write!(
                f,
                "triangle {triangle} references vertex {index}, but the mesh has {vertex_count} vertices"
            ),
        }
    }
}

impl std::error::Error for MeshError {}

/// A triangle face defined by three vertex indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    pub indices: [usize; 3],
}

impl Triangle {
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        Self { indices: [a, b, c] }
    }
}

/// An indexed 3D mesh: a vertex list plus triangles referencing it.
///
/// Every triangle index is validated once at construction; the mesh is
/// immutable afterwards, so the invariant holds for its whole lifetime.
#[derive(Debug, Clone)]
pub struct Mesh {
    vertices: Vec<Point3<f32>>,
    triangles: Vec<Triangle>,
}

impl Mesh {
    /// Build a mesh, rejecting the first triangle index that falls
    /// outside the vertex list.
    pub fn new(vertices: Vec<Point3<f32>>, triangles: Vec<Triangle>) -> Result<Self, MeshError> {
        for (t, triangle) in triangles.iter().enumerate() {
            for &index in &triangle.indices {
                if index >= vertices.len() {
                    return Err(MeshError::IndexOutOfRange {
                        triangle: t,
                        index,
                        vertex_count: vertices.len(),
                    });
                }
            }
        }
        Ok(Self {
            vertices,
            triangles,
        })
    }

    pub fn vertices(&self) -> &[Point3<f32>] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Create an axis-aligned cube with edge length `size`, centered on
    /// the origin: 8 vertices, 12 triangles.
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        let vertices = vec![
            Point3::new(-half, -half, -half),
            Point3::new(half, -half, -half),
            Point3::new(half, half, -half),
            Point3::new(-half, half, -half),
            Point3::new(-half, -half, half),
            Point3::new(half, -half, half),
            Point3::new(half, half, half),
            Point3::new(-half, half, half),
        ];
        let triangles = vec![
            // Front
            Triangle::new(0, 1, 2),
            Triangle::new(2, 3, 0),
            // Back
            Triangle::new(4, 5, 6),
            Triangle::new(6, 7, 4),
            // Bottom
            Triangle::new(2, 6, 7),
            Triangle::new(7, 3, 2),
            // Top
            Triangle::new(0, 4, 5),
            Triangle::new(5, 1, 0),
            // Left
            Triangle::new(0, 4, 7),
            Triangle::new(7, 3, 0),
            // Right
            Triangle::new(1, 5, 6),
            Triangle::new(6, 2, 1),
        ];
        // Indices above are all < 8, so construction cannot fail
        Self {
            vertices,
            triangles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_counts() {
        let mesh = Mesh::cube(2.0);
        assert_eq!(mesh.vertices().len(), 8);
        assert_eq!(mesh.triangles().len(), 12);
    }

    #[test]
    fn test_cube_extent() {
        let mesh = Mesh::cube(2.0);
        for v in mesh.vertices() {
            assert!((v.x.abs() - 1.0).abs() < 1e-6);
            assert!((v.y.abs() - 1.0).abs() < 1e-6);
            assert!((v.z.abs() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_valid_mesh_accepted() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let mesh = Mesh::new(vertices, vec![Triangle::new(0, 1, 2)]);
        assert!(mesh.is_ok());
    }

    #[test]
    fn test_out_of_range_index_rejected() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let result = Mesh::new(vertices, vec![Triangle::new(0, 1, 3)]);
        assert_eq!(
            result.err(),
            Some(MeshError::IndexOutOfRange {
                triangle: 0,
                index: 3,
                vertex_count: 3,
            })
        );
    }
}
