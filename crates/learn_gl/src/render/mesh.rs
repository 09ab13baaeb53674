//! Static geometry
//!
//! Vertices carry a position, a color and a texture coordinate, interleaved in
//! one buffer. Meshes are built once on the CPU, validated, then uploaded by
//! [`crate::render::buffer::GpuMesh`].

use bytemuck::{Pod, Zeroable};
use std::mem::{offset_of, size_of};

/// Interleaved vertex
///
/// `#[repr(C)]` keeps the field order and offsets that [`VertexLayout`] reports
/// to `glVertexAttribPointer`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in normalized device coordinates
    pub position: [f32; 3],
    /// RGB color
    pub color: [f32; 3],
    /// Texture coordinate, (0, 0) at the bottom-left of the image
    pub tex_coords: [f32; 2],
}

impl Vertex {
    /// Create a vertex
    pub const fn new(position: [f32; 3], color: [f32; 3], tex_coords: [f32; 2]) -> Self {
        Self { position, color, tex_coords }
    }
}

/// One vertex attribute as seen by the vertex shader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// `layout (location = N)` in GLSL
    pub location: u32,
    /// Number of float components
    pub components: i32,
    /// Byte offset inside [`Vertex`]
    pub offset: usize,
}

/// Attribute layout of [`Vertex`]
pub struct VertexLayout;

impl VertexLayout {
    /// Distance in bytes between consecutive vertices
    pub const fn stride() -> usize {
        size_of::<Vertex>()
    }

    /// Position (location 0), color (location 1), texture coordinate (location 2)
    pub const fn attributes() -> [VertexAttribute; 3] {
        [
            VertexAttribute { location: 0, components: 3, offset: offset_of!(Vertex, position) },
            VertexAttribute { location: 1, components: 3, offset: offset_of!(Vertex, color) },
            VertexAttribute { location: 2, components: 2, offset: offset_of!(Vertex, tex_coords) },
        ]
    }
}

/// CPU-side geometry with an optional index list
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Vertex data
    pub vertices: Vec<Vertex>,
    /// Triangle indices into `vertices`; `None` draws vertices in order
    pub indices: Option<Vec<u32>>,
}

impl Mesh {
    /// Create a mesh drawn without an index buffer
    pub const fn new(vertices: Vec<Vertex>) -> Self {
        Self { vertices, indices: None }
    }

    /// Create an indexed mesh
    pub const fn indexed(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices: Some(indices) }
    }

    /// Single triangle with red, green and blue corners
    pub fn colored_triangle() -> Self {
        Self::new(vec![
            Vertex::new([0.5, -0.5, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0]), // bottom right
            Vertex::new([-0.5, -0.5, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0]), // bottom left
            Vertex::new([0.0, 0.5, 0.0], [0.0, 0.0, 1.0], [0.5, 1.0]), // top
        ])
    }

    /// Rectangle made of two triangles sharing the bottom-right/top-left diagonal
    pub fn textured_quad() -> Self {
        Self::indexed(
            vec![
                Vertex::new([0.5, 0.5, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0]), // top right
                Vertex::new([0.5, -0.5, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0]), // bottom right
                Vertex::new([-0.5, -0.5, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0]), // bottom left
                Vertex::new([-0.5, 0.5, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0]), // top left
            ],
            vec![
                0, 1, 3, // first triangle
                1, 2, 3, // second triangle
            ],
        )
    }

    /// Number of elements passed to the draw call
    pub fn draw_count(&self) -> usize {
        self.indices.as_ref().map_or(self.vertices.len(), Vec::len)
    }

    /// Vertex data as raw bytes
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index data as raw bytes, if indexed
    pub fn index_bytes(&self) -> Option<&[u8]> {
        self.indices.as_deref().map(bytemuck::cast_slice)
    }

    /// Check that the mesh describes whole triangles with in-range indices
    pub fn validate(&self) -> Result<(), String> {
        if self.vertices.is_empty() {
            return Err("mesh has no vertices".to_string());
        }

        match &self.indices {
            Some(indices) => {
                if indices.is_empty() || indices.len() % 3 != 0 {
                    return Err(format!(
                        "index count {} is not a positive multiple of 3",
                        indices.len()
                    ));
                }
                let vertex_count = self.vertices.len();
                if let Some(bad) = indices.iter().find(|&&i| i as usize >= vertex_count) {
                    return Err(format!("index {bad} out of range for {vertex_count} vertices"));
                }
            }
            None => {
                if self.vertices.len() % 3 != 0 {
                    return Err(format!(
                        "vertex count {} is not a multiple of 3",
                        self.vertices.len()
                    ));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout() {
        assert_eq!(VertexLayout::stride(), 8 * size_of::<f32>());

        let [position, color, tex_coords] = VertexLayout::attributes();
        assert_eq!((position.location, position.components, position.offset), (0, 3, 0));
        assert_eq!((color.location, color.components, color.offset), (1, 3, 12));
        assert_eq!((tex_coords.location, tex_coords.components, tex_coords.offset), (2, 2, 24));
    }

    #[test]
    fn test_triangle_preset() {
        let mesh = Mesh::colored_triangle();
        assert!(mesh.validate().is_ok());
        assert!(mesh.indices.is_none());
        assert_eq!(mesh.draw_count(), 3);
        assert_eq!(mesh.vertex_bytes().len(), 3 * 32);
        assert!(mesh.index_bytes().is_none());
    }

    #[test]
    fn test_quad_preset() {
        let mesh = Mesh::textured_quad();
        assert!(mesh.validate().is_ok());
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.as_deref(), Some(&[0, 1, 3, 1, 2, 3][..]));
        assert_eq!(mesh.draw_count(), 6);
        assert_eq!(mesh.index_bytes().map(<[u8]>::len), Some(6 * 4));

        // Corners map onto the matching texture corners
        for vertex in &mesh.vertices {
            assert_eq!(vertex.tex_coords[0], vertex.position[0] + 0.5);
            assert_eq!(vertex.tex_coords[1], vertex.position[1] + 0.5);
        }
    }

    #[test]
    fn test_vertex_bytes_are_interleaved() {
        let mesh = Mesh::colored_triangle();
        let floats: &[f32] = bytemuck::cast_slice(mesh.vertex_bytes());
        assert_eq!(&floats[0..8], &[0.5, -0.5, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_validation_failures() {
        assert!(Mesh::new(Vec::new()).validate().is_err());

        let two = Mesh::colored_triangle().vertices[..2].to_vec();
        assert!(Mesh::new(two).validate().is_err());

        let vertices = Mesh::textured_quad().vertices;
        assert!(Mesh::indexed(vertices.clone(), vec![0, 1]).validate().is_err());
        assert!(Mesh::indexed(vertices.clone(), Vec::new()).validate().is_err());

        let err = Mesh::indexed(vertices, vec![0, 1, 4]).validate().unwrap_err();
        assert!(err.contains("index 4"));
    }
}
