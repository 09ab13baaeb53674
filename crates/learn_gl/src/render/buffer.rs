//! GPU-resident meshes
//!
//! A [`GpuMesh`] owns one vertex array object, the vertex buffer it reads
//! from and, for indexed meshes, the element buffer recorded in the VAO.

use gl::types::{GLsizei, GLsizeiptr, GLuint};
use std::ptr;

use crate::render::mesh::{Mesh, VertexLayout};
use crate::render::{RenderError, RenderResult};

/// How the mesh is submitted to `glDraw*`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DrawMode {
    Arrays { count: GLsizei },
    Elements { count: GLsizei },
}

/// Uploaded mesh, deleted on drop
pub struct GpuMesh {
    vao: GLuint,
    vbo: GLuint,
    ebo: Option<GLuint>,
    mode: DrawMode,
}

impl GpuMesh {
    /// Validate `mesh` and upload it with `STATIC_DRAW` usage
    pub fn upload(mesh: &Mesh) -> RenderResult<Self> {
        mesh.validate().map_err(RenderError::InvalidMesh)?;

        let mut gpu = Self {
            vao: 0,
            vbo: 0,
            ebo: None,
            mode: match mesh.indices {
                Some(ref indices) => DrawMode::Elements { count: indices.len() as GLsizei },
                None => DrawMode::Arrays { count: mesh.vertices.len() as GLsizei },
            },
        };

        let vertex_bytes = mesh.vertex_bytes();
        let stride = VertexLayout::stride() as GLsizei;

        // SAFETY: requires a current context. Buffer sizes come from the
        // slices passed alongside them; attribute offsets are within the
        // vertex stride.
        unsafe {
            gl::GenVertexArrays(1, &mut gpu.vao);
            gl::GenBuffers(1, &mut gpu.vbo);
            gl::BindVertexArray(gpu.vao);

            gl::BindBuffer(gl::ARRAY_BUFFER, gpu.vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                vertex_bytes.len() as GLsizeiptr,
                vertex_bytes.as_ptr().cast(),
                gl::STATIC_DRAW,
            );

            if let Some(index_bytes) = mesh.index_bytes() {
                let mut ebo = 0;
                gl::GenBuffers(1, &mut ebo);
                gpu.ebo = Some(ebo);
                // Recorded in the VAO, so it must stay bound until the VAO is unbound
                gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, ebo);
                gl::BufferData(
                    gl::ELEMENT_ARRAY_BUFFER,
                    index_bytes.len() as GLsizeiptr,
                    index_bytes.as_ptr().cast(),
                    gl::STATIC_DRAW,
                );
            }

            for attribute in VertexLayout::attributes() {
                gl::VertexAttribPointer(
                    attribute.location,
                    attribute.components,
                    gl::FLOAT,
                    gl::FALSE,
                    stride,
                    ptr::null::<u8>().wrapping_add(attribute.offset).cast(),
                );
                gl::EnableVertexAttribArray(attribute.location);
            }

            gl::BindVertexArray(0);
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
        }

        log::debug!(
            "Uploaded mesh: {} vertices, {} indices (vao {})",
            mesh.vertices.len(),
            mesh.indices.as_ref().map_or(0, Vec::len),
            gpu.vao
        );
        Ok(gpu)
    }

    /// Bind the vertex array and issue the draw call
    pub fn draw(&self) {
        // SAFETY: vao/ebo are live objects owned by self; counts match the uploaded data.
        unsafe {
            gl::BindVertexArray(self.vao);
            match self.mode {
                DrawMode::Arrays { count } => gl::DrawArrays(gl::TRIANGLES, 0, count),
                DrawMode::Elements { count } => {
                    gl::DrawElements(gl::TRIANGLES, count, gl::UNSIGNED_INT, ptr::null());
                }
            }
            gl::BindVertexArray(0);
        }
    }

    /// Whether the draw uses the element buffer
    pub const fn is_indexed(&self) -> bool {
        self.ebo.is_some()
    }
}

impl Drop for GpuMesh {
    fn drop(&mut self) {
        // SAFETY: names came from glGen* and are deleted exactly once.
        unsafe {
            gl::DeleteVertexArrays(1, &self.vao);
            gl::DeleteBuffers(1, &self.vbo);
            if let Some(ebo) = self.ebo {
                gl::DeleteBuffers(1, &ebo);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::mesh::Vertex;

    #[test]
    fn test_invalid_mesh_is_rejected_before_upload() {
        let mesh = Mesh::indexed(
            vec![Vertex::new([0.0; 3], [1.0; 3], [0.0; 2])],
            vec![0, 0, 2],
        );
        let result = GpuMesh::upload(&mesh);
        assert!(matches!(result, Err(RenderError::InvalidMesh(_))));
    }
}
