//! Full-screen textured quad.

use gl::types::GLuint;

use crate::scope::ScopedVaoBinding;
use crate::DrawError;

// Two triangles covering clip space, with [0,1] UVs. Layout per vertex:
// vec4 position, vec2 uv — matching attribute locations 0 and 1.
#[rustfmt::skip]
const QUAD_VERTICES: [f32; 36] = [
    -1.0, -1.0, 0.0, 1.0,   0.0, 0.0,
     1.0, -1.0, 0.0, 1.0,   1.0, 0.0,
     1.0,  1.0, 0.0, 1.0,   1.0, 1.0,
    -1.0, -1.0, 0.0, 1.0,   0.0, 0.0,
     1.0,  1.0, 0.0, 1.0,   1.0, 1.0,
    -1.0,  1.0, 0.0, 1.0,   0.0, 1.0,
];

const STRIDE: i32 = 6 * std::mem::size_of::<f32>() as i32;

/// VAO/VBO pair for drawing one full-screen quad.
pub struct ScreenQuad {
    vao: GLuint,
    vbo: GLuint,
}

impl ScreenQuad {
    pub fn new() -> Result<Self, DrawError> {
        let mut vao = 0;
        let mut vbo = 0;
        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::GenBuffers(1, &mut vbo);
            if vao == 0 || vbo == 0 {
                gl::DeleteVertexArrays(1, &vao);
                gl::DeleteBuffers(1, &vbo);
                return Err(DrawError::Allocation);
            }

            let _vao_binding = ScopedVaoBinding::new(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                std::mem::size_of_val(&QUAD_VERTICES) as isize,
                QUAD_VERTICES.as_ptr().cast(),
                gl::STATIC_DRAW,
            );
            gl::EnableVertexAttribArray(0);
            gl::VertexAttribPointer(0, 4, gl::FLOAT, gl::FALSE, STRIDE, std::ptr::null());
            gl::EnableVertexAttribArray(1);
            gl::VertexAttribPointer(
                1,
                2,
                gl::FLOAT,
                gl::FALSE,
                STRIDE,
                (4 * std::mem::size_of::<f32>()) as *const _,
            );
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
        }
        Ok(Self { vao, vbo })
    }

    /// Draw the quad into the currently bound framebuffer, with whatever
    /// program and texture bindings the caller has scoped in.
    pub fn draw(&self) {
        let _vao_binding = ScopedVaoBinding::new(self.vao);
        unsafe { gl::DrawArrays(gl::TRIANGLES, 0, 6) }
    }

    /// Delete the GL objects. Idempotent; must run while the context is live.
    pub fn release(&mut self) {
        unsafe {
            if self.vbo != 0 {
                gl::DeleteBuffers(1, &self.vbo);
                self.vbo = 0;
            }
            if self.vao != 0 {
                gl::DeleteVertexArrays(1, &self.vao);
                self.vao = 0;
            }
        }
    }
}
