//! Shader program compile/link helper.

use std::ffi::CString;

use gl::types::{GLchar, GLenum, GLint, GLuint};
use tracing::trace;

use crate::DrawError;

/// A linked GLSL program.
///
/// Uniform setters require the program to be bound (see
/// [`crate::ScopedShaderBinding`]).
pub struct GlShader {
    program: GLuint,
}

impl GlShader {
    pub fn compile(vertex_src: &str, fragment_src: &str) -> Result<Self, DrawError> {
        unsafe {
            let vertex = compile_stage(gl::VERTEX_SHADER, vertex_src)?;
            let fragment = match compile_stage(gl::FRAGMENT_SHADER, fragment_src) {
                Ok(fragment) => fragment,
                Err(err) => {
                    gl::DeleteShader(vertex);
                    return Err(err);
                }
            };

            let program = gl::CreateProgram();
            gl::AttachShader(program, vertex);
            gl::AttachShader(program, fragment);
            gl::LinkProgram(program);
            // Shader objects are reference-counted by the program.
            gl::DeleteShader(vertex);
            gl::DeleteShader(fragment);

            let mut status = 0;
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut status);
            if status == 0 {
                let log = program_info_log(program);
                gl::DeleteProgram(program);
                return Err(DrawError::Link(log));
            }

            trace!(program, "shader program linked");
            Ok(Self { program })
        }
    }

    pub fn id(&self) -> GLuint {
        self.program
    }

    pub fn set_i32(&self, name: &str, value: i32) {
        unsafe { gl::Uniform1i(self.uniform_location(name), value) }
    }

    pub fn set_vec2(&self, name: &str, x: f32, y: f32) {
        unsafe { gl::Uniform2f(self.uniform_location(name), x, y) }
    }

    fn uniform_location(&self, name: &str) -> GLint {
        let cname = CString::new(name).unwrap_or_default();
        unsafe { gl::GetUniformLocation(self.program, cname.as_ptr()) }
    }

    /// Delete the program. Idempotent; must run while the context is live.
    pub fn free(&mut self) {
        if self.program != 0 {
            unsafe { gl::DeleteProgram(self.program) }
            self.program = 0;
        }
    }
}

unsafe fn compile_stage(kind: GLenum, source: &str) -> Result<GLuint, DrawError> {
    let shader = unsafe { gl::CreateShader(kind) };
    if shader == 0 {
        return Err(DrawError::Allocation);
    }

    let src = CString::new(source).unwrap_or_default();
    unsafe {
        gl::ShaderSource(shader, 1, &src.as_ptr(), std::ptr::null());
        gl::CompileShader(shader);

        let mut status = 0;
        gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);
        if status == 0 {
            let log = shader_info_log(shader);
            gl::DeleteShader(shader);
            return Err(DrawError::Compile(log));
        }
    }
    Ok(shader)
}

unsafe fn shader_info_log(shader: GLuint) -> String {
    let mut len = 0;
    unsafe { gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len) };
    read_info_log(len, |capacity, written, buf| unsafe {
        gl::GetShaderInfoLog(shader, capacity, written, buf)
    })
}

unsafe fn program_info_log(program: GLuint) -> String {
    let mut len = 0;
    unsafe { gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len) };
    read_info_log(len, |capacity, written, buf| unsafe {
        gl::GetProgramInfoLog(program, capacity, written, buf)
    })
}

fn read_info_log(len: GLint, fetch: impl Fn(GLint, *mut GLint, *mut GLchar)) -> String {
    if len <= 0 {
        return String::new();
    }
    let mut buf = vec![0u8; len as usize];
    let mut written = 0;
    fetch(len, &mut written, buf.as_mut_ptr() as *mut GLchar);
    buf.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&buf).into_owned()
}
