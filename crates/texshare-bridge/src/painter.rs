//! GPU effects behind a seam.
//!
//! A bridge needs exactly three GPU operations: allocate its cached
//! texture, delete it, and draw a texture full-screen with a given UV
//! extent. [`GlPainter`] is the production implementation; tests substitute
//! a recording double so the bridge control flow runs without a GL context.

use ffgl_draw::context::{clear_gl_errors, load_gl_once};
use ffgl_draw::{
    GlShader, Scoped2DTextureBinding, ScopedSamplerActivation, ScopedShaderBinding, ScreenQuad,
};

use crate::BridgeError;

/// GPU operations a bridge delegates.
pub trait TexturePainter {
    /// Full-screen textured draw into the currently bound framebuffer,
    /// sampling `texture` over `[0, max_uv]`.
    fn draw(&mut self, texture: u32, max_uv: (f32, f32));

    /// Allocate an RGBA8 texture: clamp-to-edge wrap, linear filtering both
    /// directions, no mip chain. Returns the texture name.
    fn allocate(&mut self, width: u32, height: u32) -> u32;

    fn delete(&mut self, texture: u32);

    /// Release shader/quad resources. Idempotent.
    fn release(&mut self);
}

const VERTEX_SOURCE: &str = r#"#version 410 core
uniform vec2 MaxUV;

layout( location = 0 ) in vec4 vPosition;
layout( location = 1 ) in vec2 vUV;

out vec2 uv;

void main()
{
	gl_Position = vPosition;
	uv = vUV * MaxUV;
}
"#;

const FRAGMENT_PASSTHROUGH: &str = r#"#version 410 core
uniform sampler2D InputTexture;

in vec2 uv;
out vec4 fragColor;

void main()
{
	fragColor = texture( InputTexture, uv );
}
"#;

// Shared frames arrive without meaningful alpha; force opaque.
const FRAGMENT_OPAQUE: &str = r#"#version 410 core
uniform sampler2D InputTexture;

in vec2 uv;
out vec4 fragColor;

void main()
{
	vec4 color = texture( InputTexture, uv );
	color.a = 1.0;
	fragColor = color;
}
"#;

/// Shader + full-screen quad, with scoped bindings around every draw.
pub struct GlPainter {
    shader: GlShader,
    quad: ScreenQuad,
}

impl GlPainter {
    /// Painter for the sender path: colors pass through unchanged.
    pub fn passthrough() -> Result<Self, BridgeError> {
        Self::with_fragment(FRAGMENT_PASSTHROUGH)
    }

    /// Painter for the receiver path: alpha forced to 1.
    pub fn opaque() -> Result<Self, BridgeError> {
        Self::with_fragment(FRAGMENT_OPAQUE)
    }

    fn with_fragment(fragment: &str) -> Result<Self, BridgeError> {
        load_gl_once();
        clear_gl_errors();
        let mut shader = GlShader::compile(VERTEX_SOURCE, fragment)?;
        let quad = match ScreenQuad::new() {
            Ok(quad) => quad,
            Err(err) => {
                // A failed construction must leave nothing half-built.
                shader.free();
                return Err(err.into());
            }
        };
        Ok(Self { shader, quad })
    }
}

impl TexturePainter for GlPainter {
    fn draw(&mut self, texture: u32, max_uv: (f32, f32)) {
        let _program = ScopedShaderBinding::new(self.shader.id());
        let _sampler = ScopedSamplerActivation::new(0);
        let _texture = Scoped2DTextureBinding::new(texture);

        self.shader.set_i32("InputTexture", 0);
        self.shader.set_vec2("MaxUV", max_uv.0, max_uv.1);
        self.quad.draw();
    }

    fn allocate(&mut self, width: u32, height: u32) -> u32 {
        let mut texture = 0;
        unsafe {
            gl::GenTextures(1, &mut texture);
            let _binding = Scoped2DTextureBinding::new(texture);
            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                gl::RGBA as i32,
                width as i32,
                height as i32,
                0,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                std::ptr::null(),
            );
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::LINEAR as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::LINEAR as i32);
        }
        texture
    }

    fn delete(&mut self, texture: u32) {
        if texture != 0 {
            unsafe { gl::DeleteTextures(1, &texture) }
        }
    }

    fn release(&mut self) {
        self.shader.free();
        self.quad.release();
    }
}
