//! Per-call view of the host's frame. Valid only for the duration of one
//! render callback.

/// One host input texture.
///
/// The content area may be a sub-region of a larger backing store; sampling
/// must stay inside [`InputTexture::max_uv`].
#[derive(Debug, Clone, Copy)]
pub struct InputTexture {
    pub handle: u32,
    pub width: u32,
    pub height: u32,
    pub hardware_width: u32,
    pub hardware_height: u32,
}

impl InputTexture {
    /// UV extent of the valid content area within the backing texture.
    pub fn max_uv(&self) -> (f32, f32) {
        if self.hardware_width == 0 || self.hardware_height == 0 {
            return (1.0, 1.0);
        }
        (
            self.width as f32 / self.hardware_width as f32,
            self.height as f32 / self.hardware_height as f32,
        )
    }
}

/// The host's inputs for one render call.
#[derive(Debug)]
pub struct FrameInput<'a> {
    pub textures: &'a [InputTexture],
    /// Framebuffer the host expects output (and publishes) to go through.
    pub host_fbo: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texture(width: u32, height: u32, hw: u32, hh: u32) -> InputTexture {
        InputTexture {
            handle: 1,
            width,
            height,
            hardware_width: hw,
            hardware_height: hh,
        }
    }

    #[test]
    fn snug_backing_store_covers_full_uv() {
        assert_eq!(texture(640, 360, 640, 360).max_uv(), (1.0, 1.0));
    }

    #[test]
    fn padded_backing_store_shrinks_the_valid_rect() {
        let (s, t) = texture(640, 360, 1024, 512).max_uv();
        assert_eq!(s, 0.625);
        assert_eq!(t, 0.703125);
    }

    #[test]
    fn degenerate_hardware_dims_fall_back_to_full_uv() {
        assert_eq!(texture(640, 360, 0, 0).max_uv(), (1.0, 1.0));
    }
}
