//! Inputs from the host to your plugin.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crate::ffi::*;

/// Texture inputs for one `ProcessOpenGL` call.
///
/// Borrowed views into host memory; valid only for the duration of the call.
#[derive(Debug)]
pub struct GLInput<'a> {
    pub textures: &'a [FFGLTextureStruct],
    pub host_fbo: u32,
}

impl<'a> From<&'a ProcessOpenGLStruct> for GLInput<'a> {
    fn from(val: &'a ProcessOpenGLStruct) -> GLInput<'a> {
        // Hosts hand over a null texture array when no inputs are connected.
        let textures = if val.numInputTextures == 0 || val.inputTextures.is_null() {
            &[]
        } else {
            unsafe {
                std::slice::from_raw_parts(*val.inputTextures as *const _, val.numInputTextures as usize)
            }
        };
        GLInput {
            textures,
            host_fbo: val.HostFBO,
        }
    }
}

/// Standard data the host provides to every plugin instance.
#[derive(Debug)]
pub struct FFGLData {
    pub created_at: Instant,
    pub viewport: FFGLViewportStruct,
    pub host_time: SystemTime,
    pub host_beat: SetBeatinfoStruct,
}

impl FFGLData {
    pub fn new(viewport: &FFGLViewportStruct) -> FFGLData {
        Self {
            created_at: Instant::now(),
            viewport: *viewport,
            host_time: SystemTime::now(),
            host_beat: SetBeatinfoStruct {
                bpm: 120.0,
                barPhase: 0.0,
            },
        }
    }

    pub fn set_beat(&mut self, beat: SetBeatinfoStruct) {
        self.host_beat = beat;
    }

    pub fn set_time(&mut self, host_millis: f64) {
        self.host_time = UNIX_EPOCH + Duration::from_secs_f64(host_millis / 1000.0)
    }

    pub fn get_dimensions(&self) -> (u32, u32) {
        (self.viewport.width, self.viewport.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_list_yields_empty_slice() {
        let gl = ProcessOpenGLStruct {
            numInputTextures: 0,
            inputTextures: std::ptr::null_mut(),
            HostFBO: 7,
        };
        let input = GLInput::from(&gl);
        assert!(input.textures.is_empty());
        assert_eq!(input.host_fbo, 7);
    }
}
