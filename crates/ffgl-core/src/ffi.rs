//! Hardcoded FFGL 2.2 constants and C-repr structs.
//!
//! Sourced from the FFGL SDK headers (FreeFrame.h, FFGL.h), trimmed to the
//! surface the texture-sharing plugins exercise.

#![allow(non_snake_case)]

use std::ffi::c_void;

use num_derive::FromPrimitive;

/// Function codes dispatched through `plugMain`.
///
/// Codes absent from this enum decode to `None` and are answered with
/// [`FF_FAIL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[repr(u32)]
pub enum Op {
    GetInfo = 0,
    Initialise = 1,
    Deinitialise = 2,
    GetNumParameters = 4,
    GetParameterName = 5,
    GetParameterDefault = 6,
    GetParameterDisplay = 7,
    SetParameter = 8,
    GetParameter = 9,
    GetPluginCaps = 10,
    GetExtendedInfo = 13,
    GetParameterType = 15,
    GetInputStatus = 16,
    ProcessOpenGL = 17,
    InstantiateGL = 18,
    DeinstantiateGL = 19,
    SetTime = 20,
    Connect = 21,
    Disconnect = 22,
    Resize = 23,
    InitialiseV2 = 34,
    SetBeatInfo = 38,
}

// Result codes.
pub const FF_SUCCESS: u32 = 0;
pub const FF_FAIL: u32 = 0xFFFF_FFFF;
pub const FF_SUPPORTED: u32 = 1;
pub const FF_UNSUPPORTED: u32 = 0;

// Plugin capabilities queried via `Op::GetPluginCaps`.
pub const FF_CAP_PROCESSOPENGL: u32 = 4;
pub const FF_CAP_SET_TIME: u32 = 5;
pub const FF_CAP_MINIMUM_INPUT_FRAMES: u32 = 10;
pub const FF_CAP_MAXIMUM_INPUT_FRAMES: u32 = 11;

// Input status answered via `Op::GetInputStatus`.
pub const FF_INPUT_NOTINUSE: u32 = 0;
pub const FF_INPUT_INUSE: u32 = 1;

/// Union type used for parameter values in the FFGL ABI.
///
/// Float parameters travel as the raw bits of an `f32` in `UIntValue`; text
/// and struct arguments travel as `PointerValue`.
#[repr(C)]
#[derive(Copy, Clone)]
pub union FFMixed {
    pub UIntValue: u32,
    pub PointerValue: *mut c_void,
}

/// Plugin info struct returned by `Op::GetInfo`.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct PluginInfoStruct {
    pub APIMajorVersion: u32,
    pub APIMinorVersion: u32,
    pub PluginUniqueID: [i8; 4],
    pub PluginName: [i8; 16],
    pub PluginType: u32,
}

/// Extended plugin info returned by `Op::GetExtendedInfo`.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct PluginExtendedInfoStruct {
    pub PluginMajorVersion: u32,
    pub PluginMinorVersion: u32,
    pub Description: *mut c_void,
    pub About: *mut c_void,
    pub FreeFrameExtendedDataSize: u32,
    pub FreeFrameExtendedDataBlock: *mut c_void,
}

/// Struct passed to the plugin when setting a parameter.
#[repr(C)]
#[derive(Copy, Clone)]
pub struct SetParameterStruct {
    pub ParameterNumber: u32,
    pub NewParameterValue: FFMixed,
}

/// Beat information provided by the host.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct SetBeatinfoStruct {
    pub bpm: f32,
    pub barPhase: f32,
}

/// Viewport struct for `Op::InstantiateGL`.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct FFGLViewportStruct {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// One host texture handed to `Op::ProcessOpenGL`.
///
/// `Width`/`Height` describe the content area; `HardwareWidth`/
/// `HardwareHeight` describe the backing store, which may be larger. The
/// valid UV rectangle is the ratio of the two.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct FFGLTextureStruct {
    pub Width: u32,
    pub Height: u32,
    pub HardwareWidth: u32,
    pub HardwareHeight: u32,
    pub Handle: u32,
}

/// Struct passed to `Op::ProcessOpenGL`.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct ProcessOpenGLStruct {
    pub numInputTextures: u32,
    pub inputTextures: *mut *mut FFGLTextureStruct,
    pub HostFBO: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::FromPrimitive;

    #[test]
    fn op_codes_decode() {
        assert_eq!(Op::from_u32(0), Some(Op::GetInfo));
        assert_eq!(Op::from_u32(17), Some(Op::ProcessOpenGL));
        assert_eq!(Op::from_u32(18), Some(Op::InstantiateGL));
        assert_eq!(Op::from_u32(34), Some(Op::InitialiseV2));
        assert_eq!(Op::from_u32(999), None);
    }

    #[test]
    fn float_params_round_trip_through_the_union() {
        let mixed = FFMixed {
            UIntValue: 0.75f32.to_bits(),
        };
        let bits = unsafe { mixed.UIntValue };
        assert_eq!(f32::from_bits(bits), 0.75);
    }
}
