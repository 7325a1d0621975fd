//! `plugMain` dispatch: decodes host function codes and routes them to an
//! [`FFGLHandler`] implementation.
//!
//! One handler per dynamic library: the host-visible info buffers live in a
//! process-wide cell initialised by the first `plugMain` call.

use std::ffi::{c_void, CStr, CString};
use std::os::raw::c_char;

use num_traits::FromPrimitive;
use once_cell::sync::OnceCell;
use tracing::{debug, error};

use crate::ffi::*;
use crate::handler::{FFGLHandler, FFGLInstance};
use crate::parameters::{padded_name, ParamType};

/// Per-instance state boxed across the ABI boundary.
///
/// `InstantiateGL` leaks the box as the host-visible instance id;
/// `DeinstantiateGL` reclaims it.
pub struct Instance<I> {
    data: crate::FFGLData,
    renderer: I,
    /// Scratch for `GetParameterDisplay`; 16 bytes plus terminator.
    display: [u8; 17],
    /// Owned storage backing the pointer returned for text parameters.
    text_value: CString,
}

struct PluginStatics {
    info: PluginInfoStruct,
    extended: PluginExtendedInfoStruct,
    param_names: Vec<[u8; 16]>,
    min_inputs: u32,
    max_inputs: u32,
    log_name: String,
    _about: CString,
    _description: CString,
    empty_text: CString,
}

// SAFETY: the raw pointers inside `extended` reference the CStrings owned by
// this struct, which never move once the cell is initialised. FFGL hosts call
// plugMain single-threaded.
unsafe impl Send for PluginStatics {}
unsafe impl Sync for PluginStatics {}

fn build_statics<H: FFGLHandler>() -> PluginStatics {
    let info = H::info();
    let about = CString::new(info.about.as_str()).unwrap_or_default();
    let description = CString::new(info.description.as_str()).unwrap_or_default();

    let extended = PluginExtendedInfoStruct {
        PluginMajorVersion: 1,
        PluginMinorVersion: 0,
        Description: description.as_ptr() as *mut c_void,
        About: about.as_ptr() as *mut c_void,
        FreeFrameExtendedDataSize: 0,
        FreeFrameExtendedDataBlock: std::ptr::null_mut(),
    };

    PluginStatics {
        info: PluginInfoStruct {
            APIMajorVersion: 2,
            APIMinorVersion: 1,
            PluginUniqueID: info.unique_id.map(|b| b as i8),
            PluginName: info.name.map(|b| b as i8),
            PluginType: info.ty.code(),
        },
        extended,
        param_names: H::params().iter().map(|p| padded_name(p.name)).collect(),
        min_inputs: info.min_inputs,
        max_inputs: info.max_inputs,
        log_name: info.name_str(),
        _about: about,
        _description: description,
        empty_text: CString::default(),
    }
}

fn uint(value: u32) -> FFMixed {
    FFMixed { UIntValue: value }
}

fn ptr(value: *const c_void) -> FFMixed {
    FFMixed {
        PointerValue: value as *mut c_void,
    }
}

fn success() -> FFMixed {
    uint(FF_SUCCESS)
}

fn fail() -> FFMixed {
    uint(FF_FAIL)
}

fn param_type<H: FFGLHandler>(index: u32) -> Option<ParamType> {
    H::params().get(index as usize).map(|p| p.ty)
}

/// # Safety
///
/// `instance_id` must be zero or a pointer previously returned from
/// `InstantiateGL` and not yet passed to `DeinstantiateGL`.
unsafe fn instance_mut<'a, I>(instance_id: usize) -> Option<&'a mut Instance<I>> {
    if instance_id == 0 {
        None
    } else {
        Some(unsafe { &mut *(instance_id as *mut Instance<I>) })
    }
}

/// Entry point behind the [`crate::plugin_main!`] macro.
///
/// No unwind may cross the plugin boundary; panics are caught and reported
/// as `FF_FAIL`.
pub fn plug_main<H: FFGLHandler>(function_code: u32, input_value: FFMixed, instance_id: usize) -> FFMixed {
    let caught = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        dispatch::<H>(function_code, input_value, instance_id)
    }));
    match caught {
        Ok(result) => result,
        Err(_) => {
            error!(function_code, "panic reached plugMain; reporting FF_FAIL");
            fail()
        }
    }
}

fn dispatch<H: FFGLHandler>(function_code: u32, input: FFMixed, instance_id: usize) -> FFMixed {
    static STATICS: OnceCell<PluginStatics> = OnceCell::new();
    let statics = STATICS.get_or_init(build_statics::<H>);

    let Some(op) = Op::from_u32(function_code) else {
        debug!(function_code, "unsupported host function code");
        return fail();
    };

    match op {
        Op::GetInfo => ptr(&statics.info as *const _ as *const c_void),
        Op::GetExtendedInfo => ptr(&statics.extended as *const _ as *const c_void),

        Op::Initialise | Op::InitialiseV2 => {
            crate::log::init_plugin_logging(&statics.log_name);
            success()
        }
        Op::Deinitialise => success(),

        Op::GetPluginCaps => {
            let cap = unsafe { input.UIntValue };
            uint(match cap {
                FF_CAP_PROCESSOPENGL | FF_CAP_SET_TIME => FF_SUPPORTED,
                FF_CAP_MINIMUM_INPUT_FRAMES => statics.min_inputs,
                FF_CAP_MAXIMUM_INPUT_FRAMES => statics.max_inputs,
                _ => FF_UNSUPPORTED,
            })
        }
        Op::GetInputStatus => uint(FF_INPUT_INUSE),

        Op::GetNumParameters => uint(H::params().len() as u32),
        Op::GetParameterName => {
            let index = unsafe { input.UIntValue } as usize;
            match statics.param_names.get(index) {
                Some(name) => ptr(name.as_ptr() as *const c_void),
                None => fail(),
            }
        }
        Op::GetParameterType => {
            let index = unsafe { input.UIntValue };
            match param_type::<H>(index) {
                Some(ty) => uint(ty.code()),
                None => fail(),
            }
        }
        Op::GetParameterDefault => {
            let index = unsafe { input.UIntValue };
            match H::params().get(index as usize) {
                Some(p) if p.ty == ParamType::Text => ptr(statics.empty_text.as_ptr() as *const c_void),
                Some(p) => uint(p.default.to_bits()),
                None => fail(),
            }
        }

        Op::GetParameter => {
            let index = unsafe { input.UIntValue };
            let Some(inst) = (unsafe { instance_mut::<H::Instance>(instance_id) }) else {
                return fail();
            };
            match param_type::<H>(index) {
                Some(ParamType::Text) => {
                    let value = inst.renderer.get_text_param(index).unwrap_or("");
                    inst.text_value = CString::new(value).unwrap_or_default();
                    ptr(inst.text_value.as_ptr() as *const c_void)
                }
                Some(_) => uint(inst.renderer.get_param(index).to_bits()),
                None => fail(),
            }
        }
        Op::SetParameter => {
            let Some(inst) = (unsafe { instance_mut::<H::Instance>(instance_id) }) else {
                return fail();
            };
            let arg = unsafe { &*(input.PointerValue as *const SetParameterStruct) };
            match param_type::<H>(arg.ParameterNumber) {
                Some(ParamType::Text) => {
                    let text = unsafe { arg.NewParameterValue.PointerValue } as *const c_char;
                    // Hosts hand over a null pointer while the entry field is empty.
                    if !text.is_null() {
                        let value = unsafe { CStr::from_ptr(text) }.to_string_lossy();
                        inst.renderer.set_text_param(arg.ParameterNumber, &value);
                    }
                    success()
                }
                Some(_) => {
                    let value = f32::from_bits(unsafe { arg.NewParameterValue.UIntValue });
                    inst.renderer.set_param(arg.ParameterNumber, value);
                    success()
                }
                None => fail(),
            }
        }
        Op::GetParameterDisplay => {
            let index = unsafe { input.UIntValue };
            let Some(inst) = (unsafe { instance_mut::<H::Instance>(instance_id) }) else {
                return fail();
            };
            let rendered = match param_type::<H>(index) {
                Some(ParamType::Text) => inst.renderer.get_text_param(index).unwrap_or("").to_string(),
                Some(_) => format!("{:.2}", inst.renderer.get_param(index)),
                None => return fail(),
            };
            inst.display = [0; 17];
            let bytes = rendered.as_bytes();
            let len = bytes.len().min(16);
            inst.display[..len].copy_from_slice(&bytes[..len]);
            ptr(inst.display.as_ptr() as *const c_void)
        }

        Op::InstantiateGL => {
            let viewport = unsafe { &*(input.PointerValue as *const FFGLViewportStruct) };
            let data = crate::FFGLData::new(viewport);
            match H::new_instance(&data) {
                Ok(renderer) => {
                    let boxed = Box::new(Instance {
                        data,
                        renderer,
                        display: [0; 17],
                        text_value: CString::default(),
                    });
                    ptr(Box::into_raw(boxed) as *const c_void)
                }
                Err(err) => {
                    error!("InstantiateGL failed: {err:#}");
                    fail()
                }
            }
        }
        Op::DeinstantiateGL => {
            if instance_id == 0 {
                return fail();
            }
            // SAFETY: reclaims the box leaked by InstantiateGL.
            let mut boxed = unsafe { Box::from_raw(instance_id as *mut Instance<H::Instance>) };
            boxed.renderer.deinit_gl();
            success()
        }

        Op::ProcessOpenGL => {
            let Some(inst) = (unsafe { instance_mut::<H::Instance>(instance_id) }) else {
                return fail();
            };
            let gl_struct = unsafe { &*(input.PointerValue as *const ProcessOpenGLStruct) };
            match inst.renderer.draw(&inst.data, crate::GLInput::from(gl_struct)) {
                Ok(()) => success(),
                Err(err) => {
                    debug!("frame not processed: {err:#}");
                    fail()
                }
            }
        }

        Op::SetTime => {
            let Some(inst) = (unsafe { instance_mut::<H::Instance>(instance_id) }) else {
                return fail();
            };
            let millis = unsafe { *(input.PointerValue as *const f64) };
            inst.data.set_time(millis);
            success()
        }
        Op::SetBeatInfo => {
            let Some(inst) = (unsafe { instance_mut::<H::Instance>(instance_id) }) else {
                return fail();
            };
            let beat = unsafe { &*(input.PointerValue as *const SetBeatinfoStruct) };
            inst.data.set_beat(*beat);
            success()
        }

        Op::Connect | Op::Disconnect | Op::Resize => success(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::{PluginInfo, PluginType};
    use crate::parameters::SimpleParamInfo;

    struct TestInstance {
        gain: f32,
        label: String,
    }

    impl FFGLInstance for TestInstance {
        fn draw(&mut self, _data: &crate::FFGLData, _frame: crate::GLInput<'_>) -> anyhow::Result<()> {
            Ok(())
        }

        fn get_param(&self, _index: u32) -> f32 {
            self.gain
        }

        fn set_param(&mut self, _index: u32, value: f32) {
            self.gain = value;
        }

        fn get_text_param(&self, _index: u32) -> Option<&str> {
            Some(&self.label)
        }

        fn set_text_param(&mut self, _index: u32, value: &str) {
            self.label = value.to_string();
        }
    }

    struct TestPlugin;

    impl FFGLHandler for TestPlugin {
        type Instance = TestInstance;

        fn info() -> PluginInfo {
            PluginInfo {
                unique_id: *b"TST0",
                name: *b"Tester\0\0\0\0\0\0\0\0\0\0",
                ty: PluginType::Effect,
                about: "about".to_string(),
                description: "description".to_string(),
                min_inputs: 1,
                max_inputs: 1,
            }
        }

        fn params() -> &'static [SimpleParamInfo] {
            const PARAMS: [SimpleParamInfo; 2] = [
                SimpleParamInfo {
                    name: "Gain",
                    ty: ParamType::Standard,
                    default: 0.5,
                },
                SimpleParamInfo {
                    name: "Label",
                    ty: ParamType::Text,
                    default: 0.0,
                },
            ];
            &PARAMS
        }

        fn new_instance(data: &crate::FFGLData) -> anyhow::Result<TestInstance> {
            assert_eq!(data.get_dimensions(), (640, 360));
            Ok(TestInstance {
                gain: 0.5,
                label: String::new(),
            })
        }
    }

    fn call(code: Op, input: FFMixed, id: usize) -> FFMixed {
        plug_main::<TestPlugin>(code as u32, input, id)
    }

    fn viewport() -> FFGLViewportStruct {
        FFGLViewportStruct {
            x: 0,
            y: 0,
            width: 640,
            height: 360,
        }
    }

    #[test]
    fn full_instance_lifecycle_over_the_abi() {
        let info = call(Op::GetInfo, uint(0), 0);
        let info = unsafe { &*(info.PointerValue as *const PluginInfoStruct) };
        assert_eq!(info.APIMajorVersion, 2);
        assert_eq!(info.PluginType, 0);

        let count = call(Op::GetNumParameters, uint(0), 0);
        assert_eq!(unsafe { count.UIntValue }, 2);

        let caps = call(Op::GetPluginCaps, uint(FF_CAP_MINIMUM_INPUT_FRAMES), 0);
        assert_eq!(unsafe { caps.UIntValue }, 1);

        let vp = viewport();
        let created = call(Op::InstantiateGL, ptr(&vp as *const _ as *const c_void), 0);
        let id = unsafe { created.PointerValue } as usize;
        assert_ne!(id, 0);

        // Float parameter round trip.
        let set = SetParameterStruct {
            ParameterNumber: 0,
            NewParameterValue: uint(0.25f32.to_bits()),
        };
        call(Op::SetParameter, ptr(&set as *const _ as *const c_void), id);
        let got = call(Op::GetParameter, uint(0), id);
        assert_eq!(f32::from_bits(unsafe { got.UIntValue }), 0.25);

        // Text parameter round trip.
        let text = CString::new("Channel A").unwrap();
        let set = SetParameterStruct {
            ParameterNumber: 1,
            NewParameterValue: ptr(text.as_ptr() as *const c_void),
        };
        call(Op::SetParameter, ptr(&set as *const _ as *const c_void), id);
        let got = call(Op::GetParameter, uint(1), id);
        let round = unsafe { CStr::from_ptr(got.PointerValue as *const c_char) };
        assert_eq!(round.to_str().unwrap(), "Channel A");

        // A null text pointer is tolerated and leaves the value untouched.
        let set = SetParameterStruct {
            ParameterNumber: 1,
            NewParameterValue: ptr(std::ptr::null()),
        };
        let result = call(Op::SetParameter, ptr(&set as *const _ as *const c_void), id);
        assert_eq!(unsafe { result.UIntValue }, FF_SUCCESS);
        let got = call(Op::GetParameter, uint(1), id);
        let round = unsafe { CStr::from_ptr(got.PointerValue as *const c_char) };
        assert_eq!(round.to_str().unwrap(), "Channel A");

        // A frame with no inputs still dispatches.
        let gl = ProcessOpenGLStruct {
            numInputTextures: 0,
            inputTextures: std::ptr::null_mut(),
            HostFBO: 1,
        };
        let result = call(Op::ProcessOpenGL, ptr(&gl as *const _ as *const c_void), id);
        assert_eq!(unsafe { result.UIntValue }, FF_SUCCESS);

        let result = call(Op::DeinstantiateGL, uint(0), id);
        assert_eq!(unsafe { result.UIntValue }, FF_SUCCESS);
    }

    #[test]
    fn unknown_codes_and_missing_instances_fail_cleanly() {
        let result = plug_main::<TestPlugin>(999, uint(0), 0);
        assert_eq!(unsafe { result.UIntValue }, FF_FAIL);

        let result = call(Op::GetParameter, uint(0), 0);
        assert_eq!(unsafe { result.UIntValue }, FF_FAIL);

        let result = call(Op::GetParameterName, uint(42), 0);
        assert_eq!(unsafe { result.UIntValue }, FF_FAIL);
    }
}
