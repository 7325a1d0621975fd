//! FFGL 2.x host protocol plumbing.
//!
//! This crate speaks the FreeFrame GL ABI so plugin crates don't have to:
//! hardcoded constants and C-repr structs ([`ffi`]), the `plugMain` dispatch
//! ([`entry`]), plugin/parameter metadata ([`info`], [`parameters`]), host
//! inputs ([`inputs`]), and diagnostic logging ([`log`]).
//!
//! A plugin crate implements
//! [`handler::simplified::SimpleFFGLInstance`] on its effect struct and ends
//! with [`plugin_main!`]:
//!
//! ```rust,ignore
//! ffgl_core::plugin_main!(SimpleFFGLHandler<MyEffect>);
//! ```

pub mod entry;
pub mod ffi;
pub mod handler;
pub mod info;
pub mod inputs;
pub mod log;
pub mod parameters;

pub use inputs::{FFGLData, GLInput};

/// Export the `plugMain` symbol the host looks up, routed to the given
/// [`handler::FFGLHandler`]. One invocation per dynamic library.
#[macro_export]
macro_rules! plugin_main {
    ($handler:ty) => {
        #[no_mangle]
        #[allow(non_snake_case)]
        pub extern "C" fn plugMain(
            function_code: u32,
            input_value: $crate::ffi::FFMixed,
            instance_id: usize,
        ) -> $crate::ffi::FFMixed {
            $crate::entry::plug_main::<$handler>(function_code, input_value, instance_id)
        }
    };
}
