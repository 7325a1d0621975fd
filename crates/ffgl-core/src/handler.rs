//! Traits plugin crates implement to hook into the `plugMain` dispatch.
//!
//! Most plugins want [`simplified::SimpleFFGLInstance`] together with
//! [`simplified::SimpleFFGLHandler`] in the [`crate::plugin_main!`] macro.

use crate::info::PluginInfo;
use crate::inputs::{FFGLData, GLInput};
use crate::parameters::SimpleParamInfo;

/// Static half of a plugin: metadata, parameter table, instance factory.
pub trait FFGLHandler: 'static {
    type Instance: FFGLInstance;

    fn info() -> PluginInfo;

    fn params() -> &'static [SimpleParamInfo];

    /// Called on `InstantiateGL` with the GL context current. An `Err` is
    /// reported to the host as `FF_FAIL`; implementations must release any
    /// partially-built GL resources before returning it.
    fn new_instance(data: &FFGLData) -> anyhow::Result<Self::Instance>;
}

/// Per-instance half of a plugin.
pub trait FFGLInstance: 'static {
    /// Render one frame. An `Err` is reported to the host as `FF_FAIL` for
    /// this frame only; the host is expected to call again next frame.
    fn draw(&mut self, data: &FFGLData, frame_data: GLInput<'_>) -> anyhow::Result<()>;

    /// Called on `DeinstantiateGL`, with the GL context possibly already gone.
    fn deinit_gl(&mut self) {}

    fn get_param(&self, _index: u32) -> f32 {
        0.0
    }

    fn set_param(&mut self, _index: u32, _value: f32) {}

    fn get_text_param(&self, _index: u32) -> Option<&str> {
        None
    }

    fn set_text_param(&mut self, _index: u32, _value: &str) {}
}

pub mod simplified {
    //! One-type plugin flavor: implement [`SimpleFFGLInstance`] on your
    //! effect struct and pass `SimpleFFGLHandler<YourType>` to
    //! [`crate::plugin_main!`].

    use std::marker::PhantomData;

    use super::{FFGLHandler, FFGLInstance};
    use crate::info::PluginInfo;
    use crate::inputs::{FFGLData, GLInput};
    use crate::parameters::SimpleParamInfo;

    /// Instance trait carrying its own static metadata.
    pub trait SimpleFFGLInstance: Sized + 'static {
        fn new(inst_data: &FFGLData) -> anyhow::Result<Self>;

        fn plugin_info() -> PluginInfo;

        fn params() -> &'static [SimpleParamInfo] {
            &[]
        }

        fn draw(&mut self, data: &FFGLData, frame_data: GLInput<'_>) -> anyhow::Result<()>;

        fn deinit_gl(&mut self) {}

        fn get_param(&self, _index: u32) -> f32 {
            0.0
        }

        fn set_param(&mut self, _index: u32, _value: f32) {}

        fn get_text_param(&self, _index: u32) -> Option<&str> {
            None
        }

        fn set_text_param(&mut self, _index: u32, _value: &str) {}
    }

    impl<T: SimpleFFGLInstance> FFGLInstance for T {
        fn draw(&mut self, data: &FFGLData, frame_data: GLInput<'_>) -> anyhow::Result<()> {
            SimpleFFGLInstance::draw(self, data, frame_data)
        }

        fn deinit_gl(&mut self) {
            SimpleFFGLInstance::deinit_gl(self)
        }

        fn get_param(&self, index: u32) -> f32 {
            SimpleFFGLInstance::get_param(self, index)
        }

        fn set_param(&mut self, index: u32, value: f32) {
            SimpleFFGLInstance::set_param(self, index, value)
        }

        fn get_text_param(&self, index: u32) -> Option<&str> {
            SimpleFFGLInstance::get_text_param(self, index)
        }

        fn set_text_param(&mut self, index: u32, value: &str) {
            SimpleFFGLInstance::set_text_param(self, index, value)
        }
    }

    /// Adapter making a [`SimpleFFGLInstance`] usable as an [`FFGLHandler`].
    pub struct SimpleFFGLHandler<T> {
        _marker: PhantomData<T>,
    }

    impl<T: SimpleFFGLInstance> FFGLHandler for SimpleFFGLHandler<T> {
        type Instance = T;

        fn info() -> PluginInfo {
            T::plugin_info()
        }

        fn params() -> &'static [SimpleParamInfo] {
            T::params()
        }

        fn new_instance(data: &FFGLData) -> anyhow::Result<T> {
            T::new(data)
        }
    }
}
