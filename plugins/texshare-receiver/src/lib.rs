//! FFGL source that renders a shared texture channel.
//!
//! Drop it on an empty cell; the currently active channel is picked up
//! immediately, and the "Select" trigger opens the transport's channel
//! picker. Channels published by the host itself are skipped so a sender
//! and receiver in one host can't form a feedback loop.

use anyhow::Context;
use ffgl_core::handler::simplified::{SimpleFFGLHandler, SimpleFFGLInstance};
use ffgl_core::info::{PluginInfo, PluginType};
use ffgl_core::parameters::{ParamType, SimpleParamInfo};
use ffgl_core::{FFGLData, GLInput};
use ffgl_draw::context::is_context_current;
use texshare_bridge::{FrameInput, GlPainter, ReceiverBridge, DEFAULT_HOST_MARKER};
use tracing::{info, trace};

const PARAM_SELECT: u32 = 0;

const PARAMS: [SimpleParamInfo; 1] = [SimpleParamInfo {
    name: "Select",
    ty: ParamType::Event,
    default: 0.0,
}];

#[cfg(target_os = "windows")]
type DefaultTransport = texshare_transport::spout::SpoutReceiverChannel;
#[cfg(not(target_os = "windows"))]
type DefaultTransport = texshare_transport::null::NullTransport;

pub struct TexShareReceiver {
    bridge: ReceiverBridge<DefaultTransport, GlPainter>,
}

impl SimpleFFGLInstance for TexShareReceiver {
    fn new(inst_data: &FFGLData) -> anyhow::Result<Self> {
        let painter = GlPainter::opaque().context("building receiver draw resources")?;
        info!(viewport = ?inst_data.get_dimensions(), "created receiver instance");
        Ok(Self {
            bridge: ReceiverBridge::new(DefaultTransport::default(), painter, DEFAULT_HOST_MARKER),
        })
    }

    fn plugin_info() -> PluginInfo {
        PluginInfo {
            unique_id: *b"LJ71",
            name: *b"TexShareReceiver",
            ty: PluginType::Source,
            about: "Shared GPU texture channels".to_string(),
            description: "Render the active shared channel as a source".to_string(),
            min_inputs: 0,
            max_inputs: 0,
        }
    }

    fn params() -> &'static [SimpleParamInfo] {
        &PARAMS
    }

    fn draw(&mut self, _data: &FFGLData, frame_data: GLInput<'_>) -> anyhow::Result<()> {
        // A missing or self-published channel is a successful, empty frame.
        let outcome = self.bridge.process(&FrameInput {
            textures: &[],
            host_fbo: frame_data.host_fbo,
        });
        trace!(?outcome, "receiver frame");
        Ok(())
    }

    fn deinit_gl(&mut self) {
        self.bridge.teardown(is_context_current());
    }

    fn set_param(&mut self, index: u32, value: f32) {
        if index == PARAM_SELECT && value > 0.0 {
            self.bridge.select_source();
        }
    }
}

ffgl_core::plugin_main!(SimpleFFGLHandler<TexShareReceiver>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_matches_a_source_without_inputs() {
        let info = TexShareReceiver::plugin_info();
        assert_eq!(&info.unique_id, b"LJ71");
        assert_eq!(info.ty, PluginType::Source);
        assert_eq!((info.min_inputs, info.max_inputs), (0, 0));
        assert_eq!(info.name_str(), "TexShareReceiver");
    }

    #[test]
    fn the_only_parameter_is_the_select_trigger() {
        let params = TexShareReceiver::params();
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "Select");
        assert_eq!(params[0].ty, ParamType::Event);
    }
}
