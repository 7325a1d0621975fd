//! FFGL effect that publishes the host's frame as a shared texture channel.
//!
//! Drop it on a cell that renders an image and give it a name in the clip
//! window; any receiver on the machine can then pick up the stream. Until a
//! name is entered, frames pass through to the host and nothing is
//! published.

use anyhow::Context;
use ffgl_core::handler::simplified::{SimpleFFGLHandler, SimpleFFGLInstance};
use ffgl_core::info::{PluginInfo, PluginType};
use ffgl_core::parameters::{ParamType, SimpleParamInfo};
use ffgl_core::{FFGLData, GLInput};
use ffgl_draw::context::is_context_current;
use texshare_bridge::{FrameInput, GlPainter, InputTexture, SenderBridge};
use texshare_transport::ChannelName;
use tracing::info;

const PARAM_CHANNEL_NAME: u32 = 0;

const PARAMS: [SimpleParamInfo; 1] = [SimpleParamInfo {
    name: "Sender Name",
    ty: ParamType::Text,
    default: 0.0,
}];

#[cfg(target_os = "windows")]
type DefaultTransport = texshare_transport::spout::SpoutSenderChannel;
#[cfg(not(target_os = "windows"))]
type DefaultTransport = texshare_transport::null::NullTransport;

pub struct TexShareSender {
    bridge: SenderBridge<DefaultTransport, GlPainter>,
}

impl SimpleFFGLInstance for TexShareSender {
    fn new(inst_data: &FFGLData) -> anyhow::Result<Self> {
        let painter = GlPainter::passthrough().context("building sender draw resources")?;
        info!(viewport = ?inst_data.get_dimensions(), "created sender instance");
        Ok(Self {
            bridge: SenderBridge::new(DefaultTransport::default(), painter),
        })
    }

    fn plugin_info() -> PluginInfo {
        PluginInfo {
            unique_id: *b"LJ70",
            name: *b"TexShareSender\0\0",
            ty: PluginType::Effect,
            about: "Shared GPU texture channels".to_string(),
            description: "Publish the input texture as a named shared channel".to_string(),
            min_inputs: 1,
            max_inputs: 1,
        }
    }

    fn params() -> &'static [SimpleParamInfo] {
        &PARAMS
    }

    fn draw(&mut self, _data: &FFGLData, frame_data: GLInput<'_>) -> anyhow::Result<()> {
        let textures: Vec<InputTexture> = frame_data
            .textures
            .iter()
            .map(|t| InputTexture {
                handle: t.Handle,
                width: t.Width,
                height: t.Height,
                hardware_width: t.HardwareWidth,
                hardware_height: t.HardwareHeight,
            })
            .collect();
        self.bridge.process(&FrameInput {
            textures: &textures,
            host_fbo: frame_data.host_fbo,
        })?;
        Ok(())
    }

    fn deinit_gl(&mut self) {
        self.bridge.teardown(is_context_current());
    }

    fn get_text_param(&self, index: u32) -> Option<&str> {
        if index != PARAM_CHANNEL_NAME {
            return None;
        }
        Some(self.bridge.name().map(|n| n.as_str()).unwrap_or(""))
    }

    fn set_text_param(&mut self, index: u32, value: &str) {
        if index == PARAM_CHANNEL_NAME {
            self.bridge.configure(ChannelName::new(value));
        }
    }
}

ffgl_core::plugin_main!(SimpleFFGLHandler<TexShareSender>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_matches_an_effect_with_one_input() {
        let info = TexShareSender::plugin_info();
        assert_eq!(&info.unique_id, b"LJ70");
        assert_eq!(info.ty, PluginType::Effect);
        assert_eq!((info.min_inputs, info.max_inputs), (1, 1));
        assert_eq!(info.name_str(), "TexShareSender");
    }

    #[test]
    fn the_only_parameter_is_the_channel_name() {
        let params = TexShareSender::params();
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "Sender Name");
        assert_eq!(params[0].ty, ParamType::Text);
    }
}
