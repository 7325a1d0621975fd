//! No-op transport for platforms without a texture-sharing service.
//!
//! Plugins still load and pass frames through; publication and discovery
//! simply never happen.

use std::sync::Once;

use tracing::warn;

use crate::{ChannelName, ReceiverTransport, SenderTransport};

static UNAVAILABLE_WARNING: Once = Once::new();

fn warn_unavailable() {
    UNAVAILABLE_WARNING.call_once(|| {
        warn!("texture sharing transport is not available on this platform");
    });
}

/// Transport that accepts every call and shares nothing.
#[derive(Debug, Default)]
pub struct NullTransport;

impl SenderTransport for NullTransport {
    fn set_channel_name(&mut self, _name: &ChannelName) {}

    fn release_channel(&mut self) {}

    fn publish(&mut self, _host_fbo: u32, _width: u32, _height: u32) -> bool {
        warn_unavailable();
        false
    }
}

impl ReceiverTransport for NullTransport {
    fn active_channel_name(&mut self) -> Option<ChannelName> {
        None
    }

    fn channel_count(&mut self) -> usize {
        0
    }

    fn channel_name_at(&mut self, _index: usize) -> Option<ChannelName> {
        None
    }

    fn set_active_channel(&mut self, _name: &ChannelName) -> bool {
        false
    }

    fn receive(&mut self, _into_texture: u32, _host_fbo: u32) -> bool {
        warn_unavailable();
        false
    }

    fn is_updated(&mut self) -> bool {
        false
    }

    fn source_dimensions(&mut self) -> (u32, u32) {
        (0, 0)
    }

    fn open_selection_ui(&mut self) {}

    fn release_channel(&mut self) {}
}
