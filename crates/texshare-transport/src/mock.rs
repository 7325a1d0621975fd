//! Scriptable transports for tests.
//!
//! The sender mock records every call in order so ordering properties
//! (release-before-republish) are checkable; the receiver mock plays back a
//! scripted sequence of per-frame results and a fixed channel directory.

use std::collections::VecDeque;

use crate::{ChannelName, ReceiverTransport, SenderTransport};

/// One recorded call on [`MockSenderTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SenderEvent {
    SetName(ChannelName),
    Release,
    Publish { width: u32, height: u32 },
}

#[derive(Debug, Default)]
pub struct MockSenderTransport {
    pub events: Vec<SenderEvent>,
}

impl SenderTransport for MockSenderTransport {
    fn set_channel_name(&mut self, name: &ChannelName) {
        self.events.push(SenderEvent::SetName(name.clone()));
    }

    fn release_channel(&mut self) {
        self.events.push(SenderEvent::Release);
    }

    fn publish(&mut self, _host_fbo: u32, width: u32, height: u32) -> bool {
        self.events.push(SenderEvent::Publish { width, height });
        true
    }
}

/// One scripted result for a [`ReceiverTransport::receive`] call.
#[derive(Debug, Clone, Copy)]
pub struct ScriptedFrame {
    pub transferred: bool,
    pub updated: bool,
    pub width: u32,
    pub height: u32,
}

impl ScriptedFrame {
    /// An ordinary delivered frame at the given size.
    pub fn delivered(width: u32, height: u32) -> Self {
        Self {
            transferred: true,
            updated: false,
            width,
            height,
        }
    }

    /// A size/identity change: the transport flags `updated` instead of
    /// filling the texture.
    pub fn resized(width: u32, height: u32) -> Self {
        Self {
            transferred: true,
            updated: true,
            width,
            height,
        }
    }

    /// Nothing available this frame.
    pub fn unavailable() -> Self {
        Self {
            transferred: false,
            updated: false,
            width: 0,
            height: 0,
        }
    }
}

#[derive(Debug, Default)]
pub struct MockReceiverTransport {
    /// Published channel directory, in registry order.
    pub channels: Vec<ChannelName>,
    /// Channel this instance is bound to.
    pub active: Option<ChannelName>,
    /// Frame script consumed by successive `receive` calls. An exhausted
    /// script behaves as "nothing available".
    pub frames: VecDeque<ScriptedFrame>,
    /// Texture handles passed to `receive`, in call order.
    pub receive_targets: Vec<u32>,
    /// Names passed to `set_active_channel`, in call order.
    pub activated: Vec<ChannelName>,
    pub selection_ui_opens: u32,
    pub released: bool,
    current: Option<ScriptedFrame>,
}

impl MockReceiverTransport {
    pub fn with_channels(channels: &[&str]) -> Self {
        Self {
            channels: channels.iter().map(|c| ChannelName::new(c)).collect(),
            active: channels.first().map(|c| ChannelName::new(c)),
            ..Self::default()
        }
    }

    pub fn script(mut self, frames: &[ScriptedFrame]) -> Self {
        self.frames = frames.iter().copied().collect();
        self
    }
}

impl ReceiverTransport for MockReceiverTransport {
    fn active_channel_name(&mut self) -> Option<ChannelName> {
        self.active.clone()
    }

    fn channel_count(&mut self) -> usize {
        self.channels.len()
    }

    fn channel_name_at(&mut self, index: usize) -> Option<ChannelName> {
        self.channels.get(index).cloned()
    }

    fn set_active_channel(&mut self, name: &ChannelName) -> bool {
        self.activated.push(name.clone());
        self.active = Some(name.clone());
        true
    }

    fn receive(&mut self, into_texture: u32, _host_fbo: u32) -> bool {
        self.receive_targets.push(into_texture);
        self.current = self.frames.pop_front();
        self.current.map(|f| f.transferred).unwrap_or(false)
    }

    fn is_updated(&mut self) -> bool {
        self.current.map(|f| f.updated).unwrap_or(false)
    }

    fn source_dimensions(&mut self) -> (u32, u32) {
        self.current.map(|f| (f.width, f.height)).unwrap_or((0, 0))
    }

    fn open_selection_ui(&mut self) {
        self.selection_ui_opens += 1;
    }

    fn release_channel(&mut self) {
        self.released = true;
    }
}
