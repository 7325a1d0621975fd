//! Outbound bridge: publish the host's frame under a channel name.

use tracing::debug;

use texshare_transport::{ChannelName, SenderTransport};

use crate::frame::FrameInput;
use crate::painter::TexturePainter;
use crate::BridgeError;

/// What a successful sender frame did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Drawn through to the host; no channel name configured yet, so the
    /// frame was not published. Normal state, not an error.
    AwaitingName,
    /// Drawn and published under the configured name.
    Published,
}

/// Publishes the host's per-frame input texture, keeping the shared
/// resource's dimensions synchronized with the input.
pub struct SenderBridge<T, P> {
    transport: T,
    painter: P,
    name: Option<ChannelName>,
}

impl<T: SenderTransport, P: TexturePainter> SenderBridge<T, P> {
    pub fn new(transport: T, painter: P) -> Self {
        Self {
            transport,
            painter,
            name: None,
        }
    }

    /// Set or change the channel name.
    ///
    /// Renaming releases the resource published under the previous name
    /// before anything goes out under the new one. An empty name idles the
    /// bridge: frames keep drawing through, publication stops.
    pub fn configure(&mut self, name: ChannelName) {
        let changed = self.name.as_ref().map(|prev| *prev != name).unwrap_or(false);
        if changed {
            debug!(from = %self.name.as_ref().map(|n| n.as_str()).unwrap_or(""), to = %name, "channel renamed");
            self.transport.release_channel();
        }
        if name.is_empty() {
            self.name = None;
            return;
        }
        self.transport.set_channel_name(&name);
        self.name = Some(name);
    }

    /// The currently configured channel name, if any.
    pub fn name(&self) -> Option<&ChannelName> {
        self.name.as_ref()
    }

    /// Access the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Draw the host's input through the pass-through shader, then publish
    /// it. Publication happens every frame the bridge is named, not only on
    /// change; the transport resizes the shared resource internally.
    pub fn process(&mut self, frame: &FrameInput<'_>) -> Result<SendOutcome, BridgeError> {
        let input = frame.textures.first().ok_or(BridgeError::NoInput)?;
        if input.handle == 0 {
            return Err(BridgeError::NoInput);
        }

        // The content area may be a sub-region of the backing texture, so
        // sample only the valid UV rectangle.
        self.painter.draw(input.handle, input.max_uv());

        if self.name.is_none() {
            return Ok(SendOutcome::AwaitingName);
        }

        self.transport.publish(frame.host_fbo, input.width, input.height);
        Ok(SendOutcome::Published)
    }

    /// Release the published channel (only when the GL context is live) and
    /// the draw resources (always).
    pub fn teardown(&mut self, context_live: bool) {
        if context_live {
            self.transport.release_channel();
        }
        self.painter.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::InputTexture;
    use crate::test_support::RecordingPainter;
    use texshare_transport::mock::{MockSenderTransport, SenderEvent};

    fn bridge() -> SenderBridge<MockSenderTransport, RecordingPainter> {
        SenderBridge::new(MockSenderTransport::default(), RecordingPainter::default())
    }

    fn frame_640x360() -> FrameInput<'static> {
        static TEXTURES: [InputTexture; 1] = [InputTexture {
            handle: 5,
            width: 640,
            height: 360,
            hardware_width: 640,
            hardware_height: 360,
        }];
        FrameInput {
            textures: &TEXTURES,
            host_fbo: 2,
        }
    }

    #[test]
    fn rename_releases_old_channel_before_publishing_under_new() {
        let mut bridge = bridge();
        bridge.configure(ChannelName::new("First"));
        bridge.configure(ChannelName::new("Second"));
        bridge.process(&frame_640x360()).unwrap();

        let events = &bridge.transport.events;
        let release = events.iter().position(|e| *e == SenderEvent::Release);
        let second = events
            .iter()
            .position(|e| *e == SenderEvent::SetName(ChannelName::new("Second")));
        let publish = events
            .iter()
            .position(|e| matches!(e, SenderEvent::Publish { .. }));
        assert!(release.unwrap() < second.unwrap());
        assert!(second.unwrap() < publish.unwrap());
    }

    #[test]
    fn reconfiguring_the_same_name_does_not_release() {
        let mut bridge = bridge();
        bridge.configure(ChannelName::new("Same"));
        bridge.configure(ChannelName::new("Same"));
        assert!(!bridge.transport.events.contains(&SenderEvent::Release));
    }

    #[test]
    fn publishes_declared_dimensions_every_frame() {
        let mut bridge = bridge();
        bridge.configure(ChannelName::new("Test"));

        assert_eq!(bridge.process(&frame_640x360()).unwrap(), SendOutcome::Published);
        assert_eq!(bridge.process(&frame_640x360()).unwrap(), SendOutcome::Published);

        let publishes: Vec<_> = bridge
            .transport
            .events
            .iter()
            .filter(|e| matches!(e, SenderEvent::Publish { width: 640, height: 360 }))
            .collect();
        assert_eq!(publishes.len(), 2);
    }

    #[test]
    fn unnamed_bridge_draws_through_without_publishing() {
        let mut bridge = bridge();
        assert_eq!(bridge.process(&frame_640x360()).unwrap(), SendOutcome::AwaitingName);
        assert_eq!(bridge.painter.draws.len(), 1);
        assert!(bridge.transport.events.is_empty());
    }

    #[test]
    fn clearing_the_name_releases_and_idles() {
        let mut bridge = bridge();
        bridge.configure(ChannelName::new("Named"));
        bridge.configure(ChannelName::new(""));

        assert!(bridge.transport.events.contains(&SenderEvent::Release));
        assert_eq!(bridge.process(&frame_640x360()).unwrap(), SendOutcome::AwaitingName);
        assert!(!bridge
            .transport
            .events
            .iter()
            .any(|e| matches!(e, SenderEvent::Publish { .. })));
    }

    #[test]
    fn missing_input_is_reported_and_nothing_is_drawn() {
        let mut bridge = bridge();
        bridge.configure(ChannelName::new("Test"));
        let frame = FrameInput {
            textures: &[],
            host_fbo: 2,
        };
        assert!(matches!(bridge.process(&frame), Err(BridgeError::NoInput)));
        assert!(bridge.painter.draws.is_empty());
    }

    #[test]
    fn sub_region_inputs_sample_only_the_valid_rect() {
        let textures = [InputTexture {
            handle: 5,
            width: 640,
            height: 360,
            hardware_width: 1024,
            hardware_height: 512,
        }];
        let frame = FrameInput {
            textures: &textures,
            host_fbo: 2,
        };
        let mut bridge = bridge();
        bridge.process(&frame).unwrap();
        assert_eq!(bridge.painter.draws, vec![(5, (0.625, 0.703125))]);
    }

    #[test]
    fn teardown_without_context_skips_release_but_frees_draw_resources() {
        let mut bridge = bridge();
        bridge.configure(ChannelName::new("Test"));
        bridge.transport.events.clear();

        bridge.teardown(false);
        assert!(!bridge.transport.events.contains(&SenderEvent::Release));
        assert!(bridge.painter.released);
    }

    #[test]
    fn teardown_with_context_releases_the_channel() {
        let mut bridge = bridge();
        bridge.configure(ChannelName::new("Test"));
        bridge.teardown(true);
        assert!(bridge.transport.events.contains(&SenderEvent::Release));
        assert!(bridge.painter.released);
    }
}
