//! Sender-to-receiver round trip over mock transports.

use texshare_bridge::{
    FrameInput, FrameOutcome, InputTexture, ReceiverBridge, SenderBridge, TexturePainter,
    DEFAULT_HOST_MARKER,
};
use texshare_transport::mock::{
    MockReceiverTransport, MockSenderTransport, ScriptedFrame, SenderEvent,
};
use texshare_transport::ChannelName;

#[derive(Default)]
struct CountingPainter {
    next_handle: u32,
}

impl TexturePainter for CountingPainter {
    fn draw(&mut self, _texture: u32, _max_uv: (f32, f32)) {}

    fn allocate(&mut self, _width: u32, _height: u32) -> u32 {
        self.next_handle += 1;
        self.next_handle
    }

    fn delete(&mut self, _texture: u32) {}

    fn release(&mut self) {}
}

#[test]
fn published_dimensions_arrive_unchanged_at_the_receiver() {
    // Producer side: one 640x360 frame published under "Test".
    let mut sender = SenderBridge::new(MockSenderTransport::default(), CountingPainter::default());
    sender.configure(ChannelName::new("Test"));

    let textures = [InputTexture {
        handle: 9,
        width: 640,
        height: 360,
        hardware_width: 640,
        hardware_height: 360,
    }];
    sender
        .process(&FrameInput {
            textures: &textures,
            host_fbo: 1,
        })
        .expect("sender frame");

    let (width, height) = sender
        .transport()
        .events
        .iter()
        .find_map(|e| match e {
            SenderEvent::Publish { width, height } => Some((*width, *height)),
            _ => None,
        })
        .expect("a publish event");
    assert_eq!((width, height), (640, 360));

    // Consumer side (separate instance): the transport reports the published
    // size, flags one reallocation, then delivers.
    let transport = MockReceiverTransport::with_channels(&["Test"]).script(&[
        ScriptedFrame::resized(width, height),
        ScriptedFrame::delivered(width, height),
    ]);
    let mut receiver =
        ReceiverBridge::new(transport, CountingPainter::default(), DEFAULT_HOST_MARKER);

    let empty = FrameInput {
        textures: &[],
        host_fbo: 2,
    };
    assert_eq!(
        receiver.process(&empty),
        FrameOutcome::Reallocated { width, height }
    );
    assert_eq!(receiver.process(&empty), FrameOutcome::Drawn);

    // Exactly the published size: no border, no crop.
    assert_eq!(receiver.cached_dimensions(), Some((640, 360)));
}
