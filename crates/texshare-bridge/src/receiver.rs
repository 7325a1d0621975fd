//! Inbound bridge: discover and continuously render the selected channel.

use tracing::debug;

use texshare_transport::{ChannelName, ReceiverTransport};

use crate::frame::FrameInput;
use crate::painter::TexturePainter;
use crate::self_loop::originates_from_host;

/// What one receiver frame did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The active channel is this host's own output. Nothing was received;
    /// if another channel was published, the bridge re-targeted it.
    SelfLoopSkipped { switched_to: Option<ChannelName> },
    /// No frame available (none published, or the channel vanished). The
    /// cached texture is left untouched so transient gaps don't flicker.
    Idle,
    /// The source changed shape or identity. The cached texture was
    /// recreated at the new size; nothing was drawn this call.
    Reallocated { width: u32, height: u32 },
    /// An ordinary frame was transferred and drawn.
    Drawn,
}

struct CachedTexture {
    handle: u32,
    width: u32,
    height: u32,
}

/// Receives the currently selected channel into a local cached texture and
/// draws it into the host's frame.
pub struct ReceiverBridge<T, P> {
    transport: T,
    painter: P,
    host_marker: String,
    cached: Option<CachedTexture>,
    last_active: Option<ChannelName>,
}

impl<T: ReceiverTransport, P: TexturePainter> ReceiverBridge<T, P> {
    pub fn new(transport: T, painter: P, host_marker: &str) -> Self {
        Self {
            transport,
            painter,
            host_marker: host_marker.to_owned(),
            cached: None,
            last_active: None,
        }
    }

    /// Dimensions of the cached texture, once one has been allocated.
    pub fn cached_dimensions(&self) -> Option<(u32, u32)> {
        self.cached.as_ref().map(|t| (t.width, t.height))
    }

    /// GL name of the cached texture; zero while unallocated.
    pub fn cached_texture(&self) -> u32 {
        self.cached.as_ref().map(|t| t.handle).unwrap_or(0)
    }

    /// Access the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run one frame: self-loop check, transfer, reallocate-or-draw.
    ///
    /// State reads happen before any resource mutation, and reallocation
    /// and drawing are mutually exclusive within one call.
    pub fn process(&mut self, frame: &FrameInput<'_>) -> FrameOutcome {
        if let Some(active) = self.transport.active_channel_name() {
            if originates_from_host(active.as_str(), &self.host_marker) {
                let switched_to = self.retarget_away_from_host();
                return FrameOutcome::SelfLoopSkipped { switched_to };
            }
            if self.last_active.as_ref() != Some(&active) {
                debug!(channel = %active, "receiving from channel");
                self.last_active = Some(active);
            }
        }

        if !self.transport.receive(self.cached_texture(), frame.host_fbo) {
            return FrameOutcome::Idle;
        }

        if self.transport.is_updated() {
            let (width, height) = self.transport.source_dimensions();
            self.reallocate(width, height);
            return FrameOutcome::Reallocated { width, height };
        }

        match &self.cached {
            // The cached texture always matches the source exactly, so the
            // draw covers the full [0,1] UV rect.
            Some(cached) => {
                self.painter.draw(cached.handle, (1.0, 1.0));
                FrameOutcome::Drawn
            }
            None => FrameOutcome::Idle,
        }
    }

    /// Ask the transport to present its channel picker.
    pub fn select_source(&mut self) {
        self.transport.open_selection_ui();
    }

    /// Release the receiving binding and cached texture (only when the GL
    /// context is live) and the draw resources (always).
    pub fn teardown(&mut self, context_live: bool) {
        if context_live {
            self.transport.release_channel();
        }
        if let Some(old) = self.cached.take() {
            if context_live {
                self.painter.delete(old.handle);
            }
        }
        self.painter.release();
    }

    fn reallocate(&mut self, width: u32, height: u32) {
        if let Some(old) = self.cached.take() {
            self.painter.delete(old.handle);
        }
        let handle = self.painter.allocate(width, height);
        debug!(width, height, "cached texture reallocated");
        self.cached = Some(CachedTexture {
            handle,
            width,
            height,
        });
    }

    /// Activate any published channel that is not the host's own. Returns
    /// the adopted name, or `None` when only the host's channels exist.
    fn retarget_away_from_host(&mut self) -> Option<ChannelName> {
        for index in 0..self.transport.channel_count() {
            let Some(candidate) = self.transport.channel_name_at(index) else {
                continue;
            };
            if originates_from_host(candidate.as_str(), &self.host_marker) {
                continue;
            }
            if self.transport.set_active_channel(&candidate) {
                debug!(channel = %candidate, "re-targeted away from own output");
                return Some(candidate);
            }
        }
        None
    }
}
