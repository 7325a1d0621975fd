//! The inter-process texture-sharing transport, seen from the plugins' side.
//!
//! The transport itself (channel registry, cross-process synchronisation,
//! platform sharing primitives) is an external service; this crate defines
//! the narrow surface the bridges call, the bounded [`ChannelName`] type
//! that crosses it, and the available implementations: a Spout-backed one on
//! Windows ([`spout`]), a no-op fallback elsewhere ([`null`]), and
//! scriptable mocks for tests ([`mock`], behind the `mock` feature).
//!
//! All calls are synchronous and bounded; none of them may block for longer
//! than a fraction of a frame.

mod name;
pub mod null;
#[cfg(target_os = "windows")]
pub mod spout;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use name::{ChannelName, MAX_CHANNEL_NAME_LEN};

/// Outbound half: publish the host's frames under a channel name.
pub trait SenderTransport {
    /// Declare the name the next publishes go out under.
    fn set_channel_name(&mut self, name: &ChannelName);

    /// Withdraw the published channel from the directory.
    fn release_channel(&mut self);

    /// Share the contents of `host_fbo` as the channel's current frame.
    /// The transport creates or resizes the underlying shared resource as
    /// needed; callers invoke this every frame, not only on change.
    fn publish(&mut self, host_fbo: u32, width: u32, height: u32) -> bool;
}

/// Inbound half: discover channels and pull their frames.
pub trait ReceiverTransport {
    /// Name of the channel this instance is currently bound to, if any.
    fn active_channel_name(&mut self) -> Option<ChannelName>;

    fn channel_count(&mut self) -> usize;

    fn channel_name_at(&mut self, index: usize) -> Option<ChannelName>;

    fn set_active_channel(&mut self, name: &ChannelName) -> bool;

    /// Transfer the bound channel's latest frame into `into_texture`
    /// (or flag a pending reallocation instead — see [`Self::is_updated`]).
    /// Returns `false` when no frame is available.
    fn receive(&mut self, into_texture: u32, host_fbo: u32) -> bool;

    /// Whether the source changed shape or identity since the last
    /// successful transfer. When set, the local texture must be recreated
    /// at [`Self::source_dimensions`] before the next transfer.
    fn is_updated(&mut self) -> bool;

    /// Dimensions of the bound source as of the last [`Self::receive`].
    fn source_dimensions(&mut self) -> (u32, u32);

    /// Ask the transport to present its channel picker.
    fn open_selection_ui(&mut self);

    /// Drop the receiving binding.
    fn release_channel(&mut self);
}
