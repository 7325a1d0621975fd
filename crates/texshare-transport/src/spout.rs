//! Spout2 C-ABI bridge (Windows only).
//!
//! Links against the `spout_capi` shim, a thin C wrapper over the SpoutGL
//! library exposing the handful of entry points the traits need. Names are
//! marshalled as NUL-terminated UTF-8; booleans travel as `i32`.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use tracing::debug;

use crate::{ChannelName, ReceiverTransport, SenderTransport, MAX_CHANNEL_NAME_LEN};

#[link(name = "spout_capi")]
extern "C" {
    fn spout_set_sender_name(name: *const c_char);
    fn spout_release_sender();
    fn spout_send_fbo(fbo: u32, width: u32, height: u32) -> i32;

    fn spout_receive_texture(texture: u32, host_fbo: u32) -> i32;
    fn spout_is_updated() -> i32;
    fn spout_get_sender_width() -> u32;
    fn spout_get_sender_height() -> u32;
    fn spout_get_active_sender(buf: *mut c_char, max_len: i32) -> i32;
    fn spout_get_sender_count() -> i32;
    fn spout_get_sender(index: i32, buf: *mut c_char, max_len: i32) -> i32;
    fn spout_set_active_sender(name: *const c_char);
    fn spout_select_sender();
    fn spout_release_receiver();
}

fn to_cstring(name: &ChannelName) -> CString {
    CString::new(name.as_str()).unwrap_or_default()
}

fn read_name(fill: impl FnOnce(*mut c_char, i32) -> i32) -> Option<ChannelName> {
    let mut buf = [0 as c_char; MAX_CHANNEL_NAME_LEN + 1];
    if fill(buf.as_mut_ptr(), buf.len() as i32) == 0 {
        return None;
    }
    let text = unsafe { CStr::from_ptr(buf.as_ptr()) }.to_string_lossy();
    Some(ChannelName::new(&text))
}

/// Outbound Spout channel.
#[derive(Debug, Default)]
pub struct SpoutSenderChannel;

impl SenderTransport for SpoutSenderChannel {
    fn set_channel_name(&mut self, name: &ChannelName) {
        let cname = to_cstring(name);
        unsafe { spout_set_sender_name(cname.as_ptr()) }
    }

    fn release_channel(&mut self) {
        debug!("releasing spout sender");
        unsafe { spout_release_sender() }
    }

    fn publish(&mut self, host_fbo: u32, width: u32, height: u32) -> bool {
        unsafe { spout_send_fbo(host_fbo, width, height) != 0 }
    }
}

/// Inbound Spout channel.
#[derive(Debug, Default)]
pub struct SpoutReceiverChannel;

impl ReceiverTransport for SpoutReceiverChannel {
    fn active_channel_name(&mut self) -> Option<ChannelName> {
        read_name(|buf, len| unsafe { spout_get_active_sender(buf, len) })
    }

    fn channel_count(&mut self) -> usize {
        unsafe { spout_get_sender_count().max(0) as usize }
    }

    fn channel_name_at(&mut self, index: usize) -> Option<ChannelName> {
        read_name(|buf, len| unsafe { spout_get_sender(index as i32, buf, len) })
    }

    fn set_active_channel(&mut self, name: &ChannelName) -> bool {
        let cname = to_cstring(name);
        unsafe { spout_set_active_sender(cname.as_ptr()) }
        true
    }

    fn receive(&mut self, into_texture: u32, host_fbo: u32) -> bool {
        unsafe { spout_receive_texture(into_texture, host_fbo) != 0 }
    }

    fn is_updated(&mut self) -> bool {
        unsafe { spout_is_updated() != 0 }
    }

    fn source_dimensions(&mut self) -> (u32, u32) {
        unsafe { (spout_get_sender_width(), spout_get_sender_height()) }
    }

    fn open_selection_ui(&mut self) {
        unsafe { spout_select_sender() }
    }

    fn release_channel(&mut self) {
        debug!("releasing spout receiver");
        unsafe { spout_release_receiver() }
    }
}
