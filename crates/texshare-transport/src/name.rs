//! Bounded channel names.

use std::fmt;

/// Transport registries store names in fixed 256-byte slots, so 255 bytes of
/// text is the most that survives the trip.
pub const MAX_CHANNEL_NAME_LEN: usize = 255;

/// A channel name as accepted by the transport.
///
/// Construction truncates over-long text silently and succeeds — the same
/// outcome as the bounded copy at the registry boundary, minus the risk of
/// splitting a UTF-8 sequence. The empty name is valid and means "not
/// configured".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ChannelName(String);

impl ChannelName {
    pub fn new(raw: &str) -> Self {
        if raw.len() <= MAX_CHANNEL_NAME_LEN {
            return Self(raw.to_owned());
        }
        let mut end = MAX_CHANNEL_NAME_LEN;
        while !raw.is_char_boundary(end) {
            end -= 1;
        }
        Self(raw[..end].to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ChannelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChannelName {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names_pass_through() {
        let name = ChannelName::new("Composition");
        assert_eq!(name.as_str(), "Composition");
        assert!(!name.is_empty());
    }

    #[test]
    fn oversized_names_truncate_and_succeed() {
        let raw = "x".repeat(400);
        let name = ChannelName::new(&raw);
        assert_eq!(name.as_str().len(), MAX_CHANNEL_NAME_LEN);
    }

    #[test]
    fn truncation_backs_off_to_a_char_boundary() {
        // 253 ASCII bytes followed by a 3-byte character straddling the cap.
        let raw = format!("{}\u{20AC}\u{20AC}", "x".repeat(253));
        let name = ChannelName::new(&raw);
        assert_eq!(name.as_str().len(), 253);
        assert!(name.as_str().chars().all(|c| c == 'x'));
    }

    #[test]
    fn empty_name_means_unconfigured() {
        assert!(ChannelName::default().is_empty());
        assert!(ChannelName::new("").is_empty());
    }
}
