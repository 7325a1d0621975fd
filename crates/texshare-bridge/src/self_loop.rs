//! Self-feedback detection.
//!
//! A receiver and a sender can coexist in one host instance. If the receiver
//! binds to a channel the host itself publishes, the image feeds back into
//! itself. Hosts embed a recognisable marker in the channel names they
//! publish; the predicate lives here, apart from the bridge control flow, so
//! the matching policy can change in one place.

/// Marker the supported host embeds in channel names it publishes itself.
pub const DEFAULT_HOST_MARKER: &str = "Arena";

/// Whether `channel` was published by the host instance identified by
/// `marker`. Current policy: substring containment.
pub fn originates_from_host(channel: &str, marker: &str) -> bool {
    !marker.is_empty() && channel.contains(marker)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_published_names_match() {
        assert!(originates_from_host("Arena - Composition", "Arena"));
        assert!(originates_from_host("MyArenaFeed", "Arena"));
    }

    #[test]
    fn foreign_names_do_not_match() {
        assert!(!originates_from_host("CamFeed", "Arena"));
        assert!(!originates_from_host("arena lowercase", "Arena"));
    }

    #[test]
    fn empty_marker_never_matches() {
        assert!(!originates_from_host("Anything", ""));
    }
}
