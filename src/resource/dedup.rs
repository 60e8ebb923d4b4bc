use std::collections::HashSet;

/// Tracks which images have already been claimed during a run
///
/// Claiming and checking are a single operation, so two locators that map
/// to the same identity can never both proceed to a download. The identity
/// key is chosen by the caller, either a destination path or a content
/// digest.
#[derive(Debug, Default)]
pub struct DedupTracker {
    claimed: HashSet<String>,
}

impl DedupTracker {
    pub fn new() -> Self {
        DedupTracker::default()
    }

    /// Claims an identity key, returning whether this was the first claim
    ///
    /// # Returns
    ///
    /// * `true` - The key was free; the caller now owns it and may proceed
    /// * `false` - The key was already claimed earlier in the run
    pub fn claim(&mut self, key: &str) -> bool {
        self.claimed.insert(key.to_string())
    }

    /// Number of distinct keys claimed so far
    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_claim_wins() {
        let mut tracker = DedupTracker::new();
        assert!(tracker.claim("Bilder/run/Galerie/foto.jpg"));
        assert!(!tracker.claim("Bilder/run/Galerie/foto.jpg"));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_distinct_keys_are_independent() {
        let mut tracker = DedupTracker::new();
        assert!(tracker.claim("a"));
        assert!(tracker.claim("b"));
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn test_trackers_do_not_share_state() {
        let mut first = DedupTracker::new();
        let mut second = DedupTracker::new();
        assert!(first.claim("foto.jpg"));
        assert!(second.claim("foto.jpg"));
    }
}
