use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out increasing sequence numbers so only the newest fetch is applied.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next sequence number. The first one is `1`.
    pub fn issue(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    pub fn is_latest(&self, sequence: u64) -> bool {
        sequence != 0 && self.latest() == sequence
    }
}

#[cfg(test)]
mod tests {
    use super::RequestSequencer;

    #[test]
    fn only_the_last_issued_sequence_is_latest() {
        let sequencer = RequestSequencer::new();
        assert!(!sequencer.is_latest(0));

        let first = sequencer.issue();
        assert!(sequencer.is_latest(first));

        let second = sequencer.issue();
        assert!(second > first);
        assert!(!sequencer.is_latest(first));
        assert!(sequencer.is_latest(second));
    }
}
