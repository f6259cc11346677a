//! Process-wide codec counters

use std::sync::atomic::{AtomicU64, Ordering};

/// Track codec activity without external dependencies.
pub(crate) struct Metrics;

static ENCODED_MESSAGES: AtomicU64 = AtomicU64::new(0);
static DECODED_MESSAGES: AtomicU64 = AtomicU64::new(0);
static ENCODED_BYTES: AtomicU64 = AtomicU64::new(0);
static DECODED_BYTES: AtomicU64 = AtomicU64::new(0);
static ENCODE_FAILURES: AtomicU64 = AtomicU64::new(0);
static DECODE_FAILURES: AtomicU64 = AtomicU64::new(0);

impl Metrics {
    #[inline]
    pub(crate) fn record_encode(bytes: usize) {
        ENCODED_MESSAGES.fetch_add(1, Ordering::Relaxed);
        ENCODED_BYTES.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_decode(bytes: usize) {
        DECODED_MESSAGES.fetch_add(1, Ordering::Relaxed);
        DECODED_BYTES.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_encode_failure() {
        ENCODE_FAILURES.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_decode_failure() {
        DECODE_FAILURES.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn totals() -> MetricsSnapshot {
        MetricsSnapshot {
            encoded_messages: ENCODED_MESSAGES.load(Ordering::Relaxed),
            decoded_messages: DECODED_MESSAGES.load(Ordering::Relaxed),
            encoded_bytes: ENCODED_BYTES.load(Ordering::Relaxed),
            decoded_bytes: DECODED_BYTES.load(Ordering::Relaxed),
            encode_failures: ENCODE_FAILURES.load(Ordering::Relaxed),
            decode_failures: DECODE_FAILURES.load(Ordering::Relaxed),
        }
    }
}

/// Process-wide codec counters.
#[must_use]
pub fn snapshot() -> MetricsSnapshot {
    Metrics::totals()
}

/// Lightweight snapshot of codec counters.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Successful encodes
    pub encoded_messages: u64,
    /// Successful decodes
    pub decoded_messages: u64,
    /// Bytes produced by successful encodes
    pub encoded_bytes: u64,
    /// Bytes consumed by successful decodes
    pub decoded_bytes: u64,
    /// Encodes that failed
    pub encode_failures: u64,
    /// Decodes that failed
    pub decode_failures: u64,
}

impl MetricsSnapshot {
    /// Average encoded frame size in bytes.
    #[must_use]
    pub fn avg_encoded_size(&self) -> Option<u64> {
        average(self.encoded_bytes, self.encoded_messages)
    }

    /// Average decoded frame size in bytes.
    #[must_use]
    pub fn avg_decoded_size(&self) -> Option<u64> {
        average(self.decoded_bytes, self.decoded_messages)
    }
}

fn average(total: u64, count: u64) -> Option<u64> {
    if count == 0 {
        return None;
    }
    Some(total / count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_only_grow() {
        let before = snapshot();
        Metrics::record_encode(14);
        Metrics::record_decode_failure();
        let after = snapshot();

        assert!(after.encoded_messages > before.encoded_messages);
        assert!(after.encoded_bytes >= before.encoded_bytes + 14);
        assert!(after.decode_failures > before.decode_failures);
    }

    #[test]
    fn averages() {
        let snap = MetricsSnapshot {
            encoded_messages: 4,
            encoded_bytes: 100,
            ..MetricsSnapshot::default()
        };
        assert_eq!(snap.avg_encoded_size(), Some(25));
        assert_eq!(snap.avg_decoded_size(), None);
    }
}
