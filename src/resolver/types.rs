use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Where a resolved URL points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolvedKind {
    /// Thumbnail created by this call
    Generated,
    /// Thumbnail that already existed
    Cached,
    /// The unmodified source image
    Original,
}

/// A successful lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Public URL of the image
    pub url: String,
    /// Storage path of the image
    pub path: String,
    pub kind: ResolvedKind,
}

/// Running counters for one resolver.
#[derive(Debug, Default)]
pub struct ResolverStats {
    generated: AtomicU64,
    cache_hits: AtomicU64,
    originals: AtomicU64,
    fallbacks: AtomicU64,
}

/// Point-in-time copy of [`ResolverStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub generated: u64,
    pub cache_hits: u64,
    pub originals: u64,
    pub fallbacks: u64,
}

impl ResolverStats {
    pub(crate) fn record(&self, kind: ResolvedKind) {
        let counter = match kind {
            ResolvedKind::Generated => &self.generated,
            ResolvedKind::Cached => &self.cache_hits,
            ResolvedKind::Original => &self.originals,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_fallback(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            generated: self.generated.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            originals: self.originals.load(Ordering::Relaxed),
            fallbacks: self.fallbacks.load(Ordering::Relaxed),
        }
    }
}
