mod locks;
mod resolver;
mod types;
mod warm;

pub use locks::KeyedLocks;
pub use resolver::{DEFAULT_IMAGE, DEFAULT_THUMB_PATH, ThumbnailResolver};
pub use types::{ResolvedKind, Resolution, ResolverStats, StatsSnapshot};
pub use warm::WarmReport;
