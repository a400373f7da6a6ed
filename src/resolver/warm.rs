use log::{info, warn};
use rayon::prelude::*;

use super::{ResolvedKind, ThumbnailResolver};
use crate::error::ThumbError;
use crate::request::{Dimensions, ImageRequest, ResizeMode};
use crate::storage::Storage;

/// Outcome of pre-generating thumbnails for many sources.
#[derive(Debug, Default)]
pub struct WarmReport {
    pub generated: usize,
    pub cached: usize,
    /// Sources that could not be thumbnailed, with the reason
    pub failed: Vec<(String, ThumbError)>,
}

impl WarmReport {
    pub fn total(&self) -> usize {
        self.generated + self.cached + self.failed.len()
    }
}

impl<S: Storage> ThumbnailResolver<S> {
    /// Generate thumbnails for `sources` in parallel.
    ///
    /// Sources are paths relative to the root path, not public paths.
    pub fn warm(&self, sources: &[String], size: Dimensions, mode: ResizeMode) -> WarmReport {
        info!(
            "Warming {} thumbnails at {}x{} {}...",
            sources.len(),
            size.width,
            size.height,
            mode
        );

        let outcomes: Vec<_> = sources
            .par_iter()
            .map(|source| {
                let request = ImageRequest::relative(source.clone(), Some(size), mode);
                (source, self.resolve_request(&request))
            })
            .collect();

        let mut report = WarmReport::default();
        for (source, outcome) in outcomes {
            match outcome {
                Ok(resolution) => match resolution.kind {
                    ResolvedKind::Generated => report.generated += 1,
                    ResolvedKind::Cached | ResolvedKind::Original => report.cached += 1,
                },
                Err(e) => {
                    warn!("Skipping {}: {}", source, e);
                    report.failed.push((source.clone(), e));
                }
            }
        }

        info!(
            "Warmed {} thumbnails: {} generated, {} already cached, {} failed",
            report.total(),
            report.generated,
            report.cached,
            report.failed.len()
        );
        report
    }
}
