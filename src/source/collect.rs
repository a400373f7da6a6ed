use std::path::Path;

use anyhow::{Context, Result};

/// Expand glob patterns against `base` and return the matching files as
/// `/`-separated paths relative to `base`.
///
/// Patterns without glob characters are taken as plain relative paths and
/// kept only if they name an existing file. Results are sorted and deduplicated.
pub fn collect_sources(base: &Path, patterns: &[String]) -> Result<Vec<String>> {
    let mut results = Vec::new();

    for pattern in patterns {
        let pattern = pattern.trim_start_matches('/');
        let full_pattern = base.join(pattern);

        if is_glob_pattern(pattern) {
            let pattern_str = full_pattern.to_string_lossy();
            let paths = glob::glob(&pattern_str)
                .with_context(|| format!("invalid glob pattern: {}", pattern))?;

            for entry in paths {
                let path = entry.with_context(|| format!("failed to read glob entry: {}", pattern))?;
                if path.is_file() {
                    if let Some(relative) = relative_to(&path, base) {
                        results.push(relative);
                    }
                }
            }
        } else if full_pattern.is_file() {
            results.push(pattern.to_string());
        }
    }

    results.sort();
    results.dedup();
    Ok(results)
}

/// Check if a pattern contains glob characters.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?') || pattern.contains('[')
}

fn relative_to(path: &Path, base: &Path) -> Option<String> {
    let relative = path.strip_prefix(base).ok()?;
    let parts: Option<Vec<&str>> = relative.iter().map(|c| c.to_str()).collect();
    parts.map(|p| p.join("/"))
}
