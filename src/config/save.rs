use std::path::Path;

use anyhow::{Context, Result, bail};

use super::types::ThumbConfig;

/// Save a config to a JSON file with pretty formatting.
///
/// Refuses to overwrite an existing file.
pub fn save_config(config: &ThumbConfig, path: &Path) -> Result<()> {
    if path.exists() {
        bail!("config file already exists: {}", path.display());
    }

    let content = serde_json::to_string_pretty(config)
        .with_context(|| "failed to serialize config to JSON")?;

    std::fs::write(path, content)
        .with_context(|| format!("failed to write config file: {}", path.display()))?;

    Ok(())
}
