use anyhow::{Context, Result};
use serde::Serialize;

/// Write a record set as pretty-printed JSON. Field order comes from the
/// struct definitions, so unchanged input reproduces the file byte for byte.
pub fn write_json<T: Serialize>(path: &str, value: &T) -> Result<()> {
    let mut json = serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize {}", path))?;
    json.push('\n');
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path))
}

// ── Tests ──
