use std::path::Path;

use anyhow::{Context, Result};

pub fn cmd_pack(source: &Path, archive: &Path, json: bool) -> Result<()> {
    let summary = frontgen::pack(source, archive)
        .with_context(|| format!("failed to pack {}", source.display()))?;
    if json {
        println!(
            "{}",
            serde_json::json!({
                "event": "packed",
                "archive": archive.display().to_string(),
                "files": summary.len(),
            })
        );
    } else {
        println!("Packed {} files into {}", summary.len(), archive.display());
    }
    Ok(())
}

pub fn cmd_unpack(archive: &Path, destination: &Path, json: bool) -> Result<()> {
    let summary = frontgen::unpack(archive, destination)
        .with_context(|| format!("failed to unpack {}", archive.display()))?;
    if json {
        println!(
            "{}",
            serde_json::json!({
                "event": "unpacked",
                "destination": destination.display().to_string(),
                "files": summary.entries,
            })
        );
    } else {
        println!(
            "Restored {} files into {}",
            summary.len(),
            destination.display()
        );
    }
    Ok(())
}
