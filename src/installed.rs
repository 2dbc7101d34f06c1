use crate::package::PackageRef;
use serde::Deserialize;
use std::error::Error;
use std::process::Command;

#[derive(Debug, Deserialize)]
struct PipListEntry {
    name: String,
    version: String,
}

/// List the installed python packages by asking pip for its JSON listing.
///
/// Tries a standalone `pip` first and falls back to `python3 -m pip` when
/// pip is not on the PATH. Any other failure is fatal.
pub fn list_installed() -> Result<Vec<PackageRef>, Box<dyn Error>> {
    let args = ["list", "--format=json", "--disable-pip-version-check"];

    let output = match Command::new("pip").args(args).output() {
        Ok(output) => output,
        Err(_) => Command::new("python3").arg("-m").arg("pip").args(args).output()?,
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("pip list failed: {}", stderr.trim()).into());
    }

    let entries: Vec<PipListEntry> = serde_json::from_slice(&output.stdout)?;

    Ok(entries
        .into_iter()
        .map(|entry| PackageRef::new(entry.name, entry.version))
        .collect())
}
