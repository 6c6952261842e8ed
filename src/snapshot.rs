use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use crate::{
    components::Employee,
    report::DayReport,
    world::{EnclosureView, Zoo, ZooSummary},
};

/// What lands on disk for one day. Written for inspection only, never read back.
#[derive(Debug, Serialize)]
pub struct DaySnapshot<'a> {
    pub summary: ZooSummary,
    pub report: &'a DayReport,
    pub enclosures: Vec<EnclosureView>,
    pub employees: &'a [Employee],
}

pub struct SnapshotWriter {
    output_dir: PathBuf,
    interval_days: u32,
}

impl SnapshotWriter {
    /// An interval of zero disables writing.
    pub fn new(output_dir: impl AsRef<Path>, interval_days: u32) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            interval_days,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.interval_days > 0
    }

    pub fn maybe_write(&self, zoo: &Zoo, report: &DayReport) -> Result<Option<PathBuf>> {
        if !self.is_enabled() || report.day % self.interval_days != 0 {
            return Ok(None);
        }

        let dir = self.output_dir.join(dir_name(zoo.name()));
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create snapshot dir {}", dir.display()))?;
        let path = dir.join(format!("day_{:03}.json", report.day));
        let snapshot = DaySnapshot {
            summary: zoo.summary(),
            report,
            enclosures: zoo.enclosure_listing(),
            employees: zoo.employees(),
        };
        let json = serde_json::to_string_pretty(&snapshot)?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write snapshot {}", path.display()))?;
        debug!(target: "snapshot", path = %path.display(), "snapshot written");
        Ok(Some(path))
    }
}

fn dir_name(zoo_name: &str) -> String {
    let cleaned: String = zoo_name
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    if cleaned.is_empty() {
        "zoo".to_string()
    } else {
        cleaned
    }
}
