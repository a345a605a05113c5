//! Drive inventory summary combining all drives of a server or cluster

use serde::{Deserialize, Serialize};

use super::ServerDrives;

/// State reported by a drive that is online and healthy
pub const STATE_OK: &str = "ok";

/// Aggregate view over a list of drives
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    /// Number of drives
    pub drives: usize,
    /// Drives reporting the "ok" state
    pub online: usize,
    /// Drives reporting any other state
    pub not_ok: usize,
    /// Drives with no reported state
    pub unknown: usize,
    /// Drives currently healing
    pub healing: usize,
    /// Drives hosting a root filesystem
    pub root_disks: usize,
    /// Sum of drive capacities in bytes
    pub total_space: i64,
    /// Sum of used bytes
    pub used_space: i64,
    /// Sum of free bytes
    pub available_space: i64,
}

impl InventorySummary {
    /// Summarize a list of drives
    ///
    /// Byte totals saturate instead of overflowing.
    pub fn from_drives(drives: &[ServerDrives]) -> Self {
        drives.iter().fold(Self::default(), |mut summary, drive| {
            summary.drives += 1;
            match drive.state.as_str() {
                "" => summary.unknown += 1,
                STATE_OK => summary.online += 1,
                _ => summary.not_ok += 1,
            }
            if drive.healing {
                summary.healing += 1;
            }
            if drive.root_disk {
                summary.root_disks += 1;
            }
            summary.total_space = summary.total_space.saturating_add(drive.total_space);
            summary.used_space = summary.used_space.saturating_add(drive.used_space);
            summary.available_space = summary
                .available_space
                .saturating_add(drive.available_space);
            summary
        })
    }

    /// Percentage of the combined capacity in use
    pub fn usage_percent(&self) -> f64 {
        crate::capacity::usage_percent(self.used_space, self.total_space)
    }
}
