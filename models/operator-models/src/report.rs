//! Drive documents and their text rendering
//!
//! A document holds either one drive record or an array of them, the two
//! shapes the management API returns drives in.

use model_common::{BinaryModel, ModelError, ModelResult};

use crate::capacity::{self, CapacityLevel};
use crate::config::Config;
use crate::types::{InventorySummary, ServerDrives};

/// One drive or a list of drives, as read from input
#[derive(Debug, Clone, PartialEq)]
pub enum DriveDocument {
    Single(ServerDrives),
    List(Vec<ServerDrives>),
}

impl DriveDocument {
    /// Decode a document, picking the shape from the first JSON token
    ///
    /// `null` entries in a list decode to zero-valued drives.
    pub fn from_slice(bytes: &[u8]) -> ModelResult<Self> {
        let is_list = bytes
            .iter()
            .find(|b| !b.is_ascii_whitespace())
            .is_some_and(|b| *b == b'[');

        if is_list {
            let drives: Vec<Option<ServerDrives>> =
                serde_json::from_slice(bytes).map_err(ModelError::Deserialization)?;
            let drives: Vec<ServerDrives> = drives
                .into_iter()
                .map(Option::unwrap_or_default)
                .collect();
            tracing::debug!(count = drives.len(), "decoded drive list");
            Ok(DriveDocument::List(drives))
        } else {
            Ok(DriveDocument::Single(ServerDrives::from_binary(bytes)?))
        }
    }

    /// The drives in this document
    pub fn drives(&self) -> &[ServerDrives] {
        match self {
            DriveDocument::Single(drive) => std::slice::from_ref(drive),
            DriveDocument::List(drives) => drives,
        }
    }

    /// Encode this document back to canonical JSON, keeping its shape
    pub fn to_vec(&self, pretty: bool) -> ModelResult<Vec<u8>> {
        let encoded = match (self, pretty) {
            (DriveDocument::Single(drive), false) => return drive.marshal_binary(),
            (DriveDocument::Single(drive), true) => serde_json::to_vec_pretty(drive),
            (DriveDocument::List(drives), false) => serde_json::to_vec(drives),
            (DriveDocument::List(drives), true) => serde_json::to_vec_pretty(drives),
        };
        encoded.map_err(ModelError::Serialization)
    }
}

fn format_size(bytes: i64, config: &Config) -> String {
    if config.display.show_decimals {
        capacity::nice_bytes(bytes, config.display.k8s_units)
    } else {
        let calc = capacity::calculate_bytes(bytes, false, true, config.display.k8s_units);
        format!("{} {}", calc.total, calc.unit)
    }
}

fn location(drive: &ServerDrives) -> String {
    match (drive.endpoint.as_str(), drive.drive_path.as_str()) {
        ("", "") if !drive.uuid.is_empty() => drive.uuid.clone(),
        ("", "") => "-".to_string(),
        ("", path) => path.to_string(),
        (endpoint, "") => endpoint.to_string(),
        (endpoint, path) => format!("{}{}", endpoint, path),
    }
}

/// Render one drive as a single line
pub fn render_drive(drive: &ServerDrives, config: &Config) -> String {
    let state = if drive.state.is_empty() {
        "unknown"
    } else {
        drive.state.as_str()
    };
    let level = drive.capacity_level(&config.thresholds);

    let mut line = format!(
        "{} {} {} / {} ({:.1}%) {}",
        location(drive),
        state,
        format_size(drive.used_space, config),
        format_size(drive.total_space, config),
        drive.usage_percent(),
        level
    );
    if drive.healing {
        line.push_str(" [healing]");
    }
    if drive.root_disk {
        line.push_str(" [root]");
    }
    line
}

/// Render the inventory summary
pub fn render_summary(summary: &InventorySummary, config: &Config) -> String {
    let level =
        capacity::capacity_level(summary.used_space, summary.total_space, &config.thresholds);
    format!(
        "{} drives ({} ok, {} not ok, {} unknown, {} healing, {} root)\n\
         used {} of {} ({:.1}%) {}, {} bytes available",
        summary.drives,
        summary.online,
        summary.not_ok,
        summary.unknown,
        summary.healing,
        summary.root_disks,
        format_size(summary.used_space, config),
        format_size(summary.total_space, config),
        summary.usage_percent(),
        level,
        capacity::pretty_number(summary.available_space)
    )
}

/// Render every drive followed by the summary
pub fn render_report(drives: &[ServerDrives], config: &Config) -> String {
    let mut out = String::new();
    for drive in drives {
        out.push_str(&render_drive(drive, config));
        out.push('\n');
    }
    out.push_str(&render_summary(&InventorySummary::from_drives(drives), config));
    out.push('\n');
    out
}

/// Drives at or above the critical threshold
pub fn critical_drives<'a>(
    drives: &'a [ServerDrives],
    config: &Config,
) -> impl Iterator<Item = &'a ServerDrives> + 'a {
    let thresholds = config.thresholds.clone();
    drives
        .iter()
        .filter(move |d| d.capacity_level(&thresholds) == CapacityLevel::Critical)
}
