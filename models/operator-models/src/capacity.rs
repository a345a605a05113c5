//! Capacity presentation helpers
//!
//! Conversions the management console applies to drive records before
//! showing them: human-readable byte sizes, usage percentage, and the
//! capacity level used to colour a drive's usage bar.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Binary byte units
pub const UNITS: [&str; 9] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB", "ZiB", "YiB"];

/// Kubernetes quantity suffixes, prefixed with plain bytes
pub const K8S_UNITS: [&str; 7] = ["B", "Ki", "Mi", "Gi", "Ti", "Pi", "Ei"];

const STEP: i64 = 1024;

fn unit_table(k8s_units: bool) -> &'static [&'static str] {
    if k8s_units {
        &K8S_UNITS
    } else {
        &UNITS
    }
}

/// Format a byte count with one decimal place (e.g., `1.5 KiB`)
///
/// Values below 1024, negatives included, stay in bytes.
pub fn nice_bytes(bytes: i64, k8s_units: bool) -> String {
    let units = unit_table(k8s_units);
    let mut value = bytes as f64;
    let mut level = 0;

    while value >= STEP as f64 && level < units.len() - 1 {
        value /= STEP as f64;
        level += 1;
    }

    format!("{:.1} {}", value, units[level])
}

/// A byte count expressed in its largest whole unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BytesCalc {
    pub total: f64,
    pub unit: &'static str,
}

/// Express a byte count in its largest whole unit
///
/// `show_decimals` keeps one decimal place, `round_floor` drops the
/// fractional part before rounding. Zero and negative counts come back as
/// `0 B`.
pub fn calculate_bytes(
    bytes: i64,
    show_decimals: bool,
    round_floor: bool,
    k8s_units: bool,
) -> BytesCalc {
    let units = unit_table(k8s_units);

    if bytes <= 0 {
        return BytesCalc {
            total: 0.0,
            unit: units[0],
        };
    }

    let mut level = 0;
    let mut whole = bytes;
    while whole >= STEP && level < units.len() - 1 {
        whole /= STEP;
        level += 1;
    }

    let in_unit = bytes as f64 / (STEP as f64).powi(level as i32);
    let value = if round_floor { in_unit.floor() } else { in_unit };
    let scale = if show_decimals { 10.0 } else { 1.0 };

    BytesCalc {
        total: (value * scale).round() / scale,
        unit: units[level],
    }
}

/// Percentage of `total` taken by `used`, 0 when `total` is not positive
pub fn usage_percent(used: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    used as f64 * 100.0 / total as f64
}

/// Usage thresholds, in percent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacityThresholds {
    pub warning_percent: f64,
    pub critical_percent: f64,
}

impl Default for CapacityThresholds {
    fn default() -> Self {
        Self {
            warning_percent: 70.0,
            critical_percent: 90.0,
        }
    }
}

/// How full a drive is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapacityLevel {
    Normal,
    Warning,
    Critical,
}

impl Display for CapacityLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CapacityLevel::Normal => write!(f, "normal"),
            CapacityLevel::Warning => write!(f, "warning"),
            CapacityLevel::Critical => write!(f, "critical"),
        }
    }
}

/// Classify usage against the thresholds
///
/// A drive reporting usage but no capacity is critical.
pub fn capacity_level(used: i64, total: i64, thresholds: &CapacityThresholds) -> CapacityLevel {
    if total <= 0 {
        return if used > 0 {
            CapacityLevel::Critical
        } else {
            CapacityLevel::Normal
        };
    }

    let percent = usage_percent(used, total);
    if percent >= thresholds.critical_percent {
        CapacityLevel::Critical
    } else if percent >= thresholds.warning_percent {
        CapacityLevel::Warning
    } else {
        CapacityLevel::Normal
    }
}

/// Group digits in thousands (e.g., `1,234,567`)
pub fn pretty_number(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
