//! Human-readable byte sizes in binary units.

use crate::{MediaError, Result};

const KIB: u64 = 1024;
const MIB: u64 = KIB * 1024;
const GIB: u64 = MIB * 1024;
const TIB: u64 = GIB * 1024;
const PIB: u64 = TIB * 1024;
const EIB: u64 = PIB * 1024;

/// Parse a size string such as `5MB`, `512k` or `1.5GiB` into bytes.
///
/// Units are case-insensitive and always binary: `K`, `KB` and `KiB` all mean
/// 1024 bytes. A unit is mandatory and the number must be positive.
pub fn parse_byte_size(s: &str) -> Result<u64> {
    let s = s.trim().to_uppercase();
    let invalid = || {
        MediaError::Config(format!(
            "invalid byte size {s:?}: expected a positive number with a unit like K, MB, MiB or GB"
        ))
    };

    let unit_start = s.find(|c: char| c.is_alphabetic()).ok_or_else(invalid)?;
    let (number, unit) = s.split_at(unit_start);

    let value: f64 = number.trim().parse().map_err(|_| invalid())?;
    if value <= 0.0 || !value.is_finite() {
        return Err(invalid());
    }

    let multiplier = match unit.trim() {
        "E" | "EB" | "EIB" => EIB,
        "P" | "PB" | "PIB" => PIB,
        "T" | "TB" | "TIB" => TIB,
        "G" | "GB" | "GIB" => GIB,
        "M" | "MB" | "MIB" => MIB,
        "K" | "KB" | "KIB" => KIB,
        "B" => 1,
        _ => return Err(invalid()),
    };

    let bytes = value * multiplier as f64;
    if bytes >= u64::MAX as f64 {
        return Err(invalid());
    }

    Ok(bytes as u64)
}

/// Format a byte count for display, e.g. `1.9 MiB`.
pub fn format_bytes(size: u64) -> String {
    const UNITS: [(u64, &str); 6] = [
        (EIB, "EiB"),
        (PIB, "PiB"),
        (TIB, "TiB"),
        (GIB, "GiB"),
        (MIB, "MiB"),
        (KIB, "KiB"),
    ];

    for (factor, name) in UNITS {
        if size >= factor {
            return format!("{:.1} {}", size as f64 / factor as f64, name);
        }
    }

    format!("{size} B")
}
