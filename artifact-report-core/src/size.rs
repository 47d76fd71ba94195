/// Unit prefixes, indexed by power of 1024. The empty prefix keeps its slot so plain
/// byte counts render as `"1.00  B"`.
const UNITS: [&str; 6] = ["", "K", "M", "G", "T", "P"];

/// Formats a byte count as `"<value> <unit>B"` with two decimals, using powers of 1024.
///
/// Zero is special-cased to `"0.00 B"` (single space). Counts past the petabyte range
/// stay in `PB`.
pub fn human_readable_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0.00 B".to_string();
    }

    let exponent = unit_exponent(bytes);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);
    format!("{:.2} {}B", value, UNITS[exponent])
}

/// floor(log1024(bytes)) without floating point, clamped to the unit table.
fn unit_exponent(bytes: u64) -> usize {
    let mut exponent = 0;
    let mut remaining = bytes;
    while remaining >= 1024 && exponent < UNITS.len() - 1 {
        remaining /= 1024;
        exponent += 1;
    }
    exponent
}
