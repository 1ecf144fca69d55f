//! Label color registry defaults and deterministic fallback colors.

use std::collections::BTreeMap;

/// Fallback palette for labels missing from the registry (`#`-prefixed hex,
/// readable as pill backgrounds on light and dark surfaces)
const FALLBACK_PALETTE: &[&str] = &[
    "#d73a4a", // red
    "#e36209", // orange
    "#f9c513", // yellow
    "#0e8a16", // green
    "#006b75", // teal
    "#1d76db", // blue
    "#5319e7", // purple
    "#b60205", // dark red
    "#d876e3", // pink
    "#0075ca", // ocean
    "#7057ff", // violet
    "#008672", // sea green
    "#e4e669", // lime
    "#bfd4f2", // light blue
    "#c5def5", // periwinkle
    "#fbca04", // gold
];

/// The label colors every fresh document starts with
pub fn default_label_colors() -> BTreeMap<String, String> {
    [
        ("bug", "#D62828"),
        ("feature", "#06A77D"),
        ("chore", "#F77F00"),
        ("design", "#8338EC"),
        ("urgent", "#FF006E"),
        ("backend", "#004643"),
        ("frontend", "#FF6B35"),
        ("testing", "#7209B7"),
    ]
    .into_iter()
    .map(|(name, color)| (name.to_string(), color.to_string()))
    .collect()
}

/// Returns a stable color for a label with no registry entry
///
/// Same name, same color, independent of document state.
pub fn fallback_color(name: &str) -> &'static str {
    let hash = fnv1a(name);
    FALLBACK_PALETTE[(hash as usize) % FALLBACK_PALETTE.len()]
}

/// FNV-1a hash (32-bit) for short strings
fn fnv1a(s: &str) -> u32 {
    let mut hash: u32 = 0x811c_9dc5;
    for byte in s.bytes() {
        hash ^= byte as u32;
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}
