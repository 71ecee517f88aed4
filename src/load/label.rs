use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static AGE_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]+) \w{4,5}$").unwrap());

/// Parse an age label such as `"42 years"` into its leading integer.
pub fn parse_age_label(label: &str) -> Result<u32> {
    let caps = AGE_LABEL
        .captures(label)
        .ok_or_else(|| anyhow!("age label {:?} does not match \"<N> <unit>\"", label))?;
    caps[1]
        .parse::<u32>()
        .map_err(|e| anyhow!("age label {:?} has an out-of-range number: {}", label, e))
}

/// Trim whitespace and strip outer quotes if present.
pub fn clean_str(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].to_string()
    } else {
        trimmed.to_string()
    }
}
