/// Parse a length token: a plain number with an optional `px` suffix. The
/// unit is stripped, not converted.
pub fn parse_length(value: &str) -> Option<f32> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
    number.parse::<f32>().ok().filter(|v| v.is_finite())
}
