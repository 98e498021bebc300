use std::collections::HashSet;
use std::sync::OnceLock;

static SET: OnceLock<HashSet<String>> = OnceLock::new();

/// Whether diagnostics for `category` were requested through
/// `RESQUIRCLE_DIAGNOSTICS` (comma separated, `all` enables everything) or
/// [`init_diagnostics`].
pub fn diagnostics_enabled(category: &str) -> bool {
    let set = SET.get_or_init(|| {
        let raw = std::env::var("RESQUIRCLE_DIAGNOSTICS").unwrap_or_default();
        parse_categories(&raw)
    });
    set.contains("all") || set.contains(&category.to_ascii_lowercase())
}

/// Fix the enabled categories from configuration. Only the first call before
/// any diagnostics check takes effect; returns whether it did.
pub fn init_diagnostics(categories: &str) -> bool {
    SET.set(parse_categories(categories)).is_ok()
}

fn parse_categories(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(|s| s.trim().to_ascii_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
