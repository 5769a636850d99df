pub mod recordable_targets;
pub mod recordings;
pub mod stream_profiles;

/// `ILIKE` pattern for a free-text search box; blank input means no filter.
pub(crate) fn contains_pattern(search: Option<&str>) -> Option<String> {
    let term = search?.trim();
    if term.is_empty() {
        return None;
    }
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    Some(format!("%{}%", escaped))
}
