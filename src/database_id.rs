//! Database ID type definition.

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseID = i64;

/// Parse an ID taken from a URL path segment.
///
/// Returns `None` for anything that is not a positive integer, so that a
/// request like `/posts/abc/edit` or `/posts/0/edit` can be answered with a
/// friendly not-found page instead of an extractor rejection.
pub fn parse_path_id(raw: &str) -> Option<DatabaseID> {
    match raw.parse::<DatabaseID>() {
        Ok(id) if id > 0 => Some(id),
        _ => None,
    }
}
