//! Shared utility functions used across multiple modules.

/// Current Unix timestamp in milliseconds.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Normalize a search query for filtering.
///
/// Returns `None` when the trimmed text is empty, meaning "no filter".
pub fn normalize_query(value: &str) -> Option<&str> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_query_rejects_blank() {
        assert_eq!(normalize_query(""), None);
        assert_eq!(normalize_query("   "), None);
        assert_eq!(normalize_query("\t\n"), None);
    }

    #[test]
    fn normalize_query_trims_value() {
        assert_eq!(normalize_query("  milk "), Some("milk"));
        assert_eq!(normalize_query("eggs"), Some("eggs"));
    }

    #[test]
    fn now_ms_is_positive() {
        assert!(now_ms() > 0);
    }
}
