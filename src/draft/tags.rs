/// Separator used when tags are written back as a single string.
pub(crate) const TAG_SEPARATOR: &str = ", ";

/// Split a comma-separated tag string into trimmed, non-empty, unique tags.
///
/// First occurrence wins; comparison is case-sensitive.
pub(crate) fn split_tags(raw: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for t in raw.split(',') {
        push_unique(&mut out, t);
    }
    out
}

pub(crate) fn join_tags(tags: &[String]) -> String {
    tags.join(TAG_SEPARATOR)
}

/// Append the suggested tags that are not already present.
///
/// `existing` keeps its order; new tags follow in suggestion order.
/// Applying the same suggestions twice changes nothing.
pub(crate) fn merge_tags(existing: &[String], suggested: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(existing.len() + suggested.len());
    for t in existing.iter().chain(suggested.iter()) {
        push_unique(&mut out, t);
    }
    out
}

fn push_unique(out: &mut Vec<String>, tag: &str) {
    let tag = tag.trim();
    if tag.is_empty() || out.iter().any(|t| t == tag) {
        return;
    }
    out.push(tag.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_merge_appends_only_new_tags() {
        let merged = merge_tags(&v(&["react", "web"]), &v(&["web", "javascript"]));
        assert_eq!(merged, v(&["react", "web", "javascript"]));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let existing = v(&["rust", "wasm"]);
        let suggested = v(&["leptos", "wasm", "web"]);
        let once = merge_tags(&existing, &suggested);
        let twice = merge_tags(&once, &suggested);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_merge_is_case_sensitive_and_trims() {
        let merged = merge_tags(&v(&["Rust"]), &v(&[" rust ", "Rust", "  "]));
        assert_eq!(merged, v(&["Rust", "rust"]));
    }

    #[test]
    fn test_merge_dedupes_within_suggestions() {
        let merged = merge_tags(&[], &v(&["ai", "ml", "ai"]));
        assert_eq!(merged, v(&["ai", "ml"]));
    }

    #[test]
    fn test_split_trims_filters_and_dedupes() {
        assert_eq!(split_tags(" react, web,,web , "), v(&["react", "web"]));
        assert!(split_tags("").is_empty());
        assert!(split_tags(" , ,").is_empty());
    }

    #[test]
    fn test_join_then_split_keeps_order() {
        let tags = v(&["b", "a", "c"]);
        assert_eq!(join_tags(&tags), "b, a, c");
        assert_eq!(split_tags(&join_tags(&tags)), tags);
    }
}
