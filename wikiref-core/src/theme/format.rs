//! Item-name formatting helpers used by templates.

use unicode_segmentation::UnicodeSegmentation;

/// Shorten long item names that would break the page layout.
///
/// First falls back to the last path segment; if that is still too long the
/// middle is replaced by `...`.
///
/// ```
/// use wikiref_core::theme::shorten_item_name;
///
/// assert_eq!(shorten_item_name("Short", 25), "Short");
/// assert_eq!(shorten_item_name("Some/Deeply/Nested/ItemName", 25), "ItemName");
/// assert_eq!(shorten_item_name("abcdefghijklmnopqrstuvwxyz0123", 25), "abcdefghijk...tuvwxyz0123");
/// ```
pub fn shorten_item_name(name: &str, length: usize) -> String {
    if name.graphemes(true).count() <= length {
        return name.to_string();
    }

    let last = name.rsplit('/').next().unwrap_or(name);
    let graphemes: Vec<&str> = last.graphemes(true).collect();
    if graphemes.len() <= length {
        return last.to_string();
    }

    let keep = length.saturating_sub(3);
    let (half, left) = (keep / 2, keep % 2);
    let head = graphemes[..half + left].concat();
    let tail = graphemes[graphemes.len() - half..].concat();
    format!("{head}...{tail}")
}

/// CSS class for a content type, e.g. `moin-mime-text` for `text/plain`
pub fn contenttype_to_class(content_type: &str) -> String {
    let class = match content_type {
        "application/pdf" => "pdf",
        other => other.split('/').next().unwrap_or(other),
    };
    format!("moin-mime-{class}")
}

/// Normalize a user-supplied item name: drop control characters, empty
/// segments and surplus whitespace.
pub fn normalize_item_name(name: &str) -> String {
    let cleaned: String = name.chars().filter(|c| !c.is_control()).collect();
    cleaned
        .split('/')
        .filter(|segment| !segment.trim().is_empty())
        .map(|segment| segment.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorten_counts_graphemes() {
        // 26 graphemes, 27 chars
        let name = "e\u{301}bcdefghijklmnopqrstuvwxyz";
        let short = shorten_item_name(name, 25);
        assert!(short.starts_with("e\u{301}bcdefghijk..."));
        assert_eq!(short.graphemes(true).count(), 25);
    }

    #[test]
    fn test_shorten_tiny_length() {
        assert_eq!(shorten_item_name("abcdef", 3), "...");
        assert_eq!(shorten_item_name("abcdef", 4), "a...");
    }

    #[test]
    fn test_contenttype_to_class() {
        assert_eq!(contenttype_to_class("application/pdf"), "moin-mime-pdf");
        assert_eq!(contenttype_to_class("text/x.moin.wiki;charset=utf-8"), "moin-mime-text");
        assert_eq!(contenttype_to_class("image"), "moin-mime-image");
    }

    #[test]
    fn test_normalize_item_name() {
        assert_eq!(normalize_item_name("  Front   Page "), "Front Page");
        assert_eq!(normalize_item_name("/A//B /  /C/"), "A/B/C");
        assert_eq!(normalize_item_name("Bad\u{7}Name"), "BadName");
        assert_eq!(normalize_item_name(""), "");
    }
}
