// src/filter/sanitize.rs

use std::collections::HashSet;

/// Clean HTML with ammonia, keeping `<a href>` elements and nothing else.
///
/// Links get `rel="nofollow"`; any other attribute (`onclick`, `style`, ...)
/// and every other tag are dropped. `<script>` and `<style>` lose their content
/// as well as their tags.
///
/// Note: ammonia re-serializes the text, so entities are normalized on the way
/// out (`&quot;` in text comes back as `"`), while `&`, `<` and `>` stay encoded.
pub fn keep_links_only(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    let mut cleaner = ammonia::Builder::default();
    cleaner
        .tags(HashSet::from(["a"]))
        .link_rel(Some("nofollow"))
        .strip_comments(true);

    cleaner.clean(input).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keep_links_empty() {
        assert_eq!(keep_links_only(""), "");
    }

    #[test]
    fn test_keep_links_drops_other_markup() {
        let cleaned = keep_links_only(
            r#"<b>x</b><a href="https://y.org" onclick="evil()">y</a><script>alert(1)</script>"#,
        );
        assert!(cleaned.starts_with('x'));
        assert!(cleaned.contains(r#"href="https://y.org""#));
        assert!(cleaned.contains(r#"rel="nofollow""#));
        assert!(!cleaned.contains("<b>"));
        assert!(!cleaned.contains("onclick"));
        assert!(!cleaned.contains("alert"));
    }

    #[test]
    fn test_keep_links_keeps_encoded_text_encoded() {
        let cleaned = keep_links_only("&lt;b&gt;Hi&lt;/b&gt; &amp; you");
        assert_eq!(cleaned, "&lt;b&gt;Hi&lt;/b&gt; &amp; you");
    }
}
