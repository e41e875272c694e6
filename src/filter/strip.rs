// src/filter/strip.rs

use std::sync::LazyLock;

use regex::Regex;

/// Comments first, then any tag whose name starts with a letter, `/`, `!` or `?`.
/// A `>` inside a balanced quoted attribute value does not close the tag; with
/// an unbalanced quote the tag ends at the first `>`.
pub(crate) static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)<!--.*?-->|<[A-Za-z/!?](?:"[^"]*"|'[^']*'|[^"'>])*>|<[A-Za-z/!?][^>]*>"#,
    )
    .unwrap()
});

/// Removes every markup tag and keeps the text between tags.
///
/// Nothing else is touched: whitespace is not collapsed, entities are not
/// decoded, and a `<` that cannot open a tag (`a < b`) stays as text.
pub fn strip_tags(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    TAG_PATTERN.replace_all(input, "").into_owned()
}
