// src/filter/clickable.rs

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use super::strip::TAG_PATTERN;

static LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)(?P<url>(?:https?://|www\.)[^\s<>"']+)|(?P<email>[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)+)"#,
    )
    .unwrap()
});

static ANCHOR_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^<a[\s>]").unwrap());
static ANCHOR_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^</a\s*>").unwrap());

/// Encoded characters that can never be part of a bare link.
const LINK_TERMINATORS: [&str; 5] = ["&quot;", "&#039;", "&#39;", "&lt;", "&gt;"];

#[derive(Clone, Copy)]
enum LinkKind {
    Url,
    Email,
}

/// Turns bare URLs, `www.` hosts and e-mail addresses into anchor markup.
///
/// Only text between tags is rewritten. Text inside an existing `<a>` element
/// and the tags themselves are copied through untouched. Works on raw and on
/// already escaped text (`&amp;` inside a URL is kept as a query separator).
pub fn make_clickable(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(input.len() + 64);
    let mut in_anchor = false;
    let mut last = 0;

    for tag in TAG_PATTERN.find_iter(input) {
        push_text(&input[last..tag.start()], in_anchor, &mut out);

        let tag_text = tag.as_str();
        if ANCHOR_OPEN.is_match(tag_text) {
            in_anchor = true;
        } else if ANCHOR_CLOSE.is_match(tag_text) {
            in_anchor = false;
        }
        out.push_str(tag_text);
        last = tag.end();
    }
    push_text(&input[last..], in_anchor, &mut out);

    out
}

fn push_text(text: &str, in_anchor: bool, out: &mut String) {
    if in_anchor {
        out.push_str(text);
    } else {
        linkify_segment(text, out);
    }
}

fn linkify_segment(text: &str, out: &mut String) {
    let mut last = 0;

    for caps in LINK_PATTERN.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if !starts_at_boundary(text, whole.start()) {
            continue;
        }

        let kind = if caps.name("url").is_some() {
            LinkKind::Url
        } else {
            LinkKind::Email
        };
        let candidate = trim_candidate(whole.as_str());
        if candidate.is_empty() {
            continue;
        }
        let Some(href) = href_for(candidate, kind) else {
            continue;
        };

        out.push_str(&text[last..whole.start()]);
        let _ = write!(out, r#"<a href="{}" rel="nofollow">{}</a>"#, href, candidate);
        last = whole.start() + candidate.len();
    }

    out.push_str(&text[last..]);
}

/// A link may only start at the beginning of a segment, after whitespace,
/// after `(`, or right after an entity such as `&quot;`.
fn starts_at_boundary(text: &str, start: usize) -> bool {
    match text[..start].chars().next_back() {
        None => true,
        Some(c) => c.is_whitespace() || matches!(c, '(' | ';' | '>'),
    }
}

fn trim_candidate(candidate: &str) -> &str {
    let mut s = candidate;

    if let Some(cut) = LINK_TERMINATORS
        .iter()
        .filter_map(|entity| s.find(entity))
        .min()
    {
        s = &s[..cut];
    }

    loop {
        if let Some(rest) = s.strip_suffix("&amp;") {
            s = rest;
            continue;
        }
        match s.chars().next_back() {
            Some('.' | ',' | ';' | ':' | '!' | '?') => s = &s[..s.len() - 1],
            Some(')') if s.matches('(').count() < s.matches(')').count() => {
                s = &s[..s.len() - 1]
            }
            _ => break,
        }
    }

    s
}

fn href_for(candidate: &str, kind: LinkKind) -> Option<String> {
    let decoded = candidate.replace("&amp;", "&");

    match kind {
        LinkKind::Url => {
            let full = if decoded.get(..4).is_some_and(|p| p.eq_ignore_ascii_case("www.")) {
                format!("http://{}", decoded)
            } else {
                decoded
            };
            let parsed = Url::parse(&full).ok()?;
            parsed.host_str()?;
            Some(full.replace('&', "&amp;"))
        }
        LinkKind::Email => Some(format!("mailto:{}", decoded.replace('&', "&amp;"))),
    }
}
