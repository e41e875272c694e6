// src/filter/escape.rs

/// Which quote characters are encoded alongside `&`, `<` and `>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteStyle {
    /// Encode both `"` and `'`.
    #[default]
    Quotes,
    /// Encode `"` only.
    Double,
    /// Leave both quote characters alone.
    None,
}

impl std::str::FromStr for QuoteStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quotes" | "both" => Ok(QuoteStyle::Quotes),
            "double" => Ok(QuoteStyle::Double),
            "none" => Ok(QuoteStyle::None),
            other => Err(format!("unknown quote style '{}'", other)),
        }
    }
}

/// Encodes reserved markup characters so the text displays literally.
///
/// `&` is always encoded, including the `&` of an existing reference, so
/// escaping twice yields `&amp;amp;`.
pub fn escape_html(input: &str, quotes: QuoteStyle) -> String {
    let mut out = String::with_capacity(input.len() + input.len() / 8);
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if quotes != QuoteStyle::None => out.push_str("&quot;"),
            '\'' if quotes == QuoteStyle::Quotes => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}
