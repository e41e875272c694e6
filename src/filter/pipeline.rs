// src/filter/pipeline.rs

use std::fmt;

use serde::Serialize;

use super::{
    clickable::make_clickable,
    escape::{QuoteStyle, escape_html},
    sanitize::keep_links_only,
    strip::strip_tags,
};

/// Name of the extension point the comment pipeline serves.
pub const COMMENT_TEXT: &str = "comment_text";

/// One text transformation in a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Encode `&`, `<`, `>` and quotes.
    EscapeHtml(QuoteStyle),
    /// Wrap bare URLs and e-mail addresses in anchors.
    MakeClickable,
    /// Remove every tag.
    StripTags,
    /// Remove every tag except `<a href>`.
    KeepLinksOnly,
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::EscapeHtml(_) => "escape_html",
            Step::MakeClickable => "make_clickable",
            Step::StripTags => "strip_tags",
            Step::KeepLinksOnly => "keep_links_only",
        }
    }

    pub fn apply(&self, text: &str) -> String {
        match self {
            Step::EscapeHtml(quotes) => escape_html(text, *quotes),
            Step::MakeClickable => make_clickable(text),
            Step::StripTags => strip_tags(text),
            Step::KeepLinksOnly => keep_links_only(text),
        }
    }
}

/// What the last step of the comment pipeline does with markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterPolicy {
    /// Nothing survives, including links made by the auto-link step.
    #[default]
    StripAll,
    /// Anchors survive with `rel="nofollow"`; every other tag is removed.
    KeepLinks,
}

impl std::str::FromStr for FilterPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strip" | "strip-all" => Ok(FilterPolicy::StripAll),
            "keep-links" | "links" => Ok(FilterPolicy::KeepLinks),
            other => Err(format!("unknown filter policy '{}'", other)),
        }
    }
}

/// Knobs for building the `comment_text` pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    pub policy: FilterPolicy,
    pub quotes: QuoteStyle,
    /// Run the auto-link step between escaping and the final step.
    pub autolink: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            policy: FilterPolicy::StripAll,
            quotes: QuoteStyle::Quotes,
            autolink: true,
        }
    }
}

/// Output of a single step, as recorded by [`Pipeline::render_traced`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageOutput {
    pub step: &'static str,
    pub output: String,
}

/// An ordered list of steps. Each step receives the previous step's output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    steps: Vec<Step>,
}

impl Pipeline {
    /// Steps run exactly in the given order.
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// The documented `comment_text` sequence: escape, auto-link, strip.
    pub fn comment_text() -> Self {
        Self::from_options(&PipelineOptions::default())
    }

    pub fn from_options(options: &PipelineOptions) -> Self {
        let mut steps = vec![Step::EscapeHtml(options.quotes)];
        if options.autolink {
            steps.push(Step::MakeClickable);
        }
        steps.push(match options.policy {
            FilterPolicy::StripAll => Step::StripTags,
            FilterPolicy::KeepLinks => Step::KeepLinksOnly,
        });
        Self::new(steps)
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(Step::name).collect()
    }

    /// Runs the text through every step and returns the final output.
    /// The input is never modified.
    pub fn render(&self, text: &str) -> String {
        let mut current = text.to_owned();
        for step in &self.steps {
            current = step.apply(&current);
            tracing::trace!(step = step.name(), output = %current, "Applied comment filter step");
        }
        tracing::debug!(
            hook = COMMENT_TEXT,
            steps = self.steps.len(),
            input_len = text.len(),
            output_len = current.len(),
            "Rendered comment text"
        );
        current
    }

    /// Like [`Pipeline::render`] but keeps every intermediate state.
    pub fn render_traced(&self, text: &str) -> Vec<StageOutput> {
        let mut stages: Vec<StageOutput> = Vec::with_capacity(self.steps.len());
        for step in &self.steps {
            let input = stages.last().map_or(text, |s| s.output.as_str());
            let output = step.apply(input);
            stages.push(StageOutput {
                step: step.name(),
                output,
            });
        }
        stages
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::comment_text()
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", COMMENT_TEXT, self.step_names().join(" -> "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_brackets(s: &str) -> bool {
        s.contains('<') || s.contains('>')
    }

    #[test]
    fn test_documented_order() {
        let pipeline = Pipeline::comment_text();
        assert_eq!(
            pipeline.step_names(),
            vec!["escape_html", "make_clickable", "strip_tags"]
        );
        assert_eq!(
            pipeline.to_string(),
            "comment_text [escape_html -> make_clickable -> strip_tags]"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(Pipeline::comment_text().render(""), "");
    }

    #[test]
    fn test_output_never_contains_brackets() {
        let pipeline = Pipeline::comment_text();
        let inputs = [
            "<script>alert('x')</script>",
            "<b>bold</b> <i>it",
            "a < b > c",
            "<a href=\"http://x.com\">x</a> http://y.com",
            "<<>><!-- -->",
            "plain",
        ];
        for input in inputs {
            let out = pipeline.render(input);
            assert!(!has_brackets(&out), "{:?} -> {:?}", input, out);
        }
    }

    #[test]
    fn test_escaped_script_survives_strip() {
        let escaped = escape_html("<script>", QuoteStyle::Quotes);
        assert!(!has_brackets(&escaped));
        assert_eq!(strip_tags(&escaped), escaped);
    }

    #[test]
    fn test_autolinked_url_is_stripped_again() {
        let pipeline = Pipeline::comment_text();
        assert_eq!(pipeline.render("visit http://x.com"), "visit http://x.com");

        let stages = pipeline.render_traced("visit http://x.com");
        assert_eq!(stages.len(), 3);
        assert!(stages[1].output.contains("<a href=\"http://x.com\""));
        assert_eq!(stages[2].output, "visit http://x.com");
    }

    #[test]
    fn test_mixed_comment() {
        // Escaping runs first, so the author's own <b> survives as encoded text.
        let out = Pipeline::comment_text()
            .render("<b>Hi</b> & welcome, check http://spam.example");
        assert!(!has_brackets(&out));
        assert!(!out.contains("href"));
        assert_eq!(
            out,
            "&lt;b&gt;Hi&lt;/b&gt; &amp; welcome, check http://spam.example"
        );
    }

    #[test]
    fn test_swapped_order_changes_output() {
        let input = r#"<a title="x & y">t</a>"#;
        let documented = Pipeline::new(vec![Step::EscapeHtml(QuoteStyle::Quotes), Step::StripTags]);
        let swapped = Pipeline::new(vec![Step::StripTags, Step::EscapeHtml(QuoteStyle::Quotes)]);

        assert_eq!(
            documented.render(input),
            "&lt;a title=&quot;x &amp; y&quot;&gt;t&lt;/a&gt;"
        );
        assert_eq!(swapped.render(input), "t");
    }

    #[test]
    fn test_without_autolink() {
        let pipeline = Pipeline::from_options(&PipelineOptions {
            autolink: false,
            ..PipelineOptions::default()
        });
        assert_eq!(pipeline.step_names(), vec!["escape_html", "strip_tags"]);
        assert_eq!(pipeline.render("visit http://x.com"), "visit http://x.com");
    }

    #[test]
    fn test_keep_links_policy() {
        let pipeline = Pipeline::from_options(&PipelineOptions {
            policy: FilterPolicy::KeepLinks,
            ..PipelineOptions::default()
        });
        let out = pipeline.render("<b>Hi</b> visit http://x.com");
        assert!(out.contains(r#"href="http://x.com""#));
        assert!(out.contains(r#"rel="nofollow""#));
        assert!(out.starts_with("&lt;b&gt;Hi&lt;/b&gt; visit "));
    }

    #[test]
    fn test_input_is_not_modified() {
        let input = String::from("<i>keep</i>");
        let _ = Pipeline::comment_text().render(&input);
        assert_eq!(input, "<i>keep</i>");
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("strip".parse::<FilterPolicy>(), Ok(FilterPolicy::StripAll));
        assert_eq!("Keep-Links".parse::<FilterPolicy>(), Ok(FilterPolicy::KeepLinks));
        assert!("maybe".parse::<FilterPolicy>().is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn quote_style() -> impl Strategy<Value = QuoteStyle> {
            prop_oneof![
                Just(QuoteStyle::Quotes),
                Just(QuoteStyle::Double),
                Just(QuoteStyle::None),
            ]
        }

        /// Mostly markup-ish text so tags, quotes and links show up often.
        fn comment_text() -> impl Strategy<Value = String> {
            prop_oneof![
                any::<String>(),
                "[<>&\"' a-z/=!?.:@-]{0,64}",
                "(<a href=\"|http://|www\\.|[a-z]{1,6}@[a-z]{1,6}\\.com|</a>|<b>|[ &<>\"'])*",
            ]
        }

        proptest! {
            #[test]
            fn rendered_text_has_no_brackets(s in comment_text(), quotes in quote_style(), autolink in any::<bool>()) {
                let pipeline = Pipeline::from_options(&PipelineOptions {
                    policy: FilterPolicy::StripAll,
                    quotes,
                    autolink,
                });
                let out = pipeline.render(&s);
                prop_assert!(!has_brackets(&out), "{:?} -> {:?}", s, out);
            }

            #[test]
            fn strip_leaves_escaped_text_unchanged(s in comment_text(), quotes in quote_style()) {
                let escaped = escape_html(&s, quotes);
                prop_assert_eq!(strip_tags(&escaped), escaped);
            }
        }
    }
}
