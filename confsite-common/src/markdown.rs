//! Markdown to HTML rendering
//!
//! Raw HTML embedded in talk summaries/descriptions is escaped rather than
//! passed through, so user-authored content cannot inject markup into the
//! rendered pages.

use pulldown_cmark::{html, Event, Options, Parser};

/// Converts Markdown text to sanitized HTML
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    options: Options,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        Self { options }
    }
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render Markdown to an HTML fragment.
    ///
    /// Raw HTML events are demoted to text, which the HTML writer escapes.
    pub fn render(&self, input: &str) -> String {
        let parser = Parser::new_ext(input, self.options).map(|event| match event {
            Event::Html(raw) => Event::Text(raw),
            Event::InlineHtml(raw) => Event::Text(raw),
            other => other,
        });

        let mut output = String::with_capacity(input.len() * 2);
        html::push_html(&mut output, parser);
        output
    }
}
