use super::html::visible_text;
use super::TextExtractor;
use crate::error::ExtractionError;
use pulldown_cmark::{html, Event, Parser};
use scraper::Html;

/// Renders CommonMark to HTML and reads the text of the whole rendered document.
///
/// Raw HTML in the source is escaped, so tags written in Markdown stay searchable text.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownExtractor;

impl MarkdownExtractor {
    pub fn render_html(&self, markdown: &str) -> String {
        let parser = Parser::new(markdown).map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            other => other,
        });
        let mut rendered = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut rendered, parser);
        rendered
    }
}

impl TextExtractor for MarkdownExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let markdown = String::from_utf8_lossy(bytes);
        let rendered = self.render_html(&markdown);
        let document = Html::parse_document(&rendered);
        Ok(visible_text(document.root_element()).trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_is_removed() -> Result<(), ExtractionError> {
        let text = MarkdownExtractor.extract(b"# Heading\n\nSome *emphasis* and a [link](https://example.com).\n")?;

        assert!(text.starts_with("Heading"));
        assert!(text.contains("Some emphasis and a link."));
        assert!(!text.contains('#'));
        assert!(!text.contains("https://example.com"));
        Ok(())
    }

    #[test]
    fn whitespace_only_markdown_is_empty() -> Result<(), ExtractionError> {
        let text = MarkdownExtractor.extract(b"   \n\n\t\n")?;
        assert!(text.is_empty());
        Ok(())
    }

    #[test]
    fn raw_html_is_kept_as_literal_text() -> Result<(), ExtractionError> {
        let text = MarkdownExtractor.extract(b"Use <b>bold</b> here.\n\n<script>alert(1)</script>\n")?;

        assert!(text.contains("Use <b>bold</b> here."));
        assert!(text.contains("<script>alert(1)</script>"));
        Ok(())
    }

    #[test]
    fn code_blocks_keep_their_text() -> Result<(), ExtractionError> {
        let text = MarkdownExtractor.extract(b"```\nlet x = 1;\n```\n")?;
        assert_eq!(text, "let x = 1;");
        Ok(())
    }
}
