use super::TextExtractor;
use crate::error::ExtractionError;
use scraper::{ElementRef, Html};

const HIDDEN_ELEMENTS: [&str; 2] = ["script", "style"];

#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlExtractor;

impl TextExtractor for HtmlExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let html = String::from_utf8_lossy(bytes);
        let document = Html::parse_document(&html);
        let scope = body(&document).unwrap_or_else(|| document.root_element());
        Ok(visible_text(scope).trim().to_string())
    }
}

pub(crate) fn body(document: &Html) -> Option<ElementRef<'_>> {
    document
        .root_element()
        .children()
        .filter_map(ElementRef::wrap)
        .find(|element| element.value().name() == "body")
}

/// Concatenated text of every node under `scope`, skipping script and style content.
pub(crate) fn visible_text(scope: ElementRef<'_>) -> String {
    scope
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|element| HIDDEN_ELEMENTS.contains(&element.name()))
            });
            (!hidden).then_some(&**text)
        })
        .collect()
}
