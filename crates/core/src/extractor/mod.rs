//! Format-specific strategies turning raw upload bytes into plain text.
//!
//! Every extractor is total: it returns text (possibly empty when the input
//! holds none) or an [`ExtractionError`] when the input cannot be parsed.

mod html;
mod markdown;
mod pdf;
mod text;

use crate::error::ExtractionError;

pub use html::HtmlExtractor;
pub use markdown::MarkdownExtractor;
pub use pdf::{LopdfExtractor, PageText};
pub use text::PlainTextExtractor;

#[cfg(test)]
pub(crate) use pdf::tests::pdf_with_pages;

pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}
