use super::TextExtractor;
use crate::error::ExtractionError;

/// Decodes bytes as UTF-8 verbatim. Invalid sequences become U+FFFD; nothing is trimmed.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}
