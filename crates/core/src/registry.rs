//! Content-type dispatch from a declared upload type to one extractor.

use crate::error::{ExtractionError, IngestError};
use crate::extractor::{
    HtmlExtractor, LopdfExtractor, MarkdownExtractor, PlainTextExtractor, TextExtractor,
};
use crate::models::DocumentFormat;
use std::collections::HashMap;
use std::sync::Arc;

impl DocumentFormat {
    /// Maps a declared content type and file name to a format, first match wins:
    /// pdf, html, markdown (type mentions `markdown`/`md` or the name ends in `.md`), text.
    ///
    /// Matching ignores ASCII case so `Application/PDF` is not silently dropped.
    pub fn resolve(content_type: &str, filename: &str) -> Option<DocumentFormat> {
        let content_type = content_type.to_ascii_lowercase();
        let filename = filename.to_ascii_lowercase();

        if content_type.contains("pdf") {
            Some(DocumentFormat::Pdf)
        } else if content_type.contains("html") {
            Some(DocumentFormat::Html)
        } else if content_type.contains("markdown")
            || content_type.contains("md")
            || filename.ends_with(".md")
        {
            Some(DocumentFormat::Markdown)
        } else if content_type.contains("text") {
            Some(DocumentFormat::PlainText)
        } else {
            None
        }
    }
}

/// Holds exactly one extractor per supported format.
pub struct ExtractorRegistry {
    extractors: HashMap<DocumentFormat, Arc<dyn TextExtractor>>,
}

impl ExtractorRegistry {
    /// Replace the extractor used for `format`.
    #[must_use]
    pub fn with_extractor<E: TextExtractor + 'static>(
        mut self,
        format: DocumentFormat,
        extractor: E,
    ) -> Self {
        self.extractors.insert(format, Arc::new(extractor));
        self
    }

    pub fn resolve(
        &self,
        content_type: &str,
        filename: &str,
    ) -> Result<(DocumentFormat, Arc<dyn TextExtractor>), IngestError> {
        DocumentFormat::resolve(content_type, filename)
            .and_then(|format| {
                self.extractors
                    .get(&format)
                    .map(|extractor| (format, Arc::clone(extractor)))
            })
            .ok_or_else(|| IngestError::UnsupportedType {
                content_type: content_type.to_string(),
                filename: filename.to_string(),
            })
    }

    pub fn extract(
        &self,
        format: DocumentFormat,
        bytes: &[u8],
    ) -> Option<Result<String, ExtractionError>> {
        self.extractors
            .get(&format)
            .map(|extractor| extractor.extract(bytes))
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        let mut extractors: HashMap<DocumentFormat, Arc<dyn TextExtractor>> = HashMap::new();
        extractors.insert(DocumentFormat::Pdf, Arc::new(LopdfExtractor));
        extractors.insert(DocumentFormat::Html, Arc::new(HtmlExtractor));
        extractors.insert(DocumentFormat::Markdown, Arc::new(MarkdownExtractor));
        extractors.insert(DocumentFormat::PlainText, Arc::new(PlainTextExtractor));
        Self { extractors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_follows_priority_order() {
        let cases = [
            ("application/pdf", "a.pdf", Some(DocumentFormat::Pdf)),
            ("text/html", "index.html", Some(DocumentFormat::Html)),
            ("text/markdown", "notes", Some(DocumentFormat::Markdown)),
            ("text/x-md", "notes", Some(DocumentFormat::Markdown)),
            ("text/plain", "readme.md", Some(DocumentFormat::Markdown)),
            ("", "readme.md", Some(DocumentFormat::Markdown)),
            ("text/plain", "notes.txt", Some(DocumentFormat::PlainText)),
            ("text/csv", "rows.csv", Some(DocumentFormat::PlainText)),
            ("image/png", "photo.png", None),
            ("", "archive.zip", None),
        ];

        for (content_type, filename, expected) in cases {
            assert_eq!(
                DocumentFormat::resolve(content_type, filename),
                expected,
                "{content_type} / {filename}"
            );
        }
    }

    #[test]
    fn pdf_wins_over_later_rules() {
        assert_eq!(
            DocumentFormat::resolve("text/html+pdf", "page.md"),
            Some(DocumentFormat::Pdf)
        );
        assert_eq!(
            DocumentFormat::resolve("text/html", "page.md"),
            Some(DocumentFormat::Html)
        );
    }

    #[test]
    fn dispatch_ignores_case() {
        assert_eq!(
            DocumentFormat::resolve("Application/PDF", "A.PDF"),
            Some(DocumentFormat::Pdf)
        );
        assert_eq!(
            DocumentFormat::resolve("", "README.MD"),
            Some(DocumentFormat::Markdown)
        );
    }

    #[test]
    fn registry_covers_every_format() {
        let registry = ExtractorRegistry::default();
        for format in DocumentFormat::ALL {
            assert!(registry.extract(format, b"").is_some(), "{format}");
        }
    }

    #[test]
    fn unsupported_type_is_reported_with_its_input() {
        let registry = ExtractorRegistry::default();
        match registry.resolve("video/mp4", "clip.mp4") {
            Err(IngestError::UnsupportedType {
                content_type,
                filename,
            }) => {
                assert_eq!(content_type, "video/mp4");
                assert_eq!(filename, "clip.mp4");
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok((format, _)) => panic!("unexpected format: {format}"),
        }
    }

    #[test]
    fn replaced_extractor_is_used() -> Result<(), Box<dyn std::error::Error>> {
        struct Shouting;

        impl TextExtractor for Shouting {
            fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
                Ok(String::from_utf8_lossy(bytes).to_uppercase())
            }
        }

        let registry =
            ExtractorRegistry::default().with_extractor(DocumentFormat::PlainText, Shouting);
        let (format, extractor) = registry.resolve("text/plain", "a.txt")?;

        assert_eq!(format, DocumentFormat::PlainText);
        assert_eq!(extractor.extract(b"quiet")?, "QUIET");
        Ok(())
    }
}
