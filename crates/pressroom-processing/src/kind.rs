//! Document kind classification.
//!
//! The declared content type decides the extraction route; magic-byte
//! sniffing is a fallback for submissions that declare nothing useful.

/// Content-type classification of an archived document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    WordProcessing,
    Unknown,
}

impl DocumentKind {
    /// Classify from a declared content type (with parameters tolerated,
    /// e.g. `application/pdf; charset=binary`).
    pub fn from_content_type(content_type: &str) -> Self {
        let ct = content_type
            .split(';')
            .next()
            .unwrap_or(content_type)
            .trim()
            .to_ascii_lowercase();

        match ct.as_str() {
            "application/pdf" => DocumentKind::Pdf,
            "application/msword"
            | "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                DocumentKind::WordProcessing
            }
            _ => DocumentKind::Unknown,
        }
    }

    /// Classify from a file name or URL path extension.
    pub fn from_extension(path: &str) -> Self {
        let ext = path
            .rsplit('.')
            .next()
            .unwrap_or("")
            .split(['?', '#'])
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "pdf" => DocumentKind::Pdf,
            "doc" | "docx" => DocumentKind::WordProcessing,
            _ => DocumentKind::Unknown,
        }
    }

    /// Classify from the declared content type, falling back to the path
    /// extension when the declaration is missing or generic.
    pub fn classify(content_type: Option<&str>, path: &str) -> Self {
        if let Some(ct) = content_type {
            let kind = Self::from_content_type(ct);
            if kind != DocumentKind::Unknown {
                return kind;
            }
        }
        Self::from_extension(path)
    }

    /// Classify from leading magic bytes.
    pub fn sniff(data: &[u8]) -> Self {
        if data.len() >= 4 && &data[0..4] == b"%PDF" {
            DocumentKind::Pdf
        } else if data.len() >= 4 && data.starts_with(b"PK\x03\x04") {
            // ZIP container: Office Open XML
            DocumentKind::WordProcessing
        } else if data.len() >= 2 && data[0..2] == [0xD0, 0xCF] {
            // Legacy MS Office compound file
            DocumentKind::WordProcessing
        } else {
            DocumentKind::Unknown
        }
    }

    /// MIME type sent to the remote document-understanding backend.
    pub fn mime_type(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "application/pdf",
            DocumentKind::WordProcessing => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            DocumentKind::Unknown => "application/pdf",
        }
    }

    /// Archive key extension for this kind.
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::WordProcessing => "docx",
            DocumentKind::Unknown => "bin",
        }
    }
}
