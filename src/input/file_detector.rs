//! Document format detection from the uploaded file name

use crate::error::{Result, ScreenerError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentFormat {
    Pdf,
    Word,
}

impl DocumentFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "doc" | "docx" => Some(DocumentFormat::Word),
            _ => None,
        }
    }

    /// Detect the format of a declared file name such as `cv.DOCX`.
    ///
    /// Anything other than PDF or Word is rejected with `UnsupportedFormat`
    /// rather than being treated as an empty resume.
    pub fn from_filename(filename: &str) -> Result<Self> {
        Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| {
                ScreenerError::UnsupportedFormat(format!(
                    "'{}' is not a PDF or Word document (expected .pdf, .doc or .docx)",
                    filename
                ))
            })
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Pdf => write!(f, "PDF"),
            DocumentFormat::Word => write!(f, "Word"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extensions() {
        assert_eq!(DocumentFormat::from_filename("resume.pdf").unwrap(), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::from_filename("Resume.PDF").unwrap(), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::from_filename("cv.docx").unwrap(), DocumentFormat::Word);
        assert_eq!(DocumentFormat::from_filename("cv.doc").unwrap(), DocumentFormat::Word);
    }

    #[test]
    fn test_unknown_extensions_are_unsupported() {
        for name in ["resume.txt", "resume.xyz", "resume", "pdf"] {
            let err = DocumentFormat::from_filename(name).unwrap_err();
            assert!(matches!(err, ScreenerError::UnsupportedFormat(_)), "{}", name);
        }
    }
}
