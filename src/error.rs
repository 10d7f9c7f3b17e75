//! Error types for catalog loading

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::catalog::BookId;

/// Byte range in catalog source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug)]
pub enum CatalogError {
    /// A non-blank line that is not a JSON object
    #[error("malformed record on line {line}: {message}")]
    Malformed {
        line: usize,
        span: Span,
        message: String,
    },

    /// The classifier assigned a floor the floor plan does not declare
    #[error("book {book_id} classified onto unknown floor '{floor_id}'")]
    UnknownFloor { book_id: BookId, floor_id: String },
}

impl CatalogError {
    /// Create a malformed-record error
    pub fn malformed(line: usize, span: Span, message: impl Into<String>) -> Self {
        Self::Malformed {
            line,
            span,
            message: message.into(),
        }
    }

    /// Get the source span if available
    pub fn span(&self) -> Option<&Span> {
        match self {
            Self::Malformed { span, .. } => Some(span),
            Self::UnknownFloor { .. } => None,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let (span, message) = match self {
            CatalogError::Malformed { span, message, .. } => (span.clone(), message.as_str()),
            CatalogError::UnknownFloor { .. } => return self.to_string(),
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message(self.to_string())
            .with_label(
                Label::new((filename, span))
                    .with_message(message)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}
