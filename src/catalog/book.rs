//! Book records and JSON Lines catalog parsing

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::CatalogError;

/// Catalog identifier of a book. Unique, positive, not necessarily dense.
pub type BookId = u32;

/// A single catalog record, reduced to the fields the layout needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: BookId,
    pub subjects: Vec<String>,
    pub bookshelves: Vec<String>,
    pub languages: Vec<String>,
}

impl Book {
    /// Create a book with no metadata
    pub fn new(id: BookId) -> Self {
        Self {
            id,
            subjects: Vec::new(),
            bookshelves: Vec::new(),
            languages: Vec::new(),
        }
    }

    /// Set the subject headings
    pub fn with_subjects<S: Into<String>>(mut self, subjects: impl IntoIterator<Item = S>) -> Self {
        self.subjects = subjects.into_iter().map(Into::into).collect();
        self
    }

    /// Set the bookshelves
    pub fn with_bookshelves<S: Into<String>>(
        mut self,
        bookshelves: impl IntoIterator<Item = S>,
    ) -> Self {
        self.bookshelves = bookshelves.into_iter().map(Into::into).collect();
        self
    }

    /// Set the language codes
    pub fn with_languages<S: Into<String>>(
        mut self,
        languages: impl IntoIterator<Item = S>,
    ) -> Self {
        self.languages = languages.into_iter().map(Into::into).collect();
        self
    }
}

/// On-disk shape of a record. Unknown fields (title, authors, ...) are ignored.
#[derive(Deserialize)]
struct RawBook {
    #[serde(default)]
    id: Value,
    #[serde(default, deserialize_with = "lenient_strings")]
    subjects: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    bookshelves: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    languages: Vec<String>,
}

/// Accept `null`, a list of strings, or a list of arbitrary scalars.
fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(items
        .unwrap_or_default()
        .into_iter()
        .filter_map(|item| match item {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        })
        .collect())
}

/// Interpret a raw `id` field. Integers and integer strings are accepted;
/// anything else, zero, or negative yields `None`.
fn parse_id(raw: &Value) -> Option<BookId> {
    let id = match raw {
        Value::Number(n) => n.as_u64()?,
        Value::String(s) => s.trim().parse::<u64>().ok()?,
        _ => return None,
    };
    if id == 0 {
        return None;
    }
    BookId::try_from(id).ok()
}

/// Books parsed from a catalog source, with the count of records dropped
/// for unusable ids
#[derive(Debug, Clone, Default)]
pub struct ParsedCatalog {
    pub books: Vec<Book>,
    pub skipped: usize,
}

/// Parse a JSON Lines catalog.
///
/// Blank lines are ignored. Records whose `id` is missing, non-numeric, or
/// not positive are skipped. A line that is not a JSON object is an error
/// carrying the line number and byte span.
pub fn parse_catalog(source: &str) -> Result<ParsedCatalog, CatalogError> {
    let mut parsed = ParsedCatalog::default();
    let mut offset = 0;

    for (index, raw_line) in source.split_inclusive('\n').enumerate() {
        let line_start = offset;
        offset += raw_line.len();

        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        let lead = raw_line.len() - raw_line.trim_start().len();
        let span = line_start + lead..line_start + lead + line.len();

        let value: Value = serde_json::from_str(line)
            .map_err(|e| CatalogError::malformed(index + 1, span.clone(), e.to_string()))?;
        if !value.is_object() {
            return Err(CatalogError::malformed(
                index + 1,
                span,
                "expected a JSON object",
            ));
        }
        let raw: RawBook = serde_json::from_value(value)
            .map_err(|e| CatalogError::malformed(index + 1, span, e.to_string()))?;

        match parse_id(&raw.id) {
            Some(id) => parsed.books.push(Book {
                id,
                subjects: raw.subjects,
                bookshelves: raw.bookshelves,
                languages: raw.languages,
            }),
            None => {
                log::debug!("line {}: skipping record with id {}", index + 1, raw.id);
                parsed.skipped += 1;
            }
        }
    }

    Ok(parsed)
}
