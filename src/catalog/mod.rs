//! Catalog input: book records, classification, and per-floor bucketing

pub mod book;
pub mod classify;
pub mod loader;

pub use book::{parse_catalog, Book, BookId, ParsedCatalog};
pub use classify::{normalize_label, Classification, Classifier, KeywordClassifier};
pub use loader::{load_catalog, CatalogEntry, ClassifiedCatalog, FloorCatalog};
