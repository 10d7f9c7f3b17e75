//! Library Layout - deterministic shelf placement for a book catalog
//!
//! This library classifies a flat catalog of book metadata onto a fixed set
//! of floors, packs each floor into fixed-capacity rooms, fills spare slots
//! with books from related floors, and derives a per-room shelf tag index.
//! The same catalog and configuration always produce the same layout.
//!
//! # Example
//!
//! ```rust
//! use library_layout::generate;
//!
//! let catalog = r#"{"id": 1, "subjects": ["World War, 1914-1918"]}
//! {"id": 2, "subjects": ["Love stories"]}"#;
//!
//! let layout = generate(catalog).unwrap();
//! assert_eq!(layout.floors.len(), 7);
//! assert_eq!(layout.locate(1).unwrap().floor_id, "history_war");
//!
//! // history borrows from literature, so book 2 is first seen on the history floor
//! let first = layout.locate(2).unwrap();
//! assert_eq!(first.floor_id, "history_war");
//! assert_eq!(first.sub_id, "RELATED:literature_fiction");
//! ```

pub mod catalog;
pub mod error;
pub mod floorplan;
pub mod layout;
pub mod output;

pub use catalog::{
    load_catalog, parse_catalog, Book, BookId, Classification, Classifier, KeywordClassifier,
};
pub use error::CatalogError;
pub use floorplan::{FloorPlan, FloorPlanError, FloorSpec};
pub use layout::{Geometry, LayoutConfig, LayoutError, LibraryLayout, Location};
pub use output::{write_artifacts, OutputConfig, OutputError};

use thiserror::Error;

/// Errors that can occur during the generation pipeline
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Error while reading or classifying the catalog
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Error in the floor plan
    #[error("floor plan error: {0}")]
    FloorPlan(#[from] FloorPlanError),

    /// Error during layout
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    /// Error while writing artifacts
    #[error("output error: {0}")]
    Output(#[from] OutputError),
}

/// Configuration for the complete generation pipeline
#[derive(Debug, Clone, Default)]
pub struct GenerateConfig {
    /// Floors, their order, and donor chains
    pub plan: FloorPlan,
    /// Geometry and subcategory selection
    pub layout: LayoutConfig,
    /// Artifact output options
    pub output: OutputConfig,
}

impl GenerateConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the floor plan
    pub fn with_plan(mut self, plan: FloorPlan) -> Self {
        self.plan = plan;
        self
    }

    /// Set the layout configuration
    pub fn with_layout(mut self, config: LayoutConfig) -> Self {
        self.layout = config;
        self
    }

    /// Set the output configuration
    pub fn with_output(mut self, config: OutputConfig) -> Self {
        self.output = config;
        self
    }
}

/// Lay out a JSON Lines catalog with the default floors and classifier
pub fn generate(source: &str) -> Result<LibraryLayout, GenerateError> {
    generate_with_config(source, &GenerateConfig::default())
}

/// Lay out a JSON Lines catalog with the keyword classifier and custom
/// configuration
///
/// # Example
///
/// ```rust
/// use library_layout::{generate_with_config, GenerateConfig, Geometry, LayoutConfig};
///
/// let config = GenerateConfig::new().with_layout(
///     LayoutConfig::new()
///         .with_geometry(Geometry::new(8, 2, 2))
///         .with_min_sub_books(1),
/// );
///
/// let catalog = r#"{"id": 10, "subjects": ["Military history"]}
/// {"id": 11, "bookshelves": ["Category: Adventure"]}"#;
///
/// let layout = generate_with_config(catalog, &config).unwrap();
/// assert_eq!(layout.books_per_room(), 32);
/// assert_eq!(layout.rooms_total, 7);
/// ```
pub fn generate_with_config(
    source: &str,
    config: &GenerateConfig,
) -> Result<LibraryLayout, GenerateError> {
    let parsed = parse_catalog(source)?;
    if parsed.skipped > 0 {
        log::info!("skipped {} records without a usable id", parsed.skipped);
    }
    let classifier = KeywordClassifier::default();
    generate_with_classifier(parsed.books, &classifier, config)
}

/// Lay out already-parsed books with any classifier
pub fn generate_with_classifier<I, C>(
    books: I,
    classifier: &C,
    config: &GenerateConfig,
) -> Result<LibraryLayout, GenerateError>
where
    I: IntoIterator<Item = Book>,
    C: Classifier + ?Sized,
{
    config.layout.validate()?;
    let catalog = load_catalog(books, &config.plan, classifier)?;
    let layout = layout::compute(&catalog, &config.plan, &config.layout)?;
    Ok(layout)
}
