//! Catalog loader: classify every book and bucket it onto its home floor

use std::collections::HashSet;

use crate::error::CatalogError;
use crate::floorplan::FloorPlan;
use crate::layout::types::OTHER;

use super::book::{Book, BookId};
use super::classify::{normalize_label, Classifier};

/// A book on its home floor with its normalized raw subcategory label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: BookId,
    pub subcategory: String,
}

/// All books classified onto one floor, in catalog order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FloorCatalog {
    pub floor_id: String,
    pub books: Vec<CatalogEntry>,
}

impl FloorCatalog {
    pub fn new(floor_id: impl Into<String>) -> Self {
        Self {
            floor_id: floor_id.into(),
            books: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Book ids in catalog order
    pub fn book_ids(&self) -> Vec<BookId> {
        self.books.iter().map(|b| b.id).collect()
    }
}

/// Output of the loader: one [`FloorCatalog`] per plan floor, in plan order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedCatalog {
    pub floors: Vec<FloorCatalog>,
    /// Records dropped because their id had already been seen
    pub duplicates: usize,
}

impl ClassifiedCatalog {
    pub fn floor(&self, floor_id: &str) -> Option<&FloorCatalog> {
        self.floors.iter().find(|f| f.floor_id == floor_id)
    }

    pub fn total_books(&self) -> usize {
        self.floors.iter().map(FloorCatalog::len).sum()
    }
}

/// Classify a stream of books onto the floors of `plan`.
///
/// Labels are normalized before they are stored; a label that normalizes to
/// nothing becomes `Other`. A repeated book id keeps its first record.
pub fn load_catalog<I, C>(
    books: I,
    plan: &FloorPlan,
    classifier: &C,
) -> Result<ClassifiedCatalog, CatalogError>
where
    I: IntoIterator<Item = Book>,
    C: Classifier + ?Sized,
{
    let mut floors: Vec<FloorCatalog> = plan
        .floors
        .iter()
        .map(|f| FloorCatalog::new(f.id.clone()))
        .collect();
    let mut seen = HashSet::new();
    let mut duplicates = 0;

    for book in books {
        if !seen.insert(book.id) {
            log::warn!("duplicate book id {}, keeping first record", book.id);
            duplicates += 1;
            continue;
        }

        let classification = classifier.classify(&book);
        let index = plan.position(&classification.floor_id).ok_or_else(|| {
            CatalogError::UnknownFloor {
                book_id: book.id,
                floor_id: classification.floor_id.clone(),
            }
        })?;

        let mut subcategory = normalize_label(&classification.subcategory);
        if subcategory.is_empty() {
            subcategory = OTHER.to_string();
        }
        floors[index].books.push(CatalogEntry {
            id: book.id,
            subcategory,
        });
    }

    for floor in &floors {
        log::debug!("floor {}: {} books", floor.floor_id, floor.len());
    }

    Ok(ClassifiedCatalog { floors, duplicates })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::classify::Classification;
    use crate::floorplan::FloorSpec;

    fn two_floor_plan() -> FloorPlan {
        FloorPlan::new(
            vec![FloorSpec::new("odd", "Odd"), FloorSpec::new("even", "Even")],
            "odd",
            "even",
        )
        .unwrap()
    }

    fn parity(book: &Book) -> Classification {
        let floor = if book.id % 2 == 0 { "even" } else { "odd" };
        let label = book.bookshelves.first().cloned().unwrap_or_default();
        Classification::new(floor, label)
    }

    #[test]
    fn test_books_bucketed_in_plan_order() {
        let books = (1..=5).map(Book::new);
        let catalog = load_catalog(books, &two_floor_plan(), &parity).unwrap();

        assert_eq!(catalog.floors[0].floor_id, "odd");
        assert_eq!(catalog.floors[0].book_ids(), vec![1, 3, 5]);
        assert_eq!(catalog.floors[1].book_ids(), vec![2, 4]);
        assert_eq!(catalog.total_books(), 5);
    }

    #[test]
    fn test_labels_normalized() {
        let books = vec![
            Book::new(1).with_bookshelves(["Category:  Sea   Stories "]),
            Book::new(3).with_bookshelves(["  "]),
        ];
        let catalog = load_catalog(books, &two_floor_plan(), &parity).unwrap();
        let odd = catalog.floor("odd").unwrap();
        assert_eq!(odd.books[0].subcategory, "Sea Stories");
        assert_eq!(odd.books[1].subcategory, "Other");
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let books = vec![
            Book::new(1).with_bookshelves(["First"]),
            Book::new(1).with_bookshelves(["Second"]),
        ];
        let catalog = load_catalog(books, &two_floor_plan(), &parity).unwrap();
        let odd = catalog.floor("odd").unwrap();
        assert_eq!(odd.len(), 1);
        assert_eq!(odd.books[0].subcategory, "First");
        assert_eq!(catalog.duplicates, 1);
    }

    #[test]
    fn test_unknown_floor_is_error() {
        let nowhere = |_: &Book| Classification::new("attic", "Dust");
        let err = load_catalog(vec![Book::new(9)], &two_floor_plan(), &nowhere).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::UnknownFloor { book_id: 9, ref floor_id } if floor_id == "attic"
        ));
    }

    #[test]
    fn test_empty_catalog_keeps_every_floor() {
        let catalog = load_catalog(Vec::new(), &two_floor_plan(), &parity).unwrap();
        assert_eq!(catalog.floors.len(), 2);
        assert!(catalog.floors.iter().all(FloorCatalog::is_empty));
    }
}
