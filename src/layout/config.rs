//! Configuration for the layout engine

use super::error::LayoutError;

/// Fixed slot geometry: volumes per shelf, shelves per wall, walls per room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    /// Volumes on one shelf
    pub books_per_shelf: u32,

    /// Shelves on one wall
    pub shelves_per_wall: u32,

    /// Walls in one room
    pub walls_per_room: u32,

    /// Slots in one room; must equal the product of the three above
    pub books_per_room: u32,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            books_per_shelf: 32,
            shelves_per_wall: 5,
            walls_per_room: 4,
            books_per_room: 640,
        }
    }
}

impl Geometry {
    /// Geometry whose room size is derived from the other three dimensions
    pub fn new(books_per_shelf: u32, shelves_per_wall: u32, walls_per_room: u32) -> Self {
        Self {
            books_per_shelf,
            shelves_per_wall,
            walls_per_room,
            books_per_room: books_per_shelf
                .saturating_mul(shelves_per_wall)
                .saturating_mul(walls_per_room),
        }
    }

    /// Slots on one wall
    pub fn books_per_wall(&self) -> u32 {
        self.books_per_shelf.saturating_mul(self.shelves_per_wall)
    }

    /// Reject zero dimensions and a room size that is not the exact product
    pub fn validate(&self) -> Result<(), LayoutError> {
        for (dimension, value) in [
            ("books_per_shelf", self.books_per_shelf),
            ("shelves_per_wall", self.shelves_per_wall),
            ("walls_per_room", self.walls_per_room),
            ("books_per_room", self.books_per_room),
        ] {
            if value == 0 {
                return Err(LayoutError::ZeroDimension { dimension });
            }
        }

        let product = self
            .books_per_shelf
            .checked_mul(self.shelves_per_wall)
            .and_then(|n| n.checked_mul(self.walls_per_room));
        if product != Some(self.books_per_room) {
            return Err(LayoutError::GeometryMismatch {
                books_per_shelf: self.books_per_shelf,
                shelves_per_wall: self.shelves_per_wall,
                walls_per_room: self.walls_per_room,
                books_per_room: self.books_per_room,
            });
        }
        Ok(())
    }
}

/// Configuration options for layout computation
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Slot geometry
    pub geometry: Geometry,

    /// Maximum number of named subcategories per floor
    pub top_subs: usize,

    /// Minimum number of books for a label to become a named subcategory
    pub min_sub_books: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            geometry: Geometry::default(),
            top_subs: 8,
            min_sub_books: 200,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the slot geometry
    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Set the maximum number of named subcategories per floor
    pub fn with_top_subs(mut self, top_subs: usize) -> Self {
        self.top_subs = top_subs;
        self
    }

    /// Set the minimum support for a named subcategory
    pub fn with_min_sub_books(mut self, min_sub_books: usize) -> Self {
        self.min_sub_books = min_sub_books;
        self
    }

    /// Validate before any layout work starts
    pub fn validate(&self) -> Result<(), LayoutError> {
        self.geometry.validate()
    }
}
