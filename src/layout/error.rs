//! Error types for the layout engine

use thiserror::Error;

/// Errors that can occur during layout computation
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Shelf, wall and room sizes do not multiply out
    #[error(
        "geometry mismatch: {books_per_shelf} x {shelves_per_wall} x {walls_per_room} != {books_per_room} books per room"
    )]
    GeometryMismatch {
        books_per_shelf: u32,
        shelves_per_wall: u32,
        walls_per_room: u32,
        books_per_room: u32,
    },

    /// A geometry dimension is zero
    #[error("geometry dimension '{dimension}' must be positive")]
    ZeroDimension { dimension: &'static str },

    /// No donor floor in the chain has any books to lend
    #[error("cannot fill floor '{floor}': every donor floor is empty ({})", chain.join(", "))]
    DonorsExhausted { floor: String, chain: Vec<String> },

    /// The catalog and floor plan disagree about which floors exist
    #[error("floor '{floor}' is missing from the classified catalog")]
    UnknownFloor { floor: String },
}

impl LayoutError {
    /// Create a donor exhaustion error
    pub fn donors_exhausted(floor: impl Into<String>, chain: &[String]) -> Self {
        Self::DonorsExhausted {
            floor: floor.into(),
            chain: chain.to_vec(),
        }
    }

    /// Whether the error is detectable from configuration alone
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::GeometryMismatch { .. } | Self::ZeroDimension { .. }
        )
    }
}
