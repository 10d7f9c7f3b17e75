//! Capacity planning: rooms per floor and global room ranges

use super::config::Geometry;

/// Rooms allotted to one floor, as a range of global room numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomRange {
    pub start: u32,
    pub count: u32,
}

impl RoomRange {
    /// Slots available across the range
    pub fn capacity(&self, geometry: &Geometry) -> usize {
        self.count as usize * geometry.books_per_room as usize
    }

    /// First room number after this range
    pub fn end(&self) -> u32 {
        self.start + self.count
    }
}

/// `ceil(book_count / books_per_room)`, never less than one room
pub fn rooms_for(book_count: usize, geometry: &Geometry) -> u32 {
    let per_room = geometry.books_per_room as usize;
    let rooms = book_count.div_ceil(per_room).max(1);
    u32::try_from(rooms).unwrap_or(u32::MAX)
}

/// Assign contiguous room ranges by walking floors in declaration order.
pub fn plan_rooms(book_counts: &[usize], geometry: &Geometry) -> Vec<RoomRange> {
    let mut next = 0u32;
    book_counts
        .iter()
        .map(|&count| {
            let range = RoomRange {
                start: next,
                count: rooms_for(count, geometry),
            };
            next = range.end();
            range
        })
        .collect()
}
