//! Location resolution: slot index to room/wall/shelf/volume, and the
//! primary location of every book

use std::collections::BTreeMap;

use crate::catalog::BookId;

use super::config::Geometry;
use super::types::{Floor, FloorSlots, Location};

/// Position of a slot relative to its floor's first room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotPosition {
    pub room_offset: u32,
    pub wall: u32,
    pub shelf: u32,
    pub volume: u32,
}

impl Geometry {
    /// Fixed-radix decomposition of a floor-local slot index; `None` when a
    /// dimension is zero
    pub fn decompose(&self, slot: usize) -> Option<SlotPosition> {
        let per_room = self.books_per_room as usize;
        let per_wall = self.books_per_wall() as usize;
        let per_shelf = self.books_per_shelf as usize;

        let room_offset = slot.checked_div(per_room)?;
        let in_room = slot % per_room;
        let wall = in_room.checked_div(per_wall)?;
        let in_wall = in_room % per_wall;
        let shelf = in_wall.checked_div(per_shelf)?;
        Some(SlotPosition {
            room_offset: room_offset as u32,
            wall: wall as u32,
            shelf: shelf as u32,
            volume: (in_wall % per_shelf) as u32,
        })
    }

    /// Inverse of [`Geometry::decompose`]
    pub fn slot_index(&self, position: SlotPosition) -> usize {
        position.room_offset as usize * self.books_per_room as usize
            + position.wall as usize * self.books_per_wall() as usize
            + position.shelf as usize * self.books_per_shelf as usize
            + position.volume as usize
    }
}

/// Location of a floor-local slot
pub fn locate_slot(
    floor: &Floor,
    slots: &FloorSlots,
    slot: usize,
    geometry: &Geometry,
) -> Option<Location> {
    let (_, sub_id) = slots.get(slot)?;
    let pos = geometry.decompose(slot)?;
    Some(Location {
        room: floor.room_start + pos.room_offset,
        wall: pos.wall,
        shelf: pos.shelf,
        volume: pos.volume,
        floor_id: floor.id.clone(),
        sub_id: sub_id.to_string(),
    })
}

/// First location of every book, first write wins.
///
/// Floors are scanned in plan order and slots in ascending index; a book
/// lent to a floor declared before its home floor resolves to the borrowed
/// `RELATED:` slot.
pub fn primary_locations(
    floors: &[Floor],
    slots: &[FloorSlots],
    geometry: &Geometry,
) -> BTreeMap<BookId, Location> {
    let mut primary = BTreeMap::new();

    for (floor, table) in floors.iter().zip(slots) {
        for (slot, &book) in table.book_id_by_slot.iter().enumerate() {
            if primary.contains_key(&book) {
                continue;
            }
            if let Some(location) = locate_slot(floor, table, slot, geometry) {
                primary.insert(book, location);
            }
        }
    }

    primary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor(id: &str, room_start: u32, room_count: u32, capacity: usize) -> Floor {
        Floor {
            id: id.to_string(),
            label: id.to_string(),
            room_start,
            room_count,
            book_count: 0,
            capacity,
            fill_from: Vec::new(),
            subcategories: Vec::new(),
        }
    }

    fn table(id: &str, books: &[BookId], subs: &[&str]) -> FloorSlots {
        FloorSlots {
            floor_id: id.to_string(),
            capacity: books.len(),
            book_id_by_slot: books.to_vec(),
            sub_id_by_slot: subs.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_decompose_default_geometry() {
        let g = Geometry::default();
        let at = |slot| {
            let p = g.decompose(slot).unwrap();
            (p.room_offset, p.wall, p.shelf, p.volume)
        };
        assert_eq!(at(0), (0, 0, 0, 0));
        assert_eq!(at(31), (0, 0, 0, 31));
        assert_eq!(at(32), (0, 0, 1, 0));
        assert_eq!(at(160), (0, 1, 0, 0));
        assert_eq!(at(500), (0, 3, 0, 20));
        assert_eq!(at(532), (0, 3, 1, 20));
        assert_eq!(at(639), (0, 3, 4, 31));
        assert_eq!(at(640), (1, 0, 0, 0));
        assert_eq!(at(1279), (1, 3, 4, 31));
    }

    #[test]
    fn test_slot_index_inverts_decompose() {
        let g = Geometry::default();
        for slot in [0, 17, 401, 639, 640, 12_345] {
            assert_eq!(g.slot_index(g.decompose(slot).unwrap()), slot);
        }
    }

    #[test]
    fn test_locate_slot_offsets_room() {
        let g = Geometry::new(2, 2, 1);
        let f = floor("a", 5, 2, 8);
        let t = table("a", &[1, 2, 3, 4, 5, 6, 7, 8], &["x"; 8]);
        let loc = locate_slot(&f, &t, 6, &g).unwrap();
        assert_eq!((loc.room, loc.wall, loc.shelf, loc.volume), (6, 0, 1, 0));
        assert_eq!(loc.floor_id, "a");
        assert!(locate_slot(&f, &t, 8, &g).is_none());
    }

    #[test]
    fn test_first_occurrence_wins() {
        let g = Geometry::new(2, 1, 1);
        let floors = vec![floor("a", 0, 2, 4), floor("b", 2, 1, 2)];
        let slots = vec![
            table("a", &[1, 2, 1, 3], &["x", "x", "y", "y"]),
            table("b", &[3, 4], &["z", "z"]),
        ];
        let primary = primary_locations(&floors, &slots, &g);
        assert_eq!(primary.len(), 4);
        assert_eq!(primary[&1].room, 0);
        assert_eq!(primary[&1].sub_id, "x");
        assert_eq!(primary[&3].floor_id, "a");
    }

    #[test]
    fn test_borrowed_copy_on_earlier_floor_comes_first() {
        let g = Geometry::new(2, 1, 1);
        let floors = vec![floor("a", 0, 1, 2), floor("b", 1, 1, 2)];
        let slots = vec![
            table("a", &[1, 9], &["x", "RELATED:b"]),
            table("b", &[9, 1], &["z", "RELATED:a"]),
        ];
        let primary = primary_locations(&floors, &slots, &g);
        assert_eq!(primary[&9].floor_id, "a");
        assert_eq!(primary[&9].sub_id, "RELATED:b");
        assert_eq!((primary[&9].room, primary[&9].volume), (0, 1));
        assert_eq!(primary[&1].floor_id, "a");
        assert_eq!(primary[&1].sub_id, "x");
    }

    #[test]
    fn test_zero_dimension_does_not_decompose() {
        assert_eq!(Geometry::new(0, 5, 4).decompose(1), None);
        assert_eq!(Geometry::new(32, 0, 4).decompose(1), None);

        let g = Geometry::new(0, 1, 1);
        let f = floor("a", 0, 1, 1);
        let t = table("a", &[1], &["x"]);
        assert!(locate_slot(&f, &t, 0, &g).is_none());
        assert!(primary_locations(&[f], &[t], &g).is_empty());
    }

    #[test]
    fn test_filler_only_book_still_located() {
        let g = Geometry::new(2, 1, 1);
        let floors = vec![floor("a", 0, 1, 2)];
        let slots = vec![table("a", &[1, 42], &["x", "RELATED:b"])];
        let primary = primary_locations(&floors, &slots, &g);
        assert_eq!(primary[&42].sub_id, "RELATED:b");
    }
}
