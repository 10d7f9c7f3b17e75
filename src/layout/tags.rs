//! Shelf tag compression: run-length boundaries of sub-ids per shelf

use super::config::Geometry;
use super::types::{Floor, FloorSlots, RoomTag, RoomTags};

/// Boundaries of a shelf's sub-id sequence as `(vol_start, sub_id)`.
///
/// Volume 0 always opens a run; after that a tag is emitted only where the
/// sub-id differs from the previous volume.
pub fn compress_shelf<S: AsRef<str>>(sub_ids: &[S]) -> Vec<(u32, &str)> {
    let mut runs: Vec<(u32, &str)> = Vec::new();
    for (vol, sub) in sub_ids.iter().enumerate() {
        let sub = sub.as_ref();
        if runs.last().map_or(true, |&(_, prev)| prev != sub) {
            runs.push((vol as u32, sub));
        }
    }
    runs
}

/// Rebuild a shelf of `shelf_len` volumes by forward-filling each tag
pub fn expand_shelf(tags: &[(u32, &str)], shelf_len: usize) -> Vec<String> {
    let mut shelf = Vec::with_capacity(shelf_len);
    for (i, &(start, sub)) in tags.iter().enumerate() {
        let end = tags
            .get(i + 1)
            .map_or(shelf_len, |&(next, _)| (next as usize).min(shelf_len));
        let start = start as usize;
        if start < end {
            shelf.extend(std::iter::repeat(sub.to_string()).take(end - start));
        }
    }
    shelf
}

/// Tag index for every room of one floor, rooms ascending
pub fn floor_room_tags(floor: &Floor, slots: &FloorSlots, geometry: &Geometry) -> Vec<RoomTags> {
    let per_room = geometry.books_per_room as usize;
    let per_wall = geometry.books_per_wall() as usize;
    let per_shelf = geometry.books_per_shelf as usize;

    (0..floor.room_count)
        .map(|room_offset| {
            let room_base = room_offset as usize * per_room;
            let mut tags = Vec::new();

            for wall in 0..geometry.walls_per_room {
                for shelf in 0..geometry.shelves_per_wall {
                    let start = room_base + wall as usize * per_wall + shelf as usize * per_shelf;
                    let Some(volumes) = slots.sub_id_by_slot.get(start..start + per_shelf) else {
                        continue;
                    };
                    for (vol_start, sub) in compress_shelf(volumes) {
                        tags.push(RoomTag {
                            wall,
                            shelf,
                            vol_start,
                            sub_id: sub.to_string(),
                            label: sub.to_string(),
                        });
                    }
                }
            }

            RoomTags {
                room: floor.room_start + room_offset,
                tags,
            }
        })
        .filter(|room| !room.tags.is_empty())
        .collect()
}
