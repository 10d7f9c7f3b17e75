//! Layout engine for assigning every book a physical slot
//!
//! This module takes a classified catalog and a floor plan and computes the
//! full library layout: subcategories per floor, room ranges, dense slot
//! tables, primary locations, and the per-room shelf tag index. Each stage
//! consumes the complete output of the one before it.

pub mod allocator;
pub mod capacity;
pub mod config;
pub mod error;
pub mod locate;
pub mod shuffle;
pub mod subcategory;
pub mod tags;
pub mod types;

pub use allocator::{allocate_floor, DonorCursors, DonorPools};
pub use capacity::{plan_rooms, rooms_for, RoomRange};
pub use config::{Geometry, LayoutConfig};
pub use error::LayoutError;
pub use locate::{locate_slot, primary_locations, SlotPosition};
pub use shuffle::{shuffle_key, stable_shuffle};
pub use subcategory::select_subcategories;
pub use tags::{compress_shelf, expand_shelf, floor_room_tags};
pub use types::*;

use crate::catalog::{ClassifiedCatalog, FloorCatalog};
use crate::floorplan::FloorPlan;

/// Run the layout pipeline over a classified catalog.
///
/// Floors are processed in `plan` order; that order fixes room numbers and
/// primary-location precedence.
pub fn compute(
    catalog: &ClassifiedCatalog,
    plan: &FloorPlan,
    config: &LayoutConfig,
) -> Result<LibraryLayout, LayoutError> {
    config.validate()?;
    let geometry = config.geometry;

    let floor_books: Vec<&FloorCatalog> = plan
        .floors
        .iter()
        .map(|spec| {
            catalog.floor(&spec.id).ok_or_else(|| LayoutError::UnknownFloor {
                floor: spec.id.clone(),
            })
        })
        .collect::<Result<_, _>>()?;

    let selected: Vec<Vec<Subcategory>> = floor_books
        .iter()
        .map(|f| {
            select_subcategories(
                f.books.iter().map(|b| b.subcategory.as_str()),
                config.top_subs,
                config.min_sub_books,
            )
        })
        .collect();

    let counts: Vec<usize> = floor_books.iter().map(|f| f.len()).collect();
    let ranges = plan_rooms(&counts, &geometry);

    let floors: Vec<Floor> = plan
        .floors
        .iter()
        .zip(&ranges)
        .zip(&selected)
        .zip(&counts)
        .map(|(((spec, range), subs), &book_count)| {
            let named: usize = subs.iter().map(|s| s.count).sum();
            let mut subcategories = subs.clone();
            subcategories.push(Subcategory::new(OTHER, book_count - named));
            Floor {
                id: spec.id.clone(),
                label: spec.label.clone(),
                room_start: range.start,
                room_count: range.count,
                book_count,
                capacity: range.capacity(&geometry),
                fill_from: spec.fill_from.clone(),
                subcategories,
            }
        })
        .collect();

    let pools = DonorPools::build(catalog);
    let mut slots = Vec::with_capacity(floors.len());
    for ((spec, floor), (books, subs)) in plan
        .floors
        .iter()
        .zip(&floors)
        .zip(floor_books.iter().zip(&selected))
    {
        let chain = plan.donor_chain(spec);
        let mut cursors = DonorCursors::new();
        slots.push(allocate_floor(
            books,
            subs,
            floor.capacity,
            &chain,
            &pools,
            &mut cursors,
        )?);
    }

    let primary = primary_locations(&floors, &slots, &geometry);
    let room_tags: Vec<RoomTags> = floors
        .iter()
        .zip(&slots)
        .flat_map(|(floor, table)| floor_room_tags(floor, table, &geometry))
        .collect();
    let rooms_total = ranges.last().map_or(0, RoomRange::end);

    log::info!(
        "laid out {} books on {} floors across {} rooms",
        catalog.total_books(),
        floors.len(),
        rooms_total
    );

    Ok(LibraryLayout {
        geometry,
        rooms_total,
        floors,
        slots,
        primary,
        room_tags,
    })
}
