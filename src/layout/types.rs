//! Core types for the layout engine

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::BookId;

use super::config::Geometry;

/// Catch-all subcategory for books outside the named set
pub const OTHER: &str = "Other";

/// Prefix of the sub-id given to slots filled from a donor floor
pub const RELATED_PREFIX: &str = "RELATED:";

/// Sub-id for a slot borrowed from `donor`
pub fn related_sub_id(donor: &str) -> String {
    format!("{RELATED_PREFIX}{donor}")
}

/// Whether a sub-id marks borrowed filler rather than a home book
pub fn is_related(sub_id: &str) -> bool {
    sub_id.starts_with(RELATED_PREFIX)
}

/// A named subcategory of one floor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subcategory {
    pub id: String,
    pub label: String,
    pub count: usize,
}

impl Subcategory {
    pub fn new(id: impl Into<String>, count: usize) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            count,
        }
    }
}

/// One floor of the floor index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Floor {
    pub id: String,
    pub label: String,
    pub room_start: u32,
    pub room_count: u32,
    pub book_count: usize,
    pub capacity: usize,
    /// Configured donor chain (empty when the plan relies on the fallback)
    pub fill_from: Vec<String>,
    /// Named subcategories in slot order, then `Other`
    pub subcategories: Vec<Subcategory>,
}

impl Floor {
    /// Global room numbers occupied by this floor
    pub fn rooms(&self) -> std::ops::Range<u32> {
        self.room_start..self.room_start + self.room_count
    }
}

/// Dense slot table of one floor: parallel arrays of length `capacity`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorSlots {
    pub floor_id: String,
    pub capacity: usize,
    pub book_id_by_slot: Vec<BookId>,
    pub sub_id_by_slot: Vec<String>,
}

impl FloorSlots {
    pub fn len(&self) -> usize {
        self.book_id_by_slot.len()
    }

    pub fn is_empty(&self) -> bool {
        self.book_id_by_slot.is_empty()
    }

    /// Book and sub-id at a floor-local slot index
    pub fn get(&self, slot: usize) -> Option<(BookId, &str)> {
        let book = *self.book_id_by_slot.get(slot)?;
        let sub = self.sub_id_by_slot.get(slot)?;
        Some((book, sub.as_str()))
    }
}

/// Decoded form of a slot index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub room: u32,
    pub wall: u32,
    pub shelf: u32,
    pub volume: u32,
    pub floor_id: String,
    pub sub_id: String,
}

/// Start of a run of identical sub-ids along one shelf
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomTag {
    pub wall: u32,
    pub shelf: u32,
    pub vol_start: u32,
    pub sub_id: String,
    pub label: String,
}

/// All shelf tags of one room, ordered by wall, shelf, then `vol_start`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomTags {
    pub room: u32,
    pub tags: Vec<RoomTag>,
}

/// Complete output of one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryLayout {
    pub geometry: Geometry,
    pub rooms_total: u32,
    /// Floors in plan order
    pub floors: Vec<Floor>,
    /// Slot tables, parallel to `floors`
    pub slots: Vec<FloorSlots>,
    /// First occurrence of every placed book, floors in plan order
    pub primary: BTreeMap<BookId, Location>,
    /// Tag index, ascending by room
    pub room_tags: Vec<RoomTags>,
}

impl LibraryLayout {
    pub fn books_per_room(&self) -> u32 {
        self.geometry.books_per_room
    }

    pub fn floor(&self, floor_id: &str) -> Option<&Floor> {
        self.floors.iter().find(|f| f.id == floor_id)
    }

    pub fn slots_for(&self, floor_id: &str) -> Option<&FloorSlots> {
        self.slots.iter().find(|s| s.floor_id == floor_id)
    }

    /// Primary location of a book
    pub fn locate(&self, book_id: BookId) -> Option<&Location> {
        self.primary.get(&book_id)
    }

    /// Tag index of a global room
    pub fn tags_for_room(&self, room: u32) -> Option<&RoomTags> {
        self.room_tags
            .binary_search_by_key(&room, |t| t.room)
            .ok()
            .map(|i| &self.room_tags[i])
    }

    /// Floor that owns a global room
    pub fn floor_for_room(&self, room: u32) -> Option<&Floor> {
        self.floors.iter().find(|f| f.rooms().contains(&room))
    }

    /// Book and sub-id stored at a physical position
    pub fn book_at(&self, room: u32, wall: u32, shelf: u32, volume: u32) -> Option<(BookId, &str)> {
        let g = &self.geometry;
        if wall >= g.walls_per_room || shelf >= g.shelves_per_wall || volume >= g.books_per_shelf {
            return None;
        }
        let floor = self.floor_for_room(room)?;
        let slots = self.slots_for(&floor.id)?;
        let slot = (room - floor.room_start) as usize * g.books_per_room as usize
            + (wall * g.books_per_wall() + shelf * g.books_per_shelf + volume) as usize;
        slots.get(slot)
    }
}
