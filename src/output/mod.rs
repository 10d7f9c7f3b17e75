//! Artifact writer for generated layouts
//!
//! This module takes a LibraryLayout and produces the JSON files consumed by
//! the presentation layer: the floor index, the slot tables, the primary
//! location table, and one tag file per room.

pub mod config;
pub mod json;

pub use config::OutputConfig;
pub use json::{
    floor_index_json, primary_locations_json, room_tags_file_name, room_tags_json, slots_json,
    write_artifacts, OutputError, WrittenArtifacts, FLOOR_INDEX_FILE, PRIMARY_LOCATIONS_FILE,
    SLOTS_FILE,
};
