//! JSON serialization and file output of layout artifacts

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::layout::{Floor, FloorSlots, LibraryLayout, RoomTags};

use super::OutputConfig;

pub const FLOOR_INDEX_FILE: &str = "floors7.v1.json";
pub const SLOTS_FILE: &str = "slots7.v1.json";
pub const PRIMARY_LOCATIONS_FILE: &str = "primaryLocationByBookId.v1.json";

/// File name of one room's tag index
pub fn room_tags_file_name(room: u32) -> String {
    format!("room-{room:03}.v1.json")
}

fn is_room_tags_file(name: &str) -> bool {
    name.starts_with("room-") && name.ends_with(".v1.json")
}

/// Errors that can occur while writing artifacts
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize layout: {0}")]
    Json(#[from] serde_json::Error),
}

impl OutputError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FloorIndex<'a> {
    books_per_room: u32,
    rooms_total: u32,
    floors: &'a [Floor],
}

/// Slot tables keyed by floor id, in plan order
struct SlotsByFloor<'a>(&'a [FloorSlots]);

impl Serialize for SlotsByFloor<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|s| (s.floor_id.as_str(), s)))
    }
}

/// `{booksPerRoom, roomsTotal, floors}`
pub fn floor_index_json(layout: &LibraryLayout, pretty: bool) -> Result<String, OutputError> {
    let index = FloorIndex {
        books_per_room: layout.books_per_room(),
        rooms_total: layout.rooms_total,
        floors: &layout.floors,
    };
    let json = if pretty {
        serde_json::to_string_pretty(&index)?
    } else {
        serde_json::to_string(&index)?
    };
    Ok(json)
}

/// `{floorId: {floorId, capacity, bookIdBySlot, subIdBySlot}}`
pub fn slots_json(layout: &LibraryLayout) -> Result<String, OutputError> {
    Ok(serde_json::to_string(&SlotsByFloor(&layout.slots))?)
}

/// `{"<bookId>": {room, wall, shelf, volume, floorId, subId}}`, ids ascending
pub fn primary_locations_json(layout: &LibraryLayout) -> Result<String, OutputError> {
    Ok(serde_json::to_string(&layout.primary)?)
}

/// `{room, tags: [{wall, shelf, volStart, subId, label}]}`
pub fn room_tags_json(room: &RoomTags) -> Result<String, OutputError> {
    Ok(serde_json::to_string(room)?)
}

/// Paths written by [`write_artifacts`]
#[derive(Debug, Clone, Default)]
pub struct WrittenArtifacts {
    pub floor_index: PathBuf,
    pub slots: PathBuf,
    pub primary_locations: PathBuf,
    pub room_tags: Vec<PathBuf>,
    /// Stale room tag files removed
    pub pruned: usize,
}

/// Write via a temporary sibling and rename, so readers never see half a file
fn write_file(path: &Path, contents: &str) -> Result<(), OutputError> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, contents).map_err(|e| OutputError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| OutputError::io(path, e))
}

fn prune_stale_tags(tags_dir: &Path, keep: &HashSet<String>) -> Result<usize, OutputError> {
    let entries = fs::read_dir(tags_dir).map_err(|e| OutputError::io(tags_dir, e))?;
    let mut pruned = 0;
    for entry in entries {
        let entry = entry.map_err(|e| OutputError::io(tags_dir, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_room_tags_file(&name) && !keep.contains(&name) {
            let path = entry.path();
            fs::remove_file(&path).map_err(|e| OutputError::io(&path, e))?;
            log::debug!("removed stale tag file {}", path.display());
            pruned += 1;
        }
    }
    Ok(pruned)
}

/// Write every artifact of `layout` under `out_dir`, creating directories
/// as needed.
pub fn write_artifacts(
    layout: &LibraryLayout,
    out_dir: &Path,
    config: &OutputConfig,
) -> Result<WrittenArtifacts, OutputError> {
    let tags_dir = out_dir.join(&config.tags_dir);
    fs::create_dir_all(&tags_dir).map_err(|e| OutputError::io(&tags_dir, e))?;

    let mut written = WrittenArtifacts::default();
    let mut keep = HashSet::new();
    for room in &layout.room_tags {
        let name = room_tags_file_name(room.room);
        let path = tags_dir.join(&name);
        write_file(&path, &room_tags_json(room)?)?;
        keep.insert(name);
        written.room_tags.push(path);
    }
    if config.prune_stale_tags {
        written.pruned = prune_stale_tags(&tags_dir, &keep)?;
    }

    written.floor_index = out_dir.join(FLOOR_INDEX_FILE);
    write_file(
        &written.floor_index,
        &floor_index_json(layout, config.pretty_floor_index)?,
    )?;

    written.slots = out_dir.join(SLOTS_FILE);
    write_file(&written.slots, &slots_json(layout)?)?;

    written.primary_locations = out_dir.join(PRIMARY_LOCATIONS_FILE);
    write_file(&written.primary_locations, &primary_locations_json(layout)?)?;

    log::info!(
        "wrote {} room tag files to {}",
        written.room_tags.len(),
        tags_dir.display()
    );
    Ok(written)
}
