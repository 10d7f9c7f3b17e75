//! Configuration for artifact output

/// Configuration options for writing layout artifacts
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Indent the floor index (the other artifacts are always compact)
    pub pretty_floor_index: bool,

    /// Directory for per-room tag files, relative to the output directory
    pub tags_dir: String,

    /// Remove room tag files left over from an earlier, larger layout
    pub prune_stale_tags: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty_floor_index: true,
            tags_dir: "tags".to_string(),
            prune_stale_tags: true,
        }
    }
}

impl OutputConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether the floor index is pretty-printed
    pub fn with_pretty_floor_index(mut self, pretty: bool) -> Self {
        self.pretty_floor_index = pretty;
        self
    }

    /// Set the tag directory name
    pub fn with_tags_dir(mut self, dir: impl Into<String>) -> Self {
        self.tags_dir = dir.into();
        self
    }

    /// Set whether stale room tag files are removed
    pub fn with_prune_stale_tags(mut self, prune: bool) -> Self {
        self.prune_stale_tags = prune;
        self
    }
}
