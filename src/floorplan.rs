//! Floor plan: the static list of floors and their donor chains
//!
//! Floors are declared in a fixed order. That order is part of the layout
//! contract: room numbers are assigned by walking it, and primary locations
//! are resolved by scanning floors in it. Plans are written in TOML; the
//! built-in seven-floor plan backs [`FloorPlan::default`].

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or validating a floor plan
#[derive(Error, Debug)]
pub enum FloorPlanError {
    #[error("Failed to read floor plan file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse floor plan TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid floor plan: {reason}")]
    Invalid { reason: String },
}

impl FloorPlanError {
    fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid {
            reason: reason.into(),
        }
    }
}

/// One floor declaration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FloorSpec {
    /// Stable token, used in seeds and `RELATED:` sentinels
    pub id: String,
    /// Display label
    pub label: String,
    /// Donor floors used to fill slack slots, in round-robin order
    #[serde(default)]
    pub fill_from: Vec<String>,
}

impl FloorSpec {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            fill_from: Vec::new(),
        }
    }

    /// Set the donor chain
    pub fn with_fill_from<S: Into<String>>(mut self, donors: impl IntoIterator<Item = S>) -> Self {
        self.fill_from = donors.into_iter().map(Into::into).collect();
        self
    }
}

/// An ordered, validated set of floors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloorPlan {
    /// Optional name for the plan
    pub name: Option<String>,
    /// Floors in declaration order
    pub floors: Vec<FloorSpec>,
    /// Donor for floors with an empty `fill_from`
    pub fallback_donor: String,
    /// Donor for the fallback floor itself when its `fill_from` is empty
    pub alternate_donor: String,
}

/// TOML structure for deserializing floor plans
#[derive(Deserialize)]
struct TomlFloorPlan {
    metadata: Option<TomlMetadata>,
    fallback: TomlFallback,
    floors: Vec<FloorSpec>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
}

#[derive(Deserialize)]
struct TomlFallback {
    donor: String,
    alternate: String,
}

/// The built-in seven-floor library
pub const DEFAULT_FLOOR_PLAN: &str = r#"
[metadata]
name = "Seven floors"

[fallback]
donor = "literature_fiction"
alternate = "history_war"

[[floors]]
id = "history_war"
label = "History & War"
fill_from = ["literature_fiction"]

[[floors]]
id = "literature_fiction"
label = "Literature & Fiction"
fill_from = ["history_war"]

[[floors]]
id = "crime_mystery_gothic"
label = "Crime, Mystery & Gothic"
fill_from = ["literature_fiction", "scifi_fantasy"]

[[floors]]
id = "scifi_fantasy"
label = "Sci‑Fi & Fantasy"
fill_from = ["literature_fiction"]

[[floors]]
id = "children_ya"
label = "Children & YA"
fill_from = ["literature_fiction"]

[[floors]]
id = "poetry_drama"
label = "Poetry & Drama"
fill_from = ["literature_fiction"]

[[floors]]
id = "nonfiction_thought"
label = "Non‑fiction & Thought"
fill_from = ["history_war", "literature_fiction"]
"#;

impl FloorPlan {
    /// Build a plan from floor declarations and validate it
    pub fn new(
        floors: Vec<FloorSpec>,
        fallback_donor: impl Into<String>,
        alternate_donor: impl Into<String>,
    ) -> Result<Self, FloorPlanError> {
        let plan = Self {
            name: None,
            floors,
            fallback_donor: fallback_donor.into(),
            alternate_donor: alternate_donor.into(),
        };
        plan.validate()?;
        Ok(plan)
    }

    /// Load a floor plan from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, FloorPlanError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a floor plan from a TOML string
    pub fn from_str(content: &str) -> Result<Self, FloorPlanError> {
        let parsed: TomlFloorPlan = toml::from_str(content)?;

        let plan = FloorPlan {
            name: parsed.metadata.and_then(|m| m.name),
            floors: parsed.floors,
            fallback_donor: parsed.fallback.donor,
            alternate_donor: parsed.fallback.alternate,
        };
        plan.validate()?;
        Ok(plan)
    }

    /// Check ids are unique and non-blank and every donor reference resolves
    pub fn validate(&self) -> Result<(), FloorPlanError> {
        if self.floors.is_empty() {
            return Err(FloorPlanError::invalid("no floors declared"));
        }

        let mut seen = HashSet::new();
        for floor in &self.floors {
            if floor.id.trim().is_empty() {
                return Err(FloorPlanError::invalid("floor with blank id"));
            }
            if !seen.insert(floor.id.as_str()) {
                return Err(FloorPlanError::invalid(format!(
                    "duplicate floor id '{}'",
                    floor.id
                )));
            }
        }

        for floor in &self.floors {
            if let Some(donor) = floor.fill_from.iter().find(|d| !seen.contains(d.as_str())) {
                return Err(FloorPlanError::invalid(format!(
                    "floor '{}' fills from unknown floor '{}'",
                    floor.id, donor
                )));
            }
        }

        for (role, donor) in [
            ("fallback", &self.fallback_donor),
            ("alternate", &self.alternate_donor),
        ] {
            if !seen.contains(donor.as_str()) {
                return Err(FloorPlanError::invalid(format!(
                    "{} donor '{}' is not a declared floor",
                    role, donor
                )));
            }
        }

        Ok(())
    }

    /// Look up a floor by id
    pub fn floor(&self, id: &str) -> Option<&FloorSpec> {
        self.floors.iter().find(|f| f.id == id)
    }

    /// Declaration index of a floor
    pub fn position(&self, id: &str) -> Option<usize> {
        self.floors.iter().position(|f| f.id == id)
    }

    /// Donor chain for a floor: its `fill_from`, else the fallback donor,
    /// else the alternate when the floor is the fallback donor itself.
    pub fn donor_chain(&self, floor: &FloorSpec) -> Vec<String> {
        if !floor.fill_from.is_empty() {
            return floor.fill_from.clone();
        }
        if floor.id == self.fallback_donor {
            vec![self.alternate_donor.clone()]
        } else {
            vec![self.fallback_donor.clone()]
        }
    }
}

impl Default for FloorPlan {
    fn default() -> Self {
        Self::from_str(DEFAULT_FLOOR_PLAN).expect("Default floor plan should be valid TOML")
    }
}
