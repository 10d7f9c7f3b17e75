//! Book classification: floor and raw subcategory label per book
//!
//! The layout engine only sees the [`Classifier`] trait. [`KeywordClassifier`]
//! is the coarse keyword rule set used for the default seven-floor plan; any
//! other strategy (lookup table, closure, external tool output) plugs in the
//! same way.

use regex::Regex;

use super::book::Book;

/// Floor ids used by the default rule set
pub mod floors {
    pub const HISTORY_WAR: &str = "history_war";
    pub const LITERATURE_FICTION: &str = "literature_fiction";
    pub const CRIME_MYSTERY_GOTHIC: &str = "crime_mystery_gothic";
    pub const SCIFI_FANTASY: &str = "scifi_fantasy";
    pub const CHILDREN_YA: &str = "children_ya";
    pub const POETRY_DRAMA: &str = "poetry_drama";
    pub const NONFICTION_THOUGHT: &str = "nonfiction_thought";
}

/// Classifier output for one book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub floor_id: String,
    /// Raw subcategory label; normalized by the loader before counting
    pub subcategory: String,
}

impl Classification {
    pub fn new(floor_id: impl Into<String>, subcategory: impl Into<String>) -> Self {
        Self {
            floor_id: floor_id.into(),
            subcategory: subcategory.into(),
        }
    }
}

/// A pure `Book -> (floor, label)` function
pub trait Classifier {
    fn classify(&self, book: &Book) -> Classification;
}

impl<F> Classifier for F
where
    F: Fn(&Book) -> Classification,
{
    fn classify(&self, book: &Book) -> Classification {
        self(book)
    }
}

/// Normalize a subcategory label: trim, drop a leading `Category:` prefix
/// (any case), collapse internal whitespace to single spaces.
pub fn normalize_label(raw: &str) -> String {
    const PREFIX: &str = "category:";

    let trimmed = raw.trim();
    let rest = trimmed
        .get(..PREFIX.len())
        .filter(|head| head.eq_ignore_ascii_case(PREFIX))
        .map(|_| &trimmed[PREFIX.len()..])
        .unwrap_or(trimmed);
    rest.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Ordered floor rules: first match wins, unmatched books land on literature.
const FLOOR_RULES: &[(&str, &[&str])] = &[
    (floors::CHILDREN_YA, &[r"children", r"juvenile"]),
    (
        floors::POETRY_DRAMA,
        &[
            r"\bpoetry\b",
            r"\bpoems\b",
            r"plays/films/dramas",
            r"\bdrama\b",
            r"\btheatre\b",
        ],
    ),
    (
        floors::SCIFI_FANTASY,
        &[
            r"science-?fiction",
            r"sci-?fi",
            r"fantasy",
            r"mythology",
            r"legends?",
            r"folklore",
            r"fairy tales",
        ],
    ),
    (
        floors::CRIME_MYSTERY_GOTHIC,
        &[
            r"crime",
            r"thrillers?",
            r"mystery",
            r"detective",
            r"horror",
            r"gothic",
            r"ghost",
            r"vampire",
            r"occult",
            r"haunted",
        ],
    ),
    (
        floors::HISTORY_WAR,
        &[
            r"\bhistory\b",
            r"\bwar\b",
            r"military",
            r"revolution",
            r"history -",
        ],
    ),
    (
        floors::NONFICTION_THOUGHT,
        &[
            r"philosophy",
            r"ethics",
            r"religion",
            r"spiritual",
            r"theology",
            r"science",
            r"physics",
            r"chemistry",
            r"biology",
            r"mathematics",
            r"engineering",
            r"technology",
            r"how to",
            r"travel",
            r"voyage",
            r"geography",
            r"biograph",
            r"autobiograph",
            r"memoirs",
        ],
    ),
];

/// Shelf labels too broad to name a subcategory outside the literature floor
const BROAD_SHELVES: &[&str] = &["novels", "short stories"];

/// Keyword/regex classifier for the default seven-floor plan
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    rules: Vec<(String, Regex)>,
    default_floor: String,
}

impl KeywordClassifier {
    /// Compile the built-in rule set
    pub fn new() -> Result<Self, regex::Error> {
        let rules = FLOOR_RULES
            .iter()
            .map(|(floor, patterns)| {
                let alternation = format!("(?i){}", patterns.join("|"));
                Regex::new(&alternation).map(|re| (floor.to_string(), re))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            rules,
            default_floor: floors::LITERATURE_FICTION.to_string(),
        })
    }

    fn classify_floor(&self, text: &str) -> &str {
        self.rules
            .iter()
            .find(|(_, re)| re.is_match(text))
            .map(|(floor, _)| floor.as_str())
            .unwrap_or(&self.default_floor)
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new().expect("built-in floor rules should compile")
    }
}

impl Classifier for KeywordClassifier {
    fn classify(&self, book: &Book) -> Classification {
        let text = book
            .bookshelves
            .iter()
            .chain(&book.subjects)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
            .to_lowercase();

        let floor = self.classify_floor(&text);
        let subcategory = choose_subcategory(book, floor);
        Classification::new(floor, subcategory)
    }
}

/// Pick the most specific shelf-like label, else a subject keyword bucket.
fn choose_subcategory(book: &Book, floor: &str) -> String {
    let shelves: Vec<String> = book
        .bookshelves
        .iter()
        .filter(|s| !s.trim().is_empty())
        .map(|s| normalize_label(s))
        .collect();

    let specific = shelves.iter().find(|shelf| {
        floor == floors::LITERATURE_FICTION
            || !BROAD_SHELVES.contains(&shelf.to_lowercase().as_str())
    });
    if let Some(shelf) = specific {
        return shelf.clone();
    }

    let subjects = book
        .subjects
        .iter()
        .filter(|s| !s.trim().is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n")
        .to_lowercase();
    let has = |needle: &str| subjects.contains(needle);

    let label = match floor {
        floors::HISTORY_WAR => {
            if has("american") {
                "History - American"
            } else if has("europe") {
                "History - European"
            } else if has("brit") {
                "History - British"
            } else if has("war") || has("military") {
                "History - Warfare"
            } else {
                "History - Other"
            }
        }
        floors::CRIME_MYSTERY_GOTHIC => {
            if has("detective") {
                "Detective Fiction"
            } else if has("gothic") || has("horror") {
                "Gothic & Horror"
            } else {
                "Crime & Mystery"
            }
        }
        floors::SCIFI_FANTASY => {
            if has("science fiction") || has("space") || has("time travel") {
                "Science Fiction"
            } else if has("myth") || has("legend") || has("folklore") {
                "Mythology & Folklore"
            } else {
                "Fantasy"
            }
        }
        floors::CHILDREN_YA => {
            if has("fairy") {
                "Fairy Tales"
            } else if has("animals") || has("birds") {
                "Animals & Nature"
            } else {
                "Children"
            }
        }
        floors::POETRY_DRAMA => {
            if has("plays") || has("drama") || has("theatre") {
                "Drama"
            } else {
                "Poetry"
            }
        }
        floors::NONFICTION_THOUGHT => {
            if has("philosophy") || has("ethics") {
                "Philosophy"
            } else if has("religion") || has("theology") {
                "Religion"
            } else if has("travel") || has("geography") {
                "Travel"
            } else if has("biograph") || has("memoir") {
                "Biography"
            } else {
                "Science & Reference"
            }
        }
        _ => shelves.first().map(String::as_str).unwrap_or("Other"),
    };
    label.to_string()
}
