use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two label sets a project carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabelCategory {
    Status,
    Importance,
}

impl LabelCategory {
    /// Get all categories in tab order
    pub fn all() -> &'static [LabelCategory] {
        &[LabelCategory::Status, LabelCategory::Importance]
    }

    /// Get display label for the category tab
    pub fn label(&self) -> &'static str {
        match self {
            LabelCategory::Status => "Status",
            LabelCategory::Importance => "Importance",
        }
    }
}

impl fmt::Display for LabelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelCategory::Status => write!(f, "status"),
            LabelCategory::Importance => write!(f, "importance"),
        }
    }
}

/// An RGB colour triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for (u8, u8, u8) {
    fn from(c: Rgb) -> Self {
        (c.r, c.g, c.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// One entry of a status or importance list as seen by the editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledItem {
    /// Display name, duplicates are allowed
    pub name: String,
    pub color: Rgb,
    /// Number of documents using this label, owned by the project model
    #[serde(default)]
    pub usage_count: u32,
}

impl LabeledItem {
    pub fn new(name: impl Into<String>, color: impl Into<Rgb>, usage_count: u32) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            usage_count,
        }
    }

    /// The list text shown for this item, e.g. `Draft [3]`
    pub fn display_label(&self) -> String {
        format!("{} [{}]", self.name, self.usage_count)
    }
}

/// A label as written back to the project; usage counts are derived and never stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEntry {
    pub name: String,
    pub color: Rgb,
    /// Name the label had when the editor loaded it, `None` for added labels.
    /// Lets the project move documents over to a renamed label.
    #[serde(skip)]
    pub original_name: Option<String>,
}

impl LabelEntry {
    pub fn new(name: impl Into<String>, color: impl Into<Rgb>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            original_name: None,
        }
    }

    /// The label's previous name if it was renamed in the editor
    pub fn renamed_from(&self) -> Option<&str> {
        self.original_name
            .as_deref()
            .filter(|original| *original != self.name)
    }
}

impl From<LabeledItem> for LabelEntry {
    fn from(item: LabeledItem) -> Self {
        Self::new(item.name, item.color)
    }
}

/// One row of the auto-replace table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementEntry {
    pub keyword: String,
    pub replacement: String,
}

/// Insertion-ordered keyword to replacement mapping.
///
/// Inserting a keyword that already exists overwrites its replacement and
/// keeps the original position.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReplaceMap {
    entries: IndexMap<String, String>,
}

impl ReplaceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a keyword, returning the previous replacement
    pub fn insert(
        &mut self,
        keyword: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Option<String> {
        self.entries.insert(keyword.into(), replacement.into())
    }

    pub fn get(&self, keyword: &str) -> Option<&str> {
        self.entries.get(keyword).map(String::as_str)
    }

    /// Remove a keyword, keeping the order of the remaining entries
    pub fn remove(&mut self, keyword: &str) -> Option<String> {
        self.entries.shift_remove(keyword)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Rows of the table in order
    pub fn entries(&self) -> impl Iterator<Item = ReplacementEntry> + '_ {
        self.entries.iter().map(|(k, v)| ReplacementEntry {
            keyword: k.clone(),
            replacement: v.clone(),
        })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ReplaceMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Plain project metadata edited on the settings tab
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Working title of the project
    pub project_name: String,
    pub book_title: String,
    #[serde(default)]
    pub book_authors: Vec<String>,
}

/// Result of committing an editor: either nothing changed, or the final state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Commit<T> {
    Unchanged,
    Changed(T),
}

impl<T> Commit<T> {
    pub fn is_changed(&self) -> bool {
        matches!(self, Commit::Changed(_))
    }

    pub fn into_changed(self) -> Option<T> {
        match self {
            Commit::Changed(value) => Some(value),
            Commit::Unchanged => None,
        }
    }
}

/// Non-error outcome of a selection-based edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The edit was applied and the editor is now dirty
    Applied,
    /// No selection, or the selection no longer exists
    NothingSelected,
    /// Required input was empty after trimming or sanitizing
    EmptyInput,
}

impl EditOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, EditOutcome::Applied)
    }
}

/// Severity of a user-facing alert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Error,
    Warning,
    Info,
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertLevel::Error => write!(f, "Error"),
            AlertLevel::Warning => write!(f, "Warning"),
            AlertLevel::Info => write!(f, "Info"),
        }
    }
}
