//! Auto-replace keyword table editor
//!
//! Keys are shown decorated as `<key>`. The canonical key is the sanitized
//! form: only the alphanumeric characters of whatever the user typed.

use std::fmt;

use crate::config::EditorConfig;
use crate::models::{Commit, EditOutcome, ReplaceMap};

/// Reduce a raw key to its alphanumeric characters, in order
pub fn sanitize_key(raw: &str) -> String {
    raw.chars().filter(|c| c.is_alphanumeric()).collect()
}

/// Wrap a key for display in the table
pub fn decorate_key(key: &str) -> String {
    format!("<{}>", key)
}

/// Stable handle to a row of a [`ReplaceTableEditor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowId(u64);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}", self.0)
    }
}

/// Read-only view of a table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: RowId,
    /// Key as shown in the table, e.g. `<name>`
    pub display_key: String,
    /// Key as shown in the edit field, sanitized
    pub edit_key: String,
    pub replacement: String,
}

#[derive(Debug, Clone)]
struct Row {
    id: RowId,
    key: String,
    replacement: String,
}

/// Editor for the auto-replace table
#[derive(Debug, Clone)]
pub struct ReplaceTableEditor {
    placeholder_prefix: String,
    rows: Vec<Row>,
    next_id: u64,
    changed: bool,
}

impl ReplaceTableEditor {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            placeholder_prefix: config.placeholder_prefix.clone(),
            rows: Vec::new(),
            next_id: 0,
            changed: false,
        }
    }

    /// Replace the table with the given keyword/replacement pairs
    pub fn load<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        self.rows.clear();
        for (key, replacement) in entries {
            let key = decorate_key(key.as_ref());
            self.push_row(key, replacement.into());
        }
        self.changed = false;
        log::debug!("Loaded {} auto-replace entries", self.rows.len());
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in display order
    pub fn rows(&self) -> impl Iterator<Item = RowView> + '_ {
        self.rows.iter().map(Row::view)
    }

    /// Look up a row for display in the edit fields
    pub fn select_row(&self, id: RowId) -> Option<RowView> {
        self.find(id).map(|pos| self.rows[pos].view())
    }

    /// Append a placeholder row, `<keyword{N}>` with an empty replacement.
    ///
    /// The placeholder is not checked against existing keys, and the table is
    /// only marked changed once the row is saved.
    pub fn add_row(&mut self) -> RowId {
        let key = format!("{}{}", self.placeholder_prefix, self.rows.len() + 1);
        let id = self.push_row(decorate_key(&key), String::new());
        log::trace!("Added auto-replace {} as {:?}", id, key);
        id
    }

    /// Overwrite the selected row with a sanitized key and replacement text
    pub fn save_row(
        &mut self,
        id: Option<RowId>,
        raw_key: &str,
        replacement: &str,
    ) -> EditOutcome {
        let Some(pos) = id.and_then(|id| self.find(id)) else {
            return EditOutcome::NothingSelected;
        };
        let key = sanitize_key(raw_key);
        if key.is_empty() || replacement.is_empty() {
            return EditOutcome::EmptyInput;
        }

        let row = &mut self.rows[pos];
        row.key = decorate_key(&key);
        row.replacement = replacement.to_string();
        self.changed = true;
        log::trace!("Saved auto-replace {} as {:?}", row.id, key);
        EditOutcome::Applied
    }

    /// Remove the selected row
    pub fn delete_row(&mut self, id: Option<RowId>) -> EditOutcome {
        let Some(pos) = id.and_then(|id| self.find(id)) else {
            return EditOutcome::NothingSelected;
        };
        let row = self.rows.remove(pos);
        self.changed = true;
        log::trace!("Deleted auto-replace {}", row.id);
        EditOutcome::Applied
    }

    /// Final mapping, or `Unchanged` if nothing was saved or deleted.
    ///
    /// Rows whose key sanitizes to nothing are dropped. When two rows share a
    /// key the later row's replacement wins.
    pub fn commit(&self) -> Commit<ReplaceMap> {
        if !self.changed {
            return Commit::Unchanged;
        }
        let mut map = ReplaceMap::new();
        for row in &self.rows {
            let key = sanitize_key(&row.key);
            if key.is_empty() {
                log::debug!("Dropping auto-replace {} with empty key", row.id);
                continue;
            }
            map.insert(key, row.replacement.clone());
        }
        Commit::Changed(map)
    }

    fn push_row(&mut self, key: String, replacement: String) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        self.rows.push(Row {
            id,
            key,
            replacement,
        });
        id
    }

    fn find(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|r| r.id == id)
    }
}

impl Row {
    fn view(&self) -> RowView {
        RowView {
            id: self.id,
            display_key: self.key.clone(),
            edit_key: sanitize_key(&self.key),
            replacement: self.replacement.clone(),
        }
    }
}
