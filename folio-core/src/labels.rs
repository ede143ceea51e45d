//! Labeled-item list editor
//!
//! Working copy of a status or importance list. Items live in an arena and
//! are addressed by an [`ItemToken`] handed out when the item enters the
//! editor; the list shown to the user is a separate sequence of tokens.
//! Deleting an item only drops its token from that sequence, so tokens held
//! elsewhere stay valid for the lifetime of the editor.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{EditorConfig, LabelDefaults};
use crate::error::EditorError;
use crate::models::{Commit, EditOutcome, LabelCategory, LabelEntry, LabeledItem, Rgb};

/// Stable handle to an item in a [`LabelListEditor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemToken(usize);

impl ItemToken {
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for ItemToken {
    fn from(index: usize) -> Self {
        ItemToken(index)
    }
}

impl fmt::Display for ItemToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Synchronous colour chooser, e.g. a modal colour dialog.
///
/// Returns `None` when the user dismisses the chooser.
pub trait ColorPicker {
    fn pick_color(&mut self, initial: Rgb) -> Option<Rgb>;
}

/// Read-only view of a visible item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    pub token: ItemToken,
    pub name: String,
    pub color: Rgb,
    pub usage_count: u32,
    /// List text, `name [usage]`
    pub display_label: String,
    /// Created during this editing session
    pub is_new: bool,
}

#[derive(Debug, Clone)]
struct Slot {
    item: LabeledItem,
    /// Name at load time, `None` for items added in this session
    original_name: Option<String>,
}

/// Editor for one label category
#[derive(Debug, Clone)]
pub struct LabelListEditor {
    category: LabelCategory,
    defaults: LabelDefaults,
    slots: Vec<Slot>,
    order: Vec<ItemToken>,
    changed: bool,
}

impl LabelListEditor {
    /// Create an empty editor for `category`
    pub fn new(category: LabelCategory, config: &EditorConfig) -> Self {
        Self {
            category,
            defaults: config.label_defaults(category).clone(),
            slots: Vec::new(),
            order: Vec::new(),
            changed: false,
        }
    }

    pub fn category(&self) -> LabelCategory {
        self.category
    }

    /// Replace the working copy with a fresh snapshot; tokens restart at 0
    pub fn load<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = LabeledItem>,
    {
        self.slots = items
            .into_iter()
            .map(|item| Slot {
                original_name: Some(item.name.clone()),
                item,
            })
            .collect();
        self.order = (0..self.slots.len()).map(ItemToken).collect();
        self.changed = false;
        log::debug!("Loaded {} {} labels", self.slots.len(), self.category);
    }

    /// Whether any edit has been made since the last load
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Number of visible items
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Visible items in display order
    pub fn visible(&self) -> impl Iterator<Item = ItemView> + '_ {
        self.order.iter().map(move |&token| self.view(token))
    }

    /// Visible tokens in display order
    pub fn visible_order(&self) -> &[ItemToken] {
        &self.order
    }

    /// Look up a visible item for display in the edit form
    pub fn select_item(&self, token: ItemToken) -> Option<ItemView> {
        self.is_visible(token).then(|| self.view(token))
    }

    /// Append an item using the configured defaults
    pub fn add_item(&mut self) -> ItemToken {
        let LabelDefaults { name, color } = self.defaults.clone();
        self.add_item_with(name, color)
    }

    /// Append a new, unused item and return its token
    pub fn add_item_with(&mut self, name: impl Into<String>, color: Rgb) -> ItemToken {
        let token = ItemToken(self.slots.len());
        self.slots.push(Slot {
            item: LabeledItem::new(name, color, 0),
            original_name: None,
        });
        self.order.push(token);
        self.changed = true;
        log::trace!("Added {} item {}", self.category, token);
        token
    }

    /// Apply a new name and colour to the selected item
    pub fn save_item(&mut self, token: Option<ItemToken>, name: &str, color: Rgb) -> EditOutcome {
        let Some(token) = token.filter(|&t| self.is_visible(t)) else {
            return EditOutcome::NothingSelected;
        };
        let name = name.trim();
        if name.is_empty() {
            return EditOutcome::EmptyInput;
        }

        let item = &mut self.slots[token.0].item;
        item.name = name.to_string();
        item.color = color;
        self.changed = true;
        log::trace!("Saved {} item {} as {:?}", self.category, token, name);
        EditOutcome::Applied
    }

    /// Remove the selected item from the list unless documents still use it
    pub fn delete_item(&mut self, token: Option<ItemToken>) -> Result<EditOutcome, EditorError> {
        let Some(pos) = token.and_then(|t| self.order.iter().position(|&o| o == t)) else {
            return Ok(EditOutcome::NothingSelected);
        };
        let token = self.order[pos];
        let item = &self.slots[token.0].item;
        if item.usage_count > 0 {
            log::warn!(
                "Refusing to delete {} item {:?} used {} times",
                self.category,
                item.name,
                item.usage_count
            );
            return Err(EditorError::InUse {
                category: self.category,
                name: item.name.clone(),
                usage: item.usage_count,
            });
        }

        self.order.remove(pos);
        self.changed = true;
        log::trace!("Deleted {} item {}", self.category, token);
        Ok(EditOutcome::Applied)
    }

    /// Replace the display order with a permutation of the visible tokens
    pub fn reorder(&mut self, new_order: &[ItemToken]) -> Result<(), EditorError> {
        let mut expected = self.order.clone();
        let mut found = new_order.to_vec();
        expected.sort_unstable();
        found.sort_unstable();
        if expected != found {
            log::warn!(
                "Rejected {} reorder {:?}, visible order is {:?}",
                self.category,
                new_order,
                self.order
            );
            return Err(EditorError::InvalidOrder {
                category: self.category,
                expected: self.order.clone(),
                found: new_order.to_vec(),
            });
        }

        self.order = new_order.to_vec();
        self.changed = true;
        log::trace!("Reordered {} items to {:?}", self.category, self.order);
        Ok(())
    }

    /// Move one visible item to `to_index`, clamped to the end of the list
    pub fn move_item(&mut self, token: ItemToken, to_index: usize) -> Result<(), EditorError> {
        let mut new_order = self.order.clone();
        match new_order.iter().position(|&t| t == token) {
            Some(pos) => {
                new_order.remove(pos);
                let to_index = to_index.min(new_order.len());
                new_order.insert(to_index, token);
            }
            // Rejected by reorder
            None => new_order.push(token),
        }
        self.reorder(&new_order)
    }

    /// Ask `picker` for a colour for the item.
    ///
    /// Returns the picked colour, or the item's current colour if the picker
    /// was dismissed. Returns `None` for a token that is not visible. The item
    /// itself is not modified; pass the result to [`save_item`](Self::save_item).
    pub fn request_color<P>(&self, token: ItemToken, picker: &mut P) -> Option<Rgb>
    where
        P: ColorPicker + ?Sized,
    {
        if !self.is_visible(token) {
            return None;
        }
        let current = self.slots[token.0].item.color;
        Some(picker.pick_color(current).unwrap_or(current))
    }

    /// Final list in display order, or `Unchanged` if nothing was edited
    pub fn commit(&self) -> Commit<Vec<LabeledItem>> {
        if !self.changed {
            return Commit::Unchanged;
        }
        let items = self
            .order
            .iter()
            .map(|t| self.slots[t.0].item.clone())
            .collect();
        Commit::Changed(items)
    }

    /// Like [`commit`](Self::commit), but as project entries that remember
    /// the name each label was loaded with
    pub fn commit_entries(&self) -> Commit<Vec<LabelEntry>> {
        if !self.changed {
            return Commit::Unchanged;
        }
        let entries = self
            .order
            .iter()
            .map(|t| {
                let slot = &self.slots[t.0];
                LabelEntry {
                    original_name: slot.original_name.clone(),
                    ..LabelEntry::new(slot.item.name.clone(), slot.item.color)
                }
            })
            .collect();
        Commit::Changed(entries)
    }

    fn is_visible(&self, token: ItemToken) -> bool {
        self.order.contains(&token)
    }

    fn view(&self, token: ItemToken) -> ItemView {
        let slot = &self.slots[token.0];
        ItemView {
            token,
            name: slot.item.name.clone(),
            color: slot.item.color,
            usage_count: slot.item.usage_count,
            display_label: slot.item.display_label(),
            is_new: slot.original_name.is_none(),
        }
    }
}
