use thiserror::Error;

use crate::labels::ItemToken;
use crate::models::LabelCategory;

/// Errors raised by the collection editors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// The label is still referenced by documents and cannot be deleted
    #[error("Cannot delete {category} item that is in use.")]
    InUse {
        category: LabelCategory,
        name: String,
        usage: u32,
    },

    /// A reorder request did not contain exactly the currently visible items
    #[error("Invalid {category} order: expected {expected:?}, found {found:?}")]
    InvalidOrder {
        category: LabelCategory,
        expected: Vec<ItemToken>,
        found: Vec<ItemToken>,
    },
}
