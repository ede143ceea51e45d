pub mod config;
pub mod error;
pub mod labels;
pub mod metadata;
pub mod models;
pub mod project;
pub mod replace;
pub mod session;

// Re-export commonly used types
pub use config::{default_config_path, get_config_dir, EditorConfig, LabelDefaults};
pub use error::EditorError;
pub use labels::{ColorPicker, ItemToken, ItemView, LabelListEditor};
pub use metadata::MetadataForm;
pub use models::{
    AlertLevel, Commit, EditOutcome, LabelCategory, LabelEntry, LabeledItem, ProjectMetadata,
    ReplaceMap, ReplacementEntry, Rgb,
};
pub use project::{
    default_importance_labels, default_status_labels, DocumentLabels, ProjectSettings,
};
pub use replace::{decorate_key, sanitize_key, ReplaceTableEditor, RowId, RowView};
pub use session::{ProjectEditor, ProjectHost, ProjectModel, SaveReport};

#[cfg(test)]
pub(crate) mod test_support {
    /// Route `log` output through the test harness
    pub fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }
}
