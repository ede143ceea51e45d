//! Project settings editor session
//!
//! Ties the metadata form, both label editors and the auto-replace table to
//! one project. The session reads snapshots from a [`ProjectModel`] when it
//! opens and writes back only what changed when it is saved.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::EditorConfig;
use crate::error::EditorError;
use crate::labels::{ItemToken, LabelListEditor};
use crate::metadata::MetadataForm;
use crate::models::{
    AlertLevel, EditOutcome, LabelCategory, LabelEntry, LabeledItem, ProjectMetadata, ReplaceMap,
};
use crate::replace::ReplaceTableEditor;

/// The project the editor reads from and writes to
pub trait ProjectModel {
    /// Refresh label usage counts before snapshots are taken
    fn recount_usage(&mut self) {}

    fn metadata(&self) -> ProjectMetadata;

    /// Labels of a category with their current usage counts
    fn labels(&self, category: LabelCategory) -> Vec<LabeledItem>;

    fn auto_replace(&self) -> ReplaceMap;

    fn set_metadata(&mut self, metadata: ProjectMetadata) -> Result<()>;

    /// Replace a label list. Entries carry the name they were loaded with, so
    /// documents using a renamed label can follow the new name.
    fn set_labels(&mut self, category: LabelCategory, labels: Vec<LabelEntry>) -> Result<()>;

    fn set_auto_replace(&mut self, map: ReplaceMap) -> Result<()>;
}

/// The application window hosting the editor
pub trait ProjectHost {
    /// Rebuild views that display labels, e.g. the project tree
    fn rebuild_tree(&mut self);

    /// Show a message to the user
    fn alert(&mut self, message: &str, level: AlertLevel);
}

/// What a save wrote back to the project
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveReport {
    pub status_changed: bool,
    pub importance_changed: bool,
    pub auto_replace_changed: bool,
}

impl SaveReport {
    /// Whether dependent views were asked to rebuild
    pub fn labels_changed(&self) -> bool {
        self.status_changed || self.importance_changed
    }
}

/// An open project settings editor
#[derive(Debug, Clone)]
pub struct ProjectEditor {
    metadata: MetadataForm,
    status: LabelListEditor,
    importance: LabelListEditor,
    replace: ReplaceTableEditor,
    banner_graphic: PathBuf,
}

impl ProjectEditor {
    /// Open an editor on `project`
    pub fn open<P>(project: &mut P, config: &EditorConfig) -> Self
    where
        P: ProjectModel + ?Sized,
    {
        log::debug!("Initialising project editor");
        project.recount_usage();

        let mut status = LabelListEditor::new(LabelCategory::Status, config);
        status.load(project.labels(LabelCategory::Status));
        let mut importance = LabelListEditor::new(LabelCategory::Importance, config);
        importance.load(project.labels(LabelCategory::Importance));
        let mut replace = ReplaceTableEditor::new(config);
        replace.load(project.auto_replace().iter());

        Self {
            metadata: MetadataForm::load(&project.metadata()),
            status,
            importance,
            replace,
            banner_graphic: config.banner_graphic(),
        }
    }

    pub fn banner_graphic(&self) -> &Path {
        &self.banner_graphic
    }

    pub fn metadata(&self) -> &MetadataForm {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut MetadataForm {
        &mut self.metadata
    }

    pub fn labels(&self, category: LabelCategory) -> &LabelListEditor {
        match category {
            LabelCategory::Status => &self.status,
            LabelCategory::Importance => &self.importance,
        }
    }

    pub fn labels_mut(&mut self, category: LabelCategory) -> &mut LabelListEditor {
        match category {
            LabelCategory::Status => &mut self.status,
            LabelCategory::Importance => &mut self.importance,
        }
    }

    pub fn replacements(&self) -> &ReplaceTableEditor {
        &self.replace
    }

    pub fn replacements_mut(&mut self) -> &mut ReplaceTableEditor {
        &mut self.replace
    }

    /// Whether any label list or the replacement table has unsaved edits
    pub fn has_changes(&self) -> bool {
        self.status.is_changed() || self.importance.is_changed() || self.replace.is_changed()
    }

    /// Delete a label, alerting the user if it is still in use
    pub fn delete_label<H>(
        &mut self,
        category: LabelCategory,
        token: Option<ItemToken>,
        host: &mut H,
    ) -> Result<EditOutcome, EditorError>
    where
        H: ProjectHost + ?Sized,
    {
        let result = self.labels_mut(category).delete_item(token);
        if let Err(err @ EditorError::InUse { .. }) = &result {
            host.alert(&err.to_string(), AlertLevel::Error);
        }
        result
    }

    /// Write all changes back to the project and close the editor
    pub fn save<P, H>(self, project: &mut P, host: &mut H) -> Result<SaveReport>
    where
        P: ProjectModel + ?Sized,
        H: ProjectHost + ?Sized,
    {
        log::debug!("Saving project settings");
        let mut report = SaveReport::default();

        project
            .set_metadata(self.metadata.to_metadata())
            .context("Failed to update project metadata")?;

        // A list already written still needs the tree rebuilt if a later write fails
        let written = self.write_labels(project, &mut report);
        if report.labels_changed() {
            host.rebuild_tree();
        }
        written?;

        if let Some(map) = self.replace.commit().into_changed() {
            log::debug!("Writing {} auto-replace entries", map.len());
            project
                .set_auto_replace(map)
                .context("Failed to update auto-replace list")?;
            report.auto_replace_changed = true;
        }

        Ok(report)
    }

    fn write_labels<P>(&self, project: &mut P, report: &mut SaveReport) -> Result<()>
    where
        P: ProjectModel + ?Sized,
    {
        for editor in [&self.status, &self.importance] {
            let category = editor.category();
            let Some(labels) = editor.commit_entries().into_changed() else {
                continue;
            };
            log::debug!("Writing {} {} labels", labels.len(), category);
            project
                .set_labels(category, labels)
                .with_context(|| format!("Failed to update {} labels", category))?;
            match category {
                LabelCategory::Status => report.status_changed = true,
                LabelCategory::Importance => report.importance_changed = true,
            }
        }
        Ok(())
    }

    /// Close the editor without touching the project
    pub fn cancel(self) {
        log::debug!("Project settings editor cancelled");
    }
}
