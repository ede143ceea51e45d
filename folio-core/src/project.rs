//! In-memory project settings
//!
//! A plain implementation of [`ProjectModel`] holding the values the settings
//! editor works on. Usage counts are derived from the labels assigned to the
//! project's documents and are never serialized.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{LabelCategory, LabelEntry, LabeledItem, ProjectMetadata, ReplaceMap, Rgb};
use crate::session::ProjectModel;

/// Status and importance assigned to one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentLabels {
    pub status: String,
    pub importance: String,
}

impl DocumentLabels {
    pub fn new(status: impl Into<String>, importance: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            importance: importance.into(),
        }
    }

    fn get(&self, category: LabelCategory) -> &str {
        match category {
            LabelCategory::Status => &self.status,
            LabelCategory::Importance => &self.importance,
        }
    }

    fn get_mut(&mut self, category: LabelCategory) -> &mut String {
        match category {
            LabelCategory::Status => &mut self.status,
            LabelCategory::Importance => &mut self.importance,
        }
    }
}

/// Get the default status labels for a new project
pub fn default_status_labels() -> Vec<LabelEntry> {
    vec![
        LabelEntry::new("New", Rgb::new(100, 100, 100)),
        LabelEntry::new("Note", Rgb::new(200, 50, 0)),
        LabelEntry::new("Draft", Rgb::new(200, 150, 0)),
        LabelEntry::new("Finished", Rgb::new(50, 200, 0)),
    ]
}

/// Get the default importance labels for a new project
pub fn default_importance_labels() -> Vec<LabelEntry> {
    vec![
        LabelEntry::new("New", Rgb::new(100, 100, 100)),
        LabelEntry::new("Minor", Rgb::new(200, 50, 0)),
        LabelEntry::new("Major", Rgb::new(200, 150, 0)),
        LabelEntry::new("Main", Rgb::new(50, 200, 0)),
    ]
}

/// Settings of one writing project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSettings {
    pub metadata: ProjectMetadata,

    #[serde(default = "default_status_labels")]
    pub status_labels: Vec<LabelEntry>,

    #[serde(default = "default_importance_labels")]
    pub importance_labels: Vec<LabelEntry>,

    #[serde(default, skip_serializing_if = "ReplaceMap::is_empty")]
    pub auto_replace: ReplaceMap,

    /// Labels used by the project's documents, supplied by the document tree
    #[serde(skip)]
    document_labels: Vec<DocumentLabels>,

    #[serde(skip)]
    usage: HashMap<(LabelCategory, String), u32>,
}

impl ProjectSettings {
    /// Creates a project with the default label sets
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            metadata: ProjectMetadata {
                project_name: project_name.into(),
                ..Default::default()
            },
            status_labels: default_status_labels(),
            importance_labels: default_importance_labels(),
            auto_replace: ReplaceMap::new(),
            document_labels: Vec::new(),
            usage: HashMap::new(),
        }
    }

    pub fn label_entries(&self, category: LabelCategory) -> &[LabelEntry] {
        match category {
            LabelCategory::Status => &self.status_labels,
            LabelCategory::Importance => &self.importance_labels,
        }
    }

    /// Replace the document label assignments and recount usage
    pub fn set_document_labels(&mut self, documents: Vec<DocumentLabels>) {
        self.document_labels = documents;
        self.count_usage();
    }

    /// Number of documents using the named label
    pub fn usage_count(&self, category: LabelCategory, name: &str) -> u32 {
        self.usage
            .get(&(category, name.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// Point documents at the new names of renamed labels.
    ///
    /// All renames apply at once, so swapping two names moves each document
    /// exactly once.
    fn apply_renames(&mut self, category: LabelCategory, labels: &[LabelEntry]) {
        let renames: HashMap<&str, &str> = labels
            .iter()
            .filter_map(|l| l.renamed_from().map(|old| (old, l.name.as_str())))
            .collect();
        if renames.is_empty() {
            return;
        }
        let mut moved = 0;
        for doc in &mut self.document_labels {
            let label = doc.get_mut(category);
            if let Some(&new_name) = renames.get(label.as_str()) {
                *label = new_name.to_string();
                moved += 1;
            }
        }
        log::debug!(
            "Renamed {} {} labels, {} documents moved",
            renames.len(),
            category,
            moved
        );
    }

    fn count_usage(&mut self) {
        self.usage.clear();
        for doc in &self.document_labels {
            for &category in LabelCategory::all() {
                *self
                    .usage
                    .entry((category, doc.get(category).to_string()))
                    .or_insert(0) += 1;
            }
        }
    }
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self::new("")
    }
}

impl ProjectModel for ProjectSettings {
    fn recount_usage(&mut self) {
        self.count_usage();
    }

    fn metadata(&self) -> ProjectMetadata {
        self.metadata.clone()
    }

    fn labels(&self, category: LabelCategory) -> Vec<LabeledItem> {
        self.label_entries(category)
            .iter()
            .map(|l| {
                let usage = self.usage_count(category, &l.name);
                LabeledItem::new(l.name.clone(), l.color, usage)
            })
            .collect()
    }

    fn auto_replace(&self) -> ReplaceMap {
        self.auto_replace.clone()
    }

    fn set_metadata(&mut self, metadata: ProjectMetadata) -> Result<()> {
        self.metadata = metadata;
        Ok(())
    }

    fn set_labels(&mut self, category: LabelCategory, labels: Vec<LabelEntry>) -> Result<()> {
        self.apply_renames(category, &labels);
        let labels = labels
            .into_iter()
            .map(|l| LabelEntry::new(l.name, l.color))
            .collect();
        match category {
            LabelCategory::Status => self.status_labels = labels,
            LabelCategory::Importance => self.importance_labels = labels,
        }
        self.count_usage();
        Ok(())
    }

    fn set_auto_replace(&mut self, map: ReplaceMap) -> Result<()> {
        self.auto_replace = map;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_project_has_default_labels() {
        let project = ProjectSettings::new("Novel");
        assert_eq!(project.metadata.project_name, "Novel");
        assert_eq!(project.status_labels.len(), 4);
        assert_eq!(project.importance_labels[3].name, "Main");
        assert!(project.auto_replace.is_empty());
    }

    #[test]
    fn test_usage_counts_by_name() {
        let mut project = ProjectSettings::new("Novel");
        project.set_document_labels(vec![
            DocumentLabels::new("Draft", "Main"),
            DocumentLabels::new("Draft", "Minor"),
            DocumentLabels::new("Note", "Main"),
        ]);

        assert_eq!(project.usage_count(LabelCategory::Status, "Draft"), 2);
        assert_eq!(project.usage_count(LabelCategory::Status, "Main"), 0);
        assert_eq!(project.usage_count(LabelCategory::Importance, "Main"), 2);

        let status = project.labels(LabelCategory::Status);
        assert_eq!(status[2], LabeledItem::new("Draft", Rgb::new(200, 150, 0), 2));
        assert_eq!(status[0].usage_count, 0);
    }

    #[test]
    fn test_set_labels_replaces_category() {
        let mut project = ProjectSettings::new("Novel");
        project
            .set_labels(
                LabelCategory::Importance,
                vec![LabelEntry::new("Only", Rgb::BLACK)],
            )
            .unwrap();

        assert_eq!(project.importance_labels.len(), 1);
        assert_eq!(project.status_labels, default_status_labels());
    }

    fn renamed(name: &str, from: &str) -> LabelEntry {
        LabelEntry {
            original_name: Some(from.to_string()),
            ..LabelEntry::new(name, Rgb::BLACK)
        }
    }

    #[test]
    fn test_set_labels_moves_documents_to_renamed_label() {
        let mut project = ProjectSettings::new("Novel");
        project.set_document_labels(vec![
            DocumentLabels::new("Draft", "Main"),
            DocumentLabels::new("Note", "Main"),
        ]);

        project
            .set_labels(
                LabelCategory::Status,
                vec![renamed("Drafting", "Draft"), renamed("Note", "Note")],
            )
            .unwrap();

        assert_eq!(project.usage_count(LabelCategory::Status, "Drafting"), 1);
        assert_eq!(project.usage_count(LabelCategory::Status, "Draft"), 0);
        assert_eq!(project.usage_count(LabelCategory::Status, "Note"), 1);
        assert_eq!(project.usage_count(LabelCategory::Importance, "Main"), 2);
        assert!(project.status_labels.iter().all(|l| l.original_name.is_none()));
    }

    #[test]
    fn test_set_labels_swapped_names() {
        let mut project = ProjectSettings::new("Novel");
        project.set_document_labels(vec![
            DocumentLabels::new("New", "Minor"),
            DocumentLabels::new("New", "Major"),
            DocumentLabels::new("New", "Major"),
        ]);

        project
            .set_labels(
                LabelCategory::Importance,
                vec![renamed("Major", "Minor"), renamed("Minor", "Major")],
            )
            .unwrap();

        assert_eq!(project.usage_count(LabelCategory::Importance, "Major"), 1);
        assert_eq!(project.usage_count(LabelCategory::Importance, "Minor"), 2);
        assert_eq!(project.usage_count(LabelCategory::Status, "New"), 3);
    }

    #[test]
    fn test_yaml_round_trip_skips_usage() {
        let mut project = ProjectSettings::new("Novel");
        project.auto_replace.insert("name", "Alice");
        project.set_document_labels(vec![DocumentLabels::new("Draft", "Main")]);

        let yaml = serde_yaml::to_string(&project).unwrap();
        let loaded: ProjectSettings = serde_yaml::from_str(&yaml).unwrap();

        assert!(!yaml.contains("usage"));
        assert_eq!(loaded.status_labels, project.status_labels);
        assert_eq!(loaded.auto_replace, project.auto_replace);
        assert_eq!(loaded.usage_count(LabelCategory::Status, "Draft"), 0);
    }

    #[test]
    fn test_missing_label_lists_use_defaults() {
        let yaml = "metadata:\n  project_name: Novel\n  book_title: Book\n";
        let project: ProjectSettings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(project.status_labels, default_status_labels());
        assert_eq!(project.importance_labels, default_importance_labels());
        assert!(project.metadata.book_authors.is_empty());
    }
}
