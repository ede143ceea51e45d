use crate::models::ProjectMetadata;

/// Form state for the project metadata tab
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataForm {
    pub working_title: String,
    pub book_title: String,
    /// One author per line
    pub authors_text: String,
}

impl MetadataForm {
    pub fn load(metadata: &ProjectMetadata) -> Self {
        let authors_text = metadata
            .book_authors
            .iter()
            .map(|a| format!("{}\n", a))
            .collect();
        Self {
            working_title: metadata.project_name.clone(),
            book_title: metadata.book_title.clone(),
            authors_text,
        }
    }

    /// Authors parsed from the text block, trimmed, blank lines skipped
    pub fn authors(&self) -> Vec<String> {
        self.authors_text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn to_metadata(&self) -> ProjectMetadata {
        ProjectMetadata {
            project_name: self.working_title.clone(),
            book_title: self.book_title.clone(),
            book_authors: self.authors(),
        }
    }
}
