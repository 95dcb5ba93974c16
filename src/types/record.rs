use std::fmt;

use serde::{Deserialize, Serialize};

/// A single bookmarked note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub archived: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Complete field set written when a record is first created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    pub title: String,
    pub url: String,
    pub description: String,
    pub category: String,
    pub archived: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Fields merged into an existing record. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub archived: Option<bool>,
    pub updated_at: Option<i64>,
}

/// Editable fields of the add/edit modal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
}

impl From<&Record> for RecordForm {
    fn from(record: &Record) -> Self {
        Self {
            title: record.title.clone(),
            url: record.url.clone(),
            description: record.description.clone(),
            category: record.category.clone(),
        }
    }
}

/// The active view selector in the sidebar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum FilterTag {
    #[default]
    All,
    Archived,
    Category(String),
}

impl FilterTag {
    /// Parses the wire form: `"all"`, `"archived"`, anything else is a category.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "all" => FilterTag::All,
            "archived" => FilterTag::Archived,
            other => FilterTag::Category(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FilterTag::All => "all",
            FilterTag::Archived => "archived",
            FilterTag::Category(c) => c,
        }
    }
}

impl fmt::Display for FilterTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One page of the filtered record list plus navigation state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub items: Vec<Record>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub has_previous: bool,
    pub has_next: bool,
    /// Numeric controls are only rendered when there is more than one page.
    pub show_controls: bool,
}
