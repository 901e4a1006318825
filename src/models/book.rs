//! Catalog models: authors, books and their physical copies

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Author {
    pub id: i32,
    pub name: String,
}

/// Catalog entry. Not a physical object, see [`BookItem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Book {
    pub id: i32,
    pub title: String,
    #[serde(default)]
    pub author_id: Option<i32>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default, rename = "ISBN")]
    pub isbn: Option<String>,
    /// Resolved from `author_id` at query time
    #[serde(skip)]
    pub author: Option<Author>,
}

impl Book {
    /// `Title by Author`, or the bare title when the author is unknown.
    pub fn display_title(&self) -> String {
        match &self.author {
            Some(author) => format!("{} by {}", self.title, author.name),
            None => self.title.clone(),
        }
    }
}

/// One physical copy of a [`Book`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BookItem {
    pub id: i32,
    pub book_id: i32,
    #[serde(default)]
    pub acquisition_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub condition: Option<String>,
    /// Resolved from `book_id` at query time
    #[serde(skip)]
    pub book: Option<Book>,
}
