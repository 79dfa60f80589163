use serde::{Deserialize, Serialize};
use serde_json::json;

/// A stored author record. Create-only; never updated in place.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Author {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
}

/// A stored book record, linked to exactly one author.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author_id: i64,
}

/// Author fields accepted at the API boundary.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAuthor {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
}

/// Book fields accepted at the API boundary.
#[derive(Debug, Clone, Deserialize)]
pub struct BookParams {
    pub title: String,
}

impl BookParams {
    /// Field-level validation errors, empty when the book is acceptable.
    pub fn validate(&self) -> Vec<serde_json::Value> {
        let mut details = Vec::new();

        if self.title.trim().is_empty() {
            details.push(json!({"field": "title", "error": "can't be blank"}));
        }

        details
    }
}

/// Fields needed to persist a book once its author exists.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub author_id: i64,
}

/// Request body for creating a book together with its author.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookRequest {
    pub book: BookParams,
    pub author: NewAuthor,
}
