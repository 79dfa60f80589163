//! Maps stored records to the public API shape.

use serde::Serialize;

use super::models::{Author, Book};

/// Public JSON shape of a book joined with its author.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BookRepresentation {
    pub id: i64,
    pub title: String,
    pub author_name: String,
    pub author_age: u32,
}

pub fn book(book: &Book, author: &Author) -> BookRepresentation {
    BookRepresentation {
        id: book.id,
        title: book.title.clone(),
        author_name: format!("{} {}", author.first_name, author.last_name),
        author_age: author.age,
    }
}

/// Represent a collection, preserving input order.
pub fn collection(rows: &[(Book, Author)]) -> Vec<BookRepresentation> {
    rows.iter().map(|(b, a)| book(b, a)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_author_name_fields() {
        let author = Author {
            id: 1,
            first_name: "George".to_string(),
            last_name: "Orwell".to_string(),
            age: 50,
        };
        let record = Book {
            id: 1,
            title: "1984".to_string(),
            author_id: 1,
        };

        let rep = book(&record, &author);

        assert_eq!(
            serde_json::to_value(&rep).unwrap(),
            serde_json::json!({
                "id": 1,
                "title": "1984",
                "author_name": "George Orwell",
                "author_age": 50
            })
        );
    }

    #[test]
    fn collection_preserves_order() {
        let author = Author {
            id: 1,
            first_name: "H.G".to_string(),
            last_name: "Wells".to_string(),
            age: 70,
        };
        let rows = vec![
            (
                Book {
                    id: 1,
                    title: "a".to_string(),
                    author_id: 1,
                },
                author.clone(),
            ),
            (
                Book {
                    id: 2,
                    title: "b".to_string(),
                    author_id: 1,
                },
                author,
            ),
        ];

        let reps = collection(&rows);
        let ids: Vec<i64> = reps.iter().map(|rep| rep.id).collect();
        assert_eq!(ids, [1, 2]);
    }
}
