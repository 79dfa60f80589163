//! Catalog persistence seam.
//!
//! The real deployment owns a relational store; this module defines the
//! interface the API needs from it (create/find/delete/limit/offset with
//! referential integrity) and an in-memory implementation backing the
//! service and its tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

use super::models::{Author, Book, NewAuthor, NewBook};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Author record violates a store constraint. Not a user-facing
    /// validation error; callers propagate it as fatal.
    #[error("author {field} can't be blank")]
    AuthorInvalid { field: &'static str },

    #[error("author {0} does not exist")]
    AuthorMissing(i64),

    #[error("book {0} does not exist")]
    BookNotFound(i64),
}

/// Store operations the books API depends on.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn create_author(&self, author: NewAuthor) -> Result<Author, CatalogError>;

    /// Persist a book; the referenced author must already exist.
    async fn create_book(&self, book: NewBook) -> Result<Book, CatalogError>;

    async fn find_book(&self, id: i64) -> Option<Book>;

    /// Remove a book, returning the deleted record.
    async fn delete_book(&self, id: i64) -> Result<Book, CatalogError>;

    /// Books joined with their authors, in insertion order.
    async fn list_books(&self, limit: usize, offset: usize) -> Vec<(Book, Author)>;
}

#[derive(Default)]
struct Inner {
    authors: HashMap<i64, Author>,
    books: Vec<Book>,
    next_author_id: i64,
    next_book_id: i64,
}

/// Mutex-guarded in-memory catalog with sequential ids starting at 1.
#[derive(Default)]
pub struct MemoryCatalog {
    inner: Mutex<Inner>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn book_count(&self) -> usize {
        self.inner.lock().expect("catalog lock poisoned").books.len()
    }

    pub fn author_count(&self) -> usize {
        self.inner
            .lock()
            .expect("catalog lock poisoned")
            .authors
            .len()
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    async fn create_author(&self, author: NewAuthor) -> Result<Author, CatalogError> {
        if author.first_name.trim().is_empty() {
            return Err(CatalogError::AuthorInvalid {
                field: "first_name",
            });
        }
        if author.last_name.trim().is_empty() {
            return Err(CatalogError::AuthorInvalid { field: "last_name" });
        }

        let mut inner = self.inner.lock().expect("catalog lock poisoned");
        inner.next_author_id += 1;

        let record = Author {
            id: inner.next_author_id,
            first_name: author.first_name,
            last_name: author.last_name,
            age: author.age,
        };
        inner.authors.insert(record.id, record.clone());

        Ok(record)
    }

    async fn create_book(&self, book: NewBook) -> Result<Book, CatalogError> {
        let mut inner = self.inner.lock().expect("catalog lock poisoned");

        if !inner.authors.contains_key(&book.author_id) {
            return Err(CatalogError::AuthorMissing(book.author_id));
        }

        inner.next_book_id += 1;
        let record = Book {
            id: inner.next_book_id,
            title: book.title,
            author_id: book.author_id,
        };
        inner.books.push(record.clone());

        Ok(record)
    }

    async fn find_book(&self, id: i64) -> Option<Book> {
        let inner = self.inner.lock().expect("catalog lock poisoned");
        inner.books.iter().find(|book| book.id == id).cloned()
    }

    async fn delete_book(&self, id: i64) -> Result<Book, CatalogError> {
        let mut inner = self.inner.lock().expect("catalog lock poisoned");

        let position = inner
            .books
            .iter()
            .position(|book| book.id == id)
            .ok_or(CatalogError::BookNotFound(id))?;

        Ok(inner.books.remove(position))
    }

    async fn list_books(&self, limit: usize, offset: usize) -> Vec<(Book, Author)> {
        let inner = self.inner.lock().expect("catalog lock poisoned");

        inner
            .books
            .iter()
            .skip(offset)
            .take(limit)
            .map(|book| {
                let author = inner
                    .authors
                    .get(&book.author_id)
                    .expect("book references missing author")
                    .clone();
                (book.clone(), author)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(first: &str, last: &str, age: u32) -> NewAuthor {
        NewAuthor {
            first_name: first.to_string(),
            last_name: last.to_string(),
            age,
        }
    }

    #[tokio::test]
    async fn ids_are_sequential_from_one() {
        let catalog = MemoryCatalog::new();

        let first = catalog
            .create_author(author("George", "Orwell", 50))
            .await
            .unwrap();
        let second = catalog
            .create_author(author("H.G", "Wells", 70))
            .await
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn blank_author_names_are_rejected() {
        let catalog = MemoryCatalog::new();

        let err = catalog
            .create_author(author("", "Orwell", 50))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            CatalogError::AuthorInvalid {
                field: "first_name"
            }
        );

        let err = catalog
            .create_author(author("George", " ", 50))
            .await
            .unwrap_err();
        assert_eq!(err, CatalogError::AuthorInvalid { field: "last_name" });
    }

    #[tokio::test]
    async fn book_requires_existing_author() {
        let catalog = MemoryCatalog::new();

        let err = catalog
            .create_book(NewBook {
                title: "1984".to_string(),
                author_id: 99,
            })
            .await
            .unwrap_err();

        assert_eq!(err, CatalogError::AuthorMissing(99));
        assert_eq!(catalog.book_count(), 0);
    }

    #[tokio::test]
    async fn delete_missing_book_is_not_found() {
        let catalog = MemoryCatalog::new();

        let err = catalog.delete_book(7).await.unwrap_err();
        assert_eq!(err, CatalogError::BookNotFound(7));
    }

    #[tokio::test]
    async fn list_preserves_insertion_order_and_pages() {
        let catalog = MemoryCatalog::new();
        let writer = catalog.create_author(author("H.G", "Wells", 70)).await.unwrap();

        for title in ["a", "b", "c", "d"] {
            catalog
                .create_book(NewBook {
                    title: title.to_string(),
                    author_id: writer.id,
                })
                .await
                .unwrap();
        }

        let all = catalog.list_books(100, 0).await;
        let titles: Vec<&str> = all.iter().map(|(book, _)| book.title.as_str()).collect();
        assert_eq!(titles, ["a", "b", "c", "d"]);

        let page = catalog.list_books(2, 1).await;
        let titles: Vec<&str> = page.iter().map(|(book, _)| book.title.as_str()).collect();
        assert_eq!(titles, ["b", "c"]);
    }

    #[tokio::test]
    async fn deleted_books_leave_order_intact() {
        let catalog = MemoryCatalog::new();
        let writer = catalog.create_author(author("H.G", "Wells", 70)).await.unwrap();

        for title in ["a", "b", "c"] {
            catalog
                .create_book(NewBook {
                    title: title.to_string(),
                    author_id: writer.id,
                })
                .await
                .unwrap();
        }

        catalog.delete_book(2).await.unwrap();

        let all = catalog.list_books(100, 0).await;
        let ids: Vec<i64> = all.iter().map(|(book, _)| book.id).collect();
        assert_eq!(ids, [1, 3]);
        assert!(catalog.find_book(2).await.is_none());
    }
}
