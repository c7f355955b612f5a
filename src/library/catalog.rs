//! In-memory catalog keyed by ISBN.

use super::book::{Book, Reviews};
use crate::error::{AppError, BOOK_NOT_FOUND, NO_BOOKS_BY_AUTHOR, NO_BOOKS_WITH_TITLE, Result};
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Seed data compiled into the binary.
const BUILTIN_SEED: &str = include_str!("../../data/books.json");

/// Books in seed order, unique by ISBN.
///
/// Lookups are linear scans; the catalog is small and never mutated once
/// built. Serializes as a JSON object from ISBN to book record, keeping
/// catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from books, rejecting duplicate ISBNs.
    pub fn from_books(books: impl IntoIterator<Item = Book>) -> Result<Self> {
        let mut catalog = Self::new();
        for book in books {
            if catalog.contains(&book.isbn) {
                return Err(AppError::Config(format!("Duplicate ISBN: {}", book.isbn)));
            }
            catalog.books.push(book);
        }
        Ok(catalog)
    }

    /// The catalog shipped with the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_SEED)
    }

    /// Parse a seed object keyed by ISBN.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| AppError::Config(format!("Failed to parse seed data: {}", e)))
    }

    /// Load a seed file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!(
                "Failed to read seed file {}: {}",
                path.display(),
                e
            ))
        })?;

        let catalog = Self::from_json(&content)?;
        tracing::debug!(path = %path.display(), books = catalog.len(), "Loaded seed file");
        Ok(catalog)
    }

    /// Load from `seed` if given, otherwise the built-in catalog.
    pub fn from_seed(seed: Option<&Path>) -> Result<Self> {
        match seed {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    /// Number of books.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the catalog has no books.
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Whether a book is stored under `isbn`.
    pub fn contains(&self, isbn: &str) -> bool {
        self.books.iter().any(|b| b.isbn == isbn)
    }

    /// Iterate books in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Book> {
        self.books.iter()
    }

    /// The whole catalog. Never fails.
    pub fn list_all(&self) -> &Self {
        self
    }

    /// The book stored under `isbn`, matched exactly.
    pub fn get_by_isbn(&self, isbn: &str) -> Result<&Book> {
        self.books
            .iter()
            .find(|b| b.isbn == isbn)
            .ok_or_else(|| AppError::NotFound(BOOK_NOT_FOUND.to_string()))
    }

    /// Every book whose author equals `author`.
    ///
    /// No match is an error, not an empty list.
    pub fn get_by_author(&self, author: &str) -> Result<Vec<&Book>> {
        self.matching(|b| b.author == author, NO_BOOKS_BY_AUTHOR)
    }

    /// Every book whose title equals `title`.
    ///
    /// No match is an error, not an empty list.
    pub fn get_by_title(&self, title: &str) -> Result<Vec<&Book>> {
        self.matching(|b| b.title == title, NO_BOOKS_WITH_TITLE)
    }

    /// Reviews of the book stored under `isbn`.
    ///
    /// A book without reviews yields an empty map; only a missing ISBN fails.
    pub fn get_reviews(&self, isbn: &str) -> Result<&Reviews> {
        self.get_by_isbn(isbn).map(|b| &b.reviews)
    }

    fn matching(&self, pred: impl Fn(&Book) -> bool, miss: &str) -> Result<Vec<&Book>> {
        let found: Vec<&Book> = self.books.iter().filter(|&b| pred(b)).collect();
        if found.is_empty() {
            return Err(AppError::NotFound(miss.to_string()));
        }
        Ok(found)
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.books.len()))?;
        for book in &self.books {
            map.serialize_entry(&book.isbn, book)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(CatalogVisitor)
    }
}

struct CatalogVisitor;

impl<'de> Visitor<'de> for CatalogVisitor {
    type Value = Catalog;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object of books keyed by ISBN")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Catalog, A::Error> {
        let mut catalog = Catalog::new();
        while let Some((isbn, mut book)) = access.next_entry::<String, Book>()? {
            if catalog.contains(&isbn) {
                return Err(de::Error::custom(format!("duplicate ISBN `{}`", isbn)));
            }
            book.isbn = isbn;
            catalog.books.push(book);
        }
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Catalog {
        Catalog::from_books([
            Book::new("9781", "Alpha", "A. One"),
            Book::new("9782", "Beta", "A. One").with_review("u1", "great"),
        ])
        .unwrap()
    }

    #[test]
    fn test_get_by_author_keeps_catalog_order() {
        let catalog = scenario();
        let found = catalog.get_by_author("A. One").unwrap();

        let isbns: Vec<&str> = found.iter().map(|b| b.isbn.as_str()).collect();
        assert_eq!(isbns, ["9781", "9782"]);
    }

    #[test]
    fn test_get_by_author_is_exact_match() {
        let catalog = scenario();

        assert!(catalog.get_by_author("A.").is_err());
        assert!(catalog.get_by_author("a. one").is_err());
    }

    #[test]
    fn test_get_by_title_miss_is_not_found() {
        let catalog = scenario();
        match catalog.get_by_title("Gamma") {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, NO_BOOKS_WITH_TITLE),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_get_by_isbn() {
        let catalog = scenario();

        assert_eq!(catalog.get_by_isbn("9781").unwrap().title, "Alpha");
        match catalog.get_by_isbn("9999") {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, BOOK_NOT_FOUND),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_get_reviews_empty_is_success() {
        let catalog = scenario();

        assert!(catalog.get_reviews("9781").unwrap().is_empty());
        assert_eq!(catalog.get_reviews("9782").unwrap()["u1"], "great");
        assert!(catalog.get_reviews("9999").is_err());
    }

    #[test]
    fn test_duplicate_isbn_rejected() {
        let result = Catalog::from_books([
            Book::new("1", "Alpha", "A"),
            Book::new("1", "Beta", "B"),
        ]);
        assert!(matches!(result, Err(AppError::Config(_))));

        let json = r#"{"1": {"author": "A", "title": "X"}, "1": {"author": "B", "title": "Y"}}"#;
        assert!(matches!(Catalog::from_json(json), Err(AppError::Config(_))));
    }

    #[test]
    fn test_seed_document_order_is_catalog_order() {
        let json = r#"{
            "10": {"author": "A", "title": "Ten"},
            "2": {"author": "A", "title": "Two"},
            "b": {"author": "A", "title": "Bee"}
        }"#;
        let catalog = Catalog::from_json(json).unwrap();

        let isbns: Vec<&str> = catalog.iter().map(|b| b.isbn.as_str()).collect();
        assert_eq!(isbns, ["10", "2", "b"]);
    }

    #[test]
    fn test_serialize_preserves_order() {
        let catalog = Catalog::from_books([
            Book::new("9782", "Beta", "B"),
            Book::new("9781", "Alpha", "A"),
        ])
        .unwrap();

        let json = serde_json::to_string(&catalog).unwrap();
        let beta = json.find("9782").unwrap();
        let alpha = json.find("9781").unwrap();
        assert!(beta < alpha);
    }

    #[test]
    fn test_empty_catalog_lists_as_empty_object() {
        let catalog = Catalog::new();
        assert_eq!(serde_json::to_string(catalog.list_all()).unwrap(), "{}");
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin().unwrap();

        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.get_by_isbn("1").unwrap().author, "Chinua Achebe");
        assert_eq!(catalog.get_by_author("Unknown").unwrap().len(), 4);
        assert_eq!(catalog.iter().last().unwrap().isbn, "10");
    }
}
