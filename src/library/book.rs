//! Book record model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reviews keyed by reviewer.
pub type Reviews = BTreeMap<String, String>;

/// A book in the catalog.
///
/// Serializes as `{"author", "title", "reviews"}`. The ISBN is the key of the
/// enclosing catalog object and is filled in by [`Catalog`](super::Catalog)
/// when a seed is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// ISBN, unique within a catalog.
    #[serde(skip)]
    pub isbn: String,

    /// Author, matched exactly by author search.
    pub author: String,

    /// Title, matched exactly by title search.
    pub title: String,

    /// Reviews by reviewer.
    #[serde(default)]
    pub reviews: Reviews,
}

impl Book {
    /// Create a book with no reviews.
    pub fn new(
        isbn: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            isbn: isbn.into(),
            author: author.into(),
            title: title.into(),
            reviews: Reviews::new(),
        }
    }

    /// Add a review, replacing any earlier review by the same reviewer.
    pub fn with_review(mut self, reviewer: impl Into<String>, text: impl Into<String>) -> Self {
        self.reviews.insert(reviewer.into(), text.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape_omits_isbn() {
        let book = Book::new("9781", "Alpha", "A. One").with_review("u1", "great");
        let json = serde_json::to_value(&book).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "author": "A. One",
                "title": "Alpha",
                "reviews": {"u1": "great"}
            })
        );
    }

    #[test]
    fn test_reviews_default_to_empty() {
        let book: Book = serde_json::from_str(r#"{"author": "X", "title": "Y"}"#).unwrap();
        assert!(book.reviews.is_empty());
        assert!(book.isbn.is_empty());
    }
}
