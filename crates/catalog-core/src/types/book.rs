//! Book records

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::record::{FieldValue, Record};
use crate::schema::{FieldSpec, Schema};

static BOOK_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::new(
        Book::KIND,
        vec![
            FieldSpec::id(),
            FieldSpec::text("title", 3, None),
            FieldSpec::text("author", 3, None),
            FieldSpec::text("description", 1, Some(100)),
            FieldSpec::float("rating", Some(0.0), Some(5.0)),
            FieldSpec::integer("published_date", Some(1700), Some(2024)),
            FieldSpec::text("category", 0, None).optional(),
        ],
    )
});

/// A catalog book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(default)]
    pub id: i64,
    pub title: String,
    pub author: String,
    pub description: String,
    pub rating: f64,
    pub published_date: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Book {
    /// The books a fresh catalog starts with
    pub fn samples() -> Vec<Book> {
        [
            (1, "Computer Science Fundamentals", "Arpan Moitra", "Great Book for CS Fundamentals", 4.9, 2020),
            (2, "Learning Fast API", "Arpan Moitra", "Great Book for learning FastAPI", 4.3, 2021),
            (3, "Learning Product Management", "Shreyans Jain", "Great book to learn ProdMan", 4.9, 2021),
            (4, "Learning Marketing", "Prisha Kumar", "Great book to learn Marketing", 4.7, 2023),
            (5, "Learning C++", "Moin Memon", "Great book for learning C++", 4.5, 2022),
            (6, "Learning Python", "Samay Varshney", "Great book for learning Python", 4.6, 2022),
        ]
        .into_iter()
        .map(|(id, title, author, description, rating, published_date)| Book {
            id,
            title: title.to_string(),
            author: author.to_string(),
            description: description.to_string(),
            rating,
            published_date,
            category: None,
        })
        .collect()
    }
}

impl Record for Book {
    const KIND: &'static str = "book";

    fn schema() -> &'static Schema {
        &BOOK_SCHEMA
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::Integer(self.id)),
            "title" => Some(FieldValue::Text(&self.title)),
            "author" => Some(FieldValue::Text(&self.author)),
            "description" => Some(FieldValue::Text(&self.description)),
            "rating" => Some(FieldValue::Float(self.rating)),
            "published_date" => Some(FieldValue::Integer(self.published_date)),
            "category" => self.category.as_deref().map(FieldValue::Text),
            _ => None,
        }
    }
}
