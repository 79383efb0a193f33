use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Catalog record persisted in the books collection.
///
/// Field names follow the wire contract verbatim; the identifier maps to
/// the BSON `_id` and is generated by the storage layer when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(rename = "BookName")]
    pub name: String,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Author")]
    pub author: String,
    /// Reference to the split-stored content record, when one exists.
    #[serde(rename = "ContentId", skip_serializing_if = "Option::is_none")]
    pub content_id: Option<ObjectId>,
}

/// Free-text content stored separately from its owning book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookContent {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Back-reference to the owning book.
    #[serde(rename = "BookId", skip_serializing_if = "Option::is_none")]
    pub book_id: Option<ObjectId>,
    #[serde(rename = "Content")]
    pub content: String,
}

/// JSON shape returned for a book; identifiers render as 24-character hex.
#[derive(Debug, Serialize)]
pub struct BookResponse {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "BookName")]
    pub name: String,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Author")]
    pub author: String,
    #[serde(rename = "ContentId", skip_serializing_if = "Option::is_none")]
    pub content_id: Option<String>,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: book.name,
            price: book.price,
            category: book.category,
            author: book.author,
            content_id: book.content_id.map(|id| id.to_hex()),
        }
    }
}

/// JSON shape returned for a content record.
#[derive(Debug, Serialize)]
pub struct BookContentResponse {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "BookId", skip_serializing_if = "Option::is_none")]
    pub book_id: Option<String>,
    #[serde(rename = "Content")]
    pub content: String,
}

impl From<BookContent> for BookContentResponse {
    fn from(content: BookContent) -> Self {
        Self {
            id: content.id.map(|id| id.to_hex()).unwrap_or_default(),
            book_id: content.book_id.map(|id| id.to_hex()),
            content: content.content,
        }
    }
}

/// Request payload for the single-document create and replace operations.
#[derive(Debug, Clone, Deserialize)]
pub struct BookPayload {
    #[serde(rename = "Id", default)]
    pub id: Option<String>,
    #[serde(rename = "BookName")]
    pub name: String,
    #[serde(rename = "Price", default)]
    pub price: f64,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Author")]
    pub author: String,
    #[serde(rename = "ContentId", default)]
    pub content_id: Option<String>,
}

impl BookPayload {
    /// Convert into a persistable record, parsing any embedded identifiers.
    pub fn into_book(self) -> Result<Book, mongodb::bson::oid::Error> {
        Ok(Book {
            id: self.id.as_deref().map(ObjectId::parse_str).transpose()?,
            name: self.name,
            price: self.price,
            category: self.category,
            author: self.author,
            content_id: self
                .content_id
                .as_deref()
                .map(ObjectId::parse_str)
                .transpose()?,
        })
    }
}

/// Request payload for the split create: one request constructs both a
/// book and its content record. Any supplied `Id` is ignored; both
/// identifiers are generated fresh.
#[derive(Debug, Clone, Deserialize)]
pub struct SplitBookPayload {
    #[serde(rename = "Id", default)]
    pub id: Option<String>,
    #[serde(rename = "BookName")]
    pub name: String,
    #[serde(rename = "Price", default)]
    pub price: f64,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Author")]
    pub author: String,
    #[serde(rename = "Content")]
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    fn oid(hex: &str) -> ObjectId {
        ObjectId::parse_str(hex).unwrap()
    }

    #[test]
    fn book_response_uses_verbatim_field_names() {
        let book = Book {
            id: Some(oid("65f0a1b2c3d4e5f60718293a")),
            name: "Designing Data-Intensive Applications".to_string(),
            price: 42.0,
            category: "Computers".to_string(),
            author: "Martin Kleppmann".to_string(),
            content_id: None,
        };

        let value = serde_json::to_value(BookResponse::from(book)).unwrap();
        assert_eq!(value["Id"], "65f0a1b2c3d4e5f60718293a");
        assert_eq!(value["BookName"], "Designing Data-Intensive Applications");
        assert_eq!(value["Price"], 42.0);
        assert_eq!(value["Category"], "Computers");
        assert_eq!(value["Author"], "Martin Kleppmann");
        assert!(value.get("ContentId").is_none());
    }

    #[test]
    fn book_response_renders_content_reference_as_hex() {
        let book = Book {
            id: Some(oid("65f0a1b2c3d4e5f60718293a")),
            name: "n".to_string(),
            price: 1.0,
            category: "c".to_string(),
            author: "a".to_string(),
            content_id: Some(oid("65f0a1b2c3d4e5f60718293b")),
        };

        let value = serde_json::to_value(BookResponse::from(book)).unwrap();
        assert_eq!(value["ContentId"], "65f0a1b2c3d4e5f60718293b");
    }

    #[test]
    fn book_bson_uses_underscore_id_and_omits_absent_fields() {
        let book = Book {
            id: None,
            name: "Book0".to_string(),
            price: 10.0,
            category: "Computers".to_string(),
            author: "Ryse1".to_string(),
            content_id: None,
        };

        let document = bson::to_document(&book).unwrap();
        assert!(!document.contains_key("_id"));
        assert!(!document.contains_key("ContentId"));
        assert_eq!(document.get_str("BookName").unwrap(), "Book0");
        assert_eq!(document.get_str("Author").unwrap(), "Ryse1");
    }

    #[test]
    fn book_bson_round_trips_identifiers() {
        let book = Book {
            id: Some(oid("65f0a1b2c3d4e5f60718293a")),
            name: "n".to_string(),
            price: 5.0,
            category: "c".to_string(),
            author: "a".to_string(),
            content_id: Some(oid("65f0a1b2c3d4e5f60718293b")),
        };

        let document = bson::to_document(&book).unwrap();
        let restored: Book = bson::from_document(document).unwrap();
        assert_eq!(restored.id, book.id);
        assert_eq!(restored.content_id, book.content_id);
    }

    #[test]
    fn payload_parses_embedded_identifiers() {
        let payload: BookPayload = serde_json::from_str(
            r#"{
                "Id": "65f0a1b2c3d4e5f60718293a",
                "BookName": "Book1",
                "Price": 9.5,
                "Category": "Computers",
                "Author": "Ryse1"
            }"#,
        )
        .unwrap();

        let book = payload.into_book().unwrap();
        assert_eq!(book.id, Some(oid("65f0a1b2c3d4e5f60718293a")));
        assert!(book.content_id.is_none());
    }

    #[test]
    fn payload_without_identifier_stays_unset() {
        let payload: BookPayload = serde_json::from_str(
            r#"{"BookName": "Book1", "Price": 1, "Category": "c", "Author": "a"}"#,
        )
        .unwrap();

        let book = payload.into_book().unwrap();
        assert!(book.id.is_none());
    }

    #[test]
    fn payload_rejects_malformed_identifier() {
        let payload: BookPayload = serde_json::from_str(
            r#"{"Id": "not-hex", "BookName": "b", "Price": 1, "Category": "c", "Author": "a"}"#,
        )
        .unwrap();

        assert!(payload.into_book().is_err());
    }

    #[test]
    fn split_payload_accepts_verbatim_field_names() {
        let payload: SplitBookPayload = serde_json::from_str(
            r#"{
                "BookName": "Book1",
                "Price": 12,
                "Category": "Computers",
                "Author": "Ryse1",
                "Content": "chapter one"
            }"#,
        )
        .unwrap();

        assert_eq!(payload.name, "Book1");
        assert_eq!(payload.content, "chapter one");
        assert!(payload.id.is_none());
    }

    #[test]
    fn content_response_omits_missing_back_reference() {
        let content = BookContent {
            id: Some(oid("65f0a1b2c3d4e5f60718293a")),
            book_id: None,
            content: "text".to_string(),
        };

        let value = serde_json::to_value(BookContentResponse::from(content)).unwrap();
        assert!(value.get("BookId").is_none());
        assert_eq!(value["Content"], "text");
    }
}
