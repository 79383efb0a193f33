pub mod models;
pub mod routes;
pub mod store;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use serde_json::json;

use bookstore_kernel::{InitCtx, Module};

use store::BookStore;

/// Books module: catalog and book-content CRUD over the shared store
pub struct BooksModule {
    store: Arc<BookStore>,
}

impl BooksModule {
    pub fn new(store: Arc<BookStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.store.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/Book": {
                    "get": {
                        "summary": "List all books",
                        "tags": ["Books"],
                        "responses": {
                            "200": { "description": "Array of books" }
                        }
                    }
                },
                "/BookContent": {
                    "get": {
                        "summary": "List all book contents",
                        "tags": ["Books"],
                        "responses": {
                            "200": { "description": "Array of content records" }
                        }
                    }
                },
                "/BuildingBookStore": {
                    "get": {
                        "summary": "Seed 50,000 sample books",
                        "tags": ["Books"],
                        "responses": {
                            "200": { "description": "Catalog seeded" }
                        }
                    }
                },
                "/GetBookByBookName/{bookName}": {
                    "get": {
                        "summary": "Find books by exact name",
                        "tags": ["Books"],
                        "parameters": [
                            { "name": "bookName", "in": "path", "required": true, "schema": { "type": "string" } }
                        ],
                        "responses": {
                            "200": { "description": "Array of matching books" }
                        }
                    }
                },
                "/GetBookByAuthor/{author}": {
                    "get": {
                        "summary": "Find books by exact author",
                        "tags": ["Books"],
                        "parameters": [
                            { "name": "author", "in": "path", "required": true, "schema": { "type": "string" } }
                        ],
                        "responses": {
                            "200": { "description": "Array of matching books" }
                        }
                    }
                },
                "/GetBookContentByBookId/{bookId}": {
                    "get": {
                        "summary": "Find content records by owning book id",
                        "tags": ["Books"],
                        "parameters": [
                            { "name": "bookId", "in": "path", "required": true,
                              "schema": { "type": "string", "minLength": 24, "maxLength": 24 } }
                        ],
                        "responses": {
                            "200": { "description": "Array of content records" }
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Get one book",
                        "tags": ["Books"],
                        "parameters": [
                            { "name": "id", "in": "path", "required": true,
                              "schema": { "type": "string", "minLength": 24, "maxLength": 24 } }
                        ],
                        "responses": {
                            "200": { "description": "The book" },
                            "404": { "description": "No book with this id",
                                     "content": { "application/json": { "schema": { "$ref": "#/components/schemas/ErrorResponse" } } } }
                        }
                    },
                    "put": {
                        "summary": "Replace a book",
                        "tags": ["Books"],
                        "responses": {
                            "204": { "description": "Replaced" },
                            "404": { "description": "No book with this id" }
                        }
                    },
                    "delete": {
                        "summary": "Delete a book",
                        "tags": ["Books"],
                        "responses": {
                            "204": { "description": "Deleted" },
                            "404": { "description": "No book with this id" }
                        }
                    }
                },
                "/": {
                    "post": {
                        "summary": "Create a book",
                        "tags": ["Books"],
                        "responses": {
                            "201": { "description": "Created; Location references the new book" }
                        }
                    }
                },
                "/AddBook": {
                    "post": {
                        "summary": "Create a book and its content record",
                        "tags": ["Books"],
                        "responses": {
                            "201": { "description": "Created; Location references the new book" }
                        }
                    }
                },
                "/DeleteAllBook": {
                    "delete": {
                        "summary": "Delete all books",
                        "tags": ["Books"],
                        "responses": {
                            "200": { "description": "Delete count" }
                        }
                    }
                },
                "/DeleteAllBookContent": {
                    "delete": {
                        "summary": "Delete all book contents",
                        "tags": ["Books"],
                        "responses": {
                            "200": { "description": "Delete count" }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "Id": { "type": "string", "description": "24-character hex identifier" },
                            "BookName": { "type": "string" },
                            "Price": { "type": "number" },
                            "Category": { "type": "string" },
                            "Author": { "type": "string" },
                            "ContentId": { "type": "string", "description": "Identifier of the split-stored content record" }
                        },
                        "required": ["Id", "BookName", "Price", "Category", "Author"]
                    },
                    "BookContent": {
                        "type": "object",
                        "properties": {
                            "Id": { "type": "string" },
                            "BookId": { "type": "string", "description": "Identifier of the owning book" },
                            "Content": { "type": "string" }
                        },
                        "required": ["Id", "Content"]
                    }
                }
            }
        }))
    }
}

/// Create a new instance of the books module
pub fn create_module(store: Arc<BookStore>) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(store))
}
