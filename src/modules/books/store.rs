use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    results::{DeleteResult, InsertOneResult, UpdateResult},
    Collection, Database, IndexModel,
};
use rand::Rng;

use bookstore_kernel::settings::DatabaseSettings;

use super::models::{Book, BookContent, SplitBookPayload};

/// Number of records synthesized by the catalog seeding routine.
const SEED_BOOK_COUNT: usize = 50_000;

/// Data access layer over the books and book-contents collections.
///
/// Every method is a direct pass-through to a single collection call; the
/// shared client's connection pool governs concurrency.
pub struct BookStore {
    books: Collection<Book>,
    contents: Collection<BookContent>,
}

impl BookStore {
    /// Take handles to both collections.
    ///
    /// When the books collection did not previously exist, an ascending
    /// index on the book name is created to back the by-name lookup.
    pub async fn connect(
        database: &Database,
        settings: &DatabaseSettings,
    ) -> anyhow::Result<Self> {
        let is_new = !bookstore_db::collection_exists(database, &settings.books_collection).await?;

        let books = database.collection::<Book>(&settings.books_collection);
        if is_new {
            let index = IndexModel::builder().keys(doc! { "BookName": 1 }).build();
            books.create_index(index).await?;
            tracing::info!(
                collection = %settings.books_collection,
                "created book-name index on new collection"
            );
        }

        let contents = database.collection::<BookContent>(&settings.book_contents_collection);

        Ok(Self { books, contents })
    }

    pub async fn list_books(&self) -> mongodb::error::Result<Vec<Book>> {
        self.books.find(doc! {}).await?.try_collect().await
    }

    pub async fn list_contents(&self) -> mongodb::error::Result<Vec<BookContent>> {
        self.contents.find(doc! {}).await?.try_collect().await
    }

    /// Names are not unique; all matches come back.
    pub async fn books_by_name(&self, name: &str) -> mongodb::error::Result<Vec<Book>> {
        self.books
            .find(doc! { "BookName": name })
            .await?
            .try_collect()
            .await
    }

    pub async fn books_by_author(&self, author: &str) -> mongodb::error::Result<Vec<Book>> {
        self.books
            .find(doc! { "Author": author })
            .await?
            .try_collect()
            .await
    }

    /// Contents owned by a book, looked up through the back-reference.
    pub async fn contents_by_book_id(
        &self,
        book_id: ObjectId,
    ) -> mongodb::error::Result<Vec<BookContent>> {
        self.contents
            .find(doc! { "BookId": book_id })
            .await?
            .try_collect()
            .await
    }

    /// Absence is `None`, not an error.
    pub async fn book_by_id(&self, id: ObjectId) -> mongodb::error::Result<Option<Book>> {
        self.books.find_one(doc! { "_id": id }).await
    }

    /// Insert one prepared record; the driver generates the identifier
    /// when the record carries none.
    pub async fn insert_book(&self, book: &Book) -> mongodb::error::Result<InsertOneResult> {
        self.books.insert_one(book).await
    }

    /// Split create: stores the content record first, then the book.
    ///
    /// Both identifiers are generated fresh here. The two writes are not
    /// transactional; a failure after the first insert leaves a content
    /// record with no owning book.
    pub async fn insert_book_with_content(
        &self,
        payload: SplitBookPayload,
    ) -> mongodb::error::Result<Book> {
        let book_id = ObjectId::new();

        let content = BookContent {
            id: Some(ObjectId::new()),
            book_id: Some(book_id),
            content: payload.content,
        };
        self.contents.insert_one(&content).await?;

        let book = Book {
            id: Some(book_id),
            name: payload.name,
            price: payload.price,
            category: payload.category,
            author: payload.author,
            content_id: content.id,
        };
        self.books.insert_one(&book).await?;

        Ok(book)
    }

    /// Full-document replacement; the caller preserves the identifier.
    pub async fn replace_book(
        &self,
        id: ObjectId,
        book: &Book,
    ) -> mongodb::error::Result<UpdateResult> {
        self.books.replace_one(doc! { "_id": id }, book).await
    }

    pub async fn delete_book(&self, id: ObjectId) -> mongodb::error::Result<DeleteResult> {
        self.books.delete_one(doc! { "_id": id }).await
    }

    pub async fn delete_content(&self, id: ObjectId) -> mongodb::error::Result<DeleteResult> {
        self.contents.delete_one(doc! { "_id": id }).await
    }

    pub async fn delete_all_books(&self) -> mongodb::error::Result<DeleteResult> {
        self.books.delete_many(doc! {}).await
    }

    pub async fn delete_all_contents(&self) -> mongodb::error::Result<DeleteResult> {
        self.contents.delete_many(doc! {}).await
    }

    /// Insert the synthesized sample catalog in one batch.
    pub async fn seed_catalog(&self) -> mongodb::error::Result<()> {
        let books = sample_catalog(SEED_BOOK_COUNT);
        self.books.insert_many(books).await?;
        Ok(())
    }
}

/// Synthesize `count` sample books: sequential names, random prices in
/// [1, 999], and an author label that advances every 100 records. The
/// counter increments before the 0th record, so authors run Ryse1..RyseN.
fn sample_catalog(count: usize) -> Vec<Book> {
    let mut rng = rand::thread_rng();
    let mut author_index = 0u32;
    let mut books = Vec::with_capacity(count);

    for i in 0..count {
        if i % 100 == 0 {
            author_index += 1;
        }
        books.push(Book {
            id: None,
            name: format!("Book{i}"),
            price: f64::from(rng.gen_range(1..1000)),
            category: "Computers".to_string(),
            author: format!("Ryse{author_index}"),
            content_id: None,
        });
    }

    books
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn sample_catalog_has_sequential_names() {
        let books = sample_catalog(SEED_BOOK_COUNT);
        assert_eq!(books.len(), 50_000);
        assert_eq!(books[0].name, "Book0");
        assert_eq!(books[49_999].name, "Book49999");
    }

    #[test]
    fn author_advances_every_hundred_records() {
        let books = sample_catalog(250);
        assert_eq!(books[0].author, "Ryse1");
        assert_eq!(books[99].author, "Ryse1");
        assert_eq!(books[100].author, "Ryse2");
        assert_eq!(books[199].author, "Ryse2");
        assert_eq!(books[249].author, "Ryse3");
    }

    #[test]
    fn full_catalog_has_500_authors_of_100_books() {
        let books = sample_catalog(SEED_BOOK_COUNT);

        let mut histogram: HashMap<&str, usize> = HashMap::new();
        for book in &books {
            *histogram.entry(book.author.as_str()).or_default() += 1;
        }

        assert_eq!(histogram.len(), 500);
        assert!(histogram.values().all(|&count| count == 100));
        assert_eq!(books[49_999].author, "Ryse500");
    }

    #[test]
    fn prices_stay_within_range() {
        let books = sample_catalog(1_000);
        assert!(books
            .iter()
            .all(|book| (1.0..=999.0).contains(&book.price)));
    }

    #[test]
    fn sample_records_carry_no_identifiers() {
        let books = sample_catalog(10);
        assert!(books
            .iter()
            .all(|book| book.id.is_none() && book.content_id.is_none()));
        assert!(books.iter().all(|book| book.category == "Computers"));
    }
}
