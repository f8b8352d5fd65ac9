//! # Book Repository
//!
//! Read access to the catalogue that feeds the order form's book choice,
//! plus an insert used by the seed tool.

use madang_core::Book;
use sqlx::SqlitePool;
use tracing::debug;

use crate::accessor::run_execute;
use crate::error::DbResult;

/// Repository for book database operations.
#[derive(Debug, Clone)]
pub struct BookRepository {
    pool: SqlitePool,
}

impl BookRepository {
    /// Creates a new BookRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BookRepository { pool }
    }

    /// Every book, ordered by bookid.
    pub async fn list(&self) -> DbResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT bookid, COALESCE(bookname, '') AS bookname FROM Book ORDER BY bookid",
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = books.len(), "Listed books");
        Ok(books)
    }

    /// Gets a book by id.
    pub async fn get_by_id(&self, bookid: i64) -> DbResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            "SELECT bookid, COALESCE(bookname, '') AS bookname FROM Book WHERE bookid = ?1",
        )
        .bind(bookid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    /// Inserts a catalogue entry.
    pub async fn insert(&self, book: &Book) -> DbResult<()> {
        run_execute(
            &self.pool,
            "INSERT INTO Book (bookid, bookname) VALUES (?1, ?2)",
            &[book.bookid.into(), book.bookname.clone().into()],
        )
        .await?;

        Ok(())
    }

    /// Counts books.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Book")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
