//! Article repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide bulk insert/delete/replace/list over the `articles` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Bulk mutations run inside one immediate transaction, so a reader on
//!   the same connection never observes a partially-applied batch.
//! - `replace_all` commits delete+insert as a single unit; the cleared
//!   intermediate state is never visible outside the transaction.
//! - Assigned ids are strictly increasing and never reused, including
//!   across `delete_all` (AUTOINCREMENT semantics).

use crate::db::DbError;
use crate::model::article::{ArticleId, ArticleRecord, NewArticle};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

const ARTICLE_SELECT_SQL: &str = "SELECT
    id,
    headline,
    summary,
    byline,
    image_url
FROM articles";

const ARTICLE_INSERT_SQL: &str = "INSERT INTO articles (
    headline,
    summary,
    byline,
    image_url
) VALUES (?1, ?2, ?3, ?4);";

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage-level error for article persistence operations.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    InvalidData(String),
    AlreadyOpen {
        active: PathBuf,
        requested: PathBuf,
    },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted article data: {message}")
            }
            Self::AlreadyOpen { active, requested } => write!(
                f,
                "article cache already open at `{}`; refusing to switch to `{}`",
                active.display(),
                requested.display()
            ),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) | Self::AlreadyOpen { .. } => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for article cache persistence.
pub trait ArticleRepository {
    /// Persists every item, assigning a fresh id to each. Returns the
    /// assigned ids in insertion order.
    fn insert_all(&self, items: &[NewArticle]) -> StorageResult<Vec<ArticleId>>;

    /// Removes every record, unconditionally.
    fn delete_all(&self) -> StorageResult<()>;

    /// Replaces the full table content with `items` in one transaction.
    fn replace_all(&self, items: &[NewArticle]) -> StorageResult<Vec<ArticleId>>;

    /// Lists all records ordered by ascending id (insertion order).
    fn list_all(&self) -> StorageResult<Vec<ArticleRecord>>;
}

/// SQLite-backed article repository borrowing a shared connection.
pub struct SqliteArticleRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteArticleRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn insert_all_in_tx(
        tx: &Transaction<'_>,
        items: &[NewArticle],
    ) -> StorageResult<Vec<ArticleId>> {
        let mut stmt = tx.prepare(ARTICLE_INSERT_SQL)?;
        let mut ids = Vec::with_capacity(items.len());
        for item in items {
            stmt.execute(params![
                item.headline.as_deref(),
                item.summary.as_deref(),
                item.byline.as_deref(),
                item.image_url.as_deref(),
            ])?;
            ids.push(tx.last_insert_rowid());
        }
        Ok(ids)
    }
}

impl ArticleRepository for SqliteArticleRepository<'_> {
    fn insert_all(&self, items: &[NewArticle]) -> StorageResult<Vec<ArticleId>> {
        // Unchecked transaction: the connection is shared behind the
        // store's mutex, which already serializes writers.
        let tx =
            Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let ids = Self::insert_all_in_tx(&tx, items)?;
        tx.commit()?;
        Ok(ids)
    }

    fn delete_all(&self) -> StorageResult<()> {
        self.conn.execute("DELETE FROM articles;", [])?;
        Ok(())
    }

    fn replace_all(&self, items: &[NewArticle]) -> StorageResult<Vec<ArticleId>> {
        let tx =
            Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        tx.execute("DELETE FROM articles;", [])?;
        let ids = Self::insert_all_in_tx(&tx, items)?;
        tx.commit()?;
        Ok(ids)
    }

    fn list_all(&self) -> StorageResult<Vec<ArticleRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ARTICLE_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse_article_row(row)?);
        }

        Ok(records)
    }
}

fn parse_article_row(row: &Row<'_>) -> StorageResult<ArticleRecord> {
    let id: ArticleId = row.get("id")?;
    if id <= 0 {
        return Err(StorageError::InvalidData(format!(
            "invalid id value `{id}` in articles.id"
        )));
    }

    Ok(ArticleRecord {
        id,
        headline: row.get("headline")?,
        summary: row.get("summary")?,
        byline: row.get("byline")?,
        image_url: row.get("image_url")?,
    })
}
