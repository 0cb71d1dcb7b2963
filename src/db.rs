#[cfg(feature = "ssr")]
mod db_impl {
    use crate::error::PersistenceError;
    use crate::models::review::{NewReview, Rating, Review};
    use chrono::{DateTime, SecondsFormat, Utc};
    use log::{debug, info, warn};
    use rusqlite::{params, Connection, Transaction};
    use std::sync::Arc;
    use tokio::sync::Mutex;


    const SCHEMA: &str = "
        CREATE TABLE IF NOT EXISTS reviews (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL CHECK (length(name) BETWEEN 2 AND 50),
            rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
            comment TEXT NOT NULL CHECK (length(comment) BETWEEN 10 AND 500),
            date TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_reviews_date ON reviews (date DESC, id DESC);";

    // Fixed width, so text order is time order
    fn encode_timestamp(date: &DateTime<Utc>) -> String {
        date.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    fn decode_timestamp(raw: &str) -> Result<DateTime<Utc>, PersistenceError> {
        DateTime::parse_from_rfc3339(raw)
            .map(|date| date.with_timezone(&Utc))
            .map_err(|_| PersistenceError::Timestamp(raw.to_string()))
    }

    struct ReviewRow {
        id: i64,
        name: String,
        rating: i64,
        comment: String,
        date: String,
    }

    impl ReviewRow {
        fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
            Ok(ReviewRow {
                id: row.get(0)?,
                name: row.get(1)?,
                rating: row.get(2)?,
                comment: row.get(3)?,
                date: row.get(4)?,
            })
        }

        fn into_review(self) -> Result<Review, PersistenceError> {
            Ok(Review {
                id: self.id,
                name: self.name,
                rating: Rating::new(self.rating).ok_or(PersistenceError::Rating(self.rating))?,
                comment: self.comment,
                date: decode_timestamp(&self.date)?,
            })
        }
    }

    /// The review store. Owns the only connection to the database.
    #[derive(Debug, Clone)]
    pub struct Database {
        conn: Arc<Mutex<Connection>>,
    }

    impl Database {
        // Create a new database connection
        pub fn new(db_path: &str) -> Result<Self, PersistenceError> {
            let conn = Connection::open(db_path)?;
            info!("[DB] Connection established at: {}", db_path);
            Ok(Database {
                conn: Arc::new(Mutex::new(conn)),
            })
        }

        // Create the database schema
        pub async fn create_schema(&self) -> Result<(), PersistenceError> {
            let conn = self.conn.lock().await;
            conn.execute_batch(SCHEMA).map_err(|e| {
                warn!("[DB] Failed creating reviews table: {}", e);
                e
            })?;
            Ok(())
        }

        /// Stores a validated review and returns it with its id and date.
        ///
        /// The row is written inside a transaction. On failure the transaction
        /// is rolled back and nothing becomes visible to `list_reviews`.
        pub async fn create_review(&self, review: &NewReview) -> Result<Review, PersistenceError> {
            let mut conn = self.conn.lock().await;
            let tx = conn.transaction()?;
            let date = encode_timestamp(&Utc::now());

            match Self::insert_review(&tx, review, &date) {
                Ok(stored) => {
                    tx.commit()?;
                    info!("[DB] Stored {}", stored);
                    Ok(stored)
                }
                Err(err) => {
                    warn!("[DB] Insert failed, rolling back: {}", err);
                    if let Err(rollback_err) = tx.rollback() {
                        warn!("[DB] Rollback failed: {}", rollback_err);
                    }
                    Err(err)
                }
            }
        }

        fn insert_review(
            tx: &Transaction<'_>,
            review: &NewReview,
            date: &str,
        ) -> Result<Review, PersistenceError> {
            tx.execute(
                "INSERT INTO reviews (name, rating, comment, date) VALUES (?1, ?2, ?3, ?4)",
                params![review.name, review.rating.get(), review.comment, date],
            )?;
            let id = tx.last_insert_rowid();
            let row = tx.query_row(
                "SELECT id, name, rating, comment, date FROM reviews WHERE id = ?1",
                [id],
                ReviewRow::from_row,
            )?;
            row.into_review()
        }

        // Retrieve all reviews, newest first
        pub async fn list_reviews(&self) -> Result<Vec<Review>, PersistenceError> {
            let conn = self.conn.lock().await;
            let mut stmt = conn.prepare(
                "SELECT id, name, rating, comment, date FROM reviews
                 ORDER BY date DESC, id DESC",
            )?;
            let rows = stmt.query_map([], ReviewRow::from_row)?;

            let mut reviews = Vec::new();
            for row in rows {
                reviews.push(row?.into_review()?);
            }
            debug!("[DB] Fetched {} reviews", reviews.len());
            Ok(reviews)
        }

        pub async fn count_reviews(&self) -> Result<i64, PersistenceError> {
            let conn = self.conn.lock().await;
            let count = conn.query_row("SELECT COUNT(*) FROM reviews", [], |row| row.get(0))?;
            Ok(count)
        }
    }
}

#[cfg(feature = "ssr")]
pub use db_impl::Database;
