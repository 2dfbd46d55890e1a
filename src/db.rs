#[cfg(feature = "ssr")]
mod db_impl {
    use crate::models::review::{NewReview, Review, ReviewAverage, ReviewerIdentity};
    use crate::models::target::TargetRef;
    use chrono::{DateTime, Utc};
    use leptos::logging;
    use leptos::logging::log;
    use rusqlite::{params, Connection, Error, OptionalExtension, Row};
    use std::sync::Arc;
    use tokio::sync::Mutex;


    // Define a struct to represent a database connection
    #[derive(Debug, Clone)]
    pub struct Database {
        conn: Arc<Mutex<Connection>>,
    }

    impl Database {
        // Create a new database connection
        pub fn new(db_path: &str) -> Result<Self, Error> {
            let conn = Connection::open(db_path)?;
            logging::log!("Database connection established at: {}", db_path);
            Ok(Database {
                conn: Arc::new(Mutex::new(conn)),
            })
        }

        // Create the database schema
        pub async fn create_schema(&self) -> Result<(), Error> {
            let conn = self.conn.lock().await;

            // A review belongs to an account or to an anonymous session, never both
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS reviews (
                    id INTEGER PRIMARY KEY,
                    content_type_id INTEGER NOT NULL,
                    content_id INTEGER NOT NULL,
                    user_id INTEGER,
                    session_id TEXT,
                    user_name TEXT NOT NULL DEFAULT '',
                    user_email TEXT NOT NULL DEFAULT '',
                    comment TEXT NOT NULL DEFAULT '',
                    score REAL NOT NULL,
                    active INTEGER NOT NULL DEFAULT 1,
                    ip_address TEXT,
                    created_at TEXT NOT NULL,
                    CHECK ((user_id IS NULL) <> (session_id IS NULL))
                );
                CREATE INDEX IF NOT EXISTS idx_reviews_target
                    ON reviews (content_type_id, content_id);",
            )
            .map_err(|e| {
                logging::error!("Failed creating reviews table: {}", e);
                e
            })?;

            conn.execute_batch(
                "CREATE UNIQUE INDEX IF NOT EXISTS idx_reviews_active_user
                    ON reviews (content_type_id, content_id, user_id)
                    WHERE active = 1 AND user_id IS NOT NULL;
                CREATE UNIQUE INDEX IF NOT EXISTS idx_reviews_active_session
                    ON reviews (content_type_id, content_id, session_id)
                    WHERE active = 1 AND session_id IS NOT NULL;",
            )
            .map_err(|e| {
                logging::error!("Failed creating review identity indexes: {}", e);
                e
            })?;
            Ok(())
        }

        /// Stores a review and returns its row id. A second active review for
        /// the same target and reviewer fails with a unique constraint
        /// violation, see [`is_unique_violation`].
        pub async fn insert_review(&self, review: &NewReview, active: bool) -> Result<i64, Error> {
            log!(
                "[DB] Inserting review for {}/{}",
                review.target.content_type_id,
                review.target.content_id
            );
            let conn = self.conn.lock().await;
            conn.execute(
                "INSERT INTO reviews (
                    content_type_id, content_id, user_id, session_id,
                    user_name, user_email, comment, score, active, ip_address, created_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    review.target.content_type_id,
                    review.target.content_id,
                    review.reviewer.user_id(),
                    review.reviewer.session_key(),
                    &review.user_name,
                    &review.user_email,
                    &review.comment,
                    review.score,
                    active,
                    &review.ip_address,
                    Utc::now(),
                ],
            )
            .map_err(|e| {
                log!("[DB] Review insert failed: {:?}", e);
                e
            })?;
            let id = conn.last_insert_rowid();
            log!("[DB] Review {} stored", id);
            Ok(id)
        }

        /// Looks up a review by target and reviewer, active or not.
        pub async fn find_review(
            &self,
            target: &TargetRef,
            reviewer: &ReviewerIdentity,
        ) -> Result<Option<i64>, Error> {
            let conn = self.conn.lock().await;
            let found = match reviewer {
                ReviewerIdentity::User(user_id) => conn
                    .query_row(
                        "SELECT id FROM reviews
                        WHERE content_type_id = ? AND content_id = ? AND user_id = ?
                        LIMIT 1",
                        params![target.content_type_id, target.content_id, user_id],
                        |row| row.get(0),
                    )
                    .optional()?,
                ReviewerIdentity::Session(session_key) => conn
                    .query_row(
                        "SELECT id FROM reviews
                        WHERE content_type_id = ? AND content_id = ? AND session_id = ?
                        LIMIT 1",
                        params![target.content_type_id, target.content_id, session_key],
                        |row| row.get(0),
                    )
                    .optional()?,
            };
            Ok(found)
        }

        // Retrieve active reviews for a target, in insertion order
        pub async fn get_active_reviews(&self, target: &TargetRef) -> Result<Vec<Review>, Error> {
            let conn = self.conn.lock().await;
            let mut stmt = conn.prepare(
                "SELECT id, content_type_id, content_id, user_id, session_id,
                    user_name, user_email, comment, score, active, ip_address, created_at
                FROM reviews
                WHERE content_type_id = ? AND content_id = ? AND active = 1
                ORDER BY id ASC",
            )?;
            let rows = stmt.query_map(
                params![target.content_type_id, target.content_id],
                review_from_row,
            )?;

            let mut reviews = Vec::new();
            for row in rows {
                reviews.push(row?);
            }
            log!(
                "[DB] Fetched {} active reviews for {}/{}",
                reviews.len(),
                target.content_type_id,
                target.content_id
            );
            Ok(reviews)
        }

        pub async fn get_average(&self, target: &TargetRef) -> Result<ReviewAverage, Error> {
            let conn = self.conn.lock().await;
            conn.query_row(
                "SELECT AVG(score), COUNT(*)
                FROM reviews
                WHERE content_type_id = ? AND content_id = ? AND active = 1",
                params![target.content_type_id, target.content_id],
                |row| {
                    Ok(ReviewAverage {
                        average: row.get(0)?, // NULL when there are no rows
                        count: row.get(1)?,
                    })
                },
            )
        }
    }

    fn review_from_row(row: &Row<'_>) -> Result<Review, Error> {
        let user_id: Option<i64> = row.get(3)?;
        let session_id: Option<String> = row.get(4)?;
        let reviewer = match (user_id, session_id) {
            (Some(id), _) => ReviewerIdentity::User(id),
            (None, Some(key)) => ReviewerIdentity::Session(key),
            (None, None) => {
                return Err(Error::InvalidColumnType(
                    4,
                    "session_id".into(),
                    rusqlite::types::Type::Null,
                ))
            }
        };
        let created_at: DateTime<Utc> = row.get(11)?;

        Ok(Review {
            id: row.get(0)?,
            target: TargetRef::new(row.get(1)?, row.get(2)?),
            reviewer,
            user_name: row.get(5)?,
            user_email: row.get(6)?,
            comment: row.get(7)?,
            score: row.get(8)?,
            active: row.get(9)?,
            ip_address: row.get(10)?,
            created_at,
        })
    }

    /// True when an insert was rejected by one of the review identity indexes.
    pub fn is_unique_violation(err: &Error) -> bool {
        matches!(
            err,
            Error::SqliteFailure(e, _)
                if e.code == rusqlite::ErrorCode::ConstraintViolation
                    && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        )
    }
}

#[cfg(feature = "ssr")]
pub use db_impl::{is_unique_violation, Database};
