//! Repository for the `notifications` table.

use chrono::Utc;
use seatwise_core::types::DbId;

use crate::models::notification::Notification;
use crate::DbPool;

/// Column list for `notifications` queries.
const COLUMNS: &str =
    "id, user_id, title, body, reference_type, reference_id, is_read, read_at, created_at";

pub struct NotificationRepo;

impl NotificationRepo {
    /// Create a notification for a user, returning the generated id.
    pub async fn create(
        pool: &DbPool,
        user_id: DbId,
        title: &str,
        body: &str,
        reference_type: &str,
        reference_id: DbId,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO notifications \
             (user_id, title, body, reference_type, reference_id, created_at) \
             VALUES (?, ?, ?, ?, ?, ?) \
             RETURNING id",
        )
        .bind(user_id)
        .bind(title)
        .bind(body)
        .bind(reference_type)
        .bind(reference_id)
        .bind(Utc::now())
        .fetch_one(pool)
        .await
    }

    /// List notifications for a user, newest first.
    pub async fn list_for_user(
        pool: &DbPool,
        user_id: DbId,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let filter = if unread_only { "AND is_read = 0" } else { "" };
        let query = format!(
            "SELECT {COLUMNS} FROM notifications \
             WHERE user_id = ? {filter} \
             ORDER BY created_at DESC \
             LIMIT ? OFFSET ?"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Mark a single notification as read.
    ///
    /// Returns `true` if the notification was found for the given user and
    /// updated, `false` otherwise.
    pub async fn mark_read(
        pool: &DbPool,
        notification_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications \
             SET is_read = 1, read_at = ? \
             WHERE id = ? AND user_id = ? AND is_read = 0",
        )
        .bind(Utc::now())
        .bind(notification_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark all unread notifications as read for a user, returning how many
    /// were marked.
    pub async fn mark_all_read(pool: &DbPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications \
             SET is_read = 1, read_at = ? \
             WHERE user_id = ? AND is_read = 0",
        )
        .bind(Utc::now())
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// The number of unread notifications for a user.
    pub async fn unread_count(pool: &DbPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE user_id = ? AND is_read = 0",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(count.unwrap_or(0))
    }
}
