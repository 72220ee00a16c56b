use super::NotificationRepository;
use crate::models::{Notification, NotificationType};
use chrono::Utc;
use error_types::ServiceResult;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::debug;
use uuid::Uuid;

const NOTIFICATION_COLUMNS: &str = "id, recipient_id, actor_id, subject_id, notification_type, \
     message, is_read, read_at, created_at";

#[derive(Clone)]
pub struct PostgresNotificationRepository {
    pool: PgPool,
}

impl PostgresNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: &PgRow) -> ServiceResult<Notification> {
        let notification_type: String = row.try_get("notification_type")?;
        Ok(Notification {
            id: row.try_get("id")?,
            recipient_id: row.try_get("recipient_id")?,
            actor_id: row.try_get("actor_id")?,
            subject_id: row.try_get("subject_id")?,
            notification_type: notification_type.parse::<NotificationType>()?,
            message: row.try_get("message")?,
            is_read: row.try_get("is_read")?,
            read_at: row.try_get("read_at")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait::async_trait]
impl NotificationRepository for PostgresNotificationRepository {
    async fn insert(&self, notification: &Notification) -> ServiceResult<()> {
        sqlx::query(
            r#"
            INSERT INTO notifications (
                id, recipient_id, actor_id, subject_id, notification_type,
                message, is_read, read_at, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(notification.id)
        .bind(notification.recipient_id)
        .bind(notification.actor_id)
        .bind(notification.subject_id)
        .bind(notification.notification_type.as_str())
        .bind(&notification.message)
        .bind(notification.is_read)
        .bind(notification.read_at)
        .bind(notification.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list(&self, recipient_id: Uuid, unread_only: bool) -> ServiceResult<Vec<Notification>> {
        let query = format!(
            "SELECT {} FROM notifications \
             WHERE recipient_id = $1 AND ($2 = false OR is_read = false) \
             ORDER BY created_at DESC, id DESC",
            NOTIFICATION_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(recipient_id)
            .bind(unread_only)
            .fetch_all(&self.pool)
            .await?;

        debug!(
            recipient = %recipient_id,
            unread_only,
            count = rows.len(),
            "Fetched notifications"
        );
        rows.iter().map(Self::map_row).collect()
    }

    async fn count_unread(&self, recipient_id: Uuid) -> ServiceResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE recipient_id = $1 AND is_read = false",
        )
        .bind(recipient_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn mark_read(
        &self,
        notification_id: Uuid,
        recipient_id: Uuid,
    ) -> ServiceResult<Option<Notification>> {
        // COALESCE keeps the first read_at on repeat calls
        let query = format!(
            "UPDATE notifications \
             SET is_read = true, read_at = COALESCE(read_at, $3) \
             WHERE id = $1 AND recipient_id = $2 \
             RETURNING {}",
            NOTIFICATION_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(notification_id)
            .bind(recipient_id)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn mark_all_read(&self, recipient_id: Uuid) -> ServiceResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE notifications
            SET is_read = true, read_at = $2
            WHERE recipient_id = $1 AND is_read = false
            "#,
        )
        .bind(recipient_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
