//! Read-only repository for the `shops` and `shop_staff` tables.

use seatwise_core::types::DbId;

use crate::models::shop::Shop;
use crate::DbPool;

/// Column list for `shops` queries.
const COLUMNS: &str = "id, owner_id, name, status, utc_offset_minutes, created_at, updated_at";

pub struct ShopRepo;

impl ShopRepo {
    /// Fetch a shop by id.
    pub async fn get(pool: &DbPool, shop_id: DbId) -> Result<Option<Shop>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM shops WHERE id = ?");
        sqlx::query_as::<_, Shop>(&query)
            .bind(shop_id)
            .fetch_optional(pool)
            .await
    }

    /// Whether `user_id` is a staff member of `shop_id`.
    pub async fn is_staff(pool: &DbPool, shop_id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM shop_staff WHERE shop_id = ? AND user_id = ?",
        )
        .bind(shop_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(count > 0)
    }
}
