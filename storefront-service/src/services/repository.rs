//! Data-access contract for the catalog and the chat history.
//!
//! Both repositories are read-mostly: products are never written outside
//! the seed path, chat history only appends.

use crate::models::{ChatMessage, NewChatMessage, Product, ProductFilter};
use crate::services::Database;
use chrono::Utc;
use service_core::error::AppError;
use sqlx::SqlitePool;
use tracing::instrument;

const PRODUCT_COLUMNS: &str = "id, name, brand, category, size, color, price, stock, description";
const CHAT_COLUMNS: &str = "id, session_id, role, content, created_at";

/// Read access to the product table.
#[derive(Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
        }
    }

    /// All products in id order. An empty catalog is a valid result.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {} FROM products ORDER BY id",
            PRODUCT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list products: {}", e)))?;

        Ok(products)
    }

    /// Lookup by id.
    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {} FROM products WHERE id = ?1",
            PRODUCT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to fetch product: {}", e)))?;

        Ok(product)
    }

    /// Products matching the filter's equality constraints, in id order.
    #[instrument(skip(self, filter), fields(brand = ?filter.brand, category = ?filter.category))]
    pub async fn search(&self, filter: &ProductFilter) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            r#"
            SELECT {}
            FROM products
            WHERE (?1 IS NULL OR brand = ?1)
              AND (?2 IS NULL OR category = ?2)
            ORDER BY id
            "#,
            PRODUCT_COLUMNS
        ))
        .bind(&filter.brand)
        .bind(&filter.category)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to search products: {}", e))
        })?;

        Ok(products)
    }
}

/// Append/read access to per-session chat history.
#[derive(Clone)]
pub struct ChatRepository {
    pool: SqlitePool,
}

impl ChatRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
        }
    }

    /// Persist one message and return the stored row.
    #[instrument(skip(self, message), fields(session_id = %message.session_id, role = message.role.as_str()))]
    pub async fn save(&self, message: &NewChatMessage) -> Result<ChatMessage, AppError> {
        let stored = sqlx::query_as::<_, ChatMessage>(&format!(
            r#"
            INSERT INTO chat_messages (session_id, role, content, created_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING {}
            "#,
            CHAT_COLUMNS
        ))
        .bind(&message.session_id)
        .bind(message.role.as_str())
        .bind(&message.content)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to save chat message: {}", e))
        })?;

        Ok(stored)
    }

    /// Messages of a session in chronological order. With a limit, the
    /// most recent `limit` messages are returned, order preserved.
    #[instrument(skip(self))]
    pub async fn session_history(
        &self,
        session_id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<ChatMessage>, AppError> {
        // LIMIT -1 means unbounded in SQLite.
        let limit = limit.unwrap_or(-1);
        let messages = sqlx::query_as::<_, ChatMessage>(&format!(
            r#"
            SELECT {} FROM (
                SELECT {}
                FROM chat_messages
                WHERE session_id = ?1
                ORDER BY id DESC
                LIMIT ?2
            )
            ORDER BY id ASC
            "#,
            CHAT_COLUMNS, CHAT_COLUMNS
        ))
        .bind(session_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to load session history: {}", e))
        })?;

        Ok(messages)
    }

    /// Last `count` messages of a session, chronological. Prompt-context
    /// window for the chat relay.
    pub async fn recent(&self, session_id: &str, count: i64) -> Result<Vec<ChatMessage>, AppError> {
        self.session_history(session_id, Some(count)).await
    }

    /// Delete a session's history. Returns the number of rows removed.
    #[instrument(skip(self))]
    pub async fn delete_session(&self, session_id: &str) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM chat_messages WHERE session_id = ?1")
            .bind(session_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to delete session history: {}", e))
            })?;

        Ok(result.rows_affected())
    }
}
