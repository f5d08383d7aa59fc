//! Request/response shapes for the HTTP surface.

use crate::models::{ChatExchange, ChatMessage, Product};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub size: String,
    pub color: String,
    pub price: f64,
    pub stock: i64,
    pub description: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            brand: product.brand,
            category: product.category,
            size: product.size,
            color: product.color,
            price: product.price,
            stock: product.stock,
            description: product.description,
        }
    }
}

/// Query-string filters on `GET /products`.
#[derive(Debug, Deserialize)]
pub struct ProductFilterQuery {
    pub brand: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequest {
    /// Omitted for a one-shot exchange; the reply carries the generated id.
    pub session_id: Option<String>,
    #[validate(length(min = 1, message = "message must not be empty"))]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub reply: String,
    pub created_at: DateTime<Utc>,
}

impl From<ChatExchange> for ChatResponse {
    fn from(exchange: ChatExchange) -> Self {
        Self {
            session_id: exchange.session_id,
            reply: exchange.reply,
            created_at: exchange.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Most recent N messages; everything when omitted.
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ChatHistoryEntry {
    pub id: i64,
    pub role: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<ChatMessage> for ChatHistoryEntry {
    fn from(message: ChatMessage) -> Self {
        Self {
            id: message.id,
            role: message.role,
            content: message.content,
            created_at: message.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteHistoryResponse {
    pub deleted: u64,
}
