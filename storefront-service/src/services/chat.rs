//! Chat relay: assembles the prompt and forwards it to the AI provider.
//!
//! The reply comes back verbatim from the model; this service only adds
//! catalog and conversation context around the user's message and keeps
//! the session history.

use crate::models::{ChatExchange, ChatMessage, NewChatMessage, Product, Role};
use crate::services::providers::TextProvider;
use crate::services::{ChatRepository, ProductRepository};
use service_core::error::AppError;
use std::sync::Arc;
use uuid::Uuid;

/// How many history messages are fed back to the model per exchange.
const CONTEXT_MESSAGES: i64 = 6;

#[derive(Clone)]
pub struct ChatService {
    products: ProductRepository,
    history: ChatRepository,
    provider: Arc<dyn TextProvider>,
}

impl ChatService {
    pub fn new(
        products: ProductRepository,
        history: ChatRepository,
        provider: Arc<dyn TextProvider>,
    ) -> Self {
        Self {
            products,
            history,
            provider,
        }
    }

    /// Relay one user message through the AI provider.
    ///
    /// Without a caller-supplied session id the exchange runs as a fresh
    /// one-shot session. Both sides of the exchange are persisted after
    /// the provider replies, so a failed upstream call leaves no history.
    pub async fn process_message(
        &self,
        session_id: Option<String>,
        message: &str,
    ) -> Result<ChatExchange, AppError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "message must not be blank"
            )));
        }

        let session_id =
            session_id.unwrap_or_else(|| Uuid::new_v4().to_string());

        let products = self.products.list().await?;
        let recent = self.history.recent(&session_id, CONTEXT_MESSAGES).await?;
        let prompt = build_prompt(message, &products, &recent);

        let reply = self.provider.send_message(&prompt).await.map_err(|e| {
            tracing::warn!(session_id = %session_id, error = %e, "Upstream AI call failed");
            metrics::counter!("chat_exchanges_total", &[("status", "upstream_error")])
                .increment(1);
            AppError::BadGateway(e.to_string())
        })?;

        self.history
            .save(&NewChatMessage {
                session_id: session_id.clone(),
                role: Role::User,
                content: message.to_string(),
            })
            .await?;

        let assistant = self
            .history
            .save(&NewChatMessage {
                session_id: session_id.clone(),
                role: Role::Assistant,
                content: reply.clone(),
            })
            .await?;

        tracing::info!(
            session_id = %session_id,
            reply_len = reply.len(),
            "Chat exchange completed"
        );
        metrics::counter!("chat_exchanges_total", &[("status", "ok")]).increment(1);

        Ok(ChatExchange {
            session_id,
            reply,
            created_at: assistant.created_at,
        })
    }

    /// A session's history, oldest first.
    pub async fn session_history(
        &self,
        session_id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<ChatMessage>, AppError> {
        self.history.session_history(session_id, limit).await
    }

    /// Drop a session's history; returns how many messages were removed.
    pub async fn clear_session(&self, session_id: &str) -> Result<u64, AppError> {
        self.history.delete_session(session_id).await
    }
}

fn format_catalog(products: &[Product]) -> String {
    if products.is_empty() {
        return "- (no products)".to_string();
    }
    products
        .iter()
        .map(|p| {
            format!(
                "- {} | {} | ${:.2} | Stock: {} | Size: {} | Color: {}",
                p.name, p.brand, p.price, p.stock, p.size, p.color
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_history(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}", Role::from_string(&m.role).as_str(), m.content))
        .collect::<Vec<_>>()
        .join("\n")
}

fn build_prompt(user_message: &str, products: &[Product], history: &[ChatMessage]) -> String {
    format!(
        "You are a virtual sales assistant for a shoe e-commerce store.\n\
         Your goal is to help customers find the right shoes.\n\n\
         AVAILABLE PRODUCTS:\n{}\n\n\
         INSTRUCTIONS:\n\
         - Be friendly and professional\n\
         - Use the context of the previous conversation\n\
         - Recommend specific products when appropriate\n\
         - Mention prices, sizes and availability\n\
         - If you do not have the information, say so honestly\n\n\
         {}\n\n\
         User: {}\n\nAssistant:",
        format_catalog(products),
        format_history(history),
        user_message
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(name: &str, brand: &str, price: f64, stock: i64) -> Product {
        Product {
            id: 1,
            name: name.to_string(),
            brand: brand.to_string(),
            category: "Running".to_string(),
            size: "42".to_string(),
            color: "Black".to_string(),
            price,
            stock,
            description: String::new(),
        }
    }

    fn message(role: Role, content: &str) -> ChatMessage {
        ChatMessage {
            id: 1,
            session_id: "s1".to_string(),
            role: role.as_str().to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn prompt_includes_catalog_history_and_message() {
        let products = vec![product("Pegasus 40", "Nike", 120.0, 8)];
        let history = vec![
            message(Role::User, "do you have running shoes?"),
            message(Role::Assistant, "Yes, several models."),
        ];

        let prompt = build_prompt("what about size 42?", &products, &history);

        assert!(prompt.contains("- Pegasus 40 | Nike | $120.00 | Stock: 8"));
        assert!(prompt.contains("user: do you have running shoes?"));
        assert!(prompt.contains("assistant: Yes, several models."));
        assert!(prompt.ends_with("User: what about size 42?\n\nAssistant:"));
    }

    #[test]
    fn empty_catalog_renders_placeholder() {
        let prompt = build_prompt("hi", &[], &[]);
        assert!(prompt.contains("- (no products)"));
    }
}
