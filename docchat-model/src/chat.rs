//! Chat model trait for generating text completions.

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;

/// A provider that generates chat completions from text prompts.
///
/// Implementations wrap a specific backend behind a unified async interface
/// and are expected to be fully configured at construction time. Backend
/// failures should be returned as [`ModelError`](crate::ModelError) values;
/// callers decide how to degrade.
///
/// The provided [`chat_with_context`](ChatModel::chat_with_context) composes
/// a grounding prompt and delegates to [`chat`](ChatModel::chat), so backends
/// only need to implement the single-prompt operation. Backends with a native
/// notion of system/grounding context may override it.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Generate a completion for a single prompt with no grounding context.
    async fn chat(&self, message: &str) -> Result<String>;

    /// Generate a completion for `question`, grounded in `context`.
    ///
    /// An empty `context` is equivalent to [`chat`](ChatModel::chat).
    async fn chat_with_context(&self, question: &str, context: &str) -> Result<String> {
        if context.is_empty() {
            return self.chat(question).await;
        }

        debug!(context_len = context.len(), "composing grounded prompt");
        let prompt = format!("Context:\n{context}\n\nQuestion: {question}\n\nAnswer based on context:");
        self.chat(&prompt).await
    }
}
