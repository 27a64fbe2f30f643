//! # docchat-model
//!
//! Chat model abstraction for the docchat retrieval-augmented chat engine.
//!
//! ## Overview
//!
//! This crate defines the [`ChatModel`] trait — the generation half of the
//! language model provider capability. A backend implements [`ChatModel::chat`]
//! for plain completions; the provided [`ChatModel::chat_with_context`] wraps a
//! question in retrieved grounding context before delegating to `chat`.
//!
//! Concrete backends live outside this workspace and are injected at pipeline
//! construction time, fully configured (endpoint, credentials) before they are
//! handed over. [`MockChat`] is a recording test double for exercising the
//! pipeline without a live backend.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docchat_model::{ChatModel, MockChat};
//!
//! # async fn run() -> Result<(), docchat_model::ModelError> {
//! let model = MockChat::new("a canned answer");
//! let answer = model.chat("hello").await?;
//! assert_eq!(answer, "a canned answer");
//! # Ok(())
//! # }
//! ```

pub mod chat;
pub mod error;
pub mod mock;

pub use chat::ChatModel;
pub use error::ModelError;
pub use mock::{ChatCall, MockChat};
