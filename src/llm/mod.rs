//! LLM integration for instruct-forge.
//!
//! The generation loop only ever needs one thing from a language model: send a
//! chat-formatted message list and get a text blob back. [`LlmProvider`] is the
//! seam the loop is written against; [`ChatCompletionClient`] implements it for
//! any OpenAI-compatible `/chat/completions` endpoint (DeepSeek by default).
//!
//! ```ignore
//! use instruct_forge::llm::{complete, ChatCompletionClient, GenerationRequest, Message};
//!
//! let client = ChatCompletionClient::from_env()?;
//! let request = GenerationRequest::new(
//!     "deepseek-chat",
//!     vec![Message::system("You are helpful."), Message::user("Hello!")],
//! )
//! .with_temperature(1.0)
//! .with_stop(vec!["20.".into(), "20:".into()]);
//!
//! let text = complete(&client, request).await?;
//! ```

pub mod client;

pub use client::{
    complete, ChatCompletionClient, Choice, GenerationRequest, GenerationResponse, LlmProvider,
    Message, Usage, DEFAULT_API_BASE, DEFAULT_MODEL,
};
