//! Hosted generative-AI capabilities.
//!
//! The workflow state machines never talk to the network directly; they
//! depend on the capability traits below so they can be exercised with
//! stubs. [`GeminiClient`] is the production implementation of all three.

mod error;
mod gemini;

pub use error::AiError;
pub use gemini::GeminiClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::plan::{Profile, StudyPlan};

/// A citation returned alongside a grounded chat answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub uri: Option<String>,
    pub title: Option<String>,
}

/// A chat answer plus whatever grounding citations the service attached.
/// `sources` is empty when search was disabled or no grounding occurred.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub text: String,
    #[serde(default)]
    pub sources: Vec<GroundingSource>,
}

/// Generates a study plan from a profile and the eight quiz answers.
#[async_trait]
pub trait PlanGenerator: Send + Sync {
    /// `thinking` requests deeper reasoning at higher latency and cost; it
    /// changes nothing about the response shape.
    async fn generate_plan(
        &self,
        profile: &Profile,
        answers: &[String],
        thinking: bool,
    ) -> Result<StudyPlan, AiError>;
}

/// Synthesizes narration audio for a text.
#[async_trait]
pub trait SpeechGenerator: Send + Sync {
    /// Returns base64-encoded 24 kHz mono little-endian 16-bit PCM.
    async fn synthesize(&self, text: &str) -> Result<String, AiError>;
}

/// Answers a single chat message, optionally grounded in web search.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn chat(&self, message: &str, use_search: bool) -> Result<ChatReply, AiError>;
}
