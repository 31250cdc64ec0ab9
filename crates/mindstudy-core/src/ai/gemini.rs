//! Client for the hosted Gemini generation service.
//!
//! One `generateContent` endpoint serves every capability; the request
//! body decides whether we get JSON (study plans), audio (narration) or
//! grounded text (chat). Malformed payloads are hard failures -- the only
//! repair attempted is stripping Markdown code fences before parsing.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};
use url::Url;

use super::{AiError, ChatProvider, ChatReply, GroundingSource, PlanGenerator, SpeechGenerator};
use crate::plan::{quiz, Profile, StudyPlan, ROADMAP_NODES};
use crate::relax::DEFAULT_RELAX_ADVICE;
use crate::storage::AiConfig;

const STUDY_SYSTEM_INSTRUCTION: &str = "\
You are MindStudy AI, an expert academic advisor. Based on a student \
profile (grade, strengths, weaknesses, challenges, goals) and the results \
of an eight-question study-habits quiz, create a personalized four-step \
study roadmap.

Response format requirements:
1. Return a single JSON object.
2. roadmap: an array of exactly 4 nodes, each with 'title' (short heading) \
and 'content' (detailed guidance).
3. summary: a short, concise overall solution summary.
4. advice: in-depth advice addressing the student's specific challenge.
5. motivationalQuote: an inspiring quote that fits their situation.

The response MUST be valid JSON. Write in a friendly, encouraging tone. \
Provide a powerful motivationalQuote.";

const CHAT_SYSTEM_INSTRUCTION: &str = "\
You are MindStudy AI, a smart study assistant. Answer in a friendly and \
accurate way.";

pub struct GeminiClient {
    http: Client,
    base_url: Url,
    api_key: String,
    plan_model: String,
    fast_model: String,
    tts_model: String,
    voice: String,
    thinking_budget: u32,
}

impl GeminiClient {
    /// Build a client with an explicit API key.
    pub fn new(api_key: impl Into<String>, config: &AiConfig) -> Result<Self, AiError> {
        let base_url =
            Url::parse(&config.base_url).map_err(|_| AiError::InvalidBaseUrl(config.base_url.clone()))?;
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(AiError::Network)?;
        Ok(Self {
            http,
            base_url,
            api_key: api_key.into(),
            plan_model: config.plan_model.clone(),
            fast_model: config.fast_model.clone(),
            tts_model: config.tts_model.clone(),
            voice: config.voice.clone(),
            thinking_budget: config.thinking_budget,
        })
    }

    /// Build a client with the API key from the configured environment
    /// variable.
    pub fn from_env(config: &AiConfig) -> Result<Self, AiError> {
        let api_key = std::env::var(&config.api_key_env)
            .map_err(|_| AiError::MissingApiKey(config.api_key_env.clone()))?;
        Self::new(api_key, config)
    }

    fn endpoint(&self, model: &str) -> String {
        // `base_url` always carries a trailing slash after parsing.
        format!("{}v1beta/models/{}:generateContent", self.base_url, model)
    }

    async fn generate(
        &self,
        model: &str,
        body: serde_json::Value,
    ) -> Result<GenerateContentResponse, AiError> {
        debug!(%model, "issuing generateContent request");
        let response = self
            .http
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "generation request failed");
            return Err(AiError::from_status(status.as_u16(), message));
        }
        Ok(response.json::<GenerateContentResponse>().await?)
    }

    /// One-sentence summary of arbitrary content.
    pub async fn quick_summary(&self, content: &str) -> Result<String, AiError> {
        let body = json!({
            "contents": [{"parts": [{"text": format!(
                "Summarize the following in one short sentence: {content}"
            )}]}],
        });
        let response = self.generate(&self.fast_model, body).await?;
        response
            .text()
            .ok_or_else(|| AiError::InvalidResponse("summary response carried no text".into()))
    }

    /// A short, warm relaxation suggestion for whatever is stressing the
    /// user out. An empty reply falls back to canned advice rather than
    /// failing.
    pub async fn relax_suggestion(&self, stress_source: &str) -> Result<String, AiError> {
        let body = json!({
            "contents": [{"parts": [{"text": format!(
                "The user is feeling tired or stressed because of: {stress_source}. \
                 Offer short, warm and practical relaxation advice."
            )}]}],
        });
        let response = self.generate(&self.fast_model, body).await?;
        Ok(response
            .text()
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_RELAX_ADVICE.to_string()))
    }
}

fn plan_prompt(profile: &Profile, answers: &[String]) -> String {
    let insights = quiz::insights(answers);
    let (focus_challenge, note_style) = match &insights {
        Some(i) => (i.focus_challenge.as_str(), i.note_style.as_str()),
        None => ("unknown", "unknown"),
    };
    format!(
        "Student profile:\n\
         - Grade: {}\n\
         - Strengths: {}\n\
         - Weaknesses: {}\n\
         - Challenges: {}\n\
         - Goals: {}\n\
         - Focus stamina: {} hours/day\n\
         - Sleep: {} hours/day\n\
         - Biggest self-study challenge (quiz): {}\n\
         - Note-taking style (quiz): {}\n\
         - All quiz answers, in question order: {}\n\n\
         Instructions: generate a 4-node roadmap. If thinking is enabled, \
         provide extremely deep strategic insights.",
        profile.grade,
        profile.strengths,
        profile.weaknesses,
        profile.challenges,
        profile.goals,
        profile.focus_hours,
        profile.sleep_hours,
        focus_challenge,
        note_style,
        answers.join("; "),
    )
}

fn plan_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "roadmap": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": {"type": "STRING"},
                        "content": {"type": "STRING"},
                    },
                    "required": ["title", "content"],
                },
            },
            "summary": {"type": "STRING"},
            "advice": {"type": "STRING"},
            "motivationalQuote": {"type": "STRING"},
        },
        "required": ["roadmap", "summary", "advice", "motivationalQuote"],
    })
}

/// The service sometimes wraps JSON payloads in Markdown code fences
/// despite the JSON response mime type.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

#[async_trait::async_trait]
impl PlanGenerator for GeminiClient {
    async fn generate_plan(
        &self,
        profile: &Profile,
        answers: &[String],
        thinking: bool,
    ) -> Result<StudyPlan, AiError> {
        let mut generation_config = json!({
            "responseMimeType": "application/json",
            "responseSchema": plan_schema(),
        });
        if thinking {
            generation_config["thinkingConfig"] = json!({"thinkingBudget": self.thinking_budget});
        }
        let body = json!({
            "contents": [{"parts": [{"text": plan_prompt(profile, answers)}]}],
            "systemInstruction": {"parts": [{"text": STUDY_SYSTEM_INSTRUCTION}]},
            "generationConfig": generation_config,
        });

        let response = self.generate(&self.plan_model, body).await?;
        let text = response
            .text()
            .ok_or_else(|| AiError::InvalidResponse("plan response carried no text".into()))?;
        let plan: StudyPlan = serde_json::from_str(strip_code_fences(&text))?;
        if plan.roadmap.len() != ROADMAP_NODES {
            return Err(AiError::InvalidResponse(format!(
                "expected {ROADMAP_NODES} roadmap nodes, got {}",
                plan.roadmap.len()
            )));
        }
        Ok(plan)
    }
}

#[async_trait::async_trait]
impl SpeechGenerator for GeminiClient {
    async fn synthesize(&self, text: &str) -> Result<String, AiError> {
        let body = json!({
            "contents": [{"parts": [{"text": format!(
                "Read the following study advice aloud, warmly and expressively: {text}"
            )}]}],
            "generationConfig": {
                "responseModalities": ["AUDIO"],
                "speechConfig": {
                    "voiceConfig": {"prebuiltVoiceConfig": {"voiceName": &self.voice}},
                },
            },
        });
        let response = self.generate(&self.tts_model, body).await?;
        match response.inline_data() {
            Some(data) if !data.is_empty() => Ok(data.to_string()),
            _ => Err(AiError::EmptyAudio),
        }
    }
}

#[async_trait::async_trait]
impl ChatProvider for GeminiClient {
    async fn chat(&self, message: &str, use_search: bool) -> Result<ChatReply, AiError> {
        let mut body = json!({
            "contents": [{"parts": [{"text": message}]}],
            "systemInstruction": {"parts": [{"text": CHAT_SYSTEM_INSTRUCTION}]},
        });
        let model = if use_search {
            body["tools"] = json!([{"googleSearch": {}}]);
            &self.fast_model
        } else {
            body["generationConfig"] = json!({"thinkingConfig": {"thinkingBudget": self.thinking_budget}});
            &self.plan_model
        };

        let response = self.generate(model, body).await?;
        let text = response
            .text()
            .ok_or_else(|| AiError::InvalidResponse("chat response carried no text".into()))?;
        Ok(ChatReply {
            text,
            sources: response.sources(),
        })
    }
}

// ── Wire types ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
    #[serde(rename = "groundingMetadata")]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
    #[serde(rename = "inlineData")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
struct InlineData {
    data: String,
}

#[derive(Debug, Deserialize)]
struct GroundingMetadata {
    #[serde(rename = "groundingChunks", default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<WebSource>,
}

#[derive(Debug, Deserialize)]
struct WebSource {
    uri: Option<String>,
    title: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// First inline (audio) payload of the first candidate.
    fn inline_data(&self) -> Option<&str> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        parts
            .iter()
            .find_map(|p| p.inline_data.as_ref())
            .map(|d| d.data.as_str())
    }

    fn sources(&self) -> Vec<GroundingSource> {
        let Some(metadata) = self
            .candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
        else {
            return Vec::new();
        };
        metadata
            .grounding_chunks
            .iter()
            .filter_map(|chunk| chunk.web.as_ref())
            .map(|web| GroundingSource {
                uri: web.uri.clone(),
                title: web.title.clone(),
            })
            .collect()
    }
}
