use crate::errors::{Error, Result};
use crate::metrics::{CHAT_FAILURES_TOTAL, CHAT_LATENCY_SECONDS, CHAT_REQUESTS_TOTAL};
use crate::model::PetProfile;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const DEFAULT_MODEL: &str = "gemini-pro";
const FALLBACK_REPLY: &str = "Sorry, I couldn't generate a response.";

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

/// Client for the generative-language chat backend.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// One chat turn about the given pet. Blank messages are rejected before
    /// any network call; an empty generation becomes the fallback apology.
    pub async fn send_message(&self, profile: &PetProfile, message: &str) -> Result<String> {
        if message.trim().is_empty() {
            return Err(Error::Validation("Message cannot be empty.".to_string()));
        }

        CHAT_REQUESTS_TOTAL.inc();
        let prompt = assistant_prompt(profile, message);
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: Some(prompt) }],
            }],
        };
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        debug!(model = %self.model, "sending chat turn");

        let timer = CHAT_LATENCY_SECONDS.start_timer();
        let result = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .and_then(|response| response.error_for_status());
        timer.observe_duration();

        let response = result.map_err(|e| {
            CHAT_FAILURES_TOTAL.inc();
            Error::Http(e)
        })?;
        let body: GenerateResponse = response.json().await?;
        Ok(extract_reply(body))
    }
}

/// The persona prompt the app sends: assistant role plus the pet's vitals,
/// with the owner's question appended.
fn assistant_prompt(profile: &PetProfile, message: &str) -> String {
    format!(
        "You are PetPal, an expert and friendly AI pet care assistant. \
         You are advising the owner of {name}, a {age}-year-old {gender} {breed} weighing {weight} kg. \
         Your advice must be safe, practical, and tailored to this specific pet. \
         Maintain a warm, encouraging, and slightly playful tone.\n\
         User's question: {message}",
        name = profile.name,
        age = profile.age,
        gender = profile.gender,
        breed = profile.breed,
        weight = profile.weight_kg,
    )
}

/// First candidate text, or the fallback apology when the model returned
/// nothing usable.
fn extract_reply(response: GenerateResponse) -> String {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content.parts.into_iter().next())
        .and_then(|part| part.text)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| FALLBACK_REPLY.to_string())
}
