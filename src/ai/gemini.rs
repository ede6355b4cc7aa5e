//! Planner backed by the generative-language `generateContent` endpoint.

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info_span, warn, Instrument};

use super::{PlanFuture, PlanningResult, TaskPlanner};
use crate::config::AiConfig;
use crate::{AppError, Result};

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Remote planner using a structured JSON response schema.
#[derive(Debug, Clone)]
pub struct GeminiPlanner {
    http: reqwest::Client,
    url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GeminiPlanner {
    /// Build a planner from AI settings.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Ai` if no API key is loaded or the HTTP client
    /// cannot be constructed.
    pub fn new(config: &AiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| AppError::Ai("no API key configured".into()))?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|err| AppError::Ai(format!("failed to build http client: {err}")))?;

        Ok(Self {
            http,
            url: generate_url(&config.endpoint, &config.model),
            api_key,
        })
    }

    /// Endpoint this planner posts to.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl TaskPlanner for GeminiPlanner {
    fn plan(&self, task_title: &str) -> PlanFuture {
        let http = self.http.clone();
        let url = self.url.clone();
        let api_key = self.api_key.clone();
        let body = request_body(task_title);
        let span = info_span!("gemini_plan", title = task_title);

        Box::pin(
            async move {
                let response = http
                    .post(&url)
                    .header(API_KEY_HEADER, api_key)
                    .json(&body)
                    .send()
                    .await?;

                let status = response.status();
                if !status.is_success() {
                    let detail = response.text().await.unwrap_or_default();
                    warn!(%status, "ai planner request rejected");
                    return Err(AppError::Ai(format!("api returned {status}: {detail}")));
                }

                let raw = response.text().await?;
                let plan = parse_response(&raw)?;
                debug!(subtasks = plan.subtasks.len(), "ai suggestion received");
                Ok(plan)
            }
            .instrument(span),
        )
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

fn generate_url(endpoint: &str, model: &str) -> String {
    format!(
        "{}/models/{model}:generateContent",
        endpoint.trim_end_matches('/')
    )
}

/// Prompt plus the JSON schema the answer must follow.
fn request_body(task_title: &str) -> Value {
    let prompt = format!(
        "Act as a senior engineering lead. I have a task: \"{task_title}\". \
         Break this down into 3-5 technical subtasks, suggest a git branch name \
         following conventional commits, and estimate hours."
    );

    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "subtasks": {
                        "type": "ARRAY",
                        "items": { "type": "STRING" },
                        "description": "List of technical subtasks"
                    },
                    "branchNameSuggestion": {
                        "type": "STRING",
                        "description": "A valid git branch name (e.g., feat/foo-bar)"
                    },
                    "estimatedHours": {
                        "type": "NUMBER",
                        "description": "Estimated development hours"
                    }
                },
                "required": ["subtasks", "branchNameSuggestion", "estimatedHours"]
            }
        }
    })
}

/// Extract and validate the suggestion from a `generateContent` answer.
///
/// # Errors
///
/// Returns `AppError::MalformedResponse` if the envelope carries no text or
/// the text is not a valid suggestion.
pub fn parse_response(raw: &str) -> Result<PlanningResult> {
    let envelope: GenerateResponse = serde_json::from_str(raw)?;
    let text = envelope
        .candidates
        .into_iter()
        .filter_map(|c| c.content)
        .flat_map(|c| c.parts)
        .find_map(|p| p.text.filter(|t| !t.trim().is_empty()))
        .ok_or_else(|| AppError::MalformedResponse("no response text from ai".into()))?;

    let plan: PlanningResult = serde_json::from_str(&text)?;
    plan.validated()
}
