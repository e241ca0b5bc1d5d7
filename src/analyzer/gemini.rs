//! Gemini API連携（年齢・性別判定）

use super::AgeClassifier;
use crate::error::{CatalogueError, Result};
use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use zecode_catalogue_common::{parse_age_response, AgeAnalysis, AGE_PROMPT};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini APIリクエスト
#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

/// Gemini APIレスポンス
#[derive(Deserialize, Default)]
#[serde(default)]
struct GeminiResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ResponseContent {
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ResponsePart {
    text: String,
}

pub struct GeminiClassifier {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClassifier {
    pub fn new(api_key: String, model: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, api_key, model })
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", GEMINI_API_BASE, self.model)
    }
}

/// 画像（インライン）とプロンプトからリクエストを作成
fn build_request(image: &[u8], mime_type: &str) -> GeminiRequest {
    let data = base64::engine::general_purpose::STANDARD.encode(image);

    GeminiRequest {
        contents: vec![Content {
            parts: vec![
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: mime_type.to_string(),
                        data,
                    },
                },
                Part::Text { text: AGE_PROMPT.to_string() },
            ],
        }],
        generation_config: GenerationConfig {
            temperature: 0.1,
            response_mime_type: "application/json".to_string(),
        },
    }
}

/// 最初の候補のテキストを取り出す
fn response_text(response: GeminiResponse) -> Result<String> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content.parts.into_iter().next())
        .map(|p| p.text)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| CatalogueError::ApiParse("空のレスポンス".into()))
}

#[async_trait]
impl AgeClassifier for GeminiClassifier {
    async fn classify(&self, image: &[u8], mime_type: &str) -> Result<AgeAnalysis> {
        let request = build_request(image, mime_type);

        tracing::debug!(model = %self.model, bytes = image.len(), "Gemini年齢判定リクエスト");

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let preview: String = body.chars().take(200).collect();
            return Err(CatalogueError::ApiCall(format!("API error {}: {}", status, preview)));
        }

        let payload: GeminiResponse = response.json().await?;
        let text = response_text(payload)?;

        tracing::debug!(response = %text, "Gemini年齢判定レスポンス");

        parse_age_response(&text).map_err(|e| CatalogueError::ApiParse(e.to_string()))
    }
}
