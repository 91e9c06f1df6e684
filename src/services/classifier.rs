// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gemini API client for waste classification.
//!
//! Sends the captured image with a schema-constrained JSON prompt and
//! parses the structured result. Everything coming back is validated into
//! [`Classification`] at this boundary; a missing, unparseable, or
//! out-of-enum payload surfaces as `AppError::Classifier` and causes no
//! state mutation. Downstream code trusts the validated value.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;

use crate::error::AppError;
use crate::models::{BinCategory, Classification};

const CLASSIFY_PROMPT: &str = "You are an expert waste management assistant. \
Analyze the provided image and classify the item for disposal. You must \
return a structured JSON response identifying the item, its bin category \
(waste, compost, or recycle), your confidence level, and helpful tips.";

/// Gemini API client.
#[derive(Clone)]
pub struct GeminiClassifier {
    http: Option<reqwest::Client>,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClassifier {
    /// Create a classifier using the given API key and model.
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            http: Some(reqwest::Client::new()),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key,
            model,
        }
    }

    /// Create an offline classifier for testing. Any classify call fails
    /// with a classifier error.
    pub fn new_mock() -> Self {
        Self {
            http: None,
            base_url: String::new(),
            api_key: String::new(),
            model: String::new(),
        }
    }

    /// Classify a base64-encoded JPEG image.
    ///
    /// A `data:image/jpeg;base64,` prefix is tolerated and stripped.
    pub async fn classify(&self, image_base64: &str) -> Result<Classification, AppError> {
        let http = self
            .http
            .as_ref()
            .ok_or_else(|| AppError::Classifier("Classifier not configured (offline)".to_string()))?;

        let data = image_base64
            .split_once(',')
            .map(|(_, rest)| rest)
            .unwrap_or(image_base64);

        // Validate the payload decodes before calling the model
        STANDARD
            .decode(data)
            .map_err(|e| AppError::BadRequest(format!("Image is not valid base64: {}", e)))?;

        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model
        );

        let body = serde_json::json!({
            "contents": [{
                "parts": [
                    { "inline_data": { "mime_type": "image/jpeg", "data": data } },
                    { "text": CLASSIFY_PROMPT },
                ]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "detectedItem": { "type": "STRING" },
                        "binCategory": { "type": "STRING", "enum": ["waste", "compost", "recycle"] },
                        "confidence": { "type": "NUMBER" },
                        "explanation": { "type": "STRING" },
                        "disposalTips": { "type": "ARRAY", "items": { "type": "STRING" } },
                    },
                    "required": ["detectedItem", "binCategory", "confidence", "explanation", "disposalTips"],
                }
            }
        });

        let response = http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Classifier(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(%status, body = %text, "Gemini API error");
            return Err(AppError::Classifier(format!("Gemini returned {}", status)));
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AppError::Classifier(format!("Unparseable response: {}", e)))?;

        let text = extract_text(&payload)
            .ok_or_else(|| AppError::Classifier("Response contained no text part".to_string()))?;

        parse_classification(text)
    }
}

// ─── Response Shapes ─────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// The model's JSON payload, field names as the prompt schema declares them.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawClassification {
    detected_item: String,
    bin_category: BinCategory,
    confidence: f64,
    explanation: String,
    disposal_tips: Vec<String>,
}

fn extract_text(response: &GenerateContentResponse) -> Option<&str> {
    response
        .candidates
        .first()?
        .content
        .parts
        .iter()
        .find_map(|p| p.text.as_deref())
}

/// Validate the model's JSON into a trusted [`Classification`].
///
/// Confidence must be a finite number; it is clamped into [0, 1] here so
/// the progression engine can assume that range.
fn parse_classification(text: &str) -> Result<Classification, AppError> {
    let raw: RawClassification = serde_json::from_str(text)
        .map_err(|e| AppError::Classifier(format!("Invalid classification payload: {}", e)))?;

    if !raw.confidence.is_finite() {
        return Err(AppError::Classifier(
            "Confidence is not a finite number".to_string(),
        ));
    }

    Ok(Classification {
        detected_item: raw.detected_item,
        bin_category: raw.bin_category,
        confidence: raw.confidence.clamp(0.0, 1.0),
        explanation: raw.explanation,
        disposal_tips: raw.disposal_tips,
    })
}
