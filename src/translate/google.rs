//! Google Translate through the public `translate_a/single` endpoint.

use crate::config::DEFAULT_PRIMARY_URL;
use crate::error::{Result, TranslateError};
use crate::translate::Translator;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

pub struct GoogleTranslator {
    client: Client,
    base_url: String,
}

impl GoogleTranslator {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_PRIMARY_URL.to_string(),
        }
    }

    /// Point at a different host (a mirror, or a mock server in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

/// The response is a nested array; `data[0]` holds one
/// `[translated, original, ...]` entry per sentence.
fn extract_translation(data: &Value) -> Option<String> {
    let segments = data.get(0)?.as_array()?;
    let text: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String> {
        debug!("Google: {} -> {} ({} chars)", source_lang, target_lang, text.len());

        let url = format!("{}/translate_a/single", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", source_lang),
                ("tl", target_lang),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| TranslateError::Api(format!("Google request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::Api(format!(
                "Google Translate returned {}",
                status
            )));
        }

        let data: Value = response
            .json()
            .await
            .map_err(|e| TranslateError::Api(format!("Malformed Google response: {}", e)))?;

        extract_translation(&data)
            .ok_or_else(|| TranslateError::Api("Google Translate returned no text".to_string()))
    }

    fn name(&self) -> &'static str {
        "google"
    }
}
