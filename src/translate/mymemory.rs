//! MyMemory translation API.

use crate::config::DEFAULT_SECONDARY_URL;
use crate::error::{Result, TranslateError};
use crate::translate::Translator;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

pub struct MyMemoryTranslator {
    client: Client,
    base_url: String,
}

impl MyMemoryTranslator {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_SECONDARY_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct MyMemoryResponse {
    response_data: Option<MyMemoryData>,
    // Sent as a number on success and sometimes as a string on errors.
    response_status: Option<Value>,
    response_details: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct MyMemoryData {
    translated_text: Option<String>,
}

impl MyMemoryResponse {
    fn status(&self) -> Option<u64> {
        match self.response_status.as_ref()? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn into_result(self) -> Result<String> {
        let status = self.status();
        let translated = self
            .response_data
            .and_then(|d| d.translated_text)
            .filter(|t| !t.is_empty());

        match (status, translated) {
            (Some(200), Some(text)) => Ok(text),
            (Some(403), _) => Err(TranslateError::QuotaExceeded(
                "Language pair not supported or quota exceeded".to_string(),
            )),
            _ => Err(TranslateError::ServiceUnavailable(
                self.response_details
                    .filter(|d| !d.trim().is_empty())
                    .unwrap_or_else(|| "Translation failed".to_string()),
            )),
        }
    }
}

#[async_trait]
impl Translator for MyMemoryTranslator {
    async fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String> {
        debug!("MyMemory: {} -> {} ({} chars)", source_lang, target_lang, text.len());

        let url = format!("{}/get", self.base_url);
        let langpair = format!("{}|{}", source_lang, target_lang);
        let response = self
            .client
            .get(&url)
            .query(&[("q", text), ("langpair", langpair.as_str())])
            .send()
            .await
            .map_err(|e| {
                TranslateError::ServiceUnavailable(format!(
                    "Translation service is currently unavailable: {}",
                    e
                ))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::ServiceUnavailable(format!(
                "Translation service temporarily unavailable ({})",
                status.as_u16()
            )));
        }

        let body: MyMemoryResponse = response.json().await.map_err(|e| {
            TranslateError::ServiceUnavailable(format!("Malformed translation response: {}", e))
        })?;

        body.into_result()
    }

    fn name(&self) -> &'static str {
        "mymemory"
    }
}
