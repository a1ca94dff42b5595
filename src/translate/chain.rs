use crate::config::Config;
use crate::error::{Result, TranslateError};
use crate::language::provider_code;
use crate::translate::{http_client, GoogleTranslator, MyMemoryTranslator, Translator};
use async_trait::async_trait;
use tracing::{debug, info, warn};

/// Ordered fallback over translation providers.
///
/// Every provider except the last is best-effort: a failure, an empty result
/// or a result that merely echoes the input moves on to the next one. The
/// last provider's outcome decides the error the caller sees. There are no
/// retries and nothing is cached between calls.
pub struct ProviderChain {
    providers: Vec<Box<dyn Translator>>,
}

impl ProviderChain {
    pub fn new(providers: Vec<Box<dyn Translator>>) -> Self {
        Self { providers }
    }

    /// Google first, MyMemory as the fallback.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = http_client(config.request_timeout())?;
        Ok(Self::new(vec![
            Box::new(GoogleTranslator::new(client.clone()).with_base_url(&config.primary_url)),
            Box::new(MyMemoryTranslator::new(client).with_base_url(&config.secondary_url)),
        ]))
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }
}

fn echoes_input(output: &str, input: &str) -> bool {
    output.trim().to_lowercase() == input.trim().to_lowercase()
}

/// Turn the final provider's failure into one of the user-facing kinds.
fn classify(err: TranslateError) -> TranslateError {
    match err {
        TranslateError::QuotaExceeded(_)
        | TranslateError::Unsupported(_)
        | TranslateError::InvalidRequest(_)
        | TranslateError::ServiceUnavailable(_) => err,
        TranslateError::Api(msg) => TranslateError::ServiceUnavailable(msg),
        other => TranslateError::ServiceUnavailable(other.to_string()),
    }
}

#[async_trait]
impl Translator for ProviderChain {
    async fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String> {
        if source_lang == target_lang {
            return Err(TranslateError::InvalidRequest(
                "Please select two different languages".to_string(),
            ));
        }
        if text.trim().is_empty() {
            return Err(TranslateError::InvalidRequest(
                "Nothing to translate".to_string(),
            ));
        }
        let Some(last_index) = self.providers.len().checked_sub(1) else {
            return Err(TranslateError::ServiceUnavailable(
                "Translation service is currently unavailable".to_string(),
            ));
        };

        let source = provider_code(source_lang);
        let target = provider_code(target_lang);
        let mut last_message: Option<String> = None;

        for (index, provider) in self.providers.iter().enumerate() {
            let is_last = index == last_index;
            debug!("Trying {} for {} -> {}", provider.name(), source, target);

            match provider.translate(text, source, target).await {
                Ok(output) if output.trim().is_empty() => {
                    warn!("{} returned an empty translation", provider.name());
                    last_message = Some(format!("{} returned an empty translation", provider.name()));
                }
                Ok(output) if echoes_input(&output, text) => {
                    if is_last {
                        return Err(TranslateError::Unsupported(
                            "Unable to translate between these languages".to_string(),
                        ));
                    }
                    warn!("{} returned the input unchanged, trying next provider", provider.name());
                }
                Ok(output) => {
                    info!("Translated {} -> {} via {}", source_lang, target_lang, provider.name());
                    return Ok(output);
                }
                Err(e) if is_last => return Err(classify(e)),
                Err(e) => {
                    warn!("{} failed, trying next provider: {}", provider.name(), e);
                    last_message = Some(e.to_string());
                }
            }
        }

        Err(TranslateError::ServiceUnavailable(last_message.unwrap_or_else(|| {
            "Translation service is currently unavailable".to_string()
        })))
    }

    fn name(&self) -> &'static str {
        "chain"
    }
}
