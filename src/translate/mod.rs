pub mod chain;
pub mod google;
pub mod mymemory;

pub use chain::ProviderChain;
pub use google::GoogleTranslator;
pub use mymemory::MyMemoryTranslator;

use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` between two provider-ready language codes.
    async fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String>;
    fn name(&self) -> &'static str;
}

/// HTTP client shared by the providers.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}
