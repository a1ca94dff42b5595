//! Debounced translate-as-you-type.
//!
//! Every input change bumps a generation counter and replaces the pending
//! task. A task only starts translating once its delay has passed without a
//! newer input, and only publishes its result if its generation is still the
//! current one, so a slow response can never overwrite a newer result.

use crate::config::Config;
use crate::error::ErrorKind;
use crate::translate::Translator;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoTranslateState {
    /// Nothing to show: empty input, or nothing requested yet.
    Idle,
    Translating {
        generation: u64,
    },
    Translated {
        generation: u64,
        text: String,
        source_lang: String,
        target_lang: String,
        translation: String,
    },
    Failed {
        generation: u64,
        text: String,
        source_lang: String,
        target_lang: String,
        kind: ErrorKind,
        message: String,
    },
}

impl AutoTranslateState {
    /// Whether this is a final outcome for some input.
    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            AutoTranslateState::Translated { .. } | AutoTranslateState::Failed { .. }
        )
    }
}

struct Shared {
    generation: AtomicU64,
    state: watch::Sender<AutoTranslateState>,
}

impl Shared {
    /// Publish `next` only if `generation` is still current. The check runs
    /// under the channel lock, which `advance` also takes.
    fn commit(&self, generation: u64, next: AutoTranslateState) -> bool {
        self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *state = next;
            true
        })
    }

    /// Start a new generation, optionally replacing the published state.
    fn advance(&self, replace: Option<AutoTranslateState>) -> u64 {
        let mut generation = 0;
        self.state.send_if_modified(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            match replace {
                Some(next) if *state != next => {
                    *state = next;
                    true
                }
                _ => false,
            }
        });
        generation
    }
}

pub struct AutoTranslator {
    translator: Arc<dyn Translator>,
    delay: Duration,
    shared: Arc<Shared>,
    pending: Option<JoinHandle<()>>,
}

impl AutoTranslator {
    pub fn new(translator: Arc<dyn Translator>, delay: Duration) -> Self {
        let (state, _) = watch::channel(AutoTranslateState::Idle);
        Self {
            translator,
            delay,
            shared: Arc::new(Shared {
                generation: AtomicU64::new(0),
                state,
            }),
            pending: None,
        }
    }

    pub fn from_config(translator: Arc<dyn Translator>, config: &Config) -> Self {
        Self::new(translator, config.debounce())
    }

    pub fn subscribe(&self) -> watch::Receiver<AutoTranslateState> {
        self.shared.state.subscribe()
    }

    pub fn state(&self) -> AutoTranslateState {
        self.shared.state.borrow().clone()
    }

    pub fn generation(&self) -> u64 {
        self.shared.generation.load(Ordering::SeqCst)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Handle an input change. Must be called from within a tokio runtime.
    /// Returns the generation assigned to this input.
    pub fn on_input(&mut self, text: &str, source_lang: &str, target_lang: &str) -> u64 {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }

        if text.trim().is_empty() || source_lang == target_lang {
            return self.shared.advance(Some(AutoTranslateState::Idle));
        }

        let generation = self.shared.advance(None);
        let shared = self.shared.clone();
        let translator = self.translator.clone();
        let delay = self.delay;
        let text = text.to_string();
        let source_lang = source_lang.to_string();
        let target_lang = target_lang.to_string();

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            if !shared.commit(generation, AutoTranslateState::Translating { generation }) {
                return;
            }
            debug!("Auto-translating generation {}", generation);

            let next = match translator.translate(&text, &source_lang, &target_lang).await {
                Ok(translation) => AutoTranslateState::Translated {
                    generation,
                    text,
                    source_lang,
                    target_lang,
                    translation,
                },
                Err(e) => AutoTranslateState::Failed {
                    generation,
                    text,
                    source_lang,
                    target_lang,
                    kind: e.kind(),
                    message: e.to_string(),
                },
            };

            if !shared.commit(generation, next) {
                debug!("Discarding stale result for generation {}", generation);
            }
        }));

        generation
    }

    /// Drop any pending work and go back to `Idle`.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
        self.shared.advance(Some(AutoTranslateState::Idle));
    }
}

impl Drop for AutoTranslator {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, TranslateError};
    use async_trait::async_trait;

    struct Upper;

    #[async_trait]
    impl Translator for Upper {
        async fn translate(&self, text: &str, _s: &str, _t: &str) -> Result<String> {
            Ok(text.to_uppercase())
        }
        fn name(&self) -> &'static str {
            "upper"
        }
    }

    struct Failing;

    #[async_trait]
    impl Translator for Failing {
        async fn translate(&self, _text: &str, _s: &str, _t: &str) -> Result<String> {
            Err(TranslateError::QuotaExceeded("quota".into()))
        }
        fn name(&self) -> &'static str {
            "failing"
        }
    }

    async fn settled(rx: &mut watch::Receiver<AutoTranslateState>) -> AutoTranslateState {
        loop {
            rx.changed().await.unwrap();
            let state = rx.borrow_and_update().clone();
            if state.is_settled() {
                return state;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_translates_after_delay() {
        let mut auto = AutoTranslator::new(Arc::new(Upper), Duration::from_millis(800));
        let mut rx = auto.subscribe();
        let generation = auto.on_input("hello", "en", "fr");

        match settled(&mut rx).await {
            AutoTranslateState::Translated {
                generation: g,
                translation,
                ..
            } => {
                assert_eq!(g, generation);
                assert_eq!(translation, "HELLO");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_input_clears_immediately() {
        let mut auto = AutoTranslator::new(Arc::new(Upper), Duration::from_millis(800));
        let mut rx = auto.subscribe();
        auto.on_input("hello", "en", "fr");
        settled(&mut rx).await;

        auto.on_input("   ", "en", "fr");
        assert_eq!(auto.state(), AutoTranslateState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_carries_kind() {
        let mut auto = AutoTranslator::new(Arc::new(Failing), Duration::from_millis(10));
        let mut rx = auto.subscribe();
        auto.on_input("hello", "en", "fr");
        match settled(&mut rx).await {
            AutoTranslateState::Failed { kind, text, .. } => {
                assert_eq!(kind, ErrorKind::QuotaExceeded);
                assert_eq!(text, "hello");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_returns_to_idle() {
        let mut auto = AutoTranslator::new(Arc::new(Upper), Duration::from_millis(800));
        auto.on_input("hello", "en", "fr");
        auto.cancel();
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(auto.state(), AutoTranslateState::Idle);
    }

    #[tokio::test]
    async fn test_from_config_uses_debounce() {
        let config = Config {
            debounce_ms: 250,
            ..Config::default()
        };
        let auto = AutoTranslator::from_config(Arc::new(Upper), &config);
        assert_eq!(auto.delay(), Duration::from_millis(250));
    }

    #[test]
    fn test_stale_commit_is_rejected() {
        let (state, _) = watch::channel(AutoTranslateState::Idle);
        let shared = Shared {
            generation: AtomicU64::new(0),
            state,
        };
        let first = shared.advance(None);
        let second = shared.advance(None);
        assert!(!shared.commit(first, AutoTranslateState::Translating { generation: first }));
        assert!(shared.commit(second, AutoTranslateState::Translating { generation: second }));
    }
}
