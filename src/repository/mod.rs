//! Translation history and saved words, persisted through a [`LocalStore`].

pub mod collection;
pub mod records;

pub use collection::{Collection, Record};
pub use records::{NewSavedWord, NewTranslation, SavedWord, TranslationRecord};

use crate::config::Config;
use crate::error::{Result, TranslateError};
use crate::store::{LocalStore, HISTORY_KEY, SAVED_WORDS_KEY};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tracing::info;

pub const HISTORY_CAP: usize = 100;
pub const SAVED_WORDS_CAP: usize = 200;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Millisecond-timestamp ids, bumped forward so that no two ids handed out
/// by one generator are equal.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self, now: DateTime<Utc>) -> String {
        let candidate = now.timestamp_millis();
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(candidate.max(last + 1))
            })
            .unwrap_or(candidate);
        candidate.max(previous + 1).to_string()
    }
}

/// Owns both persisted collections. Build one per process and share it.
pub struct Repository {
    history: Collection<TranslationRecord>,
    words: Collection<SavedWord>,
}

impl Repository {
    pub fn new(store: LocalStore) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let ids = Arc::new(IdGenerator::new());
        Self {
            history: Collection::new(
                store.clone(),
                HISTORY_KEY,
                HISTORY_CAP,
                clock.clone(),
                ids.clone(),
            ),
            words: Collection::new(store, SAVED_WORDS_KEY, SAVED_WORDS_CAP, clock, ids),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(LocalStore::open(config.resolved_data_dir()))
            .with_caps(config.history_cap, config.saved_words_cap)
    }

    pub fn with_caps(mut self, history_cap: usize, saved_words_cap: usize) -> Self {
        self.history.set_cap(history_cap);
        self.words.set_cap(saved_words_cap);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.history.set_clock(clock.clone());
        self.words.set_clock(clock);
        self
    }

    pub fn save_translation(&self, translation: NewTranslation) -> Result<TranslationRecord> {
        let record = self.history.upsert(translation)?;
        info!(
            "Saved translation {} ({} -> {})",
            record.id, record.source_lang, record.target_lang
        );
        Ok(record)
    }

    /// Save to history and keep the whole phrase as a saved word, as the
    /// save action does. Both sides must be non-blank.
    pub fn save_phrase(&self, translation: NewTranslation) -> Result<(TranslationRecord, SavedWord)> {
        if translation.source_text.trim().is_empty() || translation.translated_text.trim().is_empty() {
            return Err(TranslateError::InvalidRequest("Nothing to save".to_string()));
        }
        let phrase = NewSavedWord::new(
            translation.source_text.trim(),
            translation.translated_text.trim(),
            translation.source_lang.clone(),
            translation.target_lang.clone(),
        );
        let record = self.save_translation(translation)?;
        let saved = self.save_word(phrase)?;
        Ok((record, saved))
    }

    pub fn translation_history(&self) -> Vec<TranslationRecord> {
        self.history.list()
    }

    pub fn favorite_translations(&self) -> Vec<TranslationRecord> {
        self.history
            .list()
            .into_iter()
            .filter(|record| record.is_favorite)
            .collect()
    }

    pub fn translation(&self, id: &str) -> Option<TranslationRecord> {
        self.history.get(id)
    }

    /// Flip the favorite flag of a history entry. Like any save, this
    /// refreshes its timestamp. Returns `None` when `id` is unknown.
    pub fn toggle_favorite(&self, id: &str) -> Result<Option<TranslationRecord>> {
        let Some(record) = self.history.get(id) else {
            return Ok(None);
        };
        let draft = NewTranslation::from(&record).favorite(!record.is_favorite);
        self.history.upsert(draft).map(Some)
    }

    pub fn delete_translation(&self, id: &str) -> Result<bool> {
        self.history.delete(id)
    }

    pub fn clear_history(&self) -> Result<()> {
        self.history.clear()
    }

    pub fn save_word(&self, word: NewSavedWord) -> Result<SavedWord> {
        let saved = self.words.upsert(word)?;
        info!("Saved word \"{}\" as {}", saved.word, saved.id);
        Ok(saved)
    }

    pub fn saved_words(&self) -> Vec<SavedWord> {
        self.words.list()
    }

    pub fn delete_saved_word(&self, id: &str) -> Result<bool> {
        self.words.delete(id)
    }
}
