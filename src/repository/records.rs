use super::collection::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A translation kept in history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRecord {
    pub id: String,
    pub source_text: String,
    pub translated_text: String,
    pub source_lang: String,
    pub target_lang: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub is_favorite: bool,
}

/// Request to record a translation. `is_favorite: None` keeps whatever flag
/// an existing entry already has.
#[derive(Debug, Clone, Default)]
pub struct NewTranslation {
    pub source_text: String,
    pub translated_text: String,
    pub source_lang: String,
    pub target_lang: String,
    pub is_favorite: Option<bool>,
}

impl NewTranslation {
    pub fn new(
        source_text: impl Into<String>,
        translated_text: impl Into<String>,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
    ) -> Self {
        Self {
            source_text: source_text.into(),
            translated_text: translated_text.into(),
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
            is_favorite: None,
        }
    }

    pub fn favorite(mut self, is_favorite: bool) -> Self {
        self.is_favorite = Some(is_favorite);
        self
    }
}

impl From<&TranslationRecord> for NewTranslation {
    fn from(record: &TranslationRecord) -> Self {
        Self {
            source_text: record.source_text.clone(),
            translated_text: record.translated_text.clone(),
            source_lang: record.source_lang.clone(),
            target_lang: record.target_lang.clone(),
            is_favorite: Some(record.is_favorite),
        }
    }
}

impl Record for TranslationRecord {
    type Draft = NewTranslation;

    const SAVE_FAILED: &'static str = "Failed to save translation";
    const DELETE_FAILED: &'static str = "Failed to delete translation";

    fn id(&self) -> &str {
        &self.id
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn matches(&self, draft: &NewTranslation) -> bool {
        self.source_text == draft.source_text
            && self.source_lang == draft.source_lang
            && self.target_lang == draft.target_lang
    }

    fn merge(&mut self, draft: NewTranslation, now: DateTime<Utc>) {
        self.translated_text = draft.translated_text;
        if let Some(is_favorite) = draft.is_favorite {
            self.is_favorite = is_favorite;
        }
        self.timestamp = now;
    }

    fn create(id: String, draft: NewTranslation, now: DateTime<Utc>) -> Self {
        Self {
            id,
            source_text: draft.source_text,
            translated_text: draft.translated_text,
            source_lang: draft.source_lang,
            target_lang: draft.target_lang,
            timestamp: now,
            is_favorite: draft.is_favorite.unwrap_or(false),
        }
    }
}

/// A word or phrase pair the user chose to keep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedWord {
    pub id: String,
    pub word: String,
    pub translation: String,
    pub source_lang: String,
    pub target_lang: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewSavedWord {
    pub word: String,
    pub translation: String,
    pub source_lang: String,
    pub target_lang: String,
}

impl NewSavedWord {
    pub fn new(
        word: impl Into<String>,
        translation: impl Into<String>,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
    ) -> Self {
        Self {
            word: word.into(),
            translation: translation.into(),
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
        }
    }
}

impl Record for SavedWord {
    type Draft = NewSavedWord;

    const SAVE_FAILED: &'static str = "Failed to save word";
    const DELETE_FAILED: &'static str = "Failed to delete saved word";

    fn id(&self) -> &str {
        &self.id
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn matches(&self, draft: &NewSavedWord) -> bool {
        self.word == draft.word
            && self.source_lang == draft.source_lang
            && self.target_lang == draft.target_lang
    }

    fn merge(&mut self, draft: NewSavedWord, now: DateTime<Utc>) {
        self.translation = draft.translation;
        self.timestamp = now;
    }

    fn create(id: String, draft: NewSavedWord, now: DateTime<Utc>) -> Self {
        Self {
            id,
            word: draft.word,
            translation: draft.translation,
            source_lang: draft.source_lang,
            target_lang: draft.target_lang,
            timestamp: now,
        }
    }
}
