//! Editor state for one translation session: the text being typed, the
//! selected languages and whatever the last translation produced.

use crate::autotranslate::AutoTranslateState;
use crate::language::fallback_partner;
use crate::repository::{SavedWord, TranslationRecord};
use regex::Regex;
use std::sync::OnceLock;

pub const MAX_CHARACTERS: usize = 5000;
const NEAR_LIMIT: usize = 500;

fn whitespace() -> &'static Regex {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("Invalid regex"))
}

fn byte_offset(text: &str, cursor: usize) -> usize {
    text.char_indices()
        .nth(cursor)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Index of the whitespace-separated word the cursor (a char offset) sits in.
pub fn current_word_index(text: &str, cursor: usize) -> usize {
    let before = &text[..byte_offset(text, cursor)];
    whitespace().split(before).count().saturating_sub(1)
}

pub fn current_word(text: &str, cursor: usize) -> Option<&str> {
    whitespace()
        .split(text)
        .nth(current_word_index(text, cursor))
        .filter(|w| !w.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    source_text: String,
    translated_text: String,
    source_lang: String,
    target_lang: String,
    error: Option<String>,
}

impl Session {
    pub fn new(source_lang: impl Into<String>, target_lang: impl Into<String>) -> Self {
        let mut session = Self {
            source_text: String::new(),
            translated_text: String::new(),
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
            error: None,
        };
        if session.source_lang == session.target_lang {
            session.target_lang = fallback_partner(&session.source_lang).to_string();
        }
        session
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn translated_text(&self) -> &str {
        &self.translated_text
    }

    pub fn source_lang(&self) -> &str {
        &self.source_lang
    }

    pub fn target_lang(&self) -> &str {
        &self.target_lang
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replace the source text. Input over [`MAX_CHARACTERS`] is refused and
    /// leaves the session untouched.
    pub fn set_source_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text.chars().count() > MAX_CHARACTERS {
            return false;
        }
        self.source_text = text;
        self.error = None;
        if self.source_text.trim().is_empty() {
            self.translated_text.clear();
        }
        true
    }

    pub fn set_translation(&mut self, text: impl Into<String>) {
        self.translated_text = text.into();
        self.error = None;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn set_source_lang(&mut self, code: impl Into<String>) {
        self.source_lang = code.into();
        if self.source_lang == self.target_lang {
            self.target_lang = fallback_partner(&self.source_lang).to_string();
        }
        self.error = None;
    }

    pub fn set_target_lang(&mut self, code: impl Into<String>) {
        self.target_lang = code.into();
        if self.target_lang == self.source_lang {
            self.source_lang = fallback_partner(&self.target_lang).to_string();
        }
        self.error = None;
    }

    /// Swap the languages; an existing translation becomes the new input.
    pub fn swap_languages(&mut self) {
        std::mem::swap(&mut self.source_lang, &mut self.target_lang);
        if !self.translated_text.is_empty() {
            self.source_text = std::mem::take(&mut self.translated_text);
        }
        self.error = None;
    }

    /// Replace the word under `cursor` with `suggestion`, returning the
    /// `(original word, suggestion)` pair so it can be saved.
    pub fn apply_suggestion(&mut self, suggestion: &str, cursor: usize) -> Option<(String, String)> {
        let mut words: Vec<&str> = whitespace().split(&self.source_text).collect();
        let index = current_word_index(&self.source_text, cursor);
        let original = words.get(index)?.to_string();
        words[index] = suggestion;
        let text = words.join(" ");
        if !self.set_source_text(text) {
            return None;
        }
        Some((original, suggestion.to_string()))
    }

    pub fn load_record(&mut self, record: &TranslationRecord) {
        self.source_text = record.source_text.clone();
        self.translated_text = record.translated_text.clone();
        self.source_lang = record.source_lang.clone();
        self.target_lang = record.target_lang.clone();
        self.error = None;
    }

    pub fn load_saved_word(&mut self, word: &SavedWord) {
        self.source_text = word.word.clone();
        self.translated_text = word.translation.clone();
        self.error = None;
    }

    pub fn clear(&mut self) {
        self.source_text.clear();
        self.translated_text.clear();
        self.error = None;
    }

    pub fn characters_remaining(&self) -> usize {
        MAX_CHARACTERS.saturating_sub(self.source_text.chars().count())
    }

    pub fn is_near_limit(&self) -> bool {
        self.characters_remaining() < NEAR_LIMIT
    }

    /// Fold an auto-translate update into the session. Results for text or
    /// languages that are no longer current are ignored; returns whether the
    /// session changed.
    pub fn apply_state(&mut self, state: &AutoTranslateState) -> bool {
        match state {
            AutoTranslateState::Idle => {
                let changed = !self.translated_text.is_empty();
                self.translated_text.clear();
                changed
            }
            AutoTranslateState::Translating { .. } => false,
            AutoTranslateState::Translated {
                text,
                source_lang,
                target_lang,
                translation,
                ..
            } => {
                if !self.is_current(text, source_lang, target_lang) {
                    return false;
                }
                self.set_translation(translation.clone());
                true
            }
            AutoTranslateState::Failed {
                text,
                source_lang,
                target_lang,
                message,
                ..
            } => {
                if !self.is_current(text, source_lang, target_lang) {
                    return false;
                }
                self.set_error(message.clone());
                true
            }
        }
    }

    fn is_current(&self, text: &str, source_lang: &str, target_lang: &str) -> bool {
        text == self.source_text && source_lang == self.source_lang && target_lang == self.target_lang
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_word() {
        assert_eq!(current_word_index("hello big world", 7), 1);
        assert_eq!(current_word("hello big world", 7), Some("big"));
        assert_eq!(current_word("hello big world", 15), Some("world"));
        assert_eq!(current_word("hello ", 6), None);
        assert_eq!(current_word("", 0), None);
    }

    #[test]
    fn test_current_word_counts_chars_not_bytes() {
        assert_eq!(current_word("नमस्ते दोस्त", 3), Some("नमस्ते"));
    }

    #[test]
    fn test_text_over_limit_is_refused() {
        let mut session = Session::new("en", "hi");
        assert!(session.set_source_text("a".repeat(MAX_CHARACTERS)));
        assert_eq!(session.characters_remaining(), 0);
        assert!(session.is_near_limit());
        assert!(!session.set_source_text("a".repeat(MAX_CHARACTERS + 1)));
        assert_eq!(session.source_text().len(), MAX_CHARACTERS);
    }

    #[test]
    fn test_same_language_moves_other_side() {
        let mut session = Session::new("en", "hi");
        session.set_target_lang("en");
        assert_eq!(session.target_lang(), "en");
        assert_eq!(session.source_lang(), "zh");

        session.set_source_lang("en");
        assert_eq!(session.target_lang(), "zh");
    }

    #[test]
    fn test_swap_moves_translation_to_source() {
        let mut session = Session::new("en", "fr");
        session.set_source_text("Hello");
        session.set_translation("Bonjour");
        session.swap_languages();
        assert_eq!(session.source_lang(), "fr");
        assert_eq!(session.target_lang(), "en");
        assert_eq!(session.source_text(), "Bonjour");
        assert_eq!(session.translated_text(), "");
    }

    #[test]
    fn test_apply_suggestion() {
        let mut session = Session::new("en", "es");
        session.set_source_text("say hello now");
        let pair = session.apply_suggestion("Hi", 6).unwrap();
        assert_eq!(pair, ("hello".to_string(), "Hi".to_string()));
        assert_eq!(session.source_text(), "say Hi now");
    }

    #[test]
    fn test_stale_translation_is_ignored() {
        let mut session = Session::new("en", "fr");
        session.set_source_text("Hello world");
        let stale = AutoTranslateState::Translated {
            generation: 1,
            text: "Hello".to_string(),
            source_lang: "en".to_string(),
            target_lang: "fr".to_string(),
            translation: "Bonjour".to_string(),
        };
        assert!(!session.apply_state(&stale));
        assert_eq!(session.translated_text(), "");
    }

    #[test]
    fn test_stale_failure_is_ignored() {
        let mut session = Session::new("en", "fr");
        session.set_source_text("Hello world");
        let failed = |text: &str, target: &str| AutoTranslateState::Failed {
            generation: 1,
            text: text.to_string(),
            source_lang: "en".to_string(),
            target_lang: target.to_string(),
            kind: crate::error::ErrorKind::ServiceUnavailable,
            message: "Translation failed".to_string(),
        };

        assert!(!session.apply_state(&failed("Hello", "fr")));
        assert!(!session.apply_state(&failed("Hello world", "de")));
        assert_eq!(session.error(), None);

        assert!(session.apply_state(&failed("Hello world", "fr")));
        assert_eq!(session.error(), Some("Translation failed"));
    }
}
