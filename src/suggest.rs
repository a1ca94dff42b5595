//! Canned alternative phrasings for a word. Table lookups plus string
//! templates; there is no model behind this.

use crate::session::current_word;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

pub const MAX_SUGGESTIONS: usize = 3;

/// Words shorter than this under the cursor get no suggestions.
const MIN_WORD_CHARS: usize = 3;

type Alternatives = &'static [(&'static str, &'static [&'static str])];

const CONTEXTUAL: &[(&str, Alternatives)] = &[
    (
        "en",
        &[
            ("hello", &["Hi", "Hey", "Greetings", "Good day"]),
            ("thank", &["Thanks", "Much appreciated", "Grateful"]),
            ("please", &["Kindly", "If you would", "Could you"]),
            ("good", &["Great", "Excellent", "Wonderful", "Nice"]),
            ("bad", &["Poor", "Terrible", "Awful", "Not good"]),
            ("big", &["Large", "Huge", "Enormous", "Massive"]),
            ("small", &["Tiny", "Little", "Miniature", "Compact"]),
        ],
    ),
    (
        "hi",
        &[
            ("नमस्ते", &["नमस्कार", "आदाब", "सलाम"]),
            ("धन्यवाद", &["शुक्रिया", "आभार", "कृतज्ञता"]),
            ("कृपया", &["महेरबानी", "दया करके", "अनुरोध"]),
            ("अच्छा", &["बेहतरीन", "शानदार", "उत्तम"]),
            ("बुरा", &["खराब", "गलत", "नकारात्मक"]),
        ],
    ),
    (
        "es",
        &[
            ("hola", &["Buenos días", "Saludos", "Qué tal"]),
            ("gracias", &["Muchas gracias", "Te agradezco", "Mil gracias"]),
            ("por", &["De favor", "Si puedes", "Te ruego"]),
            ("bueno", &["Excelente", "Fantástico", "Genial"]),
            ("malo", &["Terrible", "Pésimo", "Horrible"]),
        ],
    ),
];

/// `(formal, informal)` labels; anything not listed uses English labels.
const REGISTER_LABELS: &[(&str, (&str, &str))] = &[
    ("hi", ("औपचारिक", "अनौपचारिक")),
    ("es", ("formal", "informal")),
    ("fr", ("formel", "familier")),
];
const DEFAULT_REGISTER_LABELS: (&str, &str) = ("formal", "casual");

const COMMON_PHRASES: &[(&str, &[&str])] = &[
    ("hi", &["कैसे हैं आप?", "क्या हाल है?", "मदद चाहिए?"]),
    ("es", &["¿Cómo estás?", "¿Qué tal?", "¿Necesitas ayuda?"]),
    ("fr", &["Comment allez-vous?", "Ça va?", "Besoin d'aide?"]),
    ("de", &["Wie geht es Ihnen?", "Alles klar?", "Brauchen Sie Hilfe?"]),
    ("en", &["How are you?", "What's up?", "Need help?"]),
];

fn lookup<T: Copy>(table: &[(&str, T)], lang: &str) -> Option<T> {
    table.iter().find(|(code, _)| *code == lang).map(|(_, v)| *v)
}

pub struct SuggestionEngine<R = StdRng> {
    rng: R,
}

impl SuggestionEngine<StdRng> {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for SuggestionEngine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> SuggestionEngine<R> {
    /// Use a specific random source, e.g. a seeded `StdRng` in tests.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Up to three alternatives for `word` in `target_lang`.
    pub fn suggest(&mut self, word: &str, target_lang: &str) -> Vec<String> {
        let word = word.trim();
        if word.is_empty() {
            return Vec::new();
        }

        let lower = word.to_lowercase();
        let mut suggestions: Vec<String> = lookup(CONTEXTUAL, target_lang)
            .and_then(|alternatives| {
                alternatives
                    .iter()
                    .find(|(key, _)| lower.contains(&key.to_lowercase()))
            })
            .map(|(_, alts)| alts.iter().take(2).map(|s| s.to_string()).collect())
            .unwrap_or_default();

        if suggestions.is_empty() {
            let (formal, informal) =
                lookup(REGISTER_LABELS, target_lang).unwrap_or(DEFAULT_REGISTER_LABELS);
            suggestions.push(format!("{} ({})", word, formal));
            suggestions.push(format!("{} ({})", word, informal));
            suggestions.push(format!("Alternative: {}", word));
        }

        if suggestions.len() < MAX_SUGGESTIONS {
            if let Some(phrases) = lookup(COMMON_PHRASES, target_lang) {
                let pick = self.rng.gen_range(0..phrases.len());
                suggestions.push(phrases[pick].to_string());
            }
        }

        suggestions.truncate(MAX_SUGGESTIONS);
        debug!("{} suggestion(s) for {:?} in {}", suggestions.len(), word, target_lang);
        suggestions
    }

    /// Suggestions for the word under `cursor` (a char offset into `text`).
    pub fn suggest_for_cursor(&mut self, text: &str, cursor: usize, target_lang: &str) -> Vec<String> {
        match current_word(text, cursor) {
            Some(word) if word.chars().count() >= MIN_WORD_CHARS => self.suggest(word, target_lang),
            _ => Vec::new(),
        }
    }
}
