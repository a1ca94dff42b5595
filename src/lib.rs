pub mod autotranslate;
pub mod config;
pub mod error;
pub mod export;
pub mod interactive;
pub mod language;
pub mod repository;
pub mod session;
pub mod store;
pub mod suggest;
pub mod translate;

pub use autotranslate::{AutoTranslateState, AutoTranslator};
pub use config::Config;
pub use error::{ErrorKind, Result, TranslateError};
pub use repository::{NewSavedWord, NewTranslation, Repository, SavedWord, TranslationRecord};
pub use session::Session;
pub use store::LocalStore;
pub use suggest::SuggestionEngine;
pub use translate::{ProviderChain, Translator};
