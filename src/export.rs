//! CSV projection of the translation history. Export only.

use crate::language::language_name;
use crate::repository::TranslationRecord;
use chrono::Local;

pub const DEFAULT_EXPORT_FILE: &str = "ved_translation_history.csv";

const HEADER: &str = "Source Language,Target Language,Source Text,Translation,Date,Favorite";

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

pub fn history_to_csv(records: &[TranslationRecord]) -> String {
    let mut csv = String::from(HEADER);
    csv.push('\n');

    for record in records {
        let date = record
            .timestamp
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        let row = [
            quote(language_name(&record.source_lang)),
            quote(language_name(&record.target_lang)),
            quote(&record.source_text),
            quote(&record.translated_text),
            quote(&date),
            quote(if record.is_favorite { "Yes" } else { "No" }),
        ];
        csv.push_str(&row.join(","));
        csv.push('\n');
    }

    csv
}
