//! Language catalog and provider code mapping.

/// Every language offered for translation, as `(code, display name)`.
const LANGUAGES: &[(&str, &str)] = &[
    // Major world languages
    ("en", "English"),
    ("zh", "Chinese (中文)"),
    ("es", "Spanish (Español)"),
    ("hi", "Hindi (हिन्दी)"),
    ("ar", "Arabic (العربية)"),
    ("pt", "Portuguese (Português)"),
    ("ru", "Russian (Русский)"),
    ("ja", "Japanese (日本語)"),
    ("fr", "French (Français)"),
    ("de", "German (Deutsch)"),
    // Indian languages
    ("bn", "Bengali (বাংলা)"),
    ("ta", "Tamil (தமிழ்)"),
    ("te", "Telugu (తెలుగు)"),
    ("mr", "Marathi (मराठी)"),
    ("gu", "Gujarati (ગુજરાતી)"),
    ("kn", "Kannada (ಕನ್ನಡ)"),
    ("ml", "Malayalam (മലയാളം)"),
    ("pa", "Punjabi (ਪੰਜਾਬੀ)"),
    ("ur", "Urdu (اردو)"),
    ("or", "Odia (ଓଡ଼ିଆ)"),
    ("as", "Assamese (অসমীয়া)"),
    ("ne", "Nepali (नेपाली)"),
    ("si", "Sinhala (සිංහල)"),
    // European languages
    ("it", "Italian (Italiano)"),
    ("nl", "Dutch (Nederlands)"),
    ("pl", "Polish (Polski)"),
    ("tr", "Turkish (Türkçe)"),
    ("sv", "Swedish (Svenska)"),
    ("da", "Danish (Dansk)"),
    ("no", "Norwegian (Norsk)"),
    ("fi", "Finnish (Suomi)"),
    ("el", "Greek (Ελληνικά)"),
    ("hu", "Hungarian (Magyar)"),
    ("cs", "Czech (Čeština)"),
    ("sk", "Slovak (Slovenčina)"),
    ("ro", "Romanian (Română)"),
    ("bg", "Bulgarian (Български)"),
    ("hr", "Croatian (Hrvatski)"),
    ("sl", "Slovenian (Slovenščina)"),
    ("et", "Estonian (Eesti)"),
    ("lv", "Latvian (Latviešu)"),
    ("lt", "Lithuanian (Lietuvių)"),
    ("mk", "Macedonian (Македонски)"),
    ("sq", "Albanian (Shqip)"),
    ("be", "Belarusian (Беларуская)"),
    ("uk", "Ukrainian (Українська)"),
    ("ga", "Irish (Gaeilge)"),
    ("cy", "Welsh (Cymraeg)"),
    ("is", "Icelandic (Íslenska)"),
    ("mt", "Maltese (Malti)"),
    ("eu", "Basque (Euskera)"),
    ("ca", "Catalan (Català)"),
    ("gl", "Galician (Galego)"),
    // Asian languages
    ("ko", "Korean (한국어)"),
    ("th", "Thai (ไทย)"),
    ("vi", "Vietnamese (Tiếng Việt)"),
    ("id", "Indonesian (Bahasa Indonesia)"),
    ("ms", "Malay (Bahasa Melayu)"),
    ("tl", "Filipino (Tagalog)"),
    ("my", "Myanmar (မြန်မာ)"),
    ("ka", "Georgian (ქართული)"),
    ("az", "Azerbaijani (Azərbaycan)"),
    ("uz", "Uzbek (O'zbek)"),
    ("mn", "Mongolian (Монгол)"),
    ("ug", "Uyghur (ئۇيغۇرچە)"),
    // Middle Eastern and African languages
    ("he", "Hebrew (עברית)"),
    ("fa", "Persian (فارسی)"),
    ("ps", "Pashto (پښتو)"),
    ("sd", "Sindhi (سنڌي)"),
    ("sw", "Swahili (Kiswahili)"),
    ("am", "Amharic (አማርኛ)"),
    ("yo", "Yoruba"),
    ("ig", "Igbo"),
    ("ha", "Hausa"),
    ("zu", "Zulu"),
    ("af", "Afrikaans"),
    ("xh", "Xhosa"),
    ("sn", "Shona"),
    ("ny", "Chichewa"),
    ("st", "Sesotho"),
    ("mg", "Malagasy"),
    // Pacific and other languages
    ("sm", "Samoan"),
    ("haw", "Hawaiian"),
    ("mi", "Māori"),
    ("gd", "Scottish Gaelic"),
    ("fy", "Frisian"),
    ("co", "Corsican"),
    ("lb", "Luxembourgish"),
    // Constructed and regional languages
    ("eo", "Esperanto"),
    ("la", "Latin"),
    ("yi", "Yiddish (ייִדיש)"),
    ("jw", "Javanese"),
    ("su", "Sundanese"),
    ("ceb", "Cebuano"),
];

/// Codes the translation endpoints spell differently from the catalog.
const PROVIDER_ALIASES: &[(&str, &str)] = &[("zh", "zh-CN")];

pub fn languages() -> &'static [(&'static str, &'static str)] {
    LANGUAGES
}

pub fn is_known(code: &str) -> bool {
    LANGUAGES.iter().any(|(c, _)| *c == code)
}

/// Display name for a code, or the code itself when it is not in the catalog.
pub fn language_name(code: &str) -> &str {
    LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
        .unwrap_or(code)
}

/// Map a catalog code to the code the providers expect. Unmapped codes pass
/// through unchanged.
pub fn provider_code(code: &str) -> &str {
    PROVIDER_ALIASES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, mapped)| *mapped)
        .unwrap_or(code)
}

/// The first catalog language that differs from `code`.
pub fn fallback_partner(code: &str) -> &'static str {
    LANGUAGES
        .iter()
        .map(|(c, _)| *c)
        .find(|c| *c != code)
        .unwrap_or("en")
}
