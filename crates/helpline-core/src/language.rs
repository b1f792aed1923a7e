//! Supported-language registry
//!
//! Language codes are lowercase ISO 639-1 tokens. The sentinel `"auto"`
//! asks the speech service to detect the language; the pivot language is
//! the one the language model is always addressed in.

/// Sentinel meaning "let the speech service detect the language".
pub const AUTO: &str = "auto";

/// The fixed intermediate language used for model interaction.
pub const PIVOT: &str = "en";

/// Languages the helpline serves, with display names.
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("hi", "Hindi"),
    ("en", "English"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("bn", "Bengali"),
    ("gu", "Gujarati"),
    ("mr", "Marathi"),
    ("pa", "Punjabi"),
    ("kn", "Kannada"),
    ("ml", "Malayalam"),
    ("or", "Odia"),
    ("as", "Assamese"),
    ("ur", "Urdu"),
    ("ne", "Nepali"),
];

/// Check whether a code is a concrete supported language.
pub fn is_supported(code: &str) -> bool {
    SUPPORTED_LANGUAGES.iter().any(|(c, _)| *c == code)
}

/// Check whether a code is supported or the `"auto"` sentinel.
pub fn is_supported_or_auto(code: &str) -> bool {
    code == AUTO || is_supported(code)
}

/// Get the display name for a supported language code.
pub fn display_name(code: &str) -> Option<&'static str> {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}
