//! Recognition language resolution.

/// Fallback for locales with no mapping
pub const DEFAULT_LANGUAGE: &str = "hi-IN";

/// Lower-cased locale or language prefix -> recognition tag
const LANGUAGE_MAP: &[(&str, &str)] = &[
    ("hi", "hi-IN"),
    ("hi-in", "hi-IN"),
    ("en", "en-IN"),
    ("en-us", "en-US"),
    ("en-gb", "en-GB"),
    ("en-in", "en-IN"),
    ("bn", "bn-IN"),
    ("bn-in", "bn-IN"),
    ("te", "te-IN"),
    ("ta", "ta-IN"),
    ("mr", "mr-IN"),
    ("gu", "gu-IN"),
    ("kn", "kn-IN"),
    ("ml", "ml-IN"),
    ("pa", "pa-IN"),
    ("or", "or-IN"),
    ("zh", "zh-CN"),
    ("zh-cn", "zh-CN"),
    ("ja", "ja-JP"),
    ("ja-jp", "ja-JP"),
    ("es", "es-ES"),
    ("fr", "fr-FR"),
    ("de", "de-DE"),
    ("ru", "ru-RU"),
    ("ar", "ar-SA"),
    ("pt", "pt-BR"),
    ("it", "it-IT"),
    ("ko", "ko-KR"),
    ("th", "th-TH"),
];

fn lookup(key: &str) -> Option<&'static str> {
    LANGUAGE_MAP
        .iter()
        .find(|(locale, _)| *locale == key)
        .map(|(_, tag)| *tag)
}

/// Resolve a locale to a recognition language: exact match, then language
/// prefix, then [`DEFAULT_LANGUAGE`].
///
/// POSIX-style locales (`en_US.UTF-8`) are accepted.
pub fn resolve_language(locale: &str) -> String {
    let normalized = normalize(locale);

    if let Some(tag) = lookup(&normalized) {
        return tag.to_string();
    }

    let prefix = normalized.split('-').next().unwrap_or_default();
    if let Some(tag) = lookup(prefix) {
        return tag.to_string();
    }

    DEFAULT_LANGUAGE.to_string()
}

/// Resolve a widget language option; `auto` follows the host locale
pub fn resolve_option(option: &str, host_locale: &str) -> String {
    if option.trim().eq_ignore_ascii_case("auto") || option.trim().is_empty() {
        resolve_language(host_locale)
    } else {
        option.trim().to_string()
    }
}

fn normalize(locale: &str) -> String {
    let without_encoding = locale.split('.').next().unwrap_or_default();
    without_encoding.trim().replace('_', "-").to_lowercase()
}
