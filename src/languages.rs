//! Target language codes accepted by the CLI.

use std::sync::LazyLock;

use regex::Regex;

/// ISO 639-1 codes the CLI accepts, with their English names.
pub const SUPPORTED_LANGUAGES: [(&str, &str); 28] = [
    ("en", "English"),
    ("es", "Spanish"),
    ("de", "German"),
    ("fr", "French"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("zh", "Chinese"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("ru", "Russian"),
    ("ar", "Arabic"),
    ("hi", "Hindi"),
    ("nl", "Dutch"),
    ("sv", "Swedish"),
    ("no", "Norwegian"),
    ("da", "Danish"),
    ("fi", "Finnish"),
    ("pl", "Polish"),
    ("cs", "Czech"),
    ("tr", "Turkish"),
    ("el", "Greek"),
    ("he", "Hebrew"),
    ("th", "Thai"),
    ("vi", "Vietnamese"),
    ("id", "Indonesian"),
    ("ro", "Romanian"),
    ("bg", "Bulgarian"),
    ("uk", "Ukrainian"),
];

/// Most targets the interactive prompt accepts per phrase.
pub const MAX_INTERACTIVE_TARGETS: usize = 3;

static CODE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{2,3}$").expect("language code pattern is valid"));

/// Returns true if `code` is well formed and on the allow-list (any case).
pub fn is_supported(code: &str) -> bool {
    CODE_SHAPE.is_match(code) && language_name(code).is_some()
}

/// Returns the English name for a supported code (any case).
pub fn language_name(code: &str) -> Option<&'static str> {
    let code = code.to_ascii_lowercase();
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// Name to show for a detected language.
///
/// Models sometimes answer with a code ("fr") instead of a name ("French");
/// known codes are expanded, anything else is shown as given.
pub fn display_language(detected: &str) -> &str {
    language_name(detected.trim()).unwrap_or(detected)
}

/// Lowercases `codes`, or returns the ones that are not supported.
pub fn validate_codes<S: AsRef<str>>(codes: &[S]) -> Result<Vec<String>, Vec<String>> {
    let invalid: Vec<String> = codes
        .iter()
        .map(|code| code.as_ref())
        .filter(|code| !is_supported(code))
        .map(str::to_string)
        .collect();

    if invalid.is_empty() {
        Ok(codes.iter().map(|c| c.as_ref().to_ascii_lowercase()).collect())
    } else {
        Err(invalid)
    }
}

/// Puts English first, adding it when missing.
///
/// Returns the reordered targets and whether English had to be added.
pub fn ensure_english_first(targets: Vec<String>) -> (Vec<String>, bool) {
    let added = !targets.iter().any(|t| t == "en");
    let mut ordered = Vec::with_capacity(targets.len() + usize::from(added));
    ordered.push("en".to_string());
    ordered.extend(targets.into_iter().filter(|t| t != "en"));
    (ordered, added)
}

/// Comma separated list of every supported code, sorted.
pub fn supported_codes_list() -> String {
    let mut codes: Vec<&str> = SUPPORTED_LANGUAGES.iter().map(|(c, _)| *c).collect();
    codes.sort_unstable();
    codes.join(", ")
}
