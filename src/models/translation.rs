/// Outcome of detecting the source language and translating into each target.
///
/// Translations keep the order in which they were produced so the CLI can
/// print them the way the model returned them. Each language code appears
/// once; a repeated code replaces the earlier text in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    original_text: String,
    detected_language: String,
    translations: Vec<(String, String)>,
}

impl TranslationResult {
    /// Creates a translation result.
    pub fn new<I, K, V>(
        original_text: impl Into<String>,
        detected_language: impl Into<String>,
        translations: I,
    ) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut entries: Vec<(String, String)> = Vec::new();
        for (code, text) in translations {
            let code = code.into();
            let text = text.into();
            match entries.iter_mut().find(|(existing, _)| *existing == code) {
                Some(entry) => entry.1 = text,
                None => entries.push((code, text)),
            }
        }

        Self {
            original_text: original_text.into(),
            detected_language: detected_language.into(),
            translations: entries,
        }
    }

    /// Returns the source text as echoed by the model, or an empty string.
    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    /// Returns the language the model detected.
    pub fn detected_language(&self) -> &str {
        &self.detected_language
    }

    /// Returns `(code, text)` pairs in result order.
    pub fn translations(&self) -> &[(String, String)] {
        &self.translations
    }

    /// Looks up the translation for a language code.
    pub fn translation(&self, code: &str) -> Option<&str> {
        self.translations
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, text)| text.as_str())
    }

    /// Returns the language codes in result order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.translations.iter().map(|(code, _)| code.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translation_result_keeps_insertion_order() {
        let result = TranslationResult::new(
            "Bonjour le monde",
            "French",
            [("es", "Hola mundo"), ("en", "Hello world"), ("de", "Hallo Welt")],
        );

        assert_eq!(result.codes().collect::<Vec<_>>(), vec!["es", "en", "de"]);
        assert_eq!(result.translation("en"), Some("Hello world"));
        assert_eq!(result.translation("fr"), None);
        assert_eq!(result.original_text(), "Bonjour le monde");
        assert_eq!(result.detected_language(), "French");
    }

    #[test]
    fn translation_result_repeated_code_replaces_in_place() {
        let result = TranslationResult::new("", "French", [("en", "Hi"), ("es", "Hola"), ("en", "Hello")]);

        assert_eq!(
            result.translations(),
            &[
                ("en".to_string(), "Hello".to_string()),
                ("es".to_string(), "Hola".to_string())
            ]
        );
    }
}
