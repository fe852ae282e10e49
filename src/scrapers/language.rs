//! Language detection stage.

use crate::models::Language;
use whatlang::Lang;

/// Classify `text` into a corpus language.
///
/// Unsupported or undetectable languages are pinned to [`Language::English`].
pub fn detect_language(text: &str) -> Language {
    match whatlang::detect_lang(text) {
        Some(Lang::Dan) => Language::Danish,
        _ => Language::English,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_english() {
        let text = "Docker is a platform for developing, shipping, and running applications \
                    in containers. It is widely used by developers and operations teams.";
        assert_eq!(detect_language(text), Language::English);
    }

    #[test]
    fn test_detect_danish() {
        let text = "Danmark er et land i Skandinavien, og det er det sydligste af de nordiske \
                    lande. Hovedstaden hedder København, og der bor omkring seks millioner \
                    mennesker i landet. Jeg ved ikke hvad der skete efter mødet, men de fleste \
                    af mine kolleger sagde at det var meget godt. Hvad synes du om det? Vi skal \
                    have nogle flere spørgsmål besvaret af ledelsen i næste uge.";
        assert_eq!(detect_language(text), Language::Danish);
    }

    #[test]
    fn test_unsupported_language_pinned_to_english() {
        let text = "Die Bundesregierung hat heute neue Maßnahmen beschlossen, die ab dem \
                    kommenden Monat für alle Bürgerinnen und Bürger gelten sollen.";
        assert_eq!(detect_language(text), Language::English);
    }

    #[test]
    fn test_undetectable_text_pinned_to_english() {
        assert_eq!(detect_language(""), Language::English);
        assert_eq!(detect_language("1234 5678"), Language::English);
    }
}
