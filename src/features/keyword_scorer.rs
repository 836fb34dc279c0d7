use crate::keywords::KeywordStore;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedKeyword {
    pub keyword: String,
    pub category: String,
}

impl fmt::Display for DetectedKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.keyword, self.category)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordAnalysis {
    pub score: u32,
    pub detected: Vec<DetectedKeyword>,
}

/// Plain substring containment over normalized text. Each configured
/// keyword counts at most once no matter how often it appears, and there
/// is no word-boundary check ("pin" matches inside "spinning").
#[derive(Debug, Default)]
pub struct KeywordScorer;

impl KeywordScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, normalized_text: &str, store: &KeywordStore) -> KeywordAnalysis {
        let text_lower = normalized_text.to_lowercase();
        let mut analysis = KeywordAnalysis::default();

        for category in store.categories() {
            for keyword in &category.keywords {
                if text_lower.contains(&keyword.to_lowercase()) {
                    log::debug!("Keyword match: '{}' ({})", keyword, category.name);
                    analysis.score += category.weight;
                    analysis.detected.push(DetectedKeyword {
                        keyword: keyword.clone(),
                        category: category.name.clone(),
                    });
                }
            }
        }

        analysis
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalization::TextNormalizer;

    fn score_text(text: &str) -> KeywordAnalysis {
        let normalized = TextNormalizer::new().normalize(text);
        KeywordScorer::new().score(&normalized, &KeywordStore::with_defaults())
    }

    #[test]
    fn test_uppercase_body_matches_lowercase_keyword() {
        let analysis = score_text("URGENTE");
        assert_eq!(analysis.score, 2);
        assert_eq!(
            analysis.detected,
            vec![DetectedKeyword {
                keyword: "urgente".to_string(),
                category: "urgentes".to_string(),
            }]
        );
    }

    #[test]
    fn test_repeated_keyword_counts_once() {
        let analysis = score_text("multa multa multa");
        assert_eq!(analysis.score, 3);
        assert_eq!(analysis.detected.len(), 1);
    }

    #[test]
    fn test_substring_without_word_boundary() {
        let analysis = score_text("the spinning wheel");
        assert_eq!(analysis.score, 3);
        assert_eq!(analysis.detected[0].to_string(), "pin (personales)");
    }

    #[test]
    fn test_detected_order_follows_store_order() {
        // "premio" (dinero) appears before "urgente" (urgentes) in the text
        let analysis = score_text("Tu premio es urgente, llama al banco");
        let found: Vec<String> = analysis.detected.iter().map(|d| d.to_string()).collect();

        assert_eq!(
            found,
            vec!["urgente (urgentes)", "premio (dinero)", "banco (dinero)"]
        );
        assert_eq!(analysis.score, 2 + 2 + 2);
    }

    #[test]
    fn test_no_matches() {
        let analysis = score_text("Hola, nos vemos el martes para el almuerzo.");
        assert_eq!(analysis, KeywordAnalysis::default());
    }

    #[test]
    fn test_custom_store_weights() {
        let mut store = KeywordStore::new();
        store.add("amenazas", "Cierre");
        store.add("propias", "sorteo");

        let analysis = KeywordScorer::new().score("cierre del sorteo", &store);
        assert_eq!(analysis.score, 3 + 1);
    }
}
