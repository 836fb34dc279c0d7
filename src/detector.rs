use crate::error::{DetectorError, Result};
use crate::features::{DetectedKeyword, KeywordScorer, LinkAnalyzer, UrlExtractor};
use crate::keywords::{KeywordRepository, KeywordStore};
use crate::normalization::TextNormalizer;
use crate::risk::{RiskAggregator, RiskLevel};
use crate::statistics::KeywordStatistics;
use serde::Serialize;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

pub const EMPTY_CONTENT_MESSAGE: &str = "El contenido del correo no puede estar vacío";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub risk_level: RiskLevel,
    pub risk_color: &'static str,
    pub risk_icon: &'static str,
    pub risk_description: &'static str,
    #[serde(rename = "score")]
    pub total_score: u32,
    pub detected_keywords: Vec<DetectedKeyword>,
    pub suspicious_urls: Vec<String>,
    pub total_urls: usize,
    pub recommendations: Vec<String>,
}

/// Scores email text against the keyword store and URL heuristics.
///
/// The store sits behind a read-write lock: analysis holds a read guard for
/// the whole keyword scan. Administrative edits are applied to a copy under
/// the write guard, and the copy replaces the live store only once it has
/// been saved.
pub struct PhishingDetector {
    store: RwLock<KeywordStore>,
    repository: Option<KeywordRepository>,
    normalizer: TextNormalizer,
    keyword_scorer: KeywordScorer,
    url_extractor: UrlExtractor,
    link_analyzer: LinkAnalyzer,
}

impl Default for PhishingDetector {
    fn default() -> Self {
        Self::new(KeywordStore::with_defaults())
    }
}

impl PhishingDetector {
    /// In-memory detector; keyword edits are not persisted.
    pub fn new(store: KeywordStore) -> Self {
        Self {
            store: RwLock::new(store),
            repository: None,
            normalizer: TextNormalizer::new(),
            keyword_scorer: KeywordScorer::new(),
            url_extractor: UrlExtractor::new(),
            link_analyzer: LinkAnalyzer::new(),
        }
    }

    /// Loads the store from `repository` (built-in defaults when absent or
    /// unreadable) and persists every keyword edit back to it.
    pub fn with_repository(repository: KeywordRepository) -> Self {
        let store = repository.load_or_default();
        let mut detector = Self::new(store);
        detector.repository = Some(repository);
        detector
    }

    pub fn analyze_email(&self, email_content: &str) -> Result<AnalysisResult> {
        if email_content.trim().is_empty() {
            return Err(DetectorError::InvalidInput(EMPTY_CONTENT_MESSAGE.to_string()));
        }

        let cleaned_text = self.normalizer.normalize(email_content);
        let keyword_analysis = {
            let store = self.read_store()?;
            self.keyword_scorer.score(&cleaned_text, &store)
        };

        // URLs come from the original text so casing survives
        let urls = self.url_extractor.extract(email_content);
        let link_analysis = self.link_analyzer.analyze(&urls);

        let assessment = RiskAggregator::aggregate(keyword_analysis.score, link_analysis.score);
        log::debug!(
            "Analysis: keywords={} urls={} total={} level={}",
            keyword_analysis.score,
            link_analysis.score,
            assessment.total_score,
            assessment.level
        );

        Ok(AnalysisResult {
            risk_level: assessment.level,
            risk_color: assessment.color,
            risk_icon: assessment.icon,
            risk_description: assessment.description,
            total_score: assessment.total_score,
            detected_keywords: keyword_analysis.detected,
            suspicious_urls: link_analysis.suspicious,
            total_urls: link_analysis.total,
            recommendations: assessment
                .level
                .recommendations()
                .iter()
                .map(|r| r.to_string())
                .collect(),
        })
    }

    /// Returns Ok(false) when the keyword already exists in the category.
    pub fn add_keyword(&self, category: &str, keyword: &str) -> Result<bool> {
        Self::validate_admin_input(category, keyword)?;

        let mut store = self.write_store()?;
        let mut updated = store.clone();
        if !updated.add(category.trim(), keyword.trim()) {
            return Ok(false);
        }
        self.persist(&updated)?;
        *store = updated;

        log::info!("Added keyword '{}' to category '{}'", keyword.trim(), category.trim());
        Ok(true)
    }

    /// Returns Ok(false) when the category or keyword does not exist.
    pub fn remove_keyword(&self, category: &str, keyword: &str) -> Result<bool> {
        Self::validate_admin_input(category, keyword)?;

        let mut store = self.write_store()?;
        let mut updated = store.clone();
        if !updated.remove(category.trim(), keyword.trim()) {
            return Ok(false);
        }
        self.persist(&updated)?;
        *store = updated;

        log::info!(
            "Removed keyword '{}' from category '{}'",
            keyword.trim(),
            category.trim()
        );
        Ok(true)
    }

    pub fn keywords_by_category(&self, category: &str) -> Result<Vec<String>> {
        Ok(self.read_store()?.keywords_by_category(category).to_vec())
    }

    pub fn keyword_weight(&self, category: &str) -> Result<u32> {
        Ok(self.read_store()?.weight(category))
    }

    pub fn statistics(&self) -> Result<KeywordStatistics> {
        Ok(KeywordStatistics::from_store(&*self.read_store()?))
    }

    fn persist(&self, store: &KeywordStore) -> Result<()> {
        if let Some(repository) = &self.repository {
            repository.save(store).map_err(|e| {
                log::error!("Failed to save keywords: {e}");
                e
            })?;
        }
        Ok(())
    }

    fn validate_admin_input(category: &str, keyword: &str) -> Result<()> {
        if category.trim().is_empty() {
            return Err(DetectorError::InvalidInput(
                "La categoría no puede estar vacía".to_string(),
            ));
        }
        if keyword.trim().is_empty() {
            return Err(DetectorError::InvalidInput(
                "La palabra clave no puede estar vacía".to_string(),
            ));
        }
        Ok(())
    }

    fn read_store(&self) -> Result<RwLockReadGuard<'_, KeywordStore>> {
        self.store
            .read()
            .map_err(|e| DetectorError::Unexpected(format!("keyword store lock poisoned: {e}")))
    }

    fn write_store(&self) -> Result<RwLockWriteGuard<'_, KeywordStore>> {
        self.store
            .write()
            .map_err(|e| DetectorError::Unexpected(format!("keyword store lock poisoned: {e}")))
    }
}
