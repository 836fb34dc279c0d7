pub mod keyword_scorer;
pub mod link_analyzer;

pub use keyword_scorer::{DetectedKeyword, KeywordAnalysis, KeywordScorer};
pub use link_analyzer::{LinkAnalysis, LinkAnalyzer, UrlExtractor};
