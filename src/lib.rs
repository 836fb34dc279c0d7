pub mod config;
pub mod detector;
pub mod error;
pub mod features;
pub mod keywords;
pub mod normalization;
pub mod report;
pub mod risk;
pub mod statistics;

pub use config::Config;
pub use detector::{AnalysisResult, PhishingDetector};
pub use error::{DetectorError, PersistenceError};
pub use keywords::{KeywordCategory, KeywordRepository, KeywordStore};
pub use risk::{RiskAggregator, RiskLevel};
pub use statistics::KeywordStatistics;
