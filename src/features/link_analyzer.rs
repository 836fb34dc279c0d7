use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Layers are applied in this order; results are concatenated before de-duplication.
    static ref URL_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)https?://(?:[a-zA-Z0-9\x24-\x5F@.&+!*\\(),]|%[0-9a-fA-F]{2})+").unwrap(),
        Regex::new(r"(?i)www\.(?:[a-zA-Z0-9\x24-\x5F@.&+!*\\(),]|%[0-9a-fA-F]{2})+").unwrap(),
        // Bare hostnames. Over-matches ordinary dotted text on purpose.
        Regex::new(r"(?i)(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,}").unwrap(),
    ];

    static ref STRUCTURAL_PATTERNS: Vec<Regex> = vec![
        // raw IPv4 host
        Regex::new(r"[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}").unwrap(),
        // word-word-word.tld
        Regex::new(r"[a-z0-9]+-[a-z0-9]+-[a-z0-9]+\.[a-z]{2,}").unwrap(),
        // overlong label
        Regex::new(r"[a-z]{20,}\.[a-z]{2,}").unwrap(),
    ];
}

pub const SHORTENER_DOMAINS: &[&str] = &[
    "bit.ly",
    "tinyurl.com",
    "short.link",
    "t.co",
    "goo.gl",
    "ow.ly",
    "is.gd",
    "buff.ly",
];

const SHORTENER_SCORE: u32 = 2;
const STRUCTURAL_SCORE: u32 = 1;

/// Finds URL-like substrings in raw (non-normalized) text.
#[derive(Debug, Default)]
pub struct UrlExtractor;

impl UrlExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Order-preserving, case-sensitive de-duplication across all layers.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let mut urls: Vec<String> = Vec::new();

        for pattern in URL_PATTERNS.iter() {
            for found in pattern.find_iter(text) {
                let candidate = found.as_str();
                if !urls.iter().any(|u| u == candidate) {
                    urls.push(candidate.to_string());
                }
            }
        }

        urls
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuspicionReason {
    Shortener,
    IpAddressHost,
    HyphenatedDomain,
    OverlongLabel,
}

impl SuspicionReason {
    pub fn score(self) -> u32 {
        match self {
            SuspicionReason::Shortener => SHORTENER_SCORE,
            _ => STRUCTURAL_SCORE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkAnalysis {
    pub score: u32,
    pub suspicious: Vec<String>,
    pub total: usize,
}

/// Flags extracted URLs by shortener membership or structural shape.
#[derive(Debug, Default)]
pub struct LinkAnalyzer;

impl LinkAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Exactly one scoring path per URL: a shortener hit skips the
    /// structural checks, and structural checks stop at the first match.
    pub fn classify(&self, url: &str) -> Option<SuspicionReason> {
        let url_lower = url.to_lowercase();

        if SHORTENER_DOMAINS.iter().any(|d| url_lower.contains(d)) {
            return Some(SuspicionReason::Shortener);
        }

        let structural = [
            SuspicionReason::IpAddressHost,
            SuspicionReason::HyphenatedDomain,
            SuspicionReason::OverlongLabel,
        ];

        STRUCTURAL_PATTERNS
            .iter()
            .zip(structural)
            .find(|(pattern, _)| pattern.is_match(&url_lower))
            .map(|(_, reason)| reason)
    }

    pub fn analyze(&self, urls: &[String]) -> LinkAnalysis {
        let mut analysis = LinkAnalysis {
            total: urls.len(),
            ..Default::default()
        };

        for url in urls {
            if let Some(reason) = self.classify(url) {
                log::debug!("Suspicious URL {url}: {reason:?}");
                analysis.score += reason.score();
                analysis.suspicious.push(url.clone());
            }
        }

        analysis
    }
}
