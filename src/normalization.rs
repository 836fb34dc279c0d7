use regex::Regex;

/// Lowercases and flattens email text so keyword matching sees a single
/// line with single spaces.
pub struct TextNormalizer {
    control_regex: Regex,
    whitespace_regex: Regex,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    pub fn new() -> Self {
        Self {
            control_regex: Regex::new(r"[\t\n\r\x0C\x0B]+").unwrap(),
            whitespace_regex: Regex::new(r"\s+").unwrap(),
        }
    }

    pub fn normalize(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let lowered = text.to_lowercase();
        let flattened = self.control_regex.replace_all(&lowered, " ");
        let collapsed = self.whitespace_regex.replace_all(&flattened, " ");

        collapsed.trim().to_string()
    }
}
