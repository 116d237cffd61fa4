//! Raw text cleanup before section splitting

use regex::Regex;

/// Strips noise from raw document text: URL-like substrings, runs of blank
/// lines, and copyright boilerplate. Regexes are compiled once per instance.
pub struct Normalizer {
    url: Regex,
    blank_lines: Regex,
    copyright: Regex,
}

impl Normalizer {
    /// Create a normalizer with the standard rule set
    pub fn new() -> Self {
        Self {
            url: Regex::new(r"http\S+").expect("Invalid regex"),
            blank_lines: Regex::new(r"\n{3,}").expect("Invalid regex"),
            copyright: Regex::new(r"©.*").expect("Invalid regex"),
        }
    }

    /// Clean one document's text. Empty input yields empty output.
    pub fn normalize(&self, text: &str) -> String {
        let text = self.url.replace_all(text, "");
        let text = self.blank_lines.replace_all(&text, "\n\n");
        let text = self.copyright.replace_all(&text, "");
        text.trim().to_string()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}
