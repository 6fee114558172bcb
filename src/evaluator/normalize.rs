//! @ai:module:intent Normalize free-text answers for comparison
//! @ai:module:layer application
//! @ai:module:public_api Normalizer
//! @ai:module:stateless true

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// @ai:intent Text, number and date normalizers for Polish and English answers
pub struct Normalizer {
    whitespace_regex: Regex,
    currency_regex: Regex,
    unit_regex: Regex,
    thousands_suffix_regex: Regex,
    digit_gap_regex: Regex,
    number_regex: Regex,
    iso_date_regex: Regex,
    dotted_date_regex: Regex,
    year_month_regex: Regex,
}

impl Normalizer {
    /// @ai:intent Create a normalizer with compiled patterns
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            whitespace_regex: Regex::new(r"\s+").unwrap(),
            // longest alternative first so "złotych" is not left as "otych"
            currency_regex: Regex::new(r"(?i)\s*(złotych|zł|pln)\s*").unwrap(),
            unit_regex: Regex::new(r"(?i)\s*(dni|days|godzin|hours|h|%)\s*").unwrap(),
            thousands_suffix_regex: Regex::new(r"(?i)(\d+(?:[.,]\d+)?)\s*k\b").unwrap(),
            digit_gap_regex: Regex::new(r"(\d)\s+(\d)").unwrap(),
            number_regex: Regex::new(r"-?\d+(?:[.,]\d+)?").unwrap(),
            iso_date_regex: Regex::new(r"(\d{4})-(\d{2})-(\d{2})").unwrap(),
            dotted_date_regex: Regex::new(r"(\d{1,2})[./](\d{1,2})[./](\d{4})").unwrap(),
            year_month_regex: Regex::new(r"(\d{4})-(\d{2})").unwrap(),
        }
    }

    /// @ai:intent NFKC-normalize, lowercase, trim and collapse whitespace
    /// @ai:effects pure
    /// @ai:example ("  Maciej   BORYNA ") -> "maciej boryna"
    pub fn text(&self, text: &str) -> String {
        let composed: String = text.nfkc().collect();
        let lowered = composed.to_lowercase();
        self.whitespace_regex
            .replace_all(lowered.trim(), " ")
            .into_owned()
    }

    /// @ai:intent Extract a numeric value, understanding currency, units, "k" and Polish separators
    /// @ai:effects pure
    /// @ai:example ("50 000 zł") -> Some(50000.0)
    /// @ai:example ("1,5k") -> Some(1500.0)
    pub fn number(&self, text: &str) -> Option<f64> {
        let text = self.currency_regex.replace_all(text, "");
        let text = self.unit_regex.replace_all(&text, "");

        if let Some(cap) = self.thousands_suffix_regex.captures(&text) {
            let value = cap.get(1)?.as_str().replace(',', ".");
            return value.parse::<f64>().ok().map(|v| v * 1000.0);
        }

        let text = self.digit_gap_regex.replace_all(&text, "${1}${2}");
        let text = text.replace(' ', "");

        self.number_regex
            .find(&text)
            .and_then(|m| m.as_str().replace(',', ".").parse::<f64>().ok())
    }

    /// @ai:intent Normalize a date mention to YYYY-MM-DD (or YYYY-MM)
    /// @ai:effects pure
    /// @ai:example ("26.07.2023") -> Some("2023-07-26")
    pub fn date(&self, text: &str) -> Option<String> {
        if let Some(m) = self.iso_date_regex.find(text) {
            return Some(m.as_str().to_string());
        }

        if let Some(cap) = self.dotted_date_regex.captures(text) {
            let day = cap.get(1)?.as_str();
            let month = cap.get(2)?.as_str();
            let year = cap.get(3)?.as_str();
            return Some(format!("{}-{:0>2}-{:0>2}", year, month, day));
        }

        self.year_month_regex
            .find(text)
            .map(|m| m.as_str().to_string())
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}
