//! Wire types for the `/search` endpoint and their presentation rules
//!
//! The service returns a flat JSON payload: the detected query language and
//! an already-ranked list of documents with a fused relevance score plus the
//! two component scores (semantic and BM25). Everything here is plain data;
//! ordering, rounding and truncation rules live next to the types so the UI
//! and the tests share one implementation.

use serde::{Deserialize, Serialize};

/// Maximum number of characters shown in a result snippet before truncation.
pub const SNIPPET_LIMIT: usize = 100;

/// Language of a query or document, as reported by the service.
///
/// The known set is closed (`en`, `es`, `hi`); anything else is carried
/// verbatim in `Other` so the fallback rendering stays total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LanguageCode {
    En,
    Es,
    Hi,
    Other(String),
}

impl From<String> for LanguageCode {
    fn from(code: String) -> Self {
        match code.as_str() {
            "en" => Self::En,
            "es" => Self::Es,
            "hi" => Self::Hi,
            _ => Self::Other(code),
        }
    }
}

impl From<LanguageCode> for String {
    fn from(lang: LanguageCode) -> Self {
        match lang {
            LanguageCode::En => "en".to_string(),
            LanguageCode::Es => "es".to_string(),
            LanguageCode::Hi => "hi".to_string(),
            LanguageCode::Other(code) => code,
        }
    }
}

impl LanguageCode {
    /// Flag emoji for the language, globe for anything unrecognized.
    pub fn flag(&self) -> &'static str {
        match self {
            Self::En => "🇺🇸",
            Self::Es => "🇪🇸",
            Self::Hi => "🇮🇳",
            Self::Other(_) => "🌐",
        }
    }

    /// Human-readable language name; unknown codes render uppercased.
    pub fn name(&self) -> String {
        match self {
            Self::En => "English".to_string(),
            Self::Es => "Spanish".to_string(),
            Self::Hi => "Hindi".to_string(),
            Self::Other(code) => code.to_uppercase(),
        }
    }
}

/// One ranked document as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub url: String,
    pub lang: LanguageCode,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    /// Fused relevance score in [0, 1].
    pub score: f64,
    /// Normalized semantic component in [0, 1].
    pub semantic_score: f64,
    /// Normalized BM25 component in [0, 1].
    pub bm25_score: f64,
}

impl Document {
    /// Full displayable body: `summary` if non-empty, else `text`, else "".
    ///
    /// An empty summary falls through to `text`, matching the service's
    /// "full text mode" where `summary` carries the body and `text` is a
    /// legacy field.
    pub fn display_text(&self) -> &str {
        match self.summary.as_deref() {
            Some(s) if !s.is_empty() => s,
            _ => match self.text.as_deref() {
                Some(t) if !t.is_empty() => t,
                _ => "",
            },
        }
    }

    /// First [`SNIPPET_LIMIT`] characters of the display text, with a
    /// trailing ellipsis iff something was cut. Character-based, not
    /// byte-based: the corpus is multilingual.
    pub fn snippet(&self) -> String {
        let content = self.display_text();
        if content.chars().count() > SNIPPET_LIMIT {
            let truncated: String = content.chars().take(SNIPPET_LIMIT).collect();
            format!("{truncated}...")
        } else {
            content.to_string()
        }
    }
}

/// Response payload of `GET /search?q=...`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query_detected_lang: LanguageCode,
    /// Ranked documents, best first. Server order is authoritative; the
    /// client never re-sorts.
    pub results: Vec<Document>,
}

/// Clamp a wire score into [0, 1]. The service normalizes its scores, but
/// the client cannot assume a payload it does not control stays in range.
fn clamp_score(score: f64) -> f64 {
    score.clamp(0.0, 1.0)
}

/// A score in [0, 1] as a whole percentage, rounded to nearest.
pub fn whole_percent(score: f64) -> u16 {
    (clamp_score(score) * 100.0).round() as u16
}

/// A score in [0, 1] as a percentage with one decimal place.
pub fn decimal_percent(score: f64) -> String {
    format!("{:.1}", clamp_score(score) * 100.0)
}

/// Number of filled cells for a proportional bar of `width` cells.
///
/// Derived from the rounded whole percentage so the bar and its label can
/// never disagree. Never exceeds `width`.
pub fn bar_cells(score: f64, width: u16) -> u16 {
    let pct = whole_percent(score);
    (((f64::from(pct) / 100.0) * f64::from(width)).round() as u16).min(width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc(summary: Option<&str>, text: Option<&str>) -> Document {
        Document {
            title: "Title".to_string(),
            url: "https://example.com/a".to_string(),
            lang: LanguageCode::En,
            summary: summary.map(str::to_string),
            text: text.map(str::to_string),
            score: 0.9,
            semantic_score: 0.7,
            bm25_score: 0.4,
        }
    }

    #[test]
    fn language_code_round_trips_known_and_unknown() {
        assert_eq!(LanguageCode::from("en".to_string()), LanguageCode::En);
        assert_eq!(LanguageCode::from("hi".to_string()), LanguageCode::Hi);
        assert_eq!(
            LanguageCode::from("fr".to_string()),
            LanguageCode::Other("fr".to_string())
        );
        assert_eq!(String::from(LanguageCode::Es), "es");
        assert_eq!(String::from(LanguageCode::Other("fr".to_string())), "fr");
    }

    #[test]
    fn unknown_language_renders_globe_and_uppercase() {
        let lang = LanguageCode::from("fr".to_string());
        assert_eq!(lang.flag(), "🌐");
        assert_eq!(lang.name(), "FR");
    }

    #[test]
    fn known_languages_render_flag_and_name() {
        assert_eq!(LanguageCode::En.flag(), "🇺🇸");
        assert_eq!(LanguageCode::En.name(), "English");
        assert_eq!(LanguageCode::Es.name(), "Spanish");
        assert_eq!(LanguageCode::Hi.name(), "Hindi");
    }

    #[test]
    fn display_text_prefers_summary_then_text() {
        assert_eq!(doc(Some("body"), Some("other")).display_text(), "body");
        assert_eq!(doc(None, Some("fallback")).display_text(), "fallback");
        assert_eq!(doc(None, None).display_text(), "");
        // Empty summary falls through, it does not mask the text field.
        assert_eq!(doc(Some(""), Some("fallback")).display_text(), "fallback");
    }

    #[test]
    fn snippet_keeps_short_text_untouched() {
        let short = "x".repeat(100);
        assert_eq!(doc(Some(&short), None).snippet(), short);
    }

    #[test]
    fn snippet_truncates_long_text_with_ellipsis() {
        let long = "y".repeat(150);
        let snippet = doc(Some(&long), None).snippet();
        assert_eq!(snippet, format!("{}...", "y".repeat(100)));
    }

    #[test]
    fn snippet_counts_characters_not_bytes() {
        // 150 Devanagari characters, each multi-byte in UTF-8.
        let hindi = "म".repeat(150);
        let snippet = doc(Some(&hindi), None).snippet();
        assert_eq!(snippet.chars().count(), 103);
        assert!(snippet.ends_with("..."));
    }

    #[test]
    fn percent_rounding_is_to_nearest() {
        assert_eq!(whole_percent(0.924), 92);
        assert_eq!(whole_percent(0.926), 93);
        assert_eq!(whole_percent(0.0), 0);
        assert_eq!(whole_percent(1.0), 100);
        assert_eq!(decimal_percent(0.7351), "73.5");
        assert_eq!(decimal_percent(1.0), "100.0");
    }

    #[test]
    fn bar_fill_matches_displayed_percentage() {
        // The fill derives from the rounded label, not the raw score.
        for &(score, width) in &[(0.0, 20u16), (0.5, 20), (0.924, 20), (1.0, 20), (0.33, 7)] {
            let pct = whole_percent(score);
            assert_eq!(
                bar_cells(score, width),
                ((f64::from(pct) / 100.0) * f64::from(width)).round() as u16
            );
        }
        assert_eq!(bar_cells(1.0, 20), 20);
        assert_eq!(bar_cells(0.0, 20), 0);
    }

    #[test]
    fn out_of_range_scores_are_clamped() {
        assert_eq!(whole_percent(1.3), 100);
        assert_eq!(whole_percent(-0.2), 0);
        assert_eq!(decimal_percent(1.3), "100.0");
        assert_eq!(decimal_percent(-0.2), "0.0");
        assert_eq!(bar_cells(1.3, 20), 20);
        assert_eq!(bar_cells(-0.2, 20), 0);
    }

    #[test]
    fn response_decodes_from_service_json() {
        let body = r#"{
            "query_detected_lang": "en",
            "results": [{
                "lang": "es",
                "title": "Deportes hoy",
                "summary": "Resumen",
                "url": "https://example.com/d",
                "score": 0.82,
                "semantic_score": 0.9,
                "bm25_score": 0.55
            }]
        }"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.query_detected_lang, LanguageCode::En);
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].lang, LanguageCode::Es);
        assert_eq!(response.results[0].text, None);
    }
}
