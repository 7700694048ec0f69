//! Keyword-based text analysis over title and description.
//!
//! Horror and violence scale with the number of distinct table entries found
//! in the text; adult content is a flat high-confidence hit on any match.
//! The asymmetry is deliberate and matches the platform's historical
//! behavior.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::Detection;

/// Keywords that indicate horror/scary content in metadata.
const HORROR_KEYWORDS: &[&str] = &[
    "horror",
    "scary",
    "fear",
    "terror",
    "creepy",
    "disturbing",
    "nightmare",
    "demon",
    "ghost",
    "zombie",
    "blood",
    "dark",
    "sinister",
    "evil",
    "death",
    "skull",
    "monster",
    "mutant",
];

/// Keywords that indicate violence.
const VIOLENCE_KEYWORDS: &[&str] = &[
    "violence",
    "fight",
    "attack",
    "weapon",
    "gun",
    "knife",
    "blood",
    "injury",
    "wound",
    "combat",
    "war",
    "explosion",
];

/// Keywords that indicate adult/NSFW content. Matched with word boundaries,
/// unlike the tables above.
const ADULT_KEYWORDS: &[&str] = &["nsfw", "18+", "adult", "explicit", "xxx", "nude", "naked", "sex"];

static ADULT_MATCHERS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    ADULT_KEYWORDS
        .iter()
        .map(|keyword| (*keyword, Regex::new(&bounded_pattern(keyword)).unwrap()))
        .collect()
});

/// Escape a keyword and assert word boundaries, but only at edges that are
/// alphanumeric — `\b` next to `+` would never match, so `18+` anchors on
/// the `18` alone.
fn bounded_pattern(keyword: &str) -> String {
    let mut pattern = String::from("(?i)");
    if keyword.starts_with(|c: char| c.is_ascii_alphanumeric()) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&regex::escape(keyword));
    if keyword.ends_with(|c: char| c.is_ascii_alphanumeric()) {
        pattern.push_str(r"\b");
    }
    pattern
}

/// Per-category lexical results for one piece of text.
#[derive(Debug, Clone, Default)]
pub struct TextAnalysis {
    pub horror: Detection,
    pub violence: Detection,
    /// Feeds the nudity category downstream.
    pub adult: Detection,
}

/// Case-folded `title + " " + description`. Description may be empty.
pub(crate) fn combined_text(title: &str, description: &str) -> String {
    format!("{} {}", title, description).to_lowercase()
}

/// Score the lexical categories over title and description.
pub fn analyze_text(title: &str, description: &str) -> TextAnalysis {
    let combined = combined_text(title, description);

    TextAnalysis {
        horror: scaled_detection(&combined, HORROR_KEYWORDS),
        violence: scaled_detection(&combined, VIOLENCE_KEYWORDS),
        adult: adult_detection(&combined),
    }
}

/// Substring matching; each table entry counts at most once no matter how
/// often it repeats in the text.
fn scaled_detection(text: &str, table: &[&str]) -> Detection {
    let matched: Vec<String> = table
        .iter()
        .filter(|keyword| text.contains(*keyword))
        .map(|keyword| keyword.to_string())
        .collect();

    if matched.is_empty() {
        return Detection::clear();
    }

    let confidence = (0.2 * matched.len() as f32).min(0.8);
    Detection {
        detected: confidence >= 0.4,
        confidence,
        matched_keywords: matched,
    }
}

/// Any adult keyword is a flat 0.9, regardless of how many matched.
fn adult_detection(text: &str) -> Detection {
    let matched: Vec<String> = ADULT_MATCHERS
        .iter()
        .filter(|(_, matcher)| matcher.is_match(text))
        .map(|(keyword, _)| keyword.to_string())
        .collect();

    if matched.is_empty() {
        return Detection::clear();
    }

    Detection {
        detected: true,
        confidence: 0.9,
        matched_keywords: matched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_scores_nothing() {
        let analysis = analyze_text("Sunset over the lake", "");
        assert_eq!(analysis.horror, Detection::clear());
        assert_eq!(analysis.violence, Detection::clear());
        assert_eq!(analysis.adult, Detection::clear());
    }

    #[test]
    fn test_empty_description_is_fine() {
        let analysis = analyze_text("Zombie Graveyard Horror Nightmare", "");
        assert!(analysis.horror.detected);
    }

    #[test]
    fn test_horror_scales_with_matches() {
        // zombie + horror + nightmare = 3 distinct hits
        let analysis = analyze_text("Zombie Graveyard Horror Nightmare", "");
        assert!((analysis.horror.confidence - 0.6).abs() < 1e-6);
        assert!(analysis.horror.detected);
        assert_eq!(analysis.horror.matched_keywords.len(), 3);
    }

    #[test]
    fn test_single_horror_hit_stays_below_detection() {
        let analysis = analyze_text("A ghost story", "");
        assert_eq!(analysis.horror.confidence, 0.2);
        assert!(!analysis.horror.detected);
        assert_eq!(analysis.horror.matched_keywords, vec!["ghost"]);
    }

    #[test]
    fn test_violence_counts_distinct_keywords_once() {
        // "gun" appears twice but counts once; fight + attack + gun + blood = 4
        let analysis = analyze_text("Gun fight attack gun", "blood everywhere");
        assert_eq!(analysis.violence.confidence, 0.8);
        assert!(analysis.violence.detected);
        assert_eq!(analysis.violence.matched_keywords.len(), 4);
    }

    #[test]
    fn test_violence_confidence_caps_at_point_eight() {
        let analysis = analyze_text(
            "violence fight attack weapon gun knife",
            "blood injury wound combat war explosion",
        );
        assert_eq!(analysis.violence.confidence, 0.8);
    }

    #[test]
    fn test_substring_matching_is_intentionally_loose() {
        // "award" contains "war"; a single hit stays below the flag
        let analysis = analyze_text("Award ceremony highlights", "");
        assert_eq!(analysis.violence.matched_keywords, vec!["war"]);
        assert!(!analysis.violence.detected);
    }

    #[test]
    fn test_case_insensitive() {
        let analysis = analyze_text("HORROR NIGHT: SCARY GHOST", "");
        assert!(analysis.horror.detected);
    }

    #[test]
    fn test_adult_keyword_is_flat_high_confidence() {
        let analysis = analyze_text("nsfw content", "");
        assert!(analysis.adult.detected);
        assert_eq!(analysis.adult.confidence, 0.9);
        assert_eq!(analysis.adult.matched_keywords, vec!["nsfw"]);
    }

    #[test]
    fn test_adult_confidence_ignores_match_count() {
        let one = analyze_text("nude", "");
        let many = analyze_text("nsfw xxx nude naked", "");
        assert_eq!(one.adult.confidence, many.adult.confidence);
        assert_eq!(many.adult.matched_keywords.len(), 4);
    }

    #[test]
    fn test_adult_requires_word_boundary() {
        // "sussex" contains "sex", "adulthood" contains "adult"
        let analysis = analyze_text("Sussex countryside in adulthood", "");
        assert!(!analysis.adult.detected);
    }

    #[test]
    fn test_adult_18_plus_anchors_on_digits() {
        assert!(analyze_text("rated 18+ only", "").adult.detected);
        // no boundary inside "318"
        assert!(!analyze_text("room 318+ annex", "").adult.detected);
    }

    #[test]
    fn test_description_contributes_matches() {
        let analysis = analyze_text("Holiday clip", "explicit footage");
        assert!(analysis.adult.detected);
    }

    #[test]
    fn test_title_description_joined_with_space() {
        // no accidental keyword forming across the seam: "gho" + "st"
        let analysis = analyze_text("gho", "st");
        assert!(analysis.horror.matched_keywords.is_empty());
    }
}
