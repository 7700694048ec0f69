//! Pattern-based fallback scoring across all six categories.
//!
//! A finer-grained, word-bounded pass that stands in for a real model when
//! neither the lexical tables nor the external provider produced a strong
//! signal. Scores start high (0.6) because a bounded-word hit is already
//! decent evidence.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::{Category, Detection};
use crate::config::Thresholds;

static NUDITY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(nude|naked|nsfw|xxx|porn|explicit|sexy|bikini|underwear|lingerie)\b").unwrap()
});

static VIOLENCE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(fight|kill|murder|attack|assault|blood|war|battle|shoot|stab)\b").unwrap()
});

static HORROR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(horror|scary|terror|creepy|ghost|demon|zombie|haunted|nightmare|dead|death)\b")
        .unwrap()
});

static GORE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(gore|gory|dismember|mutilat|decapitat|torture|brutal)\b").unwrap()
});

static DRUGS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(drug|cocaine|heroin|weed|marijuana|meth|pill|inject)\b").unwrap()
});

static WEAPONS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(gun|rifle|pistol|sword|knife|weapon|bomb|explosive)\b").unwrap()
});

fn pattern_for(category: Category) -> &'static Regex {
    match category {
        Category::Nudity => &NUDITY_PATTERN,
        Category::Violence => &VIOLENCE_PATTERN,
        Category::Horror => &HORROR_PATTERN,
        Category::Gore => &GORE_PATTERN,
        Category::Drugs => &DRUGS_PATTERN,
        Category::Weapons => &WEAPONS_PATTERN,
    }
}

/// Scan title and description against every category pattern.
///
/// Only categories with at least one hit are returned. Confidence is
/// `min(0.6 + 0.1 * distinct_matches, 0.95)`; the flag trips at the
/// category threshold or at 0.5, whichever is lower.
pub fn scan(title: &str, description: &str, thresholds: &Thresholds) -> Vec<(Category, Detection)> {
    let combined = super::keywords::combined_text(title, description);

    Category::ALL
        .iter()
        .filter_map(|&category| {
            let matched: BTreeSet<&str> = pattern_for(category)
                .find_iter(&combined)
                .map(|m| m.as_str())
                .collect();
            if matched.is_empty() {
                return None;
            }

            let confidence = (0.6 + 0.1 * matched.len() as f32).min(0.95);
            let threshold = thresholds.for_category(category);
            let detection = Detection {
                detected: confidence >= threshold || confidence >= 0.5,
                confidence,
                matched_keywords: Vec::new(),
            };
            Some((category, detection))
        })
        .collect()
}
