//! Rating decision policy.
//!
//! A pure, ordered decision list from analysis to final rating. Categories
//! are not mutually exclusive, so rule order matters: adult material outranks
//! horror, horror outranks violence. Rules 2-4 re-check confidence on top of
//! the detection flag; externally-sourced detections do not have to satisfy
//! our flag/threshold invariant, so the flag alone is not trusted.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::Analysis;

/// Audience gate persisted on the media record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentRating {
    /// Not yet classified.
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "public")]
    Public,
    #[serde(rename = "18+")]
    Adult,
}

impl ContentRating {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentRating::Pending => "pending",
            ContentRating::Public => "public",
            ContentRating::Adult => "18+",
        }
    }
}

impl fmt::Display for ContentRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a record got its rating, at category granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensitivityStatus {
    Pending,
    Safe,
    Flagged,
    Adult,
    Horror,
    Violence,
}

impl SensitivityStatus {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SensitivityStatus::Pending => "pending",
            SensitivityStatus::Safe => "safe",
            SensitivityStatus::Flagged => "flagged",
            SensitivityStatus::Adult => "adult",
            SensitivityStatus::Horror => "horror",
            SensitivityStatus::Violence => "violence",
        }
    }
}

impl fmt::Display for SensitivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The public-facing classification derived from an [`Analysis`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub content_rating: ContentRating,
    pub sensitivity_status: SensitivityStatus,
    pub reason: String,
}

impl Rating {
    fn adult(reason: &str) -> Self {
        Self {
            content_rating: ContentRating::Adult,
            sensitivity_status: SensitivityStatus::Adult,
            reason: reason.to_string(),
        }
    }
}

/// Derive the final rating. First matching rule wins.
pub fn determine_rating(analysis: &Analysis) -> Rating {
    // 1. Adult material: nudity or gore. Nudity wording wins when both hit.
    if analysis.nudity.detected || analysis.gore.detected {
        return if analysis.nudity.detected {
            Rating::adult("Adult/NSFW content detected")
        } else {
            Rating::adult("Gore content detected")
        };
    }

    // 2. Horror strong enough to gate.
    if analysis.horror.detected && analysis.horror.confidence >= 0.5 {
        return Rating {
            content_rating: ContentRating::Adult,
            sensitivity_status: SensitivityStatus::Horror,
            reason: "Horror/scary content detected".to_string(),
        };
    }

    // 3. Violence strong enough to gate.
    if analysis.violence.detected && analysis.violence.confidence >= 0.6 {
        return Rating {
            content_rating: ContentRating::Adult,
            sensitivity_status: SensitivityStatus::Violence,
            reason: "Violent content detected".to_string(),
        };
    }

    // 4. Drugs/weapons gate only on high confidence.
    if (analysis.drugs.detected || analysis.weapons.detected)
        && (analysis.drugs.confidence >= 0.7 || analysis.weapons.confidence >= 0.7)
    {
        return Rating {
            content_rating: ContentRating::Adult,
            sensitivity_status: SensitivityStatus::Flagged,
            reason: "Drug or weapon content detected".to_string(),
        };
    }

    // 5. Safe for public viewing.
    Rating {
        content_rating: ContentRating::Public,
        sensitivity_status: SensitivityStatus::Safe,
        reason: "No sensitive content detected".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Category, Detection};

    fn analysis_with(entries: &[(Category, f32, bool)]) -> Analysis {
        let mut analysis = Analysis::new();
        for (category, confidence, detected) in entries {
            *analysis.get_mut(*category) = Detection {
                detected: *detected,
                confidence: *confidence,
                matched_keywords: Vec::new(),
            };
        }
        analysis
    }

    #[test]
    fn test_clear_analysis_is_public_safe() {
        let rating = determine_rating(&Analysis::new());
        assert_eq!(rating.content_rating, ContentRating::Public);
        assert_eq!(rating.sensitivity_status, SensitivityStatus::Safe);
        assert_eq!(rating.reason, "No sensitive content detected");
    }

    #[test]
    fn test_nudity_rates_adult() {
        let rating = determine_rating(&analysis_with(&[(Category::Nudity, 0.9, true)]));
        assert_eq!(rating.content_rating, ContentRating::Adult);
        assert_eq!(rating.sensitivity_status, SensitivityStatus::Adult);
        assert_eq!(rating.reason, "Adult/NSFW content detected");
    }

    #[test]
    fn test_gore_rates_adult_with_gore_reason() {
        let rating = determine_rating(&analysis_with(&[(Category::Gore, 0.5, true)]));
        assert_eq!(rating.sensitivity_status, SensitivityStatus::Adult);
        assert_eq!(rating.reason, "Gore content detected");
    }

    #[test]
    fn test_nudity_reason_outranks_gore() {
        let rating = determine_rating(&analysis_with(&[
            (Category::Nudity, 0.7, true),
            (Category::Gore, 0.99, true),
        ]));
        assert_eq!(rating.reason, "Adult/NSFW content detected");
    }

    #[test]
    fn test_horror_needs_half_confidence() {
        let strong = determine_rating(&analysis_with(&[(Category::Horror, 0.6, true)]));
        assert_eq!(strong.sensitivity_status, SensitivityStatus::Horror);
        assert_eq!(strong.content_rating, ContentRating::Adult);

        // detected at 0.4 but below the rating gate: falls through to safe
        let weak = determine_rating(&analysis_with(&[(Category::Horror, 0.4, true)]));
        assert_eq!(weak.content_rating, ContentRating::Public);
        assert_eq!(weak.sensitivity_status, SensitivityStatus::Safe);
    }

    #[test]
    fn test_violence_needs_point_six() {
        let strong = determine_rating(&analysis_with(&[(Category::Violence, 0.8, true)]));
        assert_eq!(strong.sensitivity_status, SensitivityStatus::Violence);
        assert_eq!(strong.reason, "Violent content detected");

        let weak = determine_rating(&analysis_with(&[(Category::Violence, 0.4, true)]));
        assert_eq!(weak.sensitivity_status, SensitivityStatus::Safe);
    }

    #[test]
    fn test_horror_outranks_violence() {
        let rating = determine_rating(&analysis_with(&[
            (Category::Horror, 0.6, true),
            (Category::Violence, 0.8, true),
        ]));
        assert_eq!(rating.sensitivity_status, SensitivityStatus::Horror);
    }

    #[test]
    fn test_drugs_weapons_gate_at_point_seven() {
        let strong = determine_rating(&analysis_with(&[(Category::Weapons, 0.7, true)]));
        assert_eq!(strong.content_rating, ContentRating::Adult);
        assert_eq!(strong.sensitivity_status, SensitivityStatus::Flagged);
        assert_eq!(strong.reason, "Drug or weapon content detected");

        let weak = determine_rating(&analysis_with(&[(Category::Weapons, 0.5, true)]));
        assert_eq!(weak.sensitivity_status, SensitivityStatus::Safe);
    }

    #[test]
    fn test_drug_flag_with_weapon_confidence_crosses_gate() {
        // one category carries the flag, the other the confidence; rule 4
        // treats them as a pool
        let rating = determine_rating(&analysis_with(&[
            (Category::Drugs, 0.5, true),
            (Category::Weapons, 0.75, false),
        ]));
        assert_eq!(rating.sensitivity_status, SensitivityStatus::Flagged);
    }

    #[test]
    fn test_external_detection_without_invariant_is_rechecked() {
        // an external pair can be detected=true with low confidence; the
        // confidence gate still holds it back
        let rating = determine_rating(&analysis_with(&[(Category::Violence, 0.3, true)]));
        assert_eq!(rating.content_rating, ContentRating::Public);
    }

    #[test]
    fn test_rating_serializes_like_the_stored_document() {
        let rating = determine_rating(&analysis_with(&[(Category::Nudity, 0.9, true)]));
        let value = serde_json::to_value(&rating).unwrap();
        assert_eq!(value["contentRating"], "18+");
        assert_eq!(value["sensitivityStatus"], "adult");
    }
}
