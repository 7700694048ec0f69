//! Core types for moderation analysis.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A sensitivity category the classifier scores independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Nudity,
    Violence,
    Horror,
    Gore,
    Drugs,
    Weapons,
}

impl Category {
    /// All categories, in persisted-document order.
    pub const ALL: [Category; 6] = [
        Category::Nudity,
        Category::Violence,
        Category::Horror,
        Category::Gore,
        Category::Drugs,
        Category::Weapons,
    ];

    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Nudity => "nudity",
            Category::Violence => "violence",
            Category::Horror => "horror",
            Category::Gore => "gore",
            Category::Drugs => "drugs",
            Category::Weapons => "weapons",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "nudity" => Some(Category::Nudity),
            "violence" => Some(Category::Violence),
            "horror" => Some(Category::Horror),
            "gore" => Some(Category::Gore),
            "drugs" => Some(Category::Drugs),
            "weapons" => Some(Category::Weapons),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of scoring one category: a flag, the confidence behind it, and
/// the keyword evidence when the lexical scorer produced it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    pub detected: bool,
    pub confidence: f32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matched_keywords: Vec<String>,
}

impl Detection {
    /// A detection with no signal at all.
    pub fn clear() -> Self {
        Self::default()
    }

    /// Build a detection from a confidence score and the threshold that
    /// decides the flag.
    pub fn scored(confidence: f32, threshold: f32) -> Self {
        Self {
            detected: confidence >= threshold,
            confidence,
            matched_keywords: Vec::new(),
        }
    }

    /// Attach keyword evidence.
    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.matched_keywords = keywords;
        self
    }
}

/// How an [`Analysis`] was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMethod {
    /// The full pass ran to completion.
    Comprehensive,
    /// A step failed and was recovered; the analysis is best-effort.
    Fallback,
}

impl AnalysisMethod {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMethod::Comprehensive => "comprehensive",
            AnalysisMethod::Fallback => "fallback",
        }
    }
}

impl fmt::Display for AnalysisMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The full per-category detection set for one media item at one point in
/// time. This is the `moderationAnalysis` document persisted on the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub nudity: Detection,
    pub violence: Detection,
    pub horror: Detection,
    pub gore: Detection,
    pub drugs: Detection,
    pub weapons: Detection,
    pub analyzed_at: DateTime<Utc>,
    pub analysis_method: AnalysisMethod,
}

impl Analysis {
    /// A fresh analysis: every category clear, stamped now.
    pub fn new() -> Self {
        Self {
            nudity: Detection::clear(),
            violence: Detection::clear(),
            horror: Detection::clear(),
            gore: Detection::clear(),
            drugs: Detection::clear(),
            weapons: Detection::clear(),
            analyzed_at: Utc::now(),
            analysis_method: AnalysisMethod::Comprehensive,
        }
    }

    /// Borrow the detection for a category.
    pub fn get(&self, category: Category) -> &Detection {
        match category {
            Category::Nudity => &self.nudity,
            Category::Violence => &self.violence,
            Category::Horror => &self.horror,
            Category::Gore => &self.gore,
            Category::Drugs => &self.drugs,
            Category::Weapons => &self.weapons,
        }
    }

    /// Mutably borrow the detection for a category.
    pub fn get_mut(&mut self, category: Category) -> &mut Detection {
        match category {
            Category::Nudity => &mut self.nudity,
            Category::Violence => &mut self.violence,
            Category::Horror => &mut self.horror,
            Category::Gore => &mut self.gore,
            Category::Drugs => &mut self.drugs,
            Category::Weapons => &mut self.weapons,
        }
    }

    /// Replace a category's detection wholesale when the candidate carries
    /// strictly higher confidence. Merging never lowers a confidence.
    pub fn merge_max(&mut self, category: Category, candidate: Detection) {
        let current = self.get_mut(category);
        if candidate.confidence > current.confidence {
            *current = candidate;
        }
    }
}

impl Default for Analysis {
    fn default() -> Self {
        Self::new()
    }
}
