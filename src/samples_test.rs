//! Sample-based regression tests for the classifier.
//!
//! Each sample is a real-looking upload title/description pair with a
//! manually verified expected rating. Lexical + pattern passes only; the
//! provider is exercised in the analysis module tests.

use crate::{Classifier, ClassifierConfig, ContentRating, MediaKind, ModerationOutcome, SensitivityStatus};

async fn classify(title: &str, description: &str) -> ModerationOutcome {
    let classifier = Classifier::new(ClassifierConfig::default());
    classifier.classify(title, description, None, MediaKind::Video).await
}

#[tokio::test]
async fn sample_001_safe_landscape() {
    let outcome = classify("Sunset over the lake", "").await;
    assert_eq!(outcome.content_rating, ContentRating::Public);
    assert_eq!(outcome.sensitivity_status, SensitivityStatus::Safe);
}

#[tokio::test]
async fn sample_002_horror_title() {
    let outcome = classify("Zombie Graveyard Horror Nightmare", "").await;
    assert_eq!(outcome.content_rating, ContentRating::Adult);
    assert_eq!(outcome.sensitivity_status, SensitivityStatus::Horror);
    assert!(outcome.analysis.horror.confidence >= 0.5);
}

#[tokio::test]
async fn sample_003_violence_across_fields() {
    let outcome = classify("Gun fight attack", "blood everywhere").await;
    assert_eq!(outcome.content_rating, ContentRating::Adult);
    assert_eq!(outcome.sensitivity_status, SensitivityStatus::Violence);
    assert!((outcome.analysis.violence.confidence - 0.8).abs() < 1e-6);
}

#[tokio::test]
async fn sample_004_adult_keyword() {
    let outcome = classify("nsfw content", "").await;
    assert_eq!(outcome.content_rating, ContentRating::Adult);
    assert_eq!(outcome.sensitivity_status, SensitivityStatus::Adult);
    assert!(outcome.reason.contains("Adult/NSFW"));
}

#[tokio::test]
async fn sample_005_cooking_channel() {
    // "knife" alone is weapons evidence at 0.7, exactly on the rating gate
    let outcome = classify("Knife skills for beginners", "chopping onions fast").await;
    assert_eq!(outcome.content_rating, ContentRating::Adult);
    assert_eq!(outcome.sensitivity_status, SensitivityStatus::Flagged);
}

#[tokio::test]
async fn sample_006_weak_horror_stays_public() {
    // two lexical hits (dark + ghost) flag horror at 0.4, below the 0.5
    // rating gate, and the fallback never runs once horror is detected
    let outcome = classify("Dark ghost tales", "").await;
    assert!(outcome.analysis.horror.detected);
    assert_eq!(outcome.content_rating, ContentRating::Public);
    assert_eq!(outcome.sensitivity_status, SensitivityStatus::Safe);
}

#[tokio::test]
async fn sample_007_mild_violence_stays_public() {
    // weapon + explosion = 0.4, detected but under the 0.6 violence gate
    let outcome = classify("Explosion at the weapons depot", "").await;
    assert!(outcome.analysis.violence.detected);
    assert_eq!(outcome.content_rating, ContentRating::Public);
}

#[tokio::test]
async fn sample_008_gore_via_pattern_fallback() {
    let outcome = classify("Brutal torture scenes", "").await;
    assert_eq!(outcome.content_rating, ContentRating::Adult);
    assert_eq!(outcome.sensitivity_status, SensitivityStatus::Adult);
    assert_eq!(outcome.reason, "Gore content detected");
}

#[tokio::test]
async fn sample_009_nudity_reason_outranks_gore() {
    let outcome = classify("nsfw gore compilation", "").await;
    assert_eq!(outcome.reason, "Adult/NSFW content detected");
}

#[tokio::test]
async fn sample_010_drugs_via_pattern_fallback() {
    let outcome = classify("Documentary", "how cocaine moves across borders").await;
    assert_eq!(outcome.content_rating, ContentRating::Adult);
    assert_eq!(outcome.sensitivity_status, SensitivityStatus::Flagged);
}

#[tokio::test]
async fn sample_011_gaming_clip_is_safe() {
    let outcome = classify("Speedrun world record", "frame perfect tricks").await;
    assert_eq!(outcome.content_rating, ContentRating::Public);
    assert_eq!(outcome.sensitivity_status, SensitivityStatus::Safe);
}

#[tokio::test]
async fn sample_012_empty_description() {
    let outcome = classify("Morning coffee routine", "").await;
    assert_eq!(outcome.content_rating, ContentRating::Public);
}
