//! Mood fusion types

use crate::{CoachError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mood scores below this are `Low`
pub const LOW_THRESHOLD: f64 = 0.35;

/// Mood scores at or above this are `High`
pub const HIGH_THRESHOLD: f64 = 0.70;

/// Coarse mood bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodCategory {
    /// mood < 0.35
    Low,
    /// 0.35 <= mood < 0.70
    Medium,
    /// mood >= 0.70
    High,
}

impl MoodCategory {
    /// Bucket a mood score using the fixed thresholds
    pub fn from_score(mood_score: f64) -> Self {
        if mood_score < LOW_THRESHOLD {
            MoodCategory::Low
        } else if mood_score < HIGH_THRESHOLD {
            MoodCategory::Medium
        } else {
            MoodCategory::High
        }
    }

    /// Lower-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            MoodCategory::Low => "low",
            MoodCategory::Medium => "medium",
            MoodCategory::High => "high",
        }
    }
}

impl fmt::Display for MoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Blend weights for the text and face components
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FusionWeights {
    /// Weight of the text component
    pub text: f64,
    /// Weight of the face component
    pub face: f64,
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self {
            text: 0.6,
            face: 0.4,
        }
    }
}

impl FusionWeights {
    /// Weights used when the face reading is unreliable
    pub const UNRELIABLE_FACE: FusionWeights = FusionWeights {
        text: 0.9,
        face: 0.1,
    };

    /// Create a weight pair.
    ///
    /// Both weights must be in [0, 1] and sum to 1 so that the fused score
    /// stays in [0, 1].
    pub fn new(text: f64, face: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&text) || !(0.0..=1.0).contains(&face) {
            return Err(CoachError::config(format!(
                "fusion weights must be within [0, 1], got text={} face={}",
                text, face
            )));
        }
        if ((text + face) - 1.0).abs() > 1e-6 {
            return Err(CoachError::config(format!(
                "fusion weights must sum to 1, got {}",
                text + face
            )));
        }
        Ok(Self { text, face })
    }
}

/// Intermediate scores behind a fusion result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FusionComponents {
    /// 0.8 * valence + 0.2 * motivation
    pub text_component: f64,
    /// Confidence-blended face score (0.5 when no face)
    pub face_component: f64,
    /// Face detection confidence used for weighting (0 when no face)
    pub face_confidence: f64,
    /// Text valence that went in
    pub valence: f64,
    /// Motivation score that went in
    pub motivation_score: f64,
}

/// Output of the fusion engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FusionResult {
    /// Fused mood (0.0 to 1.0)
    pub mood_score: f64,
    /// Bucket of `mood_score`
    pub category: MoodCategory,
    /// Component breakdown
    pub components: FusionComponents,
    /// Weights actually applied
    pub weights: FusionWeights,
}

impl FusionResult {
    /// Mood score as a percentage
    pub fn percent(&self) -> f64 {
        self.mood_score * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_boundaries() {
        assert_eq!(MoodCategory::from_score(0.0), MoodCategory::Low);
        assert_eq!(MoodCategory::from_score(0.3499), MoodCategory::Low);
        assert_eq!(MoodCategory::from_score(0.35), MoodCategory::Medium);
        assert_eq!(MoodCategory::from_score(0.6999), MoodCategory::Medium);
        assert_eq!(MoodCategory::from_score(0.70), MoodCategory::High);
        assert_eq!(MoodCategory::from_score(1.0), MoodCategory::High);
    }

    #[test]
    fn test_weights_validation() {
        assert!(FusionWeights::new(0.6, 0.4).is_ok());
        assert!(FusionWeights::new(1.0, 0.0).is_ok());
        assert!(FusionWeights::new(0.7, 0.4).is_err());
        assert!(FusionWeights::new(-0.2, 1.2).is_err());
        assert!(FusionWeights::new(f64::NAN, 0.5).is_err());
    }

    #[test]
    fn test_category_serde() {
        assert_eq!(
            serde_json::to_string(&MoodCategory::Medium).unwrap(),
            "\"medium\""
        );
    }
}
