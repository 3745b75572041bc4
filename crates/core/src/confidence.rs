//! Confidence-tier classification of diagnosis scores.

use crate::constants::{CONFIDENCE_SUFFIX, HIGH_CONFIDENCE_THRESHOLD, MEDIUM_CONFIDENCE_THRESHOLD};

/// Coarse match-strength band for a confidence percentage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfidenceTier {
    Low,
    Medium,
    High,
}

impl ConfidenceTier {
    /// Classify a confidence percentage.
    ///
    /// Total over every `f64`: anything that is not at least the medium threshold (including
    /// NaN) is `Low`.
    pub fn classify(confidence: f64) -> Self {
        if confidence >= HIGH_CONFIDENCE_THRESHOLD {
            ConfidenceTier::High
        } else if confidence >= MEDIUM_CONFIDENCE_THRESHOLD {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConfidenceTier::Low => "low",
            ConfidenceTier::Medium => "medium",
            ConfidenceTier::High => "high",
        }
    }

    /// Style class used by markup-based views.
    pub fn css_class(self) -> &'static str {
        match self {
            ConfidenceTier::Low => "confidence-low",
            ConfidenceTier::Medium => "confidence-medium",
            ConfidenceTier::High => "confidence-high",
        }
    }
}

impl std::fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Round a confidence to the nearest whole percent; halves round up.
pub fn rounded_percent(confidence: f64) -> i64 {
    (confidence + 0.5).floor() as i64
}

/// Display text for a confidence, e.g. `85% Yakin`.
pub fn confidence_text(confidence: f64) -> String {
    format!("{}{}", rounded_percent(confidence), CONFIDENCE_SUFFIX)
}
