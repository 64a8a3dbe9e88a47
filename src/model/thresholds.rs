use serde::{Deserialize, Serialize};

pub const SIGNIFICANT_SCORE: f64 = 2.0;
pub const MILD_SCORE: f64 = 1.0;
pub const CATEGORY_DELTA: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Normal,
    Mild,
    Significant,
}

impl Severity {
    pub fn from_score(score: f64) -> Self {
        if score >= SIGNIFICANT_SCORE {
            Severity::Significant
        } else if score >= MILD_SCORE {
            Severity::Mild
        } else {
            Severity::Normal
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Normal => "normal",
            Severity::Mild => "mild",
            Severity::Significant => "significant",
        }
    }

    /// Label shown to readers; `normal` renders as "Stable".
    pub fn label(self) -> &'static str {
        match self {
            Severity::Normal => "Stable",
            Severity::Mild => "Mild",
            Severity::Significant => "Significant",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Overactive,
    Underactive,
    Stable,
}

impl Category {
    pub fn from_sigma(sigma: f64) -> Self {
        if sigma >= CATEGORY_DELTA {
            Category::Overactive
        } else if sigma <= -CATEGORY_DELTA {
            Category::Underactive
        } else {
            Category::Stable
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Overactive => "overactive",
            Category::Underactive => "underactive",
            Category::Stable => "stable",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/thresholds.rs"]
mod tests;
