use serde::{Deserialize, Serialize};

/// Published reference interval for one analyte (or a ratio of two).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RefRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
}

impl RefRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self {
            low: Some(low),
            high: Some(high),
        }
    }

    pub fn finite_low(&self) -> Option<f64> {
        self.low.filter(|v| v.is_finite())
    }

    pub fn finite_high(&self) -> Option<f64> {
        self.high.filter(|v| v.is_finite())
    }

    /// Both bounds, when both are finite.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        Some((self.finite_low()?, self.finite_high()?))
    }
}

/// One lab-reported measurement. Read-only to the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyteResult {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Original text when the lab reported a non-numeric value ("<0.5", "ND").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_range: Option<RefRange>,
}

impl AnalyteResult {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_z(mut self, z: f64) -> Self {
        self.z_score = Some(z);
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_ref_range(mut self, low: f64, high: f64) -> Self {
        self.ref_range = Some(RefRange::new(low, high));
        self
    }

    pub fn numeric_value(&self) -> Option<f64> {
        self.value.filter(|v| v.is_finite())
    }

    pub fn finite_z(&self) -> Option<f64> {
        self.z_score.filter(|v| v.is_finite())
    }

    /// Present for scoring purposes: a numeric value or a numeric z-score.
    pub fn has_measurement(&self) -> bool {
        self.numeric_value().is_some() || self.finite_z().is_some()
    }
}
