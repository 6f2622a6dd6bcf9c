//! Per-stage processing metrics

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timed workflow stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Analyze,
    Enrich,
    Validate,
    Translate,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Analyze => "analyze",
            Stage::Enrich => "enrich",
            Stage::Validate => "validate",
            Stage::Translate => "translate",
        }
    }
}

/// Elapsed time of each stage in seconds
///
/// Fields are only written through [`EdiProcessingMetrics::record`], and the
/// total is derived on every read, so `total_time` always equals the sum of
/// the four stage times.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "MetricsDocument", from = "MetricsDocument")]
pub struct EdiProcessingMetrics {
    analyze_time: f64,
    enrich_time: f64,
    validate_time: f64,
    translate_time: f64,
}

impl EdiProcessingMetrics {
    /// Creates metrics with every stage at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the elapsed time of a stage, replacing any previous value
    pub fn record(&mut self, stage: Stage, elapsed: Duration) {
        let seconds = elapsed.as_secs_f64();
        match stage {
            Stage::Analyze => self.analyze_time = seconds,
            Stage::Enrich => self.enrich_time = seconds,
            Stage::Validate => self.validate_time = seconds,
            Stage::Translate => self.translate_time = seconds,
        }
    }

    pub fn analyze_time(&self) -> f64 {
        self.analyze_time
    }

    pub fn enrich_time(&self) -> f64 {
        self.enrich_time
    }

    pub fn validate_time(&self) -> f64 {
        self.validate_time
    }

    pub fn translate_time(&self) -> f64 {
        self.translate_time
    }

    /// Sum of the four stage times
    pub fn total_time(&self) -> f64 {
        self.analyze_time + self.enrich_time + self.validate_time + self.translate_time
    }
}

/// Wire representation carrying the derived total
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetricsDocument {
    #[serde(default)]
    analyze_time: f64,
    #[serde(default)]
    enrich_time: f64,
    #[serde(default)]
    validate_time: f64,
    #[serde(default)]
    translate_time: f64,
    #[serde(default)]
    total_time: f64,
}

impl From<EdiProcessingMetrics> for MetricsDocument {
    fn from(metrics: EdiProcessingMetrics) -> Self {
        Self {
            analyze_time: metrics.analyze_time,
            enrich_time: metrics.enrich_time,
            validate_time: metrics.validate_time,
            translate_time: metrics.translate_time,
            total_time: metrics.total_time(),
        }
    }
}

// total_time is ignored on input and recomputed on read
impl From<MetricsDocument> for EdiProcessingMetrics {
    fn from(document: MetricsDocument) -> Self {
        Self {
            analyze_time: document.analyze_time,
            enrich_time: document.enrich_time,
            validate_time: document.validate_time,
            translate_time: document.translate_time,
        }
    }
}
