//! Analysis categories, cohort subsets, and significance metrics.
//!
//! The upstream service groups every phenotype outcome into one of four
//! analysis types and runs each analysis on one of three cohort subsets.
//! The wire names here must match the upstream API verbatim.

use crate::core::error::InputError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Phenotype category assigned by the upstream service to every outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AnalysisKind {
    #[serde(rename = "CONTINUOUS_VARIABLE")]
    ContinuousVariable,
    #[serde(rename = "CV_ENDPOINTS")]
    CvEndpoints,
    #[serde(rename = "SELF_REPORTED")]
    SelfReported,
    #[serde(rename = "PHECODES")]
    Phecodes,
}

impl AnalysisKind {
    /// Display order used by tables and the chart x axis.
    pub const ORDER: [AnalysisKind; 4] = [
        AnalysisKind::ContinuousVariable,
        AnalysisKind::CvEndpoints,
        AnalysisKind::SelfReported,
        AnalysisKind::Phecodes,
    ];

    /// Upstream wire name (the `analysis_type` field value).
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::ContinuousVariable => "CONTINUOUS_VARIABLE",
            Self::CvEndpoints => "CV_ENDPOINTS",
            Self::SelfReported => "SELF_REPORTED",
            Self::Phecodes => "PHECODES",
        }
    }

    /// Human-readable label for headers and the chart axis.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ContinuousVariable => "Continuous variables",
            Self::CvEndpoints => "Cardiovascular endpoints",
            Self::SelfReported => "Self reported",
            Self::Phecodes => "Phecodes",
        }
    }

    /// Position on the chart x axis.
    pub fn order_index(&self) -> usize {
        Self::ORDER.iter().position(|k| k == self).unwrap_or(0)
    }

    /// Tolerant parse of an upstream `analysis_type` value.
    ///
    /// Unknown values yield `None` — upstream rows with categories this
    /// build does not know about are kept but never matched by filters.
    pub fn parse_wire(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "CONTINUOUS_VARIABLE" => Some(Self::ContinuousVariable),
            "CV_ENDPOINTS" => Some(Self::CvEndpoints),
            "SELF_REPORTED" => Some(Self::SelfReported),
            "PHECODES" => Some(Self::Phecodes),
            _ => None,
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for AnalysisKind {
    type Err = InputError;

    /// Accepts the wire name (any case) plus short CLI aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(kind) = Self::parse_wire(s) {
            return Ok(kind);
        }
        match s.trim().to_ascii_lowercase().as_str() {
            "continuous" => Ok(Self::ContinuousVariable),
            "cv" => Ok(Self::CvEndpoints),
            "self" | "self-reported" => Ok(Self::SelfReported),
            "phecode" | "phecodes" => Ok(Self::Phecodes),
            _ => Err(InputError::UnknownAnalysisKind(s.to_string())),
        }
    }
}

/// Cohort subset selector for the upstream `analysis_subset` parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnalysisSubset {
    #[default]
    #[serde(rename = "BOTH")]
    Both,
    #[serde(rename = "FEMALE_ONLY")]
    FemaleOnly,
    #[serde(rename = "MALE_ONLY")]
    MaleOnly,
}

impl AnalysisSubset {
    /// Value sent as the `analysis_subset` query parameter.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Both => "BOTH",
            Self::FemaleOnly => "FEMALE_ONLY",
            Self::MaleOnly => "MALE_ONLY",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Both => "Both",
            Self::FemaleOnly => "Female only",
            Self::MaleOnly => "Male only",
        }
    }

    /// Next subset in display order, wrapping around. Used by the TUI toggle.
    pub fn cycled(&self) -> Self {
        match self {
            Self::Both => Self::MaleOnly,
            Self::MaleOnly => Self::FemaleOnly,
            Self::FemaleOnly => Self::Both,
        }
    }
}

impl fmt::Display for AnalysisSubset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for AnalysisSubset {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "both" => Ok(Self::Both),
            "female_only" | "female" => Ok(Self::FemaleOnly),
            "male_only" | "male" => Ok(Self::MaleOnly),
            _ => Err(InputError::UnknownSubset(s.to_string())),
        }
    }
}

/// Which association statistic drives thresholding, sorting, and plotting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    #[default]
    #[serde(rename = "p")]
    P,
    #[serde(rename = "q")]
    Q,
}

impl Metric {
    pub fn column(&self) -> &'static str {
        match self {
            Self::P => "p",
            Self::Q => "q",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::P => "p-value",
            Self::Q => "q-value (FDR)",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::P => Self::Q,
            Self::Q => Self::P,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Metric {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "p" | "p-value" => Ok(Self::P),
            "q" | "q-value" | "fdr" => Ok(Self::Q),
            _ => Err(InputError::UnknownMetric(s.to_string())),
        }
    }
}

/// Threshold choices offered by the UI, most permissive first.
pub const THRESHOLD_PRESETS: [f64; 4] = [1.0, 0.05, 0.01, 0.001];

/// Validate a significance threshold from config or CLI input.
pub fn validate_threshold(value: f64) -> Result<f64, InputError> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(value)
    } else {
        Err(InputError::InvalidThreshold(value))
    }
}
