//! Domain error types

use thiserror::Error;

/// Input validation errors.
///
/// Raised while building a query, before any upstream request is attempted.
/// An `InputError` never reaches the network layer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Enter at least one gene (symbol or ENSG)")]
    EmptyGeneList,

    #[error("Unknown phenotype category: {0}")]
    UnknownAnalysisKind(String),

    #[error("Unknown analysis subset: {0}")]
    UnknownSubset(String),

    #[error("Unknown metric '{0}' (expected 'p' or 'q')")]
    UnknownMetric(String),

    #[error("Invalid threshold {0} (must be within (0, 1])")]
    InvalidThreshold(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_gene_list_display() {
        let error = InputError::EmptyGeneList;
        assert_eq!(error.to_string(), "Enter at least one gene (symbol or ENSG)");
    }

    #[test]
    fn test_unknown_category_carries_input() {
        let error = InputError::UnknownAnalysisKind("ICD10".to_string());
        assert!(error.to_string().contains("ICD10"));
    }
}
