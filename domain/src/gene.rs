//! Gene identifier handling.
//!
//! Users enter genes as symbols (`PCSK9`) or Ensembl ids (`ENSG00000169174`),
//! separated by commas or newlines. Parsing upper-cases everything because
//! the upstream lookup endpoints are case-sensitive.

use serde::{Deserialize, Serialize};

/// Parse a free-text gene list into identifiers.
///
/// Splits on commas and newlines, trims whitespace, drops empty segments,
/// and upper-cases. Order-preserving; duplicates are kept (the upstream
/// results are tagged per requested gene).
pub fn parse_gene_list(text: &str) -> Vec<String> {
    text.replace(',', "\n")
        .lines()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_uppercase)
        .collect()
}

/// Whether an identifier should be resolved through the Ensembl-id endpoint
/// rather than the symbol endpoint.
pub fn is_ensembl_id(identifier: &str) -> bool {
    identifier.to_ascii_uppercase().starts_with("ENSG")
}

/// A gene identifier resolved by the upstream service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedGene {
    /// Canonical Ensembl id, used for the results endpoint.
    pub ensembl_id: String,
    /// Display symbol used to tag result rows.
    pub symbol: String,
}

impl ResolvedGene {
    pub fn new(ensembl_id: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            ensembl_id: ensembl_id.into(),
            symbol: symbol.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_separators() {
        let out = parse_gene_list("METTL2A\n PCSK9,  APOB  \n\nENSG000000001");
        assert_eq!(out, vec!["METTL2A", "PCSK9", "APOB", "ENSG000000001"]);
    }

    #[test]
    fn test_parse_upper_cases() {
        assert_eq!(parse_gene_list("pcsk9"), vec!["PCSK9"]);
    }

    #[test]
    fn test_parse_empty_and_whitespace() {
        assert!(parse_gene_list("").is_empty());
        assert!(parse_gene_list("  ,\n ,,").is_empty());
    }

    #[test]
    fn test_parse_keeps_duplicates_in_order() {
        assert_eq!(parse_gene_list("BRCA1,brca1"), vec!["BRCA1", "BRCA1"]);
    }

    #[test]
    fn test_is_ensembl_id() {
        assert!(is_ensembl_id("ENSG00000169174"));
        assert!(is_ensembl_id("ensg00000169174"));
        assert!(!is_ensembl_id("PCSK9"));
        assert!(!is_ensembl_id(""));
    }
}
