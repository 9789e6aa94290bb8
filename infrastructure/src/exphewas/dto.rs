//! Wire DTOs for the ExPheWAS v1 API.
//!
//! The upstream is loose about shapes: gene lookups return an object or an
//! array, results come bare or wrapped under `"results"`, ids appear as
//! strings or numbers, and the label field varies per outcome. Everything
//! here is tolerant and funnels into the strict domain types.

use phenoscope_domain::{AnalysisKind, Association, OutcomeInfo};
use serde::Deserialize;

/// An id that may arrive as a JSON string or number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl RawId {
    pub fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

/// A response that may be a single object or an array of them.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    /// First element; `None` for an empty array.
    pub fn into_first(self) -> Option<T> {
        match self {
            Self::One(item) => Some(item),
            Self::Many(items) => items.into_iter().next(),
        }
    }
}

/// Gene lookup response body.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneInfoDto {
    #[serde(default)]
    pub ensembl_id: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
}

/// Results endpoint body: wrapped or bare.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ResultsEnvelope {
    Wrapped { results: Vec<ResultRowDto> },
    Bare(Vec<ResultRowDto>),
}

impl ResultsEnvelope {
    pub fn into_rows(self) -> Vec<ResultRowDto> {
        match self {
            Self::Wrapped { results } => results,
            Self::Bare(rows) => rows,
        }
    }
}

/// One association row as the upstream sends it.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultRowDto {
    #[serde(default)]
    pub analysis_type: Option<String>,
    #[serde(default, alias = "outcome")]
    pub outcome_id: Option<RawId>,
    #[serde(default)]
    pub id: Option<RawId>,
    #[serde(default)]
    pub outcome_string: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub p: Option<f64>,
    #[serde(default)]
    pub q: Option<f64>,
}

impl ResultRowDto {
    /// Convert into a domain row. Rows with no id at all are dropped.
    /// The `gene` tag is left empty for the caller to fill.
    pub fn into_association(self) -> Option<Association> {
        let outcome_id = self.outcome_id.or(self.id)?.into_string();
        let outcome_string = first_non_empty([self.outcome_string, self.description]);
        Some(Association {
            gene: String::new(),
            outcome_id,
            kind: self
                .analysis_type
                .as_deref()
                .and_then(AnalysisKind::parse_wire),
            outcome_string,
            label: None,
            p: self.p,
            q: self.q,
        })
    }
}

/// One outcome catalog entry as the upstream sends it.
#[derive(Debug, Clone, Deserialize)]
pub struct OutcomeDto {
    #[serde(default, alias = "outcome_id")]
    pub id: Option<RawId>,
    #[serde(default)]
    pub analysis_type: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub outcome_string: Option<String>,
}

impl OutcomeDto {
    /// Convert into a catalog entry, picking the first usable label field.
    /// Entries without an id are dropped.
    pub fn into_info(self) -> Option<OutcomeInfo> {
        let outcome_id = self.id?.into_string();
        let kind = self
            .analysis_type
            .as_deref()
            .and_then(AnalysisKind::parse_wire);
        let label = first_non_empty([self.label, self.description, self.name, self.outcome_string])
            .unwrap_or_default();
        Some(OutcomeInfo {
            outcome_id,
            label,
            kind,
        })
    }
}

fn first_non_empty<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .map(|s| s.trim().to_string())
        .find(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gene_lookup_object_shape() {
        let dto: OneOrMany<GeneInfoDto> =
            serde_json::from_str(r#"{"ensembl_id": "ENSG1", "symbol": "PCSK9"}"#).unwrap();
        let first = dto.into_first().unwrap();
        assert_eq!(first.ensembl_id.as_deref(), Some("ENSG1"));
        assert_eq!(first.symbol.as_deref(), Some("PCSK9"));
    }

    #[test]
    fn test_gene_lookup_array_shape() {
        let dto: OneOrMany<GeneInfoDto> = serde_json::from_str(
            r#"[{"ensembl_id": "ENSG1", "symbol": "PCSK9"}, {"ensembl_id": "ENSG2"}]"#,
        )
        .unwrap();
        assert_eq!(dto.into_first().unwrap().ensembl_id.as_deref(), Some("ENSG1"));
    }

    #[test]
    fn test_gene_lookup_empty_array() {
        let dto: OneOrMany<GeneInfoDto> = serde_json::from_str("[]").unwrap();
        assert!(dto.into_first().is_none());
    }

    #[test]
    fn test_results_wrapped_and_bare() {
        let wrapped: ResultsEnvelope = serde_json::from_str(
            r#"{"results": [{"analysis_type": "PHECODES", "outcome_id": "250.2", "p": 0.001}]}"#,
        )
        .unwrap();
        assert_eq!(wrapped.into_rows().len(), 1);

        let bare: ResultsEnvelope = serde_json::from_str(
            r#"[{"analysis_type": "PHECODES", "outcome_id": "250.2", "p": 0.001}]"#,
        )
        .unwrap();
        assert_eq!(bare.into_rows().len(), 1);
    }

    #[test]
    fn test_row_numeric_outcome_id() {
        let row: ResultRowDto =
            serde_json::from_str(r#"{"outcome_id": 1234, "p": 0.5}"#).unwrap();
        let assoc = row.into_association().unwrap();
        assert_eq!(assoc.outcome_id, "1234");
    }

    #[test]
    fn test_row_id_aliases() {
        let via_outcome: ResultRowDto =
            serde_json::from_str(r#"{"outcome": "O1"}"#).unwrap();
        assert_eq!(via_outcome.into_association().unwrap().outcome_id, "O1");

        let via_id: ResultRowDto = serde_json::from_str(r#"{"id": "O2"}"#).unwrap();
        assert_eq!(via_id.into_association().unwrap().outcome_id, "O2");
    }

    #[test]
    fn test_row_without_any_id_is_dropped() {
        let row: ResultRowDto = serde_json::from_str(r#"{"p": 0.5}"#).unwrap();
        assert!(row.into_association().is_none());
    }

    #[test]
    fn test_row_unknown_analysis_type_kept_unkinded() {
        let row: ResultRowDto =
            serde_json::from_str(r#"{"outcome_id": "O1", "analysis_type": "ICD10"}"#).unwrap();
        let assoc = row.into_association().unwrap();
        assert_eq!(assoc.kind, None);
    }

    #[test]
    fn test_row_outcome_string_falls_back_to_description() {
        let row: ResultRowDto = serde_json::from_str(
            r#"{"outcome_id": "O1", "description": "Type 2 diabetes"}"#,
        )
        .unwrap();
        let assoc = row.into_association().unwrap();
        assert_eq!(assoc.outcome_string.as_deref(), Some("Type 2 diabetes"));
    }

    #[test]
    fn test_outcome_label_fallback_order() {
        let with_label: OutcomeDto = serde_json::from_str(
            r#"{"id": "O1", "label": "HDL", "description": "ignored"}"#,
        )
        .unwrap();
        assert_eq!(with_label.into_info().unwrap().label, "HDL");

        let with_name: OutcomeDto =
            serde_json::from_str(r#"{"id": "O2", "label": "", "name": "Self-reported X"}"#)
                .unwrap();
        assert_eq!(with_name.into_info().unwrap().label, "Self-reported X");

        let bare: OutcomeDto = serde_json::from_str(r#"{"id": "O3"}"#).unwrap();
        assert_eq!(bare.into_info().unwrap().label, "");
    }

    #[test]
    fn test_outcome_id_alias_and_kind() {
        let dto: OutcomeDto = serde_json::from_str(
            r#"{"outcome_id": 42, "analysis_type": "CV_ENDPOINTS", "label": "MI"}"#,
        )
        .unwrap();
        let info = dto.into_info().unwrap();
        assert_eq!(info.outcome_id, "42");
        assert_eq!(info.kind, Some(AnalysisKind::CvEndpoints));
    }

    #[test]
    fn test_outcome_without_id_dropped() {
        let dto: OutcomeDto = serde_json::from_str(r#"{"label": "orphan"}"#).unwrap();
        assert!(dto.into_info().is_none());
    }
}
