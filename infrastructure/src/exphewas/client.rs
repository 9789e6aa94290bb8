//! reqwest adapter for the ExPheWAS v1 API.

use super::dto::{GeneInfoDto, OneOrMany, OutcomeDto, ResultsEnvelope};
use async_trait::async_trait;
use phenoscope_application::ports::phewas_gateway::{PhewasGateway, UpstreamError};
use phenoscope_domain::{
    AnalysisSubset, Association, OutcomeCatalog, ResolvedGene, is_ensembl_id,
};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Production endpoint of the ExPheWAS v1 API.
pub const DEFAULT_API_URL: &str = "https://exphewas.statgen.org/v1/api";

/// Gene lookups are small and should answer quickly.
const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(30);
/// Results and catalog responses run to a few MB.
const DEFAULT_RESULTS_TIMEOUT: Duration = Duration::from_secs(60);

/// HTTP client for the ExPheWAS service.
///
/// The outcome catalog is fetched at most once per process; a failed fetch
/// is not cached, so the next query retries it.
pub struct ExphewasClient {
    client: reqwest::Client,
    base_url: String,
    lookup_timeout: Duration,
    results_timeout: Duration,
    catalog: OnceCell<OutcomeCatalog>,
}

impl ExphewasClient {
    /// Build a client against `base_url` (no trailing slash required).
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("phenoscope/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
            results_timeout: DEFAULT_RESULTS_TIMEOUT,
            catalog: OnceCell::new(),
        })
    }

    pub fn with_timeouts(mut self, lookup: Duration, results: Duration) -> Self {
        self.lookup_timeout = lookup;
        self.results_timeout = results;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<T, UpstreamError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(query)
            .timeout(timeout)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_timeout() {
                UpstreamError::Timeout
            } else {
                UpstreamError::Decode(e.to_string())
            }
        })
    }

    async fn fetch_catalog(&self) -> Result<OutcomeCatalog, UpstreamError> {
        let outcomes: Vec<OutcomeDto> = self
            .get_json("outcome", &[], self.results_timeout)
            .await?;
        let catalog = OutcomeCatalog::from_entries(
            outcomes.into_iter().filter_map(OutcomeDto::into_info).collect(),
        );
        info!("Loaded outcome catalog: {} entries", catalog.len());
        Ok(catalog)
    }
}

#[async_trait]
impl PhewasGateway for ExphewasClient {
    async fn resolve_gene(&self, identifier: &str) -> Result<Option<ResolvedGene>, UpstreamError> {
        if is_ensembl_id(identifier) {
            let dto: GeneInfoDto = match self
                .get_json(&format!("gene/ensembl/{identifier}"), &[], self.lookup_timeout)
                .await
            {
                Ok(dto) => dto,
                // Unknown Ensembl id is "no such gene", not an upstream fault
                Err(UpstreamError::Status { status: 404, .. }) => return Ok(None),
                Err(e) => return Err(e),
            };
            return Ok(Some(ResolvedGene::new(
                dto.ensembl_id.unwrap_or_else(|| identifier.to_string()),
                dto.symbol.unwrap_or_else(|| identifier.to_string()),
            )));
        }

        let body: OneOrMany<GeneInfoDto> = match self
            .get_json(&format!("gene/name/{identifier}"), &[], self.lookup_timeout)
            .await
        {
            Ok(body) => body,
            Err(UpstreamError::Status { status: 404, .. }) => return Ok(None),
            Err(e) => return Err(e),
        };

        // The name endpoint may answer with several candidates; first wins.
        // A candidate without an Ensembl id cannot be queried for results.
        Ok(body.into_first().and_then(|dto| {
            dto.ensembl_id.map(|ensembl_id| {
                ResolvedGene::new(
                    ensembl_id,
                    dto.symbol.unwrap_or_else(|| identifier.to_string()),
                )
            })
        }))
    }

    async fn gene_results(
        &self,
        ensembl_id: &str,
        subset: AnalysisSubset,
    ) -> Result<Vec<Association>, UpstreamError> {
        let envelope: ResultsEnvelope = self
            .get_json(
                &format!("gene/{ensembl_id}/results"),
                &[("analysis_subset", subset.wire_name())],
                self.results_timeout,
            )
            .await?;

        Ok(envelope
            .into_rows()
            .into_iter()
            .filter_map(|row| row.into_association())
            .collect())
    }

    async fn outcome_catalog(&self) -> Result<OutcomeCatalog, UpstreamError> {
        self.catalog
            .get_or_try_init(|| self.fetch_catalog())
            .await
            .cloned()
    }
}

fn map_transport_error(error: reqwest::Error) -> UpstreamError {
    if error.is_timeout() {
        UpstreamError::Timeout
    } else {
        UpstreamError::Network(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = ExphewasClient::new("https://example.org/v1/api/").unwrap();
        assert_eq!(client.base_url(), "https://example.org/v1/api");
    }

    #[test]
    fn test_default_api_url_shape() {
        assert!(DEFAULT_API_URL.starts_with("https://"));
        assert!(DEFAULT_API_URL.ends_with("/v1/api"));
    }

    #[test]
    fn test_timeout_builder() {
        let client = ExphewasClient::new(DEFAULT_API_URL)
            .unwrap()
            .with_timeouts(Duration::from_secs(5), Duration::from_secs(10));
        assert_eq!(client.lookup_timeout, Duration::from_secs(5));
        assert_eq!(client.results_timeout, Duration::from_secs(10));
    }
}
