//! Query controller task.
//!
//! Runs as an actor next to the TUI event loop: receives [`TuiCommand`]s,
//! spawns one `LoadPhenotypes` task per accepted query, and enforces
//! last-request-wins by cancelling the previous token before every new
//! query. Events carry the [`QueryId`] so the state can drop stale ones
//! even if a superseded task manages to finish first.

use super::event::{QueryId, TuiCommand, TuiEvent};
use phenoscope_application::{
    LoadPhenotypesError, LoadPhenotypesInput, LoadPhenotypesUseCase, QueryProgressNotifier,
};
use phenoscope_domain::{AnalysisKind, AnalysisSubset, truncate};
use std::collections::BTreeSet;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Actor loop: drain commands until `Quit` or the channel closes.
pub async fn controller_task(
    mut controller: QueryController,
    mut cmd_rx: mpsc::UnboundedReceiver<TuiCommand>,
) {
    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            TuiCommand::RunQuery {
                genes_text,
                subset,
                categories,
            } => controller.start_query(genes_text, subset, categories),
            TuiCommand::CancelQuery => controller.cancel_current(),
            TuiCommand::Quit => break,
        }
    }
    controller.cancel_current();
}

pub struct QueryController {
    use_case: LoadPhenotypesUseCase,
    event_tx: mpsc::UnboundedSender<TuiEvent>,
    next_id: u64,
    current_cancel: Option<CancellationToken>,
}

impl QueryController {
    pub fn new(use_case: LoadPhenotypesUseCase, event_tx: mpsc::UnboundedSender<TuiEvent>) -> Self {
        Self {
            use_case,
            event_tx,
            next_id: 0,
            current_cancel: None,
        }
    }

    /// Accept a query: supersede the in-flight one and spawn a new task.
    fn start_query(
        &mut self,
        genes_text: String,
        subset: AnalysisSubset,
        categories: BTreeSet<AnalysisKind>,
    ) {
        self.cancel_current();

        self.next_id += 1;
        let id = QueryId(self.next_id);
        let token = CancellationToken::new();
        self.current_cancel = Some(token.clone());

        debug!("Starting query {:?}: {}", id, genes_text);
        let _ = self.event_tx.send(TuiEvent::QueryStarted {
            id,
            summary: truncate(genes_text.trim(), 60),
        });

        let input = LoadPhenotypesInput::from_text(&genes_text, subset, categories);
        let use_case = self.use_case.clone();
        let event_tx = self.event_tx.clone();

        tokio::spawn(async move {
            let progress = ChannelProgress {
                event_tx: event_tx.clone(),
                id,
            };
            let event = tokio::select! {
                _ = token.cancelled() => TuiEvent::QueryCancelled { id },
                result = use_case.execute(input, &progress, &token) => match result {
                    Ok(report) => TuiEvent::QueryFinished { id, report },
                    Err(LoadPhenotypesError::Input(error)) => TuiEvent::QueryInvalid {
                        id,
                        message: error.to_string(),
                    },
                    Err(LoadPhenotypesError::Cancelled) => TuiEvent::QueryCancelled { id },
                },
            };
            let _ = event_tx.send(event);
        });
    }

    fn cancel_current(&mut self) {
        if let Some(token) = self.current_cancel.take() {
            token.cancel();
        }
    }
}

/// Progress port bridging per-gene callbacks onto the event channel.
struct ChannelProgress {
    event_tx: mpsc::UnboundedSender<TuiEvent>,
    id: QueryId,
}

impl ChannelProgress {
    fn notice(&self, line: String) {
        let _ = self.event_tx.send(TuiEvent::GeneNotice { id: self.id, line });
    }
}

impl QueryProgressNotifier for ChannelProgress {
    fn on_gene_started(&self, _identifier: &str) {
        // The loading spinner already communicates activity
    }

    fn on_gene_loaded(&self, symbol: &str, rows: usize) {
        self.notice(format!("{symbol}: {rows} rows."));
    }

    fn on_gene_unresolved(&self, identifier: &str) {
        self.notice(format!("! Could not resolve '{identifier}' - skipping."));
    }

    fn on_gene_failed(&self, identifier: &str, message: &str) {
        self.notice(format!("{identifier}: ERROR {message}"));
    }

    fn on_catalog_unavailable(&self, message: &str) {
        self.notice(format!("! Outcome catalog unavailable: {message}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use phenoscope_application::ports::phewas_gateway::{PhewasGateway, UpstreamError};
    use phenoscope_domain::{Association, OutcomeCatalog, ResolvedGene};
    use std::sync::Arc;
    use std::time::Duration;

    /// Gateway that answers instantly, except for the gene "SLOW".
    struct TimedGateway;

    #[async_trait]
    impl PhewasGateway for TimedGateway {
        async fn resolve_gene(
            &self,
            identifier: &str,
        ) -> Result<Option<ResolvedGene>, UpstreamError> {
            if identifier == "SLOW" {
                tokio::time::sleep(Duration::from_millis(200)).await;
            }
            Ok(Some(ResolvedGene::new(
                format!("ENSG_{identifier}"),
                identifier,
            )))
        }

        async fn gene_results(
            &self,
            ensembl_id: &str,
            _subset: AnalysisSubset,
        ) -> Result<Vec<Association>, UpstreamError> {
            Ok(vec![Association {
                gene: String::new(),
                outcome_id: format!("{ensembl_id}-O1"),
                kind: Some(AnalysisKind::Phecodes),
                outcome_string: None,
                label: None,
                p: Some(0.001),
                q: None,
            }])
        }

        async fn outcome_catalog(&self) -> Result<OutcomeCatalog, UpstreamError> {
            Ok(OutcomeCatalog::new())
        }
    }

    fn setup() -> (
        mpsc::UnboundedSender<TuiCommand>,
        mpsc::UnboundedReceiver<TuiEvent>,
    ) {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let use_case = LoadPhenotypesUseCase::new(Arc::new(TimedGateway));
        let controller = QueryController::new(use_case, event_tx);
        tokio::spawn(controller_task(controller, cmd_rx));
        (cmd_tx, event_rx)
    }

    fn run_query(genes: &str) -> TuiCommand {
        TuiCommand::RunQuery {
            genes_text: genes.to_string(),
            subset: AnalysisSubset::Both,
            categories: BTreeSet::new(),
        }
    }

    #[tokio::test]
    async fn test_second_query_supersedes_first() {
        let (cmd_tx, mut event_rx) = setup();

        cmd_tx.send(run_query("SLOW")).unwrap();
        cmd_tx.send(run_query("FAST")).unwrap();

        let mut finished = Vec::new();
        let mut cancelled = Vec::new();
        while finished.is_empty() || cancelled.is_empty() {
            match tokio::time::timeout(Duration::from_secs(2), event_rx.recv())
                .await
                .expect("controller went quiet")
                .expect("channel closed")
            {
                TuiEvent::QueryFinished { id, report } => finished.push((id, report)),
                TuiEvent::QueryCancelled { id } => cancelled.push(id),
                _ => {}
            }
        }

        // The slow first query was cancelled; only the second finished
        assert_eq!(cancelled, vec![QueryId(1)]);
        assert_eq!(finished.len(), 1);
        let (id, report) = &finished[0];
        assert_eq!(*id, QueryId(2));
        assert_eq!(report.table.genes(), vec!["FAST"]);
    }

    #[tokio::test]
    async fn test_empty_input_reports_invalid() {
        let (cmd_tx, mut event_rx) = setup();

        cmd_tx.send(run_query("  ")).unwrap();

        loop {
            match tokio::time::timeout(Duration::from_secs(2), event_rx.recv())
                .await
                .expect("controller went quiet")
                .expect("channel closed")
            {
                TuiEvent::QueryInvalid { id, message } => {
                    assert_eq!(id, QueryId(1));
                    assert!(message.contains("at least one gene"));
                    break;
                }
                TuiEvent::QueryStarted { .. } => {}
                other => panic!("unexpected event: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_explicit_cancel_emits_cancelled() {
        let (cmd_tx, mut event_rx) = setup();

        cmd_tx.send(run_query("SLOW")).unwrap();
        cmd_tx.send(TuiCommand::CancelQuery).unwrap();

        loop {
            match tokio::time::timeout(Duration::from_secs(2), event_rx.recv())
                .await
                .expect("controller went quiet")
                .expect("channel closed")
            {
                TuiEvent::QueryCancelled { id } => {
                    assert_eq!(id, QueryId(1));
                    break;
                }
                TuiEvent::QueryStarted { .. } | TuiEvent::GeneNotice { .. } => {}
                other => panic!("unexpected event: {other:?}"),
            }
        }
    }
}
