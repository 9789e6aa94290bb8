//! TUI application state
//!
//! Single source of truth for everything the TUI renders. Updated by key
//! actions in the event loop and by [`TuiEvent`]s from the controller task.

use super::event::{QueryId, TuiEvent};
use super::mode::InputMode;
use phenoscope_application::{QueryParams, QueryReport};
use phenoscope_domain::{
    AnalysisKind, AnalysisSubset, THRESHOLD_PRESETS, TidyRow, ResultTable,
};
use std::collections::BTreeSet;
use std::time::Instant;

/// Display state of the query region: Idle → Loading → {Displaying |
/// ErrorShown} → Idle on the next query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewPhase {
    /// No query has run yet (or the last one was invalid)
    Idle,
    /// A query is in flight
    Loading,
    /// Results (possibly the explicit empty set) are on screen
    Displaying,
    /// The last query failed upstream; prior results stay visible
    ErrorShown(String),
}

impl ViewPhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Status-line label.
    pub fn label(&self) -> &str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Displaying => "ready",
            Self::ErrorShown(_) => "upstream error",
        }
    }
}

/// How many log lines the pane retains.
const MAX_LOG_LINES: usize = 500;

/// Central TUI state — owned by the TuiApp select! loop
pub struct TuiState {
    // -- Mode --
    pub mode: InputMode,

    // -- Query inputs --
    pub gene_input: String,
    pub cursor_pos: usize,
    pub subset: AnalysisSubset,
    pub categories: BTreeSet<AnalysisKind>,
    pub params: QueryParams,

    // -- Query lifecycle --
    pub phase: ViewPhase,
    /// Newest submitted query; events tagged older are stale and dropped.
    pub latest_query: Option<QueryId>,
    /// Last displayed table (kept visible under ErrorShown).
    pub table: ResultTable,

    // -- Panels --
    pub active_tab: usize,
    pub table_scroll: usize,
    pub log_lines: Vec<String>,

    // -- Overlay --
    pub show_help: bool,
    pub flash_message: Option<(String, Instant)>,
    pub spinner_frame: usize,

    // -- Lifecycle --
    pub should_quit: bool,
}

impl TuiState {
    pub fn new(
        gene_input: String,
        subset: AnalysisSubset,
        categories: BTreeSet<AnalysisKind>,
        params: QueryParams,
    ) -> Self {
        let cursor_pos = gene_input.len();
        Self {
            mode: InputMode::default(),
            gene_input,
            cursor_pos,
            subset,
            categories,
            params,
            phase: ViewPhase::Idle,
            latest_query: None,
            table: ResultTable::new(),
            active_tab: 0,
            table_scroll: 0,
            log_lines: Vec::new(),
            show_help: false,
            flash_message: None,
            spinner_frame: 0,
            should_quit: false,
        }
    }

    // -- Controller events --

    /// Apply a controller event, discarding anything from a stale query.
    pub fn apply(&mut self, event: TuiEvent) {
        let id = event.query_id();
        match event {
            TuiEvent::QueryStarted { id, summary } => {
                // Newest query wins from this moment on
                if self.latest_query.is_none_or(|latest| id > latest) {
                    self.latest_query = Some(id);
                    self.phase = ViewPhase::Loading;
                    self.table_scroll = 0;
                    self.push_log(format!("Query: {summary}"));
                }
            }
            TuiEvent::GeneNotice { line, .. } => {
                if self.is_current(id) {
                    self.push_log(line);
                }
            }
            TuiEvent::QueryFinished { report, .. } => {
                if self.is_current(id) {
                    self.finish_query(report);
                }
            }
            TuiEvent::QueryInvalid { message, .. } => {
                if self.is_current(id) {
                    // Input errors never reach the network; back to Idle
                    self.phase = ViewPhase::Idle;
                    self.push_log(message.clone());
                    self.set_flash(message);
                }
            }
            TuiEvent::QueryCancelled { .. } => {
                // Superseded queries vanish silently; only a cancel of the
                // newest query returns the region to Idle.
                if self.is_current(id) && self.phase.is_loading() {
                    self.phase = ViewPhase::Idle;
                    self.push_log("Query cancelled.".to_string());
                }
            }
        }
    }

    fn is_current(&self, id: QueryId) -> bool {
        self.latest_query == Some(id)
    }

    fn finish_query(&mut self, report: QueryReport) {
        if report.is_upstream_failure() {
            let notice = report
                .outcomes
                .iter()
                .map(|o| o.notice())
                .next_back()
                .unwrap_or_else(|| "upstream error".to_string());
            for line in report.notices() {
                self.push_log(line);
            }
            // Defined policy: prior results remain visible under the notice
            self.phase = ViewPhase::ErrorShown(notice);
            return;
        }

        if !report.catalog_available {
            self.push_log("! Outcome catalog unavailable; labels fall back.".to_string());
        }
        if report.table.is_empty() {
            self.push_log("No data loaded.".to_string());
        } else {
            self.push_log(format!("Total rows combined: {}", report.table.len()));
        }
        self.table = report.table;
        self.phase = ViewPhase::Displaying;
    }

    // -- Derived views --

    /// The category shown by the active results tab.
    pub fn active_kind(&self) -> AnalysisKind {
        AnalysisKind::ORDER[self.active_tab % AnalysisKind::ORDER.len()]
    }

    /// Thresholded top-N rows for one results tab.
    pub fn visible_rows(&self, kind: AnalysisKind) -> Vec<TidyRow> {
        self.table
            .apply_threshold(self.params.metric, self.params.threshold)
            .top_n_per_gene(kind, self.params.limit)
            .tidy()
    }

    // -- Input editing (UTF-8 safe) --

    pub fn insert_char(&mut self, c: char) {
        self.gene_input.insert(self.cursor_pos, c);
        self.cursor_pos += c.len_utf8();
    }

    pub fn delete_char(&mut self) {
        if self.cursor_pos > 0 {
            let prev_len = self.gene_input[..self.cursor_pos]
                .chars()
                .next_back()
                .map(|c| c.len_utf8())
                .unwrap_or(0);
            self.gene_input.remove(self.cursor_pos - prev_len);
            self.cursor_pos -= prev_len;
        }
    }

    pub fn cursor_left(&mut self) {
        if self.cursor_pos > 0 {
            let prev_len = self.gene_input[..self.cursor_pos]
                .chars()
                .next_back()
                .map(|c| c.len_utf8())
                .unwrap_or(0);
            self.cursor_pos -= prev_len;
        }
    }

    pub fn cursor_right(&mut self) {
        if self.cursor_pos < self.gene_input.len() {
            let next_len = self.gene_input[self.cursor_pos..]
                .chars()
                .next()
                .map(|c| c.len_utf8())
                .unwrap_or(0);
            self.cursor_pos += next_len;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_pos = self.gene_input.len();
    }

    // -- Query knobs --

    pub fn toggle_category(&mut self, index: usize) {
        let Some(kind) = AnalysisKind::ORDER.get(index).copied() else {
            return;
        };
        if !self.categories.remove(&kind) {
            self.categories.insert(kind);
        }
    }

    pub fn cycle_subset(&mut self) {
        self.subset = self.subset.cycled();
    }

    pub fn toggle_metric(&mut self) {
        self.params.metric = self.params.metric.toggled();
    }

    pub fn cycle_threshold(&mut self) {
        let current = THRESHOLD_PRESETS
            .iter()
            .position(|&t| t == self.params.threshold)
            .unwrap_or(0);
        self.params.threshold = THRESHOLD_PRESETS[(current + 1) % THRESHOLD_PRESETS.len()];
    }

    pub fn toggle_log_scale(&mut self) {
        self.params.log_scale = !self.params.log_scale;
    }

    pub fn toggle_legend(&mut self) {
        self.params.show_legend = !self.params.show_legend;
    }

    // -- Tabs and scrolling --

    pub fn next_tab(&mut self) {
        self.active_tab = (self.active_tab + 1) % AnalysisKind::ORDER.len();
        self.table_scroll = 0;
    }

    pub fn prev_tab(&mut self) {
        self.active_tab =
            (self.active_tab + AnalysisKind::ORDER.len() - 1) % AnalysisKind::ORDER.len();
        self.table_scroll = 0;
    }

    pub fn scroll_up(&mut self) {
        self.table_scroll = self.table_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.table_scroll = self.table_scroll.saturating_add(1);
    }

    // -- Log and flash --

    pub fn push_log(&mut self, line: String) {
        self.log_lines.push(line);
        if self.log_lines.len() > MAX_LOG_LINES {
            let excess = self.log_lines.len() - MAX_LOG_LINES;
            self.log_lines.drain(..excess);
        }
    }

    pub fn set_flash(&mut self, msg: impl Into<String>) {
        self.flash_message = Some((msg.into(), Instant::now()));
    }

    /// Clear flash if older than the given duration; advance the spinner.
    pub fn on_tick(&mut self, flash_max_age: std::time::Duration) {
        if let Some((_, created)) = &self.flash_message
            && created.elapsed() > flash_max_age
        {
            self.flash_message = None;
        }
        if self.phase.is_loading() {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phenoscope_application::GeneOutcome;
    use phenoscope_application::ports::phewas_gateway::UpstreamError;
    use phenoscope_domain::Association;

    fn state() -> TuiState {
        TuiState::new(
            "PCSK9".to_string(),
            AnalysisSubset::Both,
            BTreeSet::new(),
            QueryParams::default(),
        )
    }

    fn loaded_report(gene: &str, rows: usize) -> QueryReport {
        let associations = (0..rows)
            .map(|i| Association {
                gene: gene.to_string(),
                outcome_id: format!("O{i}"),
                kind: Some(AnalysisKind::Phecodes),
                outcome_string: None,
                label: Some(format!("phenotype {i}")),
                p: Some(0.001),
                q: Some(0.002),
            })
            .collect();
        QueryReport {
            table: ResultTable::from_rows(associations),
            outcomes: vec![GeneOutcome::Loaded {
                symbol: gene.to_string(),
                rows,
            }],
            catalog_available: true,
        }
    }

    fn failed_report() -> QueryReport {
        QueryReport {
            table: ResultTable::new(),
            outcomes: vec![GeneOutcome::Failed {
                identifier: "PCSK9".into(),
                error: UpstreamError::Status {
                    status: 500,
                    message: "Internal Server Error".into(),
                },
            }],
            catalog_available: true,
        }
    }

    fn started(id: u64) -> TuiEvent {
        TuiEvent::QueryStarted {
            id: QueryId(id),
            summary: format!("query {id}"),
        }
    }

    #[test]
    fn test_phase_idle_to_loading_to_displaying() {
        let mut state = state();
        assert_eq!(state.phase, ViewPhase::Idle);

        state.apply(started(1));
        assert_eq!(state.phase, ViewPhase::Loading);

        state.apply(TuiEvent::QueryFinished {
            id: QueryId(1),
            report: loaded_report("PCSK9", 3),
        });
        assert_eq!(state.phase, ViewPhase::Displaying);
        assert_eq!(state.table.len(), 3);
    }

    #[test]
    fn test_stale_results_are_discarded() {
        // Query A, then B before A resolves; only B's results display
        let mut state = state();
        state.apply(started(1));
        state.apply(started(2));

        // A finishes late
        state.apply(TuiEvent::QueryFinished {
            id: QueryId(1),
            report: loaded_report("STALE", 9),
        });
        assert_eq!(state.phase, ViewPhase::Loading);
        assert!(state.table.is_empty());

        // B finishes
        state.apply(TuiEvent::QueryFinished {
            id: QueryId(2),
            report: loaded_report("FRESH", 2),
        });
        assert_eq!(state.phase, ViewPhase::Displaying);
        assert_eq!(state.table.genes(), vec!["FRESH"]);
    }

    #[test]
    fn test_out_of_order_started_events() {
        let mut state = state();
        state.apply(started(2));
        // A late QueryStarted for an older query must not regress latest
        state.apply(started(1));
        assert_eq!(state.latest_query, Some(QueryId(2)));
    }

    #[test]
    fn test_upstream_failure_keeps_prior_table() {
        let mut state = state();
        state.apply(started(1));
        state.apply(TuiEvent::QueryFinished {
            id: QueryId(1),
            report: loaded_report("PCSK9", 3),
        });

        state.apply(started(2));
        state.apply(TuiEvent::QueryFinished {
            id: QueryId(2),
            report: failed_report(),
        });

        assert!(matches!(state.phase, ViewPhase::ErrorShown(_)));
        // Prior results remain visible
        assert_eq!(state.table.len(), 3);
    }

    #[test]
    fn test_empty_result_replaces_table() {
        let mut state = state();
        state.apply(started(1));
        state.apply(TuiEvent::QueryFinished {
            id: QueryId(1),
            report: loaded_report("PCSK9", 3),
        });
        state.apply(started(2));
        state.apply(TuiEvent::QueryFinished {
            id: QueryId(2),
            report: loaded_report("PCSK9", 0),
        });
        assert_eq!(state.phase, ViewPhase::Displaying);
        assert!(state.table.is_empty());
        assert!(state.log_lines.iter().any(|l| l == "No data loaded."));
    }

    #[test]
    fn test_invalid_input_returns_to_idle() {
        let mut state = state();
        state.apply(started(1));
        state.apply(TuiEvent::QueryInvalid {
            id: QueryId(1),
            message: "Enter at least one gene (symbol or ENSG)".into(),
        });
        assert_eq!(state.phase, ViewPhase::Idle);
        assert!(state.flash_message.is_some());
    }

    #[test]
    fn test_cancel_of_current_query_goes_idle() {
        let mut state = state();
        state.apply(started(1));
        state.apply(TuiEvent::QueryCancelled { id: QueryId(1) });
        assert_eq!(state.phase, ViewPhase::Idle);
    }

    #[test]
    fn test_cancel_of_stale_query_ignored() {
        let mut state = state();
        state.apply(started(1));
        state.apply(started(2));
        // Query 1 reports its cancellation after being superseded
        state.apply(TuiEvent::QueryCancelled { id: QueryId(1) });
        assert_eq!(state.phase, ViewPhase::Loading);
    }

    #[test]
    fn test_stale_gene_notices_dropped() {
        let mut state = state();
        state.apply(started(1));
        state.apply(started(2));
        let before = state.log_lines.len();
        state.apply(TuiEvent::GeneNotice {
            id: QueryId(1),
            line: "STALE: 4 rows.".into(),
        });
        assert_eq!(state.log_lines.len(), before);
    }

    #[test]
    fn test_input_editing() {
        let mut state = TuiState::new(
            String::new(),
            AnalysisSubset::Both,
            BTreeSet::new(),
            QueryParams::default(),
        );
        state.insert_char('a');
        state.insert_char('b');
        assert_eq!(state.gene_input, "ab");
        assert_eq!(state.cursor_pos, 2);

        state.delete_char();
        assert_eq!(state.gene_input, "a");

        state.cursor_home();
        assert_eq!(state.cursor_pos, 0);
        state.cursor_right();
        assert_eq!(state.cursor_pos, 1);
        state.cursor_left();
        assert_eq!(state.cursor_pos, 0);
    }

    #[test]
    fn test_toggle_category_twice_restores() {
        let mut state = state();
        state.toggle_category(1);
        assert!(state.categories.contains(&AnalysisKind::CvEndpoints));
        state.toggle_category(1);
        assert!(state.categories.is_empty());
        // Out of range is a no-op
        state.toggle_category(9);
        assert!(state.categories.is_empty());
    }

    #[test]
    fn test_cycle_threshold_walks_presets() {
        let mut state = state();
        assert_eq!(state.params.threshold, 0.05);
        state.cycle_threshold();
        assert_eq!(state.params.threshold, 0.01);
        state.cycle_threshold();
        assert_eq!(state.params.threshold, 0.001);
        state.cycle_threshold();
        assert_eq!(state.params.threshold, 1.0);
        state.cycle_threshold();
        assert_eq!(state.params.threshold, 0.05);
    }

    #[test]
    fn test_tab_wrapping() {
        let mut state = state();
        assert_eq!(state.active_kind(), AnalysisKind::ContinuousVariable);
        state.prev_tab();
        assert_eq!(state.active_kind(), AnalysisKind::Phecodes);
        state.next_tab();
        assert_eq!(state.active_kind(), AnalysisKind::ContinuousVariable);
    }

    #[test]
    fn test_log_capped() {
        let mut state = state();
        for i in 0..(MAX_LOG_LINES + 50) {
            state.push_log(format!("line {i}"));
        }
        assert_eq!(state.log_lines.len(), MAX_LOG_LINES);
        assert_eq!(state.log_lines.last().unwrap(), &format!("line {}", MAX_LOG_LINES + 49));
    }

    #[test]
    fn test_visible_rows_threshold_and_limit() {
        let mut state = state();
        state.params = state.params.with_limit(2).with_threshold(0.05);
        state.apply(started(1));
        state.apply(TuiEvent::QueryFinished {
            id: QueryId(1),
            report: loaded_report("PCSK9", 5),
        });
        let rows = state.visible_rows(AnalysisKind::Phecodes);
        assert_eq!(rows.len(), 2);
        assert!(state.visible_rows(AnalysisKind::CvEndpoints).is_empty());
    }
}
