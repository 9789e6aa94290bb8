//! TUI application — main loop with Actor pattern
//!
//! The loop owns the [`TuiState`]; the controller task owns the query
//! lifecycle. They communicate only through channels, so a slow upstream
//! can never freeze rendering.

use super::controller::{QueryController, controller_task};
use super::event::{TuiCommand, TuiEvent};
use super::mode::{InputMode, KeyAction, KeyHandler};
use super::state::TuiState;
use super::widgets::{
    ChartWidget, HeaderWidget, HelpOverlay, LogPanelWidget, QueryPanelWidget, ResultsPanelWidget,
    StatusBarWidget,
};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use phenoscope_application::{
    ExportTableUseCase, LoadPhenotypesUseCase, QueryParams, TableExportPort,
};
use phenoscope_domain::{AnalysisKind, AnalysisSubset};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
};
use std::collections::BTreeSet;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Startup options for the TUI (seeded from config + CLI flags).
#[derive(Debug, Clone)]
pub struct TuiOptions {
    /// Initial contents of the gene input.
    pub genes_text: String,
    pub subset: AnalysisSubset,
    pub categories: BTreeSet<AnalysisKind>,
    pub params: QueryParams,
    /// Destination for the `e` export action.
    pub export_path: PathBuf,
    /// Render tick (spinner + flash expiry).
    pub tick: Duration,
}

/// Main TUI application
pub struct TuiApp {
    cmd_tx: mpsc::UnboundedSender<TuiCommand>,
    event_rx: mpsc::UnboundedReceiver<TuiEvent>,
    export: ExportTableUseCase,
    options: TuiOptions,
    _controller_handle: tokio::task::JoinHandle<()>,
}

impl TuiApp {
    /// Wire the app to a controller task running the given use case.
    pub fn new(
        use_case: LoadPhenotypesUseCase,
        exporter: Arc<dyn TableExportPort>,
        options: TuiOptions,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<TuiCommand>();
        let (event_tx, event_rx) = mpsc::unbounded_channel::<TuiEvent>();

        let controller = QueryController::new(use_case, event_tx);
        let controller_handle = tokio::spawn(controller_task(controller, cmd_rx));

        Self {
            cmd_tx,
            event_rx,
            export: ExportTableUseCase::new(exporter),
            options,
            _controller_handle: controller_handle,
        }
    }

    /// Run the TUI main loop until quit.
    pub async fn run(&mut self) -> io::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Install panic hook to restore the terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            original_hook(info);
        }));

        let mut state = TuiState::new(
            self.options.genes_text.clone(),
            self.options.subset,
            self.options.categories.clone(),
            self.options.params,
        );
        let mut event_stream = EventStream::new();
        let mut tick = tokio::time::interval(self.options.tick);

        loop {
            terminal.draw(|frame| render(frame, &state))?;

            if state.should_quit {
                break;
            }

            // Branch handlers touch disjoint fields only; event_rx stays
            // exclusively borrowed by its recv future.
            tokio::select! {
                // Terminal events (keyboard, resize)
                Some(Ok(term_event)) = event_stream.next() => {
                    handle_terminal_event(
                        &self.cmd_tx,
                        &self.export,
                        &self.options,
                        &mut state,
                        term_event,
                    );
                }

                // Controller events
                Some(event) = self.event_rx.recv() => {
                    state.apply(event);
                }

                // Render tick
                _ = tick.tick() => {
                    state.on_tick(Duration::from_secs(4));
                }
            }
        }

        // Teardown
        let _ = self.cmd_tx.send(TuiCommand::Quit);
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }
}

fn handle_terminal_event(
    cmd_tx: &mpsc::UnboundedSender<TuiCommand>,
    export: &ExportTableUseCase,
    options: &TuiOptions,
    state: &mut TuiState,
    event: Event,
) {
    let Event::Key(key) = event else {
        return;
    };
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Any key dismisses the help overlay
    if state.show_help {
        state.show_help = false;
        return;
    }

    match KeyHandler::handle(state.mode, key) {
        KeyAction::EnterInsert => state.mode = InputMode::Insert,
        KeyAction::ExitToNormal => state.mode = InputMode::Normal,
        KeyAction::Submit => {
            state.mode = InputMode::Normal;
            let _ = cmd_tx.send(TuiCommand::RunQuery {
                genes_text: state.gene_input.clone(),
                subset: state.subset,
                categories: state.categories.clone(),
            });
        }
        KeyAction::CancelQuery => {
            if state.phase.is_loading() {
                let _ = cmd_tx.send(TuiCommand::CancelQuery);
            }
        }
        KeyAction::Quit => state.should_quit = true,
        KeyAction::InsertChar(c) => state.insert_char(c),
        KeyAction::DeleteChar => state.delete_char(),
        KeyAction::CursorLeft => state.cursor_left(),
        KeyAction::CursorRight => state.cursor_right(),
        KeyAction::CursorStart => state.cursor_home(),
        KeyAction::CursorEnd => state.cursor_end(),
        KeyAction::ToggleCategory(index) => state.toggle_category(index),
        KeyAction::CycleSubset => state.cycle_subset(),
        KeyAction::ToggleMetric => state.toggle_metric(),
        KeyAction::CycleThreshold => state.cycle_threshold(),
        KeyAction::ToggleLogScale => state.toggle_log_scale(),
        KeyAction::ToggleLegend => state.toggle_legend(),
        KeyAction::NextTab => state.next_tab(),
        KeyAction::PrevTab => state.prev_tab(),
        KeyAction::ScrollUp => state.scroll_up(),
        KeyAction::ScrollDown => state.scroll_down(),
        KeyAction::Export => export_table(export, &options.export_path, state),
        KeyAction::ShowHelp => state.show_help = true,
        KeyAction::None => {}
    }
}

fn export_table(export: &ExportTableUseCase, path: &std::path::Path, state: &mut TuiState) {
    match export.execute(&state.table, path) {
        Ok(outcome) => {
            let notice = outcome.notice();
            state.push_log(notice.clone());
            state.set_flash(notice);
        }
        Err(error) => {
            let notice = error.to_string();
            state.push_log(notice.clone());
            state.set_flash(notice);
        }
    }
}

fn render(frame: &mut Frame, state: &TuiState) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // header
            Constraint::Min(0),    // main
            Constraint::Length(1), // status bar
        ])
        .split(frame.area());

    frame.render_widget(HeaderWidget::new(state), outer[0]);
    frame.render_widget(StatusBarWidget::new(state), outer[2]);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(38), Constraint::Min(40)])
        .split(outer[1]);

    frame.render_widget(QueryPanelWidget::new(state), main[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(14), // chart
            Constraint::Min(8),     // results
            Constraint::Length(8),  // log
        ])
        .split(main[1]);

    frame.render_widget(ChartWidget::new(state), right[0]);
    frame.render_widget(ResultsPanelWidget::new(state), right[1]);
    frame.render_widget(LogPanelWidget::new(state), right[2]);

    if state.show_help {
        frame.render_widget(HelpOverlay, frame.area());
    }
}
