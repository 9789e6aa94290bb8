//! TUI mode system (vim-like mode switching)
//!
//! Two modes: Normal (navigate, toggle filters, run queries) and Insert
//! (edit the gene list).

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Application input mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Normal mode - navigation and toggles
    #[default]
    Normal,
    /// Insert mode - gene list editing
    Insert,
}

impl InputMode {
    /// Mode indicator string for the status line
    pub fn indicator(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Insert => "INSERT",
        }
    }

    /// Mode color for the status line
    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            Self::Normal => Color::Blue,
            Self::Insert => Color::Green,
        }
    }
}

/// User action derived from key events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Enter insert mode (edit genes)
    EnterInsert,
    /// Exit insert mode to normal
    ExitToNormal,
    /// Run the query with the current inputs
    Submit,
    /// Cancel the in-flight query (Esc in normal mode)
    CancelQuery,
    /// Quit application
    Quit,
    /// Insert character into the gene buffer
    InsertChar(char),
    /// Delete character (Backspace)
    DeleteChar,
    /// Move cursor left
    CursorLeft,
    /// Move cursor right
    CursorRight,
    /// Move to start of input
    CursorStart,
    /// Move to end of input
    CursorEnd,
    /// Toggle one of the four category filters (0-based)
    ToggleCategory(usize),
    /// Cycle the analysis subset (Both → Male only → Female only)
    CycleSubset,
    /// Switch the metric between p and q
    ToggleMetric,
    /// Cycle through the threshold presets
    CycleThreshold,
    /// Toggle −log10 scaling on the chart
    ToggleLogScale,
    /// Toggle the chart legend
    ToggleLegend,
    /// Next results tab
    NextTab,
    /// Previous results tab
    PrevTab,
    /// Scroll the results table up
    ScrollUp,
    /// Scroll the results table down
    ScrollDown,
    /// Export the combined table as CSV
    Export,
    /// Show help overlay
    ShowHelp,
    /// No action
    None,
}

/// Key event handler - maps key events to actions based on current mode
pub struct KeyHandler;

impl KeyHandler {
    /// Handle key event in the given mode
    pub fn handle(mode: InputMode, key: KeyEvent) -> KeyAction {
        match mode {
            InputMode::Normal => Self::handle_normal(key),
            InputMode::Insert => Self::handle_insert(key),
        }
    }

    fn handle_normal(key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => KeyAction::Quit,
                _ => KeyAction::None,
            };
        }
        match key.code {
            // Mode switch
            KeyCode::Char('i') => KeyAction::EnterInsert,

            // Query lifecycle
            KeyCode::Enter | KeyCode::Char('r') => KeyAction::Submit,
            KeyCode::Esc => KeyAction::CancelQuery,
            KeyCode::Char('q') => KeyAction::Quit,

            // Category toggles
            KeyCode::Char(c @ '1'..='4') => {
                KeyAction::ToggleCategory(c as usize - '1' as usize)
            }

            // Query knobs
            KeyCode::Char('s') => KeyAction::CycleSubset,
            KeyCode::Char('m') => KeyAction::ToggleMetric,
            KeyCode::Char('t') => KeyAction::CycleThreshold,
            KeyCode::Char('o') => KeyAction::ToggleLogScale,
            KeyCode::Char('L') => KeyAction::ToggleLegend,

            // Tabs and scrolling
            KeyCode::Tab | KeyCode::Char('l') => KeyAction::NextTab,
            KeyCode::BackTab | KeyCode::Char('h') => KeyAction::PrevTab,
            KeyCode::Char('k') | KeyCode::Up => KeyAction::ScrollUp,
            KeyCode::Char('j') | KeyCode::Down => KeyAction::ScrollDown,

            // Export and help
            KeyCode::Char('e') => KeyAction::Export,
            KeyCode::Char('?') => KeyAction::ShowHelp,

            _ => KeyAction::None,
        }
    }

    fn handle_insert(key: KeyEvent) -> KeyAction {
        match key.code {
            KeyCode::Esc => KeyAction::ExitToNormal,
            KeyCode::Enter => KeyAction::Submit,
            KeyCode::Char(c) => KeyAction::InsertChar(c),
            KeyCode::Backspace => KeyAction::DeleteChar,
            KeyCode::Left => KeyAction::CursorLeft,
            KeyCode::Right => KeyAction::CursorRight,
            KeyCode::Home => KeyAction::CursorStart,
            KeyCode::End => KeyAction::CursorEnd,
            _ => KeyAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_default() {
        assert_eq!(InputMode::default(), InputMode::Normal);
    }

    #[test]
    fn test_mode_indicator() {
        assert_eq!(InputMode::Normal.indicator(), "NORMAL");
        assert_eq!(InputMode::Insert.indicator(), "INSERT");
    }

    #[test]
    fn test_normal_mode_key_handling() {
        let key = KeyEvent::new(KeyCode::Char('i'), KeyModifiers::NONE);
        assert_eq!(KeyHandler::handle(InputMode::Normal, key), KeyAction::EnterInsert);

        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(KeyHandler::handle(InputMode::Normal, key), KeyAction::Quit);

        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(KeyHandler::handle(InputMode::Normal, key), KeyAction::Quit);

        let key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(KeyHandler::handle(InputMode::Normal, key), KeyAction::Submit);

        let key = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(KeyHandler::handle(InputMode::Normal, key), KeyAction::CancelQuery);

        let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(KeyHandler::handle(InputMode::Normal, key), KeyAction::None);
    }

    #[test]
    fn test_category_number_keys() {
        for (ch, index) in [('1', 0), ('2', 1), ('3', 2), ('4', 3)] {
            let key = KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE);
            assert_eq!(
                KeyHandler::handle(InputMode::Normal, key),
                KeyAction::ToggleCategory(index)
            );
        }
        let key = KeyEvent::new(KeyCode::Char('5'), KeyModifiers::NONE);
        assert_eq!(KeyHandler::handle(InputMode::Normal, key), KeyAction::None);
    }

    #[test]
    fn test_query_knob_keys() {
        let key = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE);
        assert_eq!(KeyHandler::handle(InputMode::Normal, key), KeyAction::CycleSubset);

        let key = KeyEvent::new(KeyCode::Char('m'), KeyModifiers::NONE);
        assert_eq!(KeyHandler::handle(InputMode::Normal, key), KeyAction::ToggleMetric);

        let key = KeyEvent::new(KeyCode::Char('t'), KeyModifiers::NONE);
        assert_eq!(KeyHandler::handle(InputMode::Normal, key), KeyAction::CycleThreshold);

        let key = KeyEvent::new(KeyCode::Char('o'), KeyModifiers::NONE);
        assert_eq!(KeyHandler::handle(InputMode::Normal, key), KeyAction::ToggleLogScale);
    }

    #[test]
    fn test_tab_navigation_keys() {
        let key = KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(KeyHandler::handle(InputMode::Normal, key), KeyAction::NextTab);

        let key = KeyEvent::new(KeyCode::Char('h'), KeyModifiers::NONE);
        assert_eq!(KeyHandler::handle(InputMode::Normal, key), KeyAction::PrevTab);

        let key = KeyEvent::new(KeyCode::Char('l'), KeyModifiers::NONE);
        assert_eq!(KeyHandler::handle(InputMode::Normal, key), KeyAction::NextTab);
    }

    #[test]
    fn test_insert_mode_key_handling() {
        let key = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(KeyHandler::handle(InputMode::Insert, key), KeyAction::ExitToNormal);

        let key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(KeyHandler::handle(InputMode::Insert, key), KeyAction::Submit);

        let key = KeyEvent::new(KeyCode::Char('p'), KeyModifiers::NONE);
        assert_eq!(
            KeyHandler::handle(InputMode::Insert, key),
            KeyAction::InsertChar('p')
        );

        let key = KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(KeyHandler::handle(InputMode::Insert, key), KeyAction::DeleteChar);

        // Query knob keys are plain characters in insert mode
        let key = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE);
        assert_eq!(
            KeyHandler::handle(InputMode::Insert, key),
            KeyAction::InsertChar('s')
        );
    }
}
