//! List of pins shown when nothing is selected.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use crate::app::classify::classify_path;
use crate::app::pins::PinBoard;
use crate::app::view::ApplyIf;
use crate::domain::model::{Pin, PinId};
use crate::infra::config::IconStyle;
use crate::ui::icons::icon_for_entry;

/// Cursor position within the pin list.
#[derive(Debug, Default, Clone)]
pub struct PinListState {
    selected: usize,
}

impl PinListState {
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select_next(&mut self, len: usize) {
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    /// Move the cursor onto the pin with `id` if it is on the board.
    pub fn focus(&mut self, board: &PinBoard, id: PinId) {
        if let Some(index) = board.pins().iter().position(|pin| pin.id() == id) {
            self.selected = index;
        }
    }
}

/// Renders the pin list.
#[derive(Debug, Default)]
pub struct PinList {
    icon_style: IconStyle,
}

impl PinList {
    pub fn new(icon_style: IconStyle) -> Self {
        Self { icon_style }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, board: &PinBoard, state: &PinListState) {
        let block = Block::default()
            .title(format!("Pins ({})", board.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        if board.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let placeholder = Paragraph::new(
                "No pins yet · pass paths on the command line or add [[pins]] to your config",
            )
            .style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
            .wrap(Wrap { trim: true });
            frame.render_widget(placeholder, inner);
            return;
        }

        let items: Vec<ListItem> = board
            .pins()
            .iter()
            .map(|pin| ListItem::new(self.row(pin)))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol(">> ");
        let mut list_state = ListState::default().with_selected(Some(state.selected()));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn row(&self, pin: &Pin) -> Line<'static> {
        let path = pin.path();
        let exists = path.exists();
        let icon = icon_for_entry(path.is_dir(), classify_path(path), self.icon_style);

        let name_style = Style::default()
            .add_modifier(Modifier::BOLD)
            .apply_if(!exists, |style| style.fg(Color::DarkGray));

        let mut spans = vec![
            Span::raw(format!("{icon} ")),
            Span::styled(pin.display_name(), name_style),
            Span::raw("  "),
            Span::styled(path.display().to_string(), Style::default().fg(Color::Gray)),
        ];
        if !exists {
            spans.push(Span::styled(" (missing)", Style::default().fg(Color::Red)));
        }
        Line::from(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut state = PinListState::default();
        state.select_previous();
        assert_eq!(state.selected(), 0);
        state.select_next(2);
        state.select_next(2);
        assert_eq!(state.selected(), 1);
    }

    #[test]
    fn focus_moves_to_known_pin_only() {
        let mut board = PinBoard::new();
        board.add("/tmp/a", None).unwrap();
        let b = board.add("/tmp/b", None).unwrap();

        let mut state = PinListState::default();
        state.focus(&board, b.id());
        assert_eq!(state.selected(), 1);
        state.focus(&board, PinId(99));
        assert_eq!(state.selected(), 1);
    }

    #[test]
    fn renders_placeholder_for_empty_board() {
        let mut terminal = Terminal::new(TestBackend::new(100, 5)).unwrap();
        let board = PinBoard::new();
        terminal
            .draw(|frame| {
                let area = frame.size();
                PinList::new(IconStyle::Ascii).render(frame, area, &board, &PinListState::default());
            })
            .unwrap();
        assert!(rendered(&terminal).contains("No pins yet"));
    }

    #[test]
    fn renders_rows_with_icons_and_missing_marker() {
        let temp = tempfile::tempdir().unwrap();
        let mut board = PinBoard::new();
        board.add(temp.path(), Some("Scratch".into())).unwrap();
        board.add("/definitely/missing/photo.PNG", None).unwrap();

        let mut terminal = Terminal::new(TestBackend::new(120, 6)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.size();
                PinList::new(IconStyle::Ascii).render(frame, area, &board, &PinListState::default());
            })
            .unwrap();

        let text = rendered(&terminal);
        assert!(text.contains("Pins (2)"));
        assert!(text.contains("[dir] Scratch"));
        assert!(text.contains("[img] photo.PNG"));
        assert!(text.contains("(missing)"));
    }
}
