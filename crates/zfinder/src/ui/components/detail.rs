//! Detail view for the selected pin.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::classify::classify_path;
use crate::app::view::ApplyIf;
use crate::domain::model::Pin;
use crate::infra::config::{IconStyle, Keybindings};
use crate::ui::icons::icon_for_entry;

/// Renders everything known about one pin.
#[derive(Debug, Default)]
pub struct DetailView {
    icon_style: IconStyle,
}

impl DetailView {
    pub fn new(icon_style: IconStyle) -> Self {
        Self { icon_style }
    }

    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        area: Rect,
        pin: &Pin,
        keys: &Keybindings,
        alert: bool,
    ) {
        let block = Block::default()
            .title(pin.display_name())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .apply_if(alert, |block| {
                block.border_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let paragraph = Paragraph::new(self.lines(pin, keys)).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, inner);
    }

    fn lines(&self, pin: &Pin, keys: &Keybindings) -> Vec<Line<'static>> {
        let path = pin.path();
        let category = classify_path(path);
        let icon = icon_for_entry(path.is_dir(), category, self.icon_style);
        let kind = if path.is_dir() {
            Span::raw("directory")
        } else if path.exists() {
            Span::raw("file")
        } else {
            Span::styled("missing", Style::default().fg(Color::Red))
        };

        vec![
            Line::from(vec![
                Span::raw(format!("{icon} ")),
                Span::styled(pin.display_name(), Style::default().add_modifier(Modifier::BOLD)),
            ]),
            Line::default(),
            field("Path", Span::raw(path.display().to_string())),
            field("Kind", kind),
            field(
                "Category",
                Span::raw(format!("{category} ({})", category.symbol_name())),
            ),
            field("Pin", Span::raw(pin.id().to_string())),
            Line::default(),
            Line::from(vec![
                Span::styled(keys.open.clone(), Style::default().fg(Color::Cyan)),
                Span::raw(" open in file browser · "),
                Span::styled(keys.back.clone(), Style::default().fg(Color::Cyan)),
                Span::raw(" back to pins"),
            ]),
        ]
    }
}

fn field(name: &'static str, value: Span<'static>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{name:<9}"), Style::default().fg(Color::Gray)),
        value,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use crate::domain::model::PinId;

    #[test]
    fn renders_pin_fields() {
        let pin = Pin::new(PinId(3), "/nowhere/budget.xlsx", Some("Budget".into())).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.size();
                DetailView::new(IconStyle::Ascii).render(
                    frame,
                    area,
                    &pin,
                    &Keybindings::default(),
                    false,
                );
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("[tab] Budget"));
        assert!(text.contains("/nowhere/budget.xlsx"));
        assert!(text.contains("missing"));
        assert!(text.contains("spreadsheet (filemenu.and.selection)"));
        assert!(text.contains("#3"));
    }
}
