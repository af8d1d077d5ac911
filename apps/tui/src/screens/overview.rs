//! "Overview" screen — summary counts plus the working-subset table.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use channelscope_analytics::summarize;
use channelscope_shared::ChannelType;

use super::DashboardState;

pub(crate) struct OverviewScreen {
    /// First visible row of the table.
    offset: usize,
}

impl OverviewScreen {
    pub(crate) fn new() -> Self {
        Self { offset: 0 }
    }

    pub(crate) fn draw(&self, f: &mut Frame, area: Rect, state: &DashboardState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(6), // Summary
                Constraint::Min(1),    // Table
            ])
            .split(area);

        let working = state.selection.apply(&state.table);
        let summary = summarize(&working);

        let summary_text = format!(
            "  Всего каналов:            {}\n\
             \x20 Количество компаний:      {}\n\
             \x20 Количество персональных:  {}\n\
             \x20 Количество агрегаторов:   {}",
            summary.total,
            summary.count(ChannelType::Company),
            summary.count(ChannelType::Personal),
            summary.count(ChannelType::Aggregator),
        );
        let summary_widget = Paragraph::new(summary_text)
            .block(Block::default().borders(Borders::ALL).title(" Сводка "));
        f.render_widget(summary_widget, chunks[0]);

        // Visible window of the working subset.
        let visible_rows = chunks[1].height.saturating_sub(3) as usize;
        let offset = self.offset.min(working.len().saturating_sub(1));
        let rows: Vec<Row> = working
            .iter()
            .skip(offset)
            .take(visible_rows)
            .map(|r| {
                Row::new(vec![
                    Cell::from(r.name.clone()),
                    Cell::from(r.username.clone()),
                    Cell::from(r.channel_type.clone()),
                    Cell::from(r.subscribers.to_string()),
                    Cell::from(r.posts_30d.to_string()),
                    Cell::from(r.comments_30d.to_string()),
                ])
            })
            .collect();

        let header = Row::new(vec![
            "Название", "Username", "Тип", "Подписчики", "Постов/30д", "Комм./30д",
        ])
        .style(Style::default().add_modifier(Modifier::BOLD));

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(28),
                Constraint::Percentage(16),
                Constraint::Percentage(14),
                Constraint::Percentage(14),
                Constraint::Percentage(14),
                Constraint::Percentage(14),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(format!(
            " Каналы ({}) — j/k scroll ",
            working.len()
        )));
        f.render_widget(table, chunks[1]);
    }

    pub(crate) fn handle_key(
        &mut self,
        code: KeyCode,
        _modifiers: KeyModifiers,
        state: &mut DashboardState,
    ) {
        let len = state.selection.apply(&state.table).len();
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.offset = self.offset.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.offset + 1 < len {
                    self.offset += 1;
                }
            }
            KeyCode::Home => self.offset = 0,
            _ => {}
        }
    }
}
