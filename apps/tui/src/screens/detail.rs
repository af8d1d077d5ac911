//! "Detail" screen — pick a channel, see its full card.
//!
//! The picker and the lookup both read the unfiltered table: the detail
//! view is deliberately independent of the active filters.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use channelscope_analytics::{lookup, search_options};

use super::DashboardState;

pub(crate) struct DetailScreen {
    selected: usize,
}

impl DetailScreen {
    pub(crate) fn new() -> Self {
        Self { selected: 0 }
    }

    pub(crate) fn draw(&self, f: &mut Frame, area: Rect, state: &DashboardState) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .margin(1)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(area);

        let options = search_options(&state.table);
        let selected = self.selected.min(options.len().saturating_sub(1));

        let visible = chunks[0].height.saturating_sub(2) as usize;
        let start = selected.saturating_sub(visible.saturating_sub(1));
        let items: Vec<ListItem> = options
            .iter()
            .enumerate()
            .skip(start)
            .take(visible)
            .map(|(i, opt)| {
                let style = if i == selected {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let prefix = if i == selected { "▸ " } else { "  " };
                ListItem::new(format!("{prefix}{opt}")).style(style)
            })
            .collect();
        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Выберите канал ({}) ", options.len())),
        );
        f.render_widget(list, chunks[0]);

        let card = match options
            .get(selected)
            .and_then(|id| lookup(&state.table, id, state.config.display.wrap_width))
        {
            Some(detail) => {
                let r = detail.record;
                format!(
                    "Название канала:          {}\n\
                     Username:                 {}\n\
                     Автор:                    {}\n\
                     Тип:                      {}\n\
                     Тематика:                 {}\n\
                     Про что:                  {}\n\
                     Подписчики:               {}\n\
                     Постов за 30 дней:        {}\n\
                     Комментариев за 30 дней:  {}\n\
                     Комментов на 1 пост:      {:.2}\n\n\
                     Описание:\n{}",
                    r.name,
                    r.username,
                    r.author,
                    r.channel_type,
                    r.theme,
                    r.about,
                    r.subscribers,
                    r.posts_30d,
                    r.comments_30d,
                    r.comments_per_post,
                    detail.description,
                )
            }
            None => "канал не найден".to_string(),
        };

        let panel = Paragraph::new(card).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Подробная информация "),
        );
        f.render_widget(panel, chunks[1]);
    }

    pub(crate) fn handle_key(
        &mut self,
        code: KeyCode,
        _modifiers: KeyModifiers,
        state: &mut DashboardState,
    ) {
        let len = search_options(&state.table).len();
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < len {
                    self.selected += 1;
                }
            }
            KeyCode::Home => self.selected = 0,
            _ => {}
        }
    }
}
