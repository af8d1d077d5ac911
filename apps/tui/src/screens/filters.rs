//! "Filters" screen — the five filter dimensions with select-all controls.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use channelscope_analytics::{
    Selection, apply_select_all, extract_companies, filter_companies, filter_search,
    search_options, selection_is_full, type_options,
};
use channelscope_shared::ChannelRecord;

use super::DashboardState;

/// The five filter dimensions, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dimension {
    Search,
    Companies,
    Types,
    Themes,
    About,
}

const DIMENSIONS: [Dimension; 5] = [
    Dimension::Search,
    Dimension::Companies,
    Dimension::Types,
    Dimension::Themes,
    Dimension::About,
];

impl Dimension {
    fn title(&self) -> &'static str {
        match self {
            Self::Search => "Поиск",
            Self::Companies => "По компаниям",
            Self::Types => "По типу",
            Self::Themes => "По тематике",
            Self::About => "По направлению",
        }
    }
}

pub(crate) struct FiltersScreen {
    dim_index: usize,
    cursor: usize,
}

impl FiltersScreen {
    pub(crate) fn new() -> Self {
        Self {
            dim_index: 0,
            cursor: 0,
        }
    }

    fn dimension(&self) -> Dimension {
        DIMENSIONS[self.dim_index]
    }

    /// The option universe of the current dimension.
    ///
    /// The company universe follows the search-filtered table and the type
    /// universe the search- and company-filtered one, like the shipped
    /// dashboard; theme/about universes come from configuration.
    fn options(&self, state: &DashboardState) -> Vec<String> {
        match self.dimension() {
            Dimension::Search => search_options(&state.table),
            Dimension::Companies => {
                let rows: Vec<&ChannelRecord> = state.table.iter().collect();
                let searched: Vec<ChannelRecord> = filter_search(rows, &state.selection.search)
                    .into_iter()
                    .cloned()
                    .collect();
                extract_companies(&searched)
            }
            Dimension::Types => {
                let rows: Vec<&ChannelRecord> = state.table.iter().collect();
                let narrowed: Vec<ChannelRecord> = filter_companies(
                    filter_search(rows, &state.selection.search),
                    &state.selection.companies,
                )
                .into_iter()
                .cloned()
                .collect();
                type_options(&narrowed)
            }
            Dimension::Themes => state.config.filters.themes.clone(),
            Dimension::About => state.config.filters.about.clone(),
        }
    }

    fn selection<'a>(&self, state: &'a mut DashboardState) -> &'a mut Selection {
        match self.dimension() {
            Dimension::Search => &mut state.selection.search,
            Dimension::Companies => &mut state.selection.companies,
            Dimension::Types => &mut state.selection.types,
            Dimension::Themes => &mut state.selection.themes,
            Dimension::About => &mut state.selection.about,
        }
    }

    fn selection_ref<'a>(&self, state: &'a DashboardState) -> &'a Selection {
        match self.dimension() {
            Dimension::Search => &state.selection.search,
            Dimension::Companies => &state.selection.companies,
            Dimension::Types => &state.selection.types,
            Dimension::Themes => &state.selection.themes,
            Dimension::About => &state.selection.about,
        }
    }

    pub(crate) fn draw(&self, f: &mut Frame, area: Rect, state: &DashboardState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Dimension tabs
                Constraint::Min(1),    // Option list
                Constraint::Length(2), // Hint
            ])
            .split(area);

        let tabs_line: Vec<Span> = DIMENSIONS
            .iter()
            .enumerate()
            .flat_map(|(i, d)| {
                let style = if i == self.dim_index {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                vec![Span::styled(d.title(), style), Span::raw("   ")]
            })
            .collect();
        let tabs = Paragraph::new(Line::from(tabs_line))
            .block(Block::default().borders(Borders::ALL).title(" Фильтр "));
        f.render_widget(tabs, chunks[0]);

        let options = self.options(state);
        let selection = self.selection_ref(state);
        let all_selected = selection_is_full(selection, &options);

        let visible = chunks[1].height.saturating_sub(2) as usize;
        let start = self.cursor.saturating_sub(visible.saturating_sub(1));
        let items: Vec<ListItem> = options
            .iter()
            .enumerate()
            .skip(start)
            .take(visible)
            .map(|(i, opt)| {
                let mark = if selection.contains(opt) { "[x]" } else { "[ ]" };
                let prefix = if i == self.cursor { "▸ " } else { "  " };
                let style = if i == self.cursor {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(format!("{prefix}{mark} {opt}")).style(style)
            })
            .collect();

        let title = format!(
            " {} ({} выбрано из {}){} ",
            self.dimension().title(),
            selection.len(),
            options.len(),
            if all_selected { " — все" } else { "" },
        );
        let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(list, chunks[1]);

        let hint = Paragraph::new(
            "h/l dimension   j/k option   space toggle   a select all   c clear",
        )
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
        f.render_widget(hint, chunks[2]);
    }

    pub(crate) fn handle_key(
        &mut self,
        code: KeyCode,
        _modifiers: KeyModifiers,
        state: &mut DashboardState,
    ) {
        let options = self.options(state);
        match code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.dim_index = if self.dim_index == 0 {
                    DIMENSIONS.len() - 1
                } else {
                    self.dim_index - 1
                };
                self.cursor = 0;
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.dim_index = (self.dim_index + 1) % DIMENSIONS.len();
                self.cursor = 0;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + 1 < options.len() {
                    self.cursor += 1;
                }
            }
            KeyCode::Char(' ') => {
                if let Some(option) = options.get(self.cursor).cloned() {
                    let selection = self.selection(state);
                    if !selection.remove(&option) {
                        selection.insert(option);
                    }
                }
            }
            KeyCode::Char('a') => {
                // Flip the select-all checkbox. Unchecking while the
                // selection is already full leaves it full.
                let checked = !selection_is_full(self.selection_ref(state), &options);
                apply_select_all(self.selection(state), &options, checked);
            }
            KeyCode::Char('c') => {
                self.selection(state).clear();
            }
            _ => {}
        }
    }
}
