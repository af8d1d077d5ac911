//! "Charts" screen — horizontal bar charts over the working subset.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph};

use channelscope_analytics::{Chart, Dashboard, DashboardOptions, build_dashboard};

use super::DashboardState;

/// Section headings, in dashboard order.
const SECTIONS: [&str; 5] = [
    "Количество подписчиков",
    "Авторских постов / за 30 дней",
    "Число комментариев / за 30 дней",
    "В среднем комментариев / на 1 пост",
    "Агрегаторы",
];

pub(crate) struct ChartsScreen {
    section_index: usize,
    /// Which chart of the section's pair has focus (for the show-all key).
    focused: usize,
}

impl ChartsScreen {
    pub(crate) fn new() -> Self {
        Self {
            section_index: 0,
            focused: 0,
        }
    }

    fn dashboard(&self, state: &DashboardState) -> Dashboard {
        let options = DashboardOptions {
            display_cap: state.config.display.max_bars,
            show_all: state.show_all.clone(),
        };
        build_dashboard(&state.table, &state.selection, &options)
    }

    fn section_charts<'a>(&self, dashboard: &'a Dashboard) -> Vec<&'a Chart> {
        dashboard
            .charts
            .iter()
            .filter(|c| c.section == SECTIONS[self.section_index])
            .collect()
    }

    pub(crate) fn draw(&self, f: &mut Frame, area: Rect, state: &DashboardState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2), // Section heading
                Constraint::Min(1),    // Chart pair
                Constraint::Length(2), // Hint
            ])
            .split(area);

        let heading = Paragraph::new(format!(
            " {} ({}/{})",
            SECTIONS[self.section_index],
            self.section_index + 1,
            SECTIONS.len()
        ))
        .style(Style::default().add_modifier(Modifier::BOLD));
        f.render_widget(heading, chunks[0]);

        let dashboard = self.dashboard(state);
        let charts = self.section_charts(&dashboard);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);

        for (i, chart) in charts.into_iter().take(2).enumerate() {
            self.draw_chart(f, columns[i], chart, i == self.focused);
        }

        let hint =
            Paragraph::new("h/l section   f focus chart   s toggle show-all for focused chart")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
        f.render_widget(hint, chunks[2]);
    }

    fn draw_chart(&self, f: &mut Frame, area: Rect, chart: &Chart, focused: bool) {
        let border_style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let show_all_mark = if chart.offers_show_all {
            " [s: show all]"
        } else {
            ""
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(
                " {} ({} рядов){show_all_mark} ",
                chart.title, chart.partition_rows
            ));

        match &chart.series {
            Err(e) => {
                // A missing metric column skips only this chart.
                let warning = Paragraph::new(format!("chart skipped: {e}"))
                    .style(Style::default().fg(Color::Yellow))
                    .block(block);
                f.render_widget(warning, area);
            }
            Ok(series) if series.is_empty() => {
                let empty = Paragraph::new("нет данных").block(block);
                f.render_widget(empty, area);
            }
            Ok(series) => {
                // The selector hands rows ascending; lay them out top-down
                // with the largest bar first.
                let bars: Vec<Bar> = series
                    .iter()
                    .rev()
                    .map(|p| {
                        Bar::default()
                            .label(Line::from(p.label.clone()))
                            .value(p.value.round() as u64)
                            .text_value(format_value(p.value))
                    })
                    .collect();

                let widget = BarChart::default()
                    .direction(Direction::Horizontal)
                    .bar_width(1)
                    .bar_gap(0)
                    .data(BarGroup::default().bars(&bars))
                    .block(block);
                f.render_widget(widget, area);
            }
        }
    }

    pub(crate) fn handle_key(
        &mut self,
        code: KeyCode,
        _modifiers: KeyModifiers,
        state: &mut DashboardState,
    ) {
        match code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.section_index = if self.section_index == 0 {
                    SECTIONS.len() - 1
                } else {
                    self.section_index - 1
                };
                self.focused = 0;
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.section_index = (self.section_index + 1) % SECTIONS.len();
                self.focused = 0;
            }
            KeyCode::Char('f') => {
                self.focused = (self.focused + 1) % 2;
            }
            KeyCode::Char('s') => {
                let dashboard = self.dashboard(state);
                let charts = self.section_charts(&dashboard);
                if let Some(chart) = charts.get(self.focused) {
                    if chart.offers_show_all {
                        let key = chart.key.to_string();
                        if !state.show_all.remove(&key) {
                            state.show_all.insert(key);
                        }
                    }
                }
            }
            _ => {}
        }
    }
}

fn format_value(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON {
        format!("{}", value as u64)
    } else {
        format!("{value:.2}")
    }
}
