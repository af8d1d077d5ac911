//! Core TUI application state and event loop.

use std::io;
use std::time::Duration;

use color_eyre::eyre::{Result, eyre};
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Tabs};

use channelscope_analytics::FilterSelection;
use channelscope_shared::load_config;

use crate::screens::{DashboardState, Screen, ScreenId};
use crate::widgets::status_bar;

/// Application state.
pub(crate) struct App {
    /// Currently active screen tab.
    pub active_tab: usize,
    /// Available screens.
    pub screens: Vec<ScreenId>,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Status message shown in bottom bar.
    pub status: String,
    /// Whether help overlay is visible.
    pub show_help: bool,
    /// Per-screen state.
    pub screen_states: Vec<Screen>,
    /// Shared dashboard data.
    pub state: DashboardState,
    /// Runtime for the blocking dataset fetch.
    runtime: tokio::runtime::Runtime,
}

impl App {
    fn new() -> Result<Self> {
        let config = load_config()?;
        let runtime = tokio::runtime::Runtime::new()?;

        // The initial fetch is fatal when it fails: there is no dashboard
        // without a table.
        let table = runtime
            .block_on(channelscope_dataset::load(&config.source))
            .map_err(|e| eyre!("could not load the channel dataset: {e}"))?;

        let screens = vec![
            ScreenId::Overview,
            ScreenId::Filters,
            ScreenId::Charts,
            ScreenId::Detail,
        ];
        let screen_states = screens.iter().map(|s| Screen::new(*s)).collect();
        let rows = table.len();

        Ok(Self {
            active_tab: 0,
            screens,
            should_quit: false,
            status: format!("{rows} channels loaded — press ? for help"),
            show_help: false,
            screen_states,
            state: DashboardState {
                config,
                table,
                selection: FilterSelection::default(),
                show_all: Default::default(),
            },
            runtime,
        })
    }

    /// Re-fetch the table, keeping the previous one when the fetch fails.
    fn reload(&mut self) {
        match self
            .runtime
            .block_on(channelscope_dataset::load(&self.state.config.source))
        {
            Ok(table) => {
                tracing::debug!(rows = table.len(), "dataset reloaded");
                self.status = format!("reloaded, {} channels", table.len());
                self.state.table = table;
            }
            Err(e) => {
                self.status = format!("reload failed: {e}");
            }
        }
    }
}

/// Entry point — sets up terminal, runs event loop, restores terminal.
pub(crate) fn run() -> Result<()> {
    let mut app = App::new()?;

    // Setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, app))?;

        // Poll for events with 100ms timeout for responsive UI
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                handle_key(app, key.code, key.modifiers);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    // Global keybindings (always active)
    match code {
        KeyCode::Char('q') | KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('?') => {
            app.show_help = !app.show_help;
            return;
        }
        KeyCode::Esc if app.show_help => {
            app.show_help = false;
            return;
        }
        KeyCode::Char('r') => {
            app.reload();
            return;
        }
        // Tab navigation with number keys
        KeyCode::Char(c @ '1'..='4') => {
            let idx = (c as usize) - ('1' as usize);
            if idx < app.screens.len() {
                app.active_tab = idx;
                app.status = format!("{}", app.screens[idx]);
            }
            return;
        }
        KeyCode::Tab => {
            app.active_tab = (app.active_tab + 1) % app.screens.len();
            app.status = format!("{}", app.screens[app.active_tab]);
            return;
        }
        KeyCode::BackTab => {
            app.active_tab = if app.active_tab == 0 {
                app.screens.len() - 1
            } else {
                app.active_tab - 1
            };
            app.status = format!("{}", app.screens[app.active_tab]);
            return;
        }
        _ => {}
    }

    let tab = app.active_tab;
    app.screen_states[tab].handle_key(code, modifiers, &mut app.state);
}

fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(1),    // Screen body
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    // Tab bar
    let titles: Vec<String> = app
        .screens
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{} {}", i + 1, s))
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.active_tab)
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" channelscope "),
        );
    f.render_widget(tabs, chunks[0]);

    // Active screen
    app.screen_states[app.active_tab].draw(f, chunks[1], &app.state);

    // Status bar
    f.render_widget(status_bar(&app.status), chunks[2]);

    if app.show_help {
        draw_help(f);
    }
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(50, 60, f.area());
    let help = Paragraph::new(
        "\n  q / Ctrl-C   quit\n\
         \x20 Tab / 1-4    switch tab\n\
         \x20 r            reload the dataset\n\
         \x20 ? / Esc      toggle this help\n\n\
         \x20 Overview:    j/k scroll the table\n\
         \x20 Filters:     h/l dimension, j/k option,\n\
         \x20              space toggle, a select all, c clear\n\
         \x20 Charts:      h/l section, f focus chart,\n\
         \x20              s toggle show-all\n\
         \x20 Detail:      j/k pick a channel",
    )
    .block(Block::default().borders(Borders::ALL).title(" Help "));
    f.render_widget(Clear, area);
    f.render_widget(help, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
