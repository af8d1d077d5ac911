//! TUI screen definitions.
//!
//! Each screen corresponds to a tab in the TUI and encapsulates its own
//! cursor/scroll state; the shared table and filter selections live in
//! [`DashboardState`] and every interaction re-runs the pipeline over it.

mod charts;
mod detail;
mod filters;
mod overview;

use std::collections::BTreeSet;
use std::fmt;

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::prelude::*;

use channelscope_analytics::FilterSelection;
use channelscope_shared::{AppConfig, ChannelRecord};

/// Shared dashboard state: the freshly loaded table plus the current user
/// selections. Screens read the table, never mutate it; the working subset
/// is recomputed from scratch on every draw.
pub(crate) struct DashboardState {
    pub config: AppConfig,
    pub table: Vec<ChannelRecord>,
    pub selection: FilterSelection,
    /// Chart keys whose show-all override is on.
    pub show_all: BTreeSet<String>,
}

/// Screen identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScreenId {
    Overview,
    Filters,
    Charts,
    Detail,
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overview => write!(f, "Overview"),
            Self::Filters => write!(f, "Filters"),
            Self::Charts => write!(f, "Charts"),
            Self::Detail => write!(f, "Detail"),
        }
    }
}

/// Per-screen state and behaviour.
pub(crate) struct Screen {
    pub id: ScreenId,
    pub overview: overview::OverviewScreen,
    pub filters: filters::FiltersScreen,
    pub charts: charts::ChartsScreen,
    pub detail: detail::DetailScreen,
}

impl Screen {
    pub(crate) fn new(id: ScreenId) -> Self {
        Self {
            id,
            overview: overview::OverviewScreen::new(),
            filters: filters::FiltersScreen::new(),
            charts: charts::ChartsScreen::new(),
            detail: detail::DetailScreen::new(),
        }
    }

    pub(crate) fn draw(&self, f: &mut Frame, area: Rect, state: &DashboardState) {
        match self.id {
            ScreenId::Overview => self.overview.draw(f, area, state),
            ScreenId::Filters => self.filters.draw(f, area, state),
            ScreenId::Charts => self.charts.draw(f, area, state),
            ScreenId::Detail => self.detail.draw(f, area, state),
        }
    }

    pub(crate) fn handle_key(
        &mut self,
        code: KeyCode,
        modifiers: KeyModifiers,
        state: &mut DashboardState,
    ) {
        match self.id {
            ScreenId::Overview => self.overview.handle_key(code, modifiers, state),
            ScreenId::Filters => self.filters.handle_key(code, modifiers, state),
            ScreenId::Charts => self.charts.handle_key(code, modifiers, state),
            ScreenId::Detail => self.detail.handle_key(code, modifiers, state),
        }
    }
}
