//! The channelscope pipeline core: company extraction, the filter
//! pipeline, summary aggregation, chart data selection, and detail lookup.
//!
//! Every operation here is a pure function over an immutable table (or a
//! borrowed projection of it); the table itself is owned by the caller and
//! reloaded per run by `channelscope-dataset`.

pub mod chart;
pub mod companies;
pub mod detail;
pub mod filter;
pub mod pipeline;
pub mod summary;

pub use chart::{ChartPoint, Metric, rows_of_type, select_series};
pub use companies::{extract_companies, is_personal_name, split_authors};
pub use detail::{ChannelDetail, lookup, wrap_text};
pub use filter::{
    FilterSelection, Selection, apply_select_all, filter_about, filter_companies, filter_search,
    filter_theme, filter_types, search_options, selection_is_full, type_options,
};
pub use summary::{Summary, summarize};
pub use pipeline::{
    Chart, ChartSpec, Dashboard, DashboardOptions, build_dashboard, build_dashboard_with,
    default_chart_specs,
};
