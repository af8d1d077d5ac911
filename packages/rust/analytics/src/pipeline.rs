//! Dashboard assembly: one pass over the table producing the summary and
//! every chart series.
//!
//! Per-chart failures (a chart asking for a column the dataset lacks) are
//! recorded on that chart and never abort sibling charts or the summary.

use std::collections::BTreeSet;

use tracing::{instrument, warn};

use channelscope_shared::{ChannelRecord, ChannelScopeError, ChannelType};

use crate::chart::{ChartPoint, rows_of_type, select_series};
use crate::filter::FilterSelection;
use crate::summary::{Summary, summarize};

/// A chart the dashboard renders: which rows, which metric, which title.
#[derive(Debug, Clone)]
pub struct ChartSpec {
    /// Stable key identifying the chart, used for show-all toggles.
    pub key: &'static str,
    /// Section heading the chart is grouped under.
    pub section: &'static str,
    /// Chart title.
    pub title: &'static str,
    /// Metric column label to plot.
    pub metric_column: String,
    /// Which type partition of the working subset to plot.
    pub channel_type: ChannelType,
    /// Whether the chart offers the show-all override. Aggregator charts
    /// never do; they are always capped.
    pub honor_show_all: bool,
}

/// The dashboard's fixed chart grid: four metric sections over company and
/// personal channels, plus the aggregator section.
pub fn default_chart_specs() -> Vec<ChartSpec> {
    let pair = |key_c: &'static str,
                key_p: &'static str,
                section: &'static str,
                metric: &str|
     -> [ChartSpec; 2] {
        [
            ChartSpec {
                key: key_c,
                section,
                title: "Каналы компаний",
                metric_column: metric.to_string(),
                channel_type: ChannelType::Company,
                honor_show_all: true,
            },
            ChartSpec {
                key: key_p,
                section,
                title: "Личные блоги",
                metric_column: metric.to_string(),
                channel_type: ChannelType::Personal,
                honor_show_all: true,
            },
        ]
    };

    let mut specs = Vec::new();
    specs.extend(pair(
        "comp_subs",
        "pers_subs",
        "Количество подписчиков",
        "Подписчики",
    ));
    specs.extend(pair(
        "comp_posts",
        "pers_posts",
        "Авторских постов / за 30 дней",
        "Постов за 30 дней",
    ));
    specs.extend(pair(
        "comp_comms",
        "pers_comms",
        "Число комментариев / за 30 дней",
        "Комментариев за 30 дней",
    ));
    specs.extend(pair(
        "comp_comms_post",
        "pers_comms_post",
        "В среднем комментариев / на 1 пост",
        "Комментов на 1 пост",
    ));
    specs.push(ChartSpec {
        key: "agg_subs",
        section: "Агрегаторы",
        title: "Число подписчиков",
        metric_column: "Подписчики".to_string(),
        channel_type: ChannelType::Aggregator,
        honor_show_all: false,
    });
    specs.push(ChartSpec {
        key: "agg_posts",
        section: "Агрегаторы",
        title: "Количество постов / за последний 30 дней",
        metric_column: "Постов за 30 дней".to_string(),
        channel_type: ChannelType::Aggregator,
        honor_show_all: false,
    });
    specs
}

/// Display knobs for one dashboard run.
#[derive(Debug, Clone)]
pub struct DashboardOptions {
    /// Bar budget per chart before tail-truncation.
    pub display_cap: usize,
    /// Chart keys whose show-all override is currently on.
    pub show_all: BTreeSet<String>,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            display_cap: 25,
            show_all: BTreeSet::new(),
        }
    }
}

/// One assembled chart.
#[derive(Debug)]
pub struct Chart {
    /// Stable key carried over from the grid entry.
    pub key: &'static str,
    /// Section heading.
    pub section: &'static str,
    /// Chart title.
    pub title: &'static str,
    /// Metric column the chart plots.
    pub metric_column: String,
    /// Rows in this chart's type partition, before any cap.
    pub partition_rows: usize,
    /// Whether a show-all toggle makes sense for this chart right now.
    pub offers_show_all: bool,
    /// The series to render, or the localized error for this chart.
    pub series: Result<Vec<ChartPoint>, ChannelScopeError>,
}

/// Everything a dashboard render needs.
#[derive(Debug)]
pub struct Dashboard {
    /// Summary counts over the working subset.
    pub summary: Summary,
    /// Assembled charts, in grid order.
    pub charts: Vec<Chart>,
}

/// Assemble the dashboard with the default chart grid.
#[instrument(skip_all, fields(rows = table.len()))]
pub fn build_dashboard(
    table: &[ChannelRecord],
    selection: &FilterSelection,
    options: &DashboardOptions,
) -> Dashboard {
    build_dashboard_with(table, selection, options, &default_chart_specs())
}

/// Assemble the dashboard from an explicit chart grid.
pub fn build_dashboard_with(
    table: &[ChannelRecord],
    selection: &FilterSelection,
    options: &DashboardOptions,
    specs: &[ChartSpec],
) -> Dashboard {
    let working = selection.apply(table);
    let summary = summarize(&working);

    let charts = specs
        .iter()
        .map(|spec| {
            let partition = rows_of_type(&working, spec.channel_type);
            let show_all =
                spec.honor_show_all && options.show_all.contains(spec.key);
            let series = select_series(
                &partition,
                &spec.metric_column,
                options.display_cap,
                show_all,
            );

            if let Err(e) = &series {
                warn!(chart = spec.key, error = %e, "skipping chart");
            }

            Chart {
                key: spec.key,
                section: spec.section,
                title: spec.title,
                metric_column: spec.metric_column.clone(),
                partition_rows: partition.len(),
                offers_show_all: spec.honor_show_all
                    && partition.len() > options.display_cap,
                series,
            }
        })
        .collect();

    Dashboard { summary, charts }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, channel_type: &str, subscribers: u64) -> ChannelRecord {
        ChannelRecord {
            name: name.into(),
            username: format!("@{name}"),
            author: String::new(),
            channel_type: channel_type.into(),
            theme: "AI".into(),
            about: "Продукт".into(),
            subscribers,
            posts_30d: subscribers / 10,
            comments_30d: subscribers / 5,
            comments_per_post: 2.0,
            description: String::new(),
        }
    }

    fn table() -> Vec<ChannelRecord> {
        vec![
            row("c1", "Компания", 300),
            row("c2", "Компания", 100),
            row("p1", "Персональный", 50),
            row("a1", "Агрегатор", 900),
        ]
    }

    #[test]
    fn default_grid_has_ten_charts() {
        let specs = default_chart_specs();
        assert_eq!(specs.len(), 10);
        assert!(specs.iter().filter(|s| !s.honor_show_all).count() == 2);
    }

    #[test]
    fn dashboard_partitions_charts_by_type() {
        let table = table();
        let dashboard = build_dashboard(
            &table,
            &FilterSelection::default(),
            &DashboardOptions::default(),
        );

        assert_eq!(dashboard.summary.total, 4);
        let comp_subs = dashboard
            .charts
            .iter()
            .find(|c| c.key == "comp_subs")
            .expect("chart");
        let series = comp_subs.series.as_ref().expect("series");
        let labels: Vec<&str> = series.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["c2", "c1"]);
    }

    #[test]
    fn a_bad_column_spec_does_not_abort_siblings() {
        let table = table();
        let specs = vec![
            ChartSpec {
                key: "bad",
                section: "Тест",
                title: "Сломанный",
                metric_column: "Просмотры".to_string(),
                channel_type: ChannelType::Company,
                honor_show_all: true,
            },
            ChartSpec {
                key: "good",
                section: "Тест",
                title: "Рабочий",
                metric_column: "Подписчики".to_string(),
                channel_type: ChannelType::Company,
                honor_show_all: true,
            },
        ];

        let dashboard = build_dashboard_with(
            &table,
            &FilterSelection::default(),
            &DashboardOptions::default(),
            &specs,
        );

        assert!(dashboard.charts[0].series.is_err());
        let good = dashboard.charts[1].series.as_ref().expect("series");
        assert_eq!(good.len(), 2);
    }

    #[test]
    fn aggregator_charts_ignore_show_all_keys() {
        let table: Vec<ChannelRecord> = (0..30)
            .map(|i| row(&format!("agg{i}"), "Агрегатор", i))
            .collect();
        let mut options = DashboardOptions::default();
        options.show_all.insert("agg_subs".to_string());

        let dashboard = build_dashboard(&table, &FilterSelection::default(), &options);
        let agg = dashboard
            .charts
            .iter()
            .find(|c| c.key == "agg_subs")
            .expect("chart");

        // Still capped despite the toggle, and never offering one.
        assert_eq!(agg.series.as_ref().expect("series").len(), 25);
        assert!(!agg.offers_show_all);
    }

    #[test]
    fn detail_lookup_ignores_active_filters() {
        let table = table();
        let selection = FilterSelection {
            types: ["Компания".to_string()].into_iter().collect(),
            ..Default::default()
        };

        // p1 is filtered out of the working subset...
        let working = selection.apply(&table);
        assert!(working.iter().all(|r| r.name != "p1"));

        // ...but the detail view reads the unfiltered table.
        let before = crate::detail::lookup(&table, "p1", 80).expect("found");
        let _ = build_dashboard(&table, &selection, &DashboardOptions::default());
        let after = crate::detail::lookup(&table, "p1", 80).expect("found");
        assert_eq!(before.record, after.record);
    }

    #[test]
    fn filters_narrow_the_working_subset() {
        let table = table();
        let selection = FilterSelection {
            types: ["Компания".to_string()].into_iter().collect(),
            ..Default::default()
        };

        let dashboard =
            build_dashboard(&table, &selection, &DashboardOptions::default());
        assert_eq!(dashboard.summary.total, 2);

        let pers = dashboard
            .charts
            .iter()
            .find(|c| c.key == "pers_subs")
            .expect("chart");
        assert!(pers.series.as_ref().expect("series").is_empty());
    }
}
