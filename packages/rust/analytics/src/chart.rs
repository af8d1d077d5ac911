//! Chart Data Selector: which rows a bar chart shows, and in what order.

use channelscope_shared::{ChannelRecord, ChannelScopeError, ChannelType, Result};

/// The four chartable metrics, addressed by their dataset column labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Subscribers,
    Posts30d,
    Comments30d,
    CommentsPerPost,
}

impl Metric {
    /// The dataset column label this metric is requested by.
    pub fn column_label(&self) -> &'static str {
        match self {
            Self::Subscribers => "Подписчики",
            Self::Posts30d => "Постов за 30 дней",
            Self::Comments30d => "Комментариев за 30 дней",
            Self::CommentsPerPost => "Комментов на 1 пост",
        }
    }

    /// Resolve a requested column label. `None` when the dataset has no
    /// such metric column.
    pub fn from_column(label: &str) -> Option<Self> {
        [
            Self::Subscribers,
            Self::Posts30d,
            Self::Comments30d,
            Self::CommentsPerPost,
        ]
        .into_iter()
        .find(|m| m.column_label() == label)
    }

    /// The metric value of a row.
    pub fn value(&self, row: &ChannelRecord) -> f64 {
        match self {
            Self::Subscribers => row.subscribers as f64,
            Self::Posts30d => row.posts_30d as f64,
            Self::Comments30d => row.comments_30d as f64,
            Self::CommentsPerPost => row.comments_per_post,
        }
    }
}

/// One bar of a chart series.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    /// Channel display name.
    pub label: String,
    /// Metric value.
    pub value: f64,
}

/// The rows of `rows` whose type column equals `ty`.
pub fn rows_of_type<'a>(rows: &[&'a ChannelRecord], ty: ChannelType) -> Vec<&'a ChannelRecord> {
    rows.iter()
        .copied()
        .filter(|r| r.channel_type == ty.label())
        .collect()
}

/// Select the series a bar chart renders.
///
/// Rows are sorted ascending by the metric (stable, so ties keep original
/// table order). When the row count exceeds `display_cap` and
/// `show_all` is off, only the last `display_cap` rows survive — the
/// highest values, still ascending, so the largest bar ends up on top once
/// the renderer lays rows out top-down.
///
/// An unknown `metric_column` is reported as [`ChannelScopeError::MissingColumn`];
/// callers skip that chart and continue.
pub fn select_series(
    rows: &[&ChannelRecord],
    metric_column: &str,
    display_cap: usize,
    show_all: bool,
) -> Result<Vec<ChartPoint>> {
    let metric = Metric::from_column(metric_column)
        .ok_or_else(|| ChannelScopeError::missing_column(metric_column))?;

    let mut sorted: Vec<&ChannelRecord> = rows.to_vec();
    sorted.sort_by(|a, b| metric.value(a).total_cmp(&metric.value(b)));

    let series: Vec<ChartPoint> = if show_all || sorted.len() <= display_cap {
        sorted
    } else {
        sorted.split_off(sorted.len() - display_cap)
    }
    .into_iter()
    .map(|r| ChartPoint {
        label: r.name.clone(),
        value: metric.value(r),
    })
    .collect();

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, subscribers: u64) -> ChannelRecord {
        ChannelRecord {
            name: name.into(),
            username: String::new(),
            author: String::new(),
            channel_type: "Компания".into(),
            theme: String::new(),
            about: String::new(),
            subscribers,
            posts_30d: 0,
            comments_30d: 0,
            comments_per_post: 0.0,
            description: String::new(),
        }
    }

    fn values(series: &[ChartPoint]) -> Vec<f64> {
        series.iter().map(|p| p.value).collect()
    }

    #[test]
    fn small_tables_are_returned_whole_and_ascending() {
        let table = vec![row("a", 100), row("b", 50)];
        let rows: Vec<&ChannelRecord> = table.iter().collect();

        let series = select_series(&rows, "Подписчики", 25, false).expect("series");
        assert_eq!(values(&series), vec![50.0, 100.0]);
    }

    #[test]
    fn cap_keeps_the_tail_of_the_sorted_sequence() {
        let table: Vec<ChannelRecord> = (0..10).map(|i| row(&format!("ch{i}"), i * 10)).collect();
        let rows: Vec<&ChannelRecord> = table.iter().collect();

        let series = select_series(&rows, "Подписчики", 3, false).expect("series");
        assert_eq!(values(&series), vec![70.0, 80.0, 90.0]);
    }

    #[test]
    fn show_all_overrides_the_cap() {
        let table: Vec<ChannelRecord> = (0..10).map(|i| row(&format!("ch{i}"), i)).collect();
        let rows: Vec<&ChannelRecord> = table.iter().collect();

        let series = select_series(&rows, "Подписчики", 3, true).expect("series");
        assert_eq!(series.len(), 10);
    }

    #[test]
    fn output_length_is_min_of_rows_and_cap() {
        let table: Vec<ChannelRecord> = (0..7).map(|i| row(&format!("ch{i}"), i)).collect();
        let rows: Vec<&ChannelRecord> = table.iter().collect();

        for cap in [3usize, 7, 25] {
            let series = select_series(&rows, "Подписчики", cap, false).expect("series");
            assert_eq!(series.len(), rows.len().min(cap));
        }
    }

    #[test]
    fn ties_keep_original_table_order() {
        let table = vec![row("first", 10), row("second", 10), row("third", 5)];
        let rows: Vec<&ChannelRecord> = table.iter().collect();

        let series = select_series(&rows, "Подписчики", 25, false).expect("series");
        let labels: Vec<&str> = series.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["third", "first", "second"]);
    }

    #[test]
    fn unknown_column_is_reported_not_a_crash() {
        let table = vec![row("a", 1)];
        let rows: Vec<&ChannelRecord> = table.iter().collect();

        let err = select_series(&rows, "Просмотры", 25, false).unwrap_err();
        assert!(matches!(err, ChannelScopeError::MissingColumn { .. }));
        assert!(err.to_string().contains("Просмотры"));
    }

    #[test]
    fn empty_subset_yields_an_empty_series() {
        let series = select_series(&[], "Подписчики", 25, false).expect("series");
        assert!(series.is_empty());
    }

    #[test]
    fn rows_of_type_partitions_by_exact_label() {
        let mut table = vec![row("a", 1), row("b", 2)];
        table[1].channel_type = "Персональный".into();
        let rows: Vec<&ChannelRecord> = table.iter().collect();

        let company = rows_of_type(&rows, ChannelType::Company);
        assert_eq!(company.len(), 1);
        assert_eq!(company[0].name, "a");
    }
}
