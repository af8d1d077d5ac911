//! CLI command definitions, routing, and tracing setup.

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use channelscope_analytics::{
    ChannelDetail, DashboardOptions, FilterSelection, build_dashboard, extract_companies, lookup,
    rows_of_type, select_series, summarize,
};
use channelscope_shared::{
    AppConfig, ChannelRecord, ChannelType, config_file_path, init_config, load_config,
};

/// Width of the value bars printed by `chart` and `dashboard`.
const BAR_WIDTH: usize = 40;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// channelscope — analytics over product-themed messaging channels.
#[derive(Parser)]
#[command(
    name = "channelscope",
    version,
    about = "Search, filter, and chart the product-channel dataset.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Override the dataset source URL from the config file.
    #[arg(long, global = true)]
    pub url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Print summary counts for the (optionally filtered) table.
    Summary {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// List the organizations found in the author column.
    Companies {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Print one bar chart for a metric column and type partition.
    Chart {
        /// Metric column label (e.g. "Подписчики").
        metric: String,

        /// Type partition to plot.
        #[arg(long, default_value = "Компания")]
        of: String,

        /// Show every row instead of capping at the display budget.
        #[arg(long)]
        all: bool,

        /// Override the display budget from the config file.
        #[arg(long)]
        cap: Option<usize>,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Print the full dashboard: summary plus every chart section.
    Dashboard {
        /// Chart keys whose show-all override should be on
        /// (e.g. --show-all comp_subs).
        #[arg(long = "show-all")]
        show_all: Vec<String>,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Show the detail card for one channel, by name, username, or author.
    Show {
        /// Channel name, username, or author string.
        identifier: String,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Filter flags shared by the table-reading subcommands. Each flag may be
/// repeated; an unset dimension passes everything through.
#[derive(Args, Default)]
pub(crate) struct FilterArgs {
    /// Keep rows whose name, username, or author equals this value.
    #[arg(long)]
    pub search: Vec<String>,

    /// Keep rows whose author tokens include this company.
    #[arg(long)]
    pub company: Vec<String>,

    /// Keep rows of this exact type value.
    #[arg(long = "type")]
    pub channel_type: Vec<String>,

    /// Keep rows whose theme column contains this label.
    #[arg(long)]
    pub theme: Vec<String>,

    /// Keep rows whose "about" column contains this label.
    #[arg(long)]
    pub about: Vec<String>,
}

impl FilterArgs {
    fn into_selection(self) -> FilterSelection {
        FilterSelection {
            search: self.search.into_iter().collect(),
            companies: self.company.into_iter().collect(),
            types: self.channel_type.into_iter().collect(),
            themes: self.theme.into_iter().collect(),
            about: self.about.into_iter().collect(),
        }
    }
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "channelscope=info",
        1 => "channelscope=debug",
        _ => "channelscope=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt().with_env_filter(env_filter).with_target(false).init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let mut config = load_config()?;
    if let Some(url) = cli.url {
        config.source.url = url;
    }

    match cli.command {
        Command::Summary { filters } => cmd_summary(&config, filters.into_selection()).await,
        Command::Companies { filters } => cmd_companies(&config, filters.into_selection()).await,
        Command::Chart {
            metric,
            of,
            all,
            cap,
            filters,
        } => cmd_chart(&config, &metric, &of, all, cap, filters.into_selection()).await,
        Command::Dashboard { show_all, filters } => {
            cmd_dashboard(&config, show_all, filters.into_selection()).await
        }
        Command::Show { identifier } => cmd_show(&config, &identifier).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(&config),
        },
    }
}

/// Fetch the table with a spinner. Every command re-fetches; there is no
/// cache between runs.
async fn load_table(config: &AppConfig) -> Result<Vec<ChannelRecord>> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .expect("valid template")
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner.set_message("Fetching dataset...");

    let result = channelscope_dataset::load(&config.source).await;
    spinner.finish_and_clear();

    let table = result?;
    info!(rows = table.len(), "dataset ready");
    Ok(table)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_summary(config: &AppConfig, selection: FilterSelection) -> Result<()> {
    let table = load_table(config).await?;
    let working = selection.apply(&table);
    let summary = summarize(&working);

    println!();
    println!("  Всего каналов:            {}", summary.total);
    println!(
        "  Количество компаний:      {}",
        summary.count(ChannelType::Company)
    );
    println!(
        "  Количество персональных:  {}",
        summary.count(ChannelType::Personal)
    );
    println!(
        "  Количество агрегаторов:   {}",
        summary.count(ChannelType::Aggregator)
    );
    println!();

    Ok(())
}

async fn cmd_companies(config: &AppConfig, selection: FilterSelection) -> Result<()> {
    let table = load_table(config).await?;
    let working: Vec<ChannelRecord> = selection.apply(&table).into_iter().cloned().collect();
    let companies = extract_companies(&working);

    if companies.is_empty() {
        println!("no companies found");
        return Ok(());
    }
    for company in &companies {
        println!("{company}");
    }
    println!();
    println!("{} companies", companies.len());

    Ok(())
}

async fn cmd_chart(
    config: &AppConfig,
    metric: &str,
    of: &str,
    all: bool,
    cap: Option<usize>,
    selection: FilterSelection,
) -> Result<()> {
    let partition_type = ChannelType::from_label(of)
        .ok_or_else(|| eyre!("unknown channel type '{of}' (expected one of: Компания, Персональный, Агрегатор)"))?;

    let table = load_table(config).await?;
    let working = selection.apply(&table);
    let partition = rows_of_type(&working, partition_type);

    let display_cap = cap.unwrap_or(config.display.max_bars);
    let series = select_series(&partition, metric, display_cap, all)?;

    if series.is_empty() {
        println!("no rows to chart");
        return Ok(());
    }

    println!();
    println!("  {metric} — {of}");
    println!();
    print_bars(&series);
    Ok(())
}

async fn cmd_dashboard(
    config: &AppConfig,
    show_all: Vec<String>,
    selection: FilterSelection,
) -> Result<()> {
    let table = load_table(config).await?;
    let options = DashboardOptions {
        display_cap: config.display.max_bars,
        show_all: show_all.into_iter().collect(),
    };
    let dashboard = build_dashboard(&table, &selection, &options);

    println!();
    println!("  Всего каналов:            {}", dashboard.summary.total);
    println!(
        "  Количество компаний:      {}",
        dashboard.summary.count(ChannelType::Company)
    );
    println!(
        "  Количество персональных:  {}",
        dashboard.summary.count(ChannelType::Personal)
    );
    println!(
        "  Количество агрегаторов:   {}",
        dashboard.summary.count(ChannelType::Aggregator)
    );

    let mut current_section = "";
    for chart in &dashboard.charts {
        if chart.section != current_section {
            current_section = chart.section;
            println!();
            println!("== {current_section} ==");
        }
        println!();
        println!("  {} [{}]", chart.title, chart.key);
        match &chart.series {
            Ok(series) if series.is_empty() => println!("    (пусто)"),
            Ok(series) => print_bars(series),
            Err(e) => println!("    chart skipped: {e}"),
        }
    }
    println!();

    Ok(())
}

async fn cmd_show(config: &AppConfig, identifier: &str) -> Result<()> {
    let table = load_table(config).await?;

    // The detail view always reads the unfiltered table.
    let Some(detail) = lookup(&table, identifier, config.display.wrap_width) else {
        return Err(eyre!("no channel matches '{identifier}'"));
    };

    print_detail(&detail);
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("config written to {}", path.display());
    Ok(())
}

fn cmd_config_show(config: &AppConfig) -> Result<()> {
    let path = config_file_path()?;
    println!("# {}", path.display());
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Terminal rendering helpers
// ---------------------------------------------------------------------------

/// Print a series as horizontal bars, largest on top. The selector hands
/// rows ascending; terminal output reads top-down, so render in reverse.
fn print_bars(series: &[channelscope_analytics::ChartPoint]) {
    let max_value = series.iter().map(|p| p.value).fold(0.0_f64, f64::max);
    let label_width = series
        .iter()
        .map(|p| p.label.chars().count())
        .max()
        .unwrap_or(0);

    for point in series.iter().rev() {
        let filled = if max_value > 0.0 {
            ((point.value / max_value) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        let pad = label_width - point.label.chars().count();
        println!(
            "    {}{}  {}{}",
            point.label,
            " ".repeat(pad),
            "█".repeat(filled),
            format_value(point.value),
        );
    }
}

fn format_value(value: f64) -> String {
    if (value.fract()).abs() < f64::EPSILON {
        format!(" {}", value as u64)
    } else {
        format!(" {value:.2}")
    }
}

fn print_detail(detail: &ChannelDetail<'_>) {
    let r = detail.record;
    println!();
    println!("  Название канала:          {}", r.name);
    println!("  Username:                 {}", r.username);
    println!("  Автор:                    {}", r.author);
    println!("  Тип:                      {}", r.channel_type);
    println!("  Тематика:                 {}", r.theme);
    println!("  Про что:                  {}", r.about);
    println!("  Подписчики:               {}", r.subscribers);
    println!("  Постов за 30 дней:        {}", r.posts_30d);
    println!("  Комментариев за 30 дней:  {}", r.comments_30d);
    println!("  Комментов на 1 пост:      {:.2}", r.comments_per_post);
    println!();
    println!("  Описание:");
    for line in detail.description.lines() {
        println!("    {line}");
    }
    println!();
}
