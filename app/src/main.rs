use std::path::PathBuf;

use clap::Parser;
use common::result::Metric;
use eyre::Result;
use tracing::error;
use tracing_subscriber::{
    EnvFilter,
    fmt::{layer, time::ChronoLocal},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Plot Google Benchmark JSON output with log-scale axes
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Path to Google Benchmark JSON output file (generated with --benchmark_format=json)
    filename: PathBuf,
    /// Metric to plot: real_time or cpu_time
    #[arg(short, long, default_value_t = Metric::RealTime)]
    metric: Metric,
    /// Output file name to save graph
    #[arg(short, long)]
    output: PathBuf,
    /// Optional plot title
    #[arg(short, long)]
    title: Option<String>,
}

fn main() -> Result<()> {
    let log_level = std::env::var("RUST_LOG").unwrap_or("warn".to_owned());
    let args = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::new(format!(
            "gbench_plot={log_level},common={log_level}"
        )))
        .with(
            layer()
                .with_timer(ChronoLocal::new("%v %k:%M:%S %z".to_owned()))
                .compact(),
        )
        .init();

    if let Err(err) = common::plot::plot(
        &args.filename,
        &args.output,
        args.metric,
        args.title.as_deref(),
    ) {
        error!("{err:#?}");
        return Err(err.into());
    }
    Ok(())
}
