mod cli;
mod display;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command, OverviewArgs, RawArgs};
use display::display_snapshot;
use sales_dashboard::{SalesDashboard, SalesQuery};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let mut dash = SalesDashboard::builder()
        .endpoint(args.endpoint.clone())
        .timeout(Duration::from_secs(args.timeout))
        .build()?;

    match &args.command {
        Command::Overview(a) => overview(&mut dash, a),
        Command::Raw(a) => raw(&mut dash, a),
    }
}

fn overview(dash: &mut SalesDashboard, args: &OverviewArgs) -> Result<()> {
    dash.load(&args.query())?;
    dash.apply_filter(&args.filter())?;

    let snapshot = dash.snapshot(args.top_sellers)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        display_snapshot(&snapshot);
    }
    Ok(())
}

fn raw(dash: &mut SalesDashboard, args: &RawArgs) -> Result<()> {
    // Raw data always covers the whole country and period
    dash.load(&SalesQuery::all())?;

    let bounds = dash.bounds()?;
    let filtered = dash.apply_filter(&args.filter(&bounds))?;
    let columns = args.columns();
    println!(
        "A tabela possui {} linhas e {} colunas",
        filtered.len(),
        columns.len()
    );

    let path = dash.export_csv_file(&args.output_dir, &args.output, &columns)?;
    info!("Download ready: {}", path.display());
    println!("{}", path.display());
    Ok(())
}
