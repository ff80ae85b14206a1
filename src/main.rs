use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use comfy_table::Table;
use configuration::Config;
use core_types::Channel;
use dashboard::{Dashboard, DashboardQuery, DashboardSnapshot};
use std::path::PathBuf;

/// The main entry point for the Pulse KPI dashboard.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse();

    let config = configuration::load_config(cli.config.as_deref())
        .context("Failed to load configuration")?;
    let _guard = configuration::init_tracing(&config.logging)?;

    // Execute the appropriate command
    let result = match cli.command {
        Commands::Snapshot(args) => handle_snapshot(args, &config),
        Commands::Serve(args) => handle_serve(args, config).await,
    };

    if let Err(e) = &result {
        tracing::error!(error = ?e, "Command failed.");
    }
    result
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Retail KPI dashboard over a seeded synthetic series.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a configuration file (defaults to an optional `config.toml`).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the KPI cards and regional revenue for a date window.
    Snapshot(SnapshotArgs),
    /// Serve the dashboard JSON API.
    Serve(ServeArgs),
}

#[derive(Parser)]
struct SnapshotArgs {
    /// First day of the window (format: YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last day of the window (format: YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Acquisition channel: all, direct, paid or organic.
    #[arg(long, default_value = "all")]
    channel: Channel,

    /// Print the full snapshot as JSON instead of tables.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct ServeArgs {
    /// Overrides `server.host` from the configuration.
    #[arg(long)]
    host: Option<String>,

    /// Overrides `server.port` from the configuration.
    #[arg(long)]
    port: Option<u16>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_snapshot(args: SnapshotArgs, config: &Config) -> anyhow::Result<()> {
    let dashboard = Dashboard::new(config)?;
    let query = DashboardQuery {
        start_date: args.from,
        end_date: args.to,
        channel: args.channel,
    };
    let snapshot = dashboard.snapshot(&query)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print_snapshot(&snapshot);
    }

    Ok(())
}

async fn handle_serve(args: ServeArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let addr = config.server.socket_addr()?;
    let dashboard = Dashboard::new(&config)?;
    web_server::run_server(addr, dashboard).await
}

fn print_snapshot(snapshot: &DashboardSnapshot) {
    let window = |date: Option<NaiveDate>| {
        date.map(|d| d.to_string())
            .unwrap_or_else(|| "open".to_string())
    };
    println!(
        "Window {} .. {} (channel: {}, {} days)",
        window(snapshot.start_date),
        window(snapshot.end_date),
        snapshot.channel.label(),
        snapshot.daily.len()
    );

    if snapshot.cards.is_empty() {
        println!("No data in the selected window.");
        return;
    }

    let mut cards = Table::new();
    cards.set_header(vec!["KPI", "Value"]);
    for card in &snapshot.cards {
        cards.add_row(vec![card.label.as_str(), card.value.as_str()]);
    }
    println!("{cards}");

    let mut regions = Table::new();
    regions.set_header(vec!["Region", "Revenue", "Share"]);
    for total in &snapshot.region_totals {
        regions.add_row(vec![
            total.region.to_string(),
            format!("${}", dashboard::cards::group_thousands(total.revenue, 0)),
            format!("{:.2}%", total.share_pct),
        ]);
    }
    println!("{regions}");

    if let Some(funnel) = &snapshot.funnel {
        let mut stages = Table::new();
        stages.set_header(vec!["Funnel (last day)", "Count", "% of sessions"]);
        for stage in &funnel.stages {
            stages.add_row(vec![
                stage.label.clone(),
                stage.value.to_string(),
                format!("{:.1}%", stage.pct_of_initial),
            ]);
        }
        println!("{stages}");
    }
}
