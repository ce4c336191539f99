//! Offline harness: replay a dropdown selection and a sequence of slider
//! moves against the dashboard engine and print the resulting view model.

use anyhow::{bail, Context, Result};
use clap::Parser;
use wasteflow_core::{Dashboard, DashboardConfig, DashboardEvent, Pathway, Selection};

#[derive(Parser, Debug)]
#[command(name = "wasteflow-cli", about = "Replay dashboard events and print the view model as JSON")]
struct Args {
    /// Dropdown value: the aggregate label, `aggregate`, or a sector key.
    #[arg(short, long, default_value = "aggregate")]
    selection: String,

    /// Slider move as `<pathway>=<percent>`, applied in order. Repeatable.
    #[arg(short, long = "adjust", value_parser = parse_adjust)]
    adjust: Vec<(Pathway, i32)>,

    /// Optional JSON dashboard configuration (labels, default splits, precedence).
    #[arg(short, long)]
    config: Option<String>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

fn parse_adjust(raw: &str) -> Result<(Pathway, i32)> {
    let Some((pathway, value)) = raw.split_once('=') else {
        bail!("expected <pathway>=<percent>, got '{raw}'");
    };
    let pathway: Pathway = pathway.parse()?;
    let value: i32 = value
        .trim()
        .parse()
        .with_context(|| format!("slider value '{value}' is not an integer"))?;
    Ok((pathway, value))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => DashboardConfig::from_path(path)
            .with_context(|| format!("loading dashboard config {path}"))?,
        None => DashboardConfig::default(),
    };
    let mut dashboard = Dashboard::new(config)?;

    let selection = dashboard.config().parse_selection(&args.selection)?;
    let mut view = dashboard.handle(DashboardEvent::SelectionChanged { selection })?;

    if selection == Selection::Aggregate && !args.adjust.is_empty() {
        bail!("slider adjustments need a sector selection, not '{}'", args.selection);
    }
    for &(pathway, value) in &args.adjust {
        view = dashboard
            .handle(DashboardEvent::SliderMoved { pathway, value })
            .with_context(|| format!("applying {pathway:?}={value}"))?;
        log::info!("{pathway:?}={value} -> {:?}", dashboard.state().allocation());
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&view)?
    } else {
        serde_json::to_string(&view)?
    };
    println!("{json}");
    Ok(())
}
