//! Command-line front end over the same request handlers as the server.

use anyhow::{Context, bail};
use assay_planner::{about, logging};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "assay_cli",
    version = about::ASSAY_DISPLAY_VERSION,
    about = "Plan antibody assay plates from the command line",
    after_help = "Tip: pass @file.json instead of inline JSON"
)]
struct Cli {
    /// Write output here instead of stdout
    #[arg(long, short, global = true)]
    output: Option<PathBuf>,

    /// Tracing filter directives
    #[arg(long, env = "RUST_LOG", default_value = "warn", global = true)]
    log_filter: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate plate maps from a plate-map request
    PlateMap {
        /// Request JSON, or @path to a JSON file
        request: String,

        #[arg(long, short, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// 1-based plate to render when the format is svg
        #[arg(long, default_value_t = 1)]
        plate: usize,
    },
    /// Compute stock and diluent volumes per test article
    Dilutions {
        /// Request JSON, or @path to a JSON file
        request: String,
    },
    /// Compute reagent B and diluent volumes for a batch
    Reagent {
        /// Request JSON, or @path to a JSON file
        request: String,
    },
    /// Print the supported orientations, controls and endpoints
    Capabilities,
    /// Print version and build information
    Version,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Csv,
    Svg,
}

fn load_json_arg(value: &str) -> anyhow::Result<Value> {
    let text = match value.strip_prefix('@') {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Could not read JSON file '{path}'"))?,
        None => value.to_string(),
    };
    serde_json::from_str(&text).context("Invalid JSON payload")
}

fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    serde_json::to_string_pretty(value).context("Could not serialize JSON output")
}

fn render_plate_map(request: &Value, format: Format, plate: usize) -> anyhow::Result<String> {
    let response = assay_planner::protocol::plate_map(request)?;
    match format {
        Format::Json => to_json(&response),
        Format::Csv => Ok(assay_planner::render::plates_to_csv(&response.plates)?),
        Format::Svg => {
            let Some(selected) = plate.checked_sub(1).and_then(|i| response.plates.get(i)) else {
                bail!(
                    "Plate {plate} does not exist; the request produced {} plate(s)",
                    response.plates.len()
                );
            };
            Ok(assay_planner::render::export_plate_svg(selected))
        }
    }
}

fn execute(command: &Command) -> anyhow::Result<String> {
    match command {
        Command::PlateMap {
            request,
            format,
            plate,
        } => render_plate_map(&load_json_arg(request)?, *format, *plate),
        Command::Dilutions { request } => {
            to_json(&assay_planner::protocol::dilutions(&load_json_arg(request)?)?)
        }
        Command::Reagent { request } => {
            to_json(&assay_planner::protocol::reagent_b(&load_json_arg(request)?)?)
        }
        Command::Capabilities => to_json(&assay_planner::protocol::capabilities()),
        Command::Version => Ok(about::version_cli_text()),
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(&cli.log_filter);
    let text = execute(&cli.command)?;
    match &cli.output {
        Some(path) => {
            fs::write(path, &text)
                .with_context(|| format!("Could not write output file '{}'", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => println!("{}", text.trim_end()),
    }
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
