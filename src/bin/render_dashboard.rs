use std::fs;
use std::path::{Path, PathBuf};

use campaign_charts::aggregation::MarketingDataset;
use campaign_charts::dashboard::{DashboardConfig, ViewModel, all_views};
use campaign_charts::render::SvgRenderer;
use campaign_charts::telemetry;

const SUMMARY_FILE_NAME: &str = "summary.json";

#[derive(Debug)]
struct CliArgs {
    input_path: PathBuf,
    output_dir: PathBuf,
    config_path: Option<PathBuf>,
}

fn main() {
    let _ = telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let dataset = MarketingDataset::from_json_file(&args.input_path)
        .map_err(|err| format!("failed to load dataset: {err}"))?;
    let config = match &args.config_path {
        Some(path) => DashboardConfig::from_json_file(path)
            .map_err(|err| format!("failed to load config: {err}"))?,
        None => DashboardConfig::default(),
    };

    fs::create_dir_all(&args.output_dir).map_err(|err| {
        format!("failed to create `{}`: {err}", args.output_dir.display())
    })?;

    let views = all_views(&dataset, &config);
    let mut written = 0_usize;
    for view in &views {
        written += write_view_charts(view, &args.output_dir)?;
    }

    let summary_path = args.output_dir.join(SUMMARY_FILE_NAME);
    let serialized = serde_json::to_string_pretty(&views)
        .map_err(|err| format!("failed to serialize summary: {err}"))?;
    fs::write(&summary_path, format!("{serialized}\n"))
        .map_err(|err| format!("failed to write `{}`: {err}", summary_path.display()))?;

    println!(
        "rendered {written} chart(s) for {} campaign(s) into {}",
        dataset.campaigns.len(),
        args.output_dir.display()
    );
    Ok(())
}

fn write_view_charts(view: &ViewModel, output_dir: &Path) -> Result<usize, String> {
    for panel in &view.charts {
        let markup = SvgRenderer::render_to_string(&panel.chart.frame())
            .map_err(|err| format!("failed to render `{}`: {err}", panel.title))?;
        let path = output_dir.join(format!("{}-{}.svg", view.kind.slug(), panel.slug));
        fs::write(&path, markup)
            .map_err(|err| format!("failed to write `{}`: {err}", path.display()))?;
    }
    Ok(view.charts.len())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut input_path: Option<PathBuf> = None;
    let mut output_dir: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--input" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --input".to_owned())?;
                input_path = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output_dir = Some(PathBuf::from(value));
            }
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                config_path = Some(PathBuf::from(value));
            }
            "-h" | "--help" => {
                println!(
                    "Usage: cargo run --bin render_dashboard -- --input <dataset.json> --output <dir> [--config <config.json>]"
                );
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument `{arg}`"));
            }
        }
    }

    Ok(CliArgs {
        input_path: input_path.ok_or_else(|| "missing required --input".to_owned())?,
        output_dir: output_dir.ok_or_else(|| "missing required --output".to_owned())?,
        config_path,
    })
}
