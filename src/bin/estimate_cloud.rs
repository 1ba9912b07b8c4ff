use jet_normals::config::estimate;
use jet_normals::io::{read_json_file, write_json_file, PointCloudInput};
use jet_normals::JetEstimator;
use log::info;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = estimate::load_config(Path::new(&config_path))?;

    let input: PointCloudInput = read_json_file(&config.input)?;
    input.validate()?;
    config.params.validate().map_err(|e| e.to_string())?;
    info!(
        "loaded {} points, {} queries from {}",
        input.points.len(),
        input.neighbors.len(),
        config.input.display()
    );

    let strategy = config.weighting.to_strategy(input.weights)?;
    let estimator = JetEstimator::new(config.params);
    let cloud = estimator.estimate_cloud(&input.points, &input.neighbors, strategy.as_ref());

    write_json_file(&config.output.result_json, &cloud)?;

    let report = &cloud.report;
    if let Some(ms) = report.timing.per_query_ms("fit", report.total) {
        info!("fit cost {ms:.4} ms/query");
    }
    for (kind, count) in &report.failures_by_kind {
        info!("failures {kind:?}: {count}");
    }
    println!(
        "Fitted {}/{} queries ({:.1}%, order {}, {} weights, {} flipped) in {:.3} ms",
        report.succeeded,
        report.total,
        100.0 * report.success_ratio(),
        report.order,
        report.weighting,
        report.flipped,
        report.timing.total_ms
    );
    println!("Saved results to {}", config.output.result_json.display());

    Ok(())
}

fn usage() -> String {
    "Usage: estimate_cloud <config.json>".to_string()
}
