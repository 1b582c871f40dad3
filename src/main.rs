use agnes::{cluster_genes, AgnesHyperParams, GeneSeries};
use std::process::ExitCode;
use std::{env, fs};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: agnes <csv> [euclidean|pearson|spearman] [single|average|complete]

Each row is `gene_id,v1,v2,...`. A first row without any numeric cell is read as a header.";

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(env::args().skip(1).collect()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Vec<String>) -> Result<String, String> {
    let path = args.first().ok_or_else(|| USAGE.to_string())?;
    let dist_metric = args.get(1).map(String::as_str).unwrap_or("euclidean");
    let linkage = args.get(2).map(String::as_str).unwrap_or("average");
    let hyper_params =
        AgnesHyperParams::from_names(dist_metric, linkage).map_err(|e| e.to_string())?;

    let contents = fs::read_to_string(path).map_err(|e| format!("Unable to read {path}: {e}"))?;
    let genes = parse_rows(&contents);

    let result = cluster_genes(&genes, &hyper_params).map_err(|e| e.to_string())?;
    serde_json::to_string_pretty(&result).map_err(|e| e.to_string())
}

// One gene per line: `gene_id,v1,v2,...`. Empty or unparsable cells are missing values.
fn parse_rows(contents: &str) -> Vec<GeneSeries<f64>> {
    let mut lines = contents.lines().filter(|line| !line.trim().is_empty()).peekable();
    if lines.peek().is_some_and(|line| is_header(line)) {
        lines.next();
    }
    lines
        .map(|line| {
            let mut cells = line.split(',');
            let gene_id = cells.next().unwrap_or_default().trim().to_string();
            let series = cells
                .map(|cell| cell.trim().parse::<f64>().unwrap_or(f64::NAN))
                .collect();
            GeneSeries {
                gene_id,
                gene_name: None,
                series,
            }
        })
        .collect()
}

// A header names its columns: it has value cells and none of them is a number.
fn is_header(line: &str) -> bool {
    let cells: Vec<&str> = line
        .split(',')
        .skip(1)
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .collect();
    !cells.is_empty() && cells.iter().all(|cell| cell.parse::<f64>().is_err())
}
