use drillsearch::config::{Algorithm, Cli, Config};
use drillsearch::drilling::DrillingRobot;
use drillsearch::problem::Problem;
use drillsearch::report::{self, SolutionReport};
use drillsearch::search::{astar_search, breadth_first_graph_search, depth_first_graph_search};
use drillsearch::stat::Stats;
use drillsearch::viz;

use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();
    let cli = Cli::parse();

    let config = if let Some(config_file) = cli.config.as_ref() {
        let config_str = std::fs::read_to_string(config_file)?;
        Config::from_yaml_str(&config_str)
            .with_context(|| format!("error with config file: {config_file}"))?
    } else {
        info!("No config file specified, using default config");
        Config::default()
    }
    .override_from_command_line(&cli)?;

    let problem = DrillingRobot::from_file(&config.map_path)?;
    info!(
        "Problem loaded: From {} to {}",
        problem.initial(),
        problem.goal()
    );
    if config.algorithm == Algorithm::Astar {
        info!(
            "Heuristic selected: {}",
            config.heuristic.map_or("default", |kind| kind.as_str())
        );
    }

    let started = Instant::now();
    let outcome = match config.algorithm {
        Algorithm::Bfs => breadth_first_graph_search(&problem),
        Algorithm::Dfs => depth_first_graph_search(&problem),
        Algorithm::Astar => astar_search(
            &problem,
            config.heuristic.map(|kind| kind.resolve(&problem)),
        )?,
    };
    let elapsed = started.elapsed();

    let stats = Stats::collect(
        &config.map_path,
        config.algorithm,
        config.heuristic,
        &outcome,
        elapsed,
    );
    stats.print();

    if config.trace {
        report::print_path_trace(&problem, &outcome, config.algorithm, config.heuristic);
    }
    if let Some(metrics_path) = config.metrics_path.as_ref() {
        stats.append_csv(metrics_path)?;
        info!("Metrics appended to {metrics_path}");
    }
    if let Some(dot_path) = config.dot_path.as_ref() {
        let mut buffer = Vec::new();
        viz::write_dot(&outcome, &mut buffer)?;
        std::fs::write(dot_path, buffer)
            .with_context(|| format!("cannot write DOT file {dot_path}"))?;
        info!("Exploration graph written to {dot_path}");
    }
    if let Some(report_path) = config.report_path.as_ref() {
        let solution_report = SolutionReport::from_outcome(
            &config.map_path,
            &outcome,
            config.algorithm,
            config.heuristic,
        );
        let json = serde_json::to_string_pretty(&solution_report)?;
        std::fs::write(report_path, json)
            .with_context(|| format!("cannot write report file {report_path}"))?;
        info!("Solution report written to {report_path}");
    }

    Ok(())
}
