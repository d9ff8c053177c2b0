//! Generates batches of random map files, one directory per size.

use std::fs;
use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, Level};

use drillsearch::drilling::{DrillingRobot, Goal, Heading, RobotState};
use drillsearch::map::Map;

#[derive(Parser, Debug)]
#[command(
    name = "genmaps",
    about = "Generate random map files for the drilling robot problem.",
    version = "0.1"
)]
struct Cli {
    #[arg(
        long,
        help = "Square map sizes N (generates N x N)",
        use_value_delimiter = true,
        default_values_t = [3, 5, 7, 9]
    )]
    sizes: Vec<usize>,

    #[arg(long, help = "How many random maps to generate per size", default_value_t = 5)]
    per_size: usize,

    #[arg(long, help = "Minimum rock hardness value (inclusive)", default_value_t = 1)]
    hardness_min: u32,

    #[arg(long, help = "Maximum rock hardness value (inclusive)", default_value_t = 9)]
    hardness_max: u32,

    #[arg(
        long,
        help = "Goal orientation (0..7), or 8 for irrelevant; random per map when omitted"
    )]
    goal_orientation: Option<u8>,

    #[arg(long, help = "Root output directory", default_value = "maps")]
    outdir: PathBuf,

    #[arg(long, help = "Random seed for reproducibility")]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();
    let cli = Cli::parse();

    if let Some(orientation) = cli.goal_orientation {
        ensure!(
            orientation <= 8,
            "goal orientation must be in 0..=8, found {orientation}"
        );
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    for &n in &cli.sizes {
        let subdir = cli.outdir.join(format!("N{n}x{n}"));
        fs::create_dir_all(&subdir)
            .with_context(|| format!("cannot create {}", subdir.display()))?;

        for i in 1..=cli.per_size {
            let map = Map::random(n, n, cli.hardness_min, cli.hardness_max, &mut rng)?;
            let orientation = cli
                .goal_orientation
                .unwrap_or_else(|| rng.gen_range(0..=8));

            // The start is fixed at the top-left corner facing north; the
            // goal sits at the opposite corner. Orientation 8 means any.
            let problem = DrillingRobot::new(
                map,
                RobotState {
                    x: 0,
                    y: 0,
                    heading: Heading::North,
                },
                Goal {
                    x: n - 1,
                    y: n - 1,
                    heading: Heading::from_index(orientation),
                },
            )?;

            let path = subdir.join(format!("map{i}.txt"));
            fs::write(&path, problem.to_file_string())
                .with_context(|| format!("cannot write {}", path.display()))?;
            info!(
                "Generated: {} (goal orientation = {})",
                path.display(),
                orientation
            );
        }
    }

    Ok(())
}
