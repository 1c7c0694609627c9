//! Command line for solving maze files and generating new mazes.
use anyhow::Context;
use clap::{Parser, Subcommand};
use log::info;
use maze_io::{load_grid, save_grid, save_png, Summary};
use maze_pathfinding::{solve, GeneratorSettings, Grid, MazeGenerator, Path, Solution};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve a maze stored as a CSV matrix of 0 (free) and 1 (blocked)
    Solve {
        file: PathBuf,
        #[command(flatten)]
        output: Output,
    },
    /// Generate a solvable maze from a template
    Generate {
        /// Side length of the grid
        #[arg(long, default_value_t = 20)]
        size: usize,
        #[arg(long, default_value = "empty")]
        template: String,
        /// Fraction of cells to block, template walls included
        #[arg(long, default_value_t = 0.3)]
        density: f64,
        /// Maximum number of cells tried as walls
        #[arg(long, default_value_t = 1000)]
        attempts: usize,
        /// Stop after this many rejected walls
        #[arg(long)]
        max_rejections: Option<usize>,
        /// Random seed
        #[arg(long)]
        seed: Option<u64>,
        /// Write the grid as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
        #[command(flatten)]
        output: Output,
    },
    /// List the available templates
    Templates,
}

#[derive(clap::Args, Debug)]
struct Output {
    /// Write a PNG image with the shortest path in red
    #[arg(long)]
    image: Option<PathBuf>,
    /// Pixels per cell in the image
    #[arg(long, default_value_t = 8)]
    scale: u32,
    /// Print a JSON summary instead of the grid
    #[arg(long)]
    json: bool,
}

impl Output {
    fn emit(&self, summary: Summary) -> anyhow::Result<()> {
        if let Some(image) = &self.image {
            save_png(summary.grid, summary.path, self.scale, image)
                .with_context(|| format!("writing {}", image.display()))?;
            info!("Wrote {}", image.display());
        }
        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            print_grid(summary.grid, summary.path);
        }
        Ok(())
    }
}

fn print_grid(grid: &Grid, path: Option<&Path>) {
    match path {
        Some(path) => {
            print!("{}", grid.with_path(path));
            println!("Shortest path: {} steps", path.steps());
        }
        None => {
            print!("{}", grid);
            println!("No path from entrance to exit");
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
    let args = Args::parse();

    match args.command {
        Command::Solve { file, output } => {
            let grid = load_grid(&file).with_context(|| format!("loading {}", file.display()))?;
            let solution = solve(&grid)?;
            if let Solution::Unsolvable = solution {
                info!("{} has no path from entrance to exit", file.display());
            }
            output.emit(Summary::new(&grid, solution.path()))
        }
        Command::Generate {
            size,
            template,
            density,
            attempts,
            max_rejections,
            seed,
            csv,
            output,
        } => {
            let settings = GeneratorSettings {
                wall_density: density,
                max_attempts: attempts,
                max_rejections,
                seed,
            };
            let (grid, report) =
                MazeGenerator::new().generate_with_report(size, &template, &settings)?;
            if let Some(csv) = &csv {
                save_grid(&grid, csv).with_context(|| format!("writing {}", csv.display()))?;
                info!("Wrote {}", csv.display());
            }
            let solution = solve(&grid)?;
            output.emit(Summary::new(&grid, solution.path()).with_report(&report))
        }
        Command::Templates => {
            for name in MazeGenerator::new().registry().names() {
                println!("{name}");
            }
            Ok(())
        }
    }
}
