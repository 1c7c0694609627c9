use crate::error::{GenerationFailure, MazeError, Result};
use crate::grid::Grid;
use crate::solver::{solve, Path, Solution};
use crate::template::TemplateRegistry;
use crate::Cell;
use fxhash::FxHashSet;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Knobs for [MazeGenerator::generate].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratorSettings {
    /// Stop once this fraction of all cells is blocked, template walls included.
    /// Must lie in `[0, 1)`.
    pub wall_density: f64,
    /// Upper bound on the number of cells tried as walls.
    pub max_attempts: usize,
    /// Also stop after this many candidate walls were turned down.
    pub max_rejections: Option<usize>,
    /// Seed for the random cell choice; [None] draws one from the operating system.
    pub seed: Option<u64>,
}

impl Default for GeneratorSettings {
    fn default() -> GeneratorSettings {
        GeneratorSettings {
            wall_density: 0.3,
            max_attempts: 1000,
            max_rejections: None,
            seed: None,
        }
    }
}

impl GeneratorSettings {
    pub fn with_seed(mut self, seed: u64) -> GeneratorSettings {
        self.seed = Some(seed);
        self
    }

    pub fn with_density(mut self, wall_density: f64) -> GeneratorSettings {
        self.wall_density = wall_density;
        self
    }
}

/// What happened during one [MazeGenerator::generate_with_report] run.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationReport {
    pub attempts: usize,
    pub committed: usize,
    pub rejected: usize,
    /// Walls kept without a search because they were off the current shortest path.
    pub solves_skipped: usize,
    pub density: f64,
    pub reached_target: bool,
}

/// Grows solvable mazes out of the templates in its registry.
#[derive(Debug, Default)]
pub struct MazeGenerator {
    registry: TemplateRegistry,
}

impl MazeGenerator {
    /// A generator over the built-in templates.
    pub fn new() -> MazeGenerator {
        MazeGenerator::default()
    }

    pub fn with_registry(registry: TemplateRegistry) -> MazeGenerator {
        MazeGenerator { registry }
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut TemplateRegistry {
        &mut self.registry
    }

    pub fn generate(
        &self,
        size: usize,
        template: &str,
        settings: &GeneratorSettings,
    ) -> Result<Grid> {
        self.generate_with_report(size, template, settings)
            .map(|(grid, _)| grid)
    }

    /// Instantiates `template` and blocks random free cells one at a time, keeping a
    /// wall only if the exit stays reachable.
    ///
    /// Each attempt draws a cell uniformly from the free cells not yet tried, entrance
    /// and exit excepted. A wall off the current shortest path leaves that path intact
    /// and is kept straight away; one on it is kept only if [solve] still finds a path,
    /// which then becomes the current one. A turned-down cell is not drawn again:
    /// adding walls never reconnects a grid, so it would be turned down every time.
    ///
    /// Running out of attempts before the target density is reached is fine; the grid
    /// built so far is returned. Equal arguments and seed give equal grids.
    pub fn generate_with_report(
        &self,
        size: usize,
        template: &str,
        settings: &GeneratorSettings,
    ) -> Result<(Grid, GenerationReport)> {
        let density = settings.wall_density;
        if !(0.0..1.0).contains(&density) {
            return Err(MazeError::InvalidDensity(density));
        }
        let failed = |reason| MazeError::GenerationFailed {
            template: template.to_owned(),
            size,
            reason,
        };

        let mut grid = self.registry.instantiate(template, size)?;
        let mut path = solve(&grid)?
            .into_path()
            .ok_or_else(|| failed(GenerationFailure::TemplateUnsolvable))?;
        let mut on_path = cell_set(&path);

        let mut rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (entrance, exit) = (grid.entrance(), grid.exit());
        let mut candidates: Vec<Cell> = grid
            .free_cells()
            .filter(|&c| c != entrance && c != exit)
            .collect();
        let target = density * size as f64 * size as f64;
        let mut blocked = grid.blocked_count();
        let mut report = GenerationReport::default();

        while (blocked as f64) < target
            && report.attempts < settings.max_attempts
            && settings.max_rejections.map_or(true, |max| report.rejected < max)
            && !candidates.is_empty()
        {
            report.attempts += 1;
            let cell = candidates.swap_remove(rng.gen_range(0..candidates.len()));
            grid.set(cell, true)?;
            if !on_path.contains(&cell) {
                report.solves_skipped += 1;
            } else {
                match solve(&grid)? {
                    Solution::Path(new_path) => {
                        on_path = cell_set(&new_path);
                        path = new_path;
                    }
                    Solution::Unsolvable => {
                        debug!("Blocking {} disconnects the exit, reverting", cell);
                        grid.set(cell, false)?;
                        report.rejected += 1;
                        continue;
                    }
                }
            }
            report.committed += 1;
            blocked += 1;
        }

        grid.validate()?;
        if !solve(&grid)?.is_solvable() {
            return Err(failed(GenerationFailure::FinalUnsolvable));
        }
        report.density = grid.density();
        report.reached_target = (blocked as f64) >= target;
        info!(
            "Generated {}x{} maze from {:?}: {} walls added in {} attempts ({} rejected), density {:.3}, shortest path {} steps",
            size,
            size,
            template,
            report.committed,
            report.attempts,
            report.rejected,
            report.density,
            path.steps()
        );
        Ok((grid, report))
    }
}

fn cell_set(path: &Path) -> FxHashSet<Cell> {
    path.iter().copied().collect()
}

/// Generates a solvable `size` x `size` maze from one of the built-in templates.
/// See [MazeGenerator::generate_with_report] for how walls are placed.
pub fn generate(
    size: usize,
    template_name: &str,
    wall_density: f64,
    max_attempts: usize,
    rng_seed: Option<u64>,
) -> Result<Grid> {
    let settings = GeneratorSettings {
        wall_density,
        max_attempts,
        max_rejections: None,
        seed: rng_seed,
    };
    MazeGenerator::new().generate(size, template_name, &settings)
}
