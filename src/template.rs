//! Named starting layouts for maze generation.
use crate::error::{MazeError, Result};
use crate::grid::Grid;
use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use log::debug;
use std::fmt;

/// Draws a template's walls onto an all-free grid.
pub type Painter = Box<dyn Fn(&mut Grid) + Send + Sync>;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Maps template names to painters. Templates are looked up by name and never changed
/// by instantiating them.
pub struct TemplateRegistry {
    templates: FxIndexMap<String, Painter>,
}

impl Default for TemplateRegistry {
    fn default() -> TemplateRegistry {
        TemplateRegistry::new()
    }
}

impl fmt::Debug for TemplateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.templates.keys()).finish()
    }
}

impl TemplateRegistry {
    /// A registry holding `empty`, `slalom`, `ess` and `essthin`.
    pub fn new() -> TemplateRegistry {
        let mut registry = TemplateRegistry::empty();
        registry.register("empty", |_: &mut Grid| {});
        registry.register("slalom", slalom);
        registry.register("ess", ess);
        registry.register("essthin", essthin);
        registry
    }

    /// A registry without any templates.
    pub fn empty() -> TemplateRegistry {
        TemplateRegistry {
            templates: FxIndexMap::default(),
        }
    }

    /// Adds a template, replacing any earlier one with the same name.
    pub fn register<F>(&mut self, name: impl Into<String>, painter: F)
    where
        F: Fn(&mut Grid) + Send + Sync + 'static,
    {
        self.templates.insert(name.into(), Box::new(painter));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Template names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    /// Paints the named template on a fresh `size` x `size` grid. Whatever the template
    /// draws, the entrance and exit come out free.
    pub fn instantiate(&self, name: &str, size: usize) -> Result<Grid> {
        let painter = self
            .templates
            .get(name)
            .ok_or_else(|| MazeError::UnknownTemplate {
                name: name.to_owned(),
                known: self.names().map(str::to_owned).collect(),
            })?;
        let mut grid = Grid::new(size)?;
        painter(&mut grid);
        grid.set(grid.entrance(), false)?;
        grid.set(grid.exit(), false)?;
        debug!(
            "Instantiated template {:?} at {}x{} with {} walls",
            name,
            size,
            size,
            grid.blocked_count()
        );
        Ok(grid)
    }
}

/// Horizontal bars every fifth row, alternately open on the left and on the right
/// end, so the way down zigzags.
fn slalom(grid: &mut Grid) {
    let n = grid.size();
    for i in 1..n.saturating_sub(1) {
        if i % 10 == 0 {
            grid.set_rect(i..i + 1, 0..n - 1, true);
        } else if i % 5 == 0 {
            grid.set_rect(i..i + 1, 1..n, true);
        }
    }
}

/// Two thick bars, each a fifth of the grid high, shaping an S.
fn ess(grid: &mut Grid) {
    let n = grid.size();
    let fifth = n / 5;
    grid.set_rect(fifth..2 * fifth, 0..4 * fifth, true);
    grid.set_rect(3 * fifth..4 * fifth, fifth..n, true);
}

/// One-cell bars at a third and two thirds of the height shaping an S. Left empty
/// below 6x6, where the bars would touch and seal the grid.
fn essthin(grid: &mut Grid) {
    let n = grid.size();
    let third = n / 3;
    if third < 2 {
        return;
    }
    grid.set_rect(third..third + 1, 0..n - 1, true);
    grid.set_rect(2 * third..2 * third + 1, 1..n, true);
}
