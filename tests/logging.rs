use log::{Level, LevelFilter, Log, Metadata, Record};
use maze_pathfinding::{solve, GeneratorSettings, Grid, MazeGenerator, TemplateRegistry};
use std::sync::Mutex;

struct Recorder(Mutex<Vec<(Level, String)>>);

impl Log for Recorder {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut records) = self.0.lock() {
            records.push((record.level(), record.target().to_owned()));
        }
    }

    fn flush(&self) {}
}

static RECORDER: Recorder = Recorder(Mutex::new(Vec::new()));

/// Rejected walls are decided per candidate, so the solver must stay quiet about them
/// at the default level; only the one summary line per run may reach `info`.
#[test]
fn rejected_walls_do_not_log_at_info() {
    log::set_logger(&RECORDER).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let mut sealed = Grid::new(3).unwrap();
    sealed.set((0, 1).into(), true).unwrap();
    sealed.set((1, 0).into(), true).unwrap();
    assert!(!solve(&sealed).unwrap().is_solvable());

    let mut registry = TemplateRegistry::empty();
    registry.register("corridor", |grid: &mut Grid| {
        let n = grid.size();
        grid.set_rect(1..n, 0..n - 1, true);
    });
    let settings = GeneratorSettings::default().with_density(0.9).with_seed(4);
    let (_, report) = MazeGenerator::with_registry(registry)
        .generate_with_report(6, "corridor", &settings)
        .unwrap();
    assert!(report.rejected > 0);

    let records = RECORDER.0.lock().unwrap();
    let loud: Vec<_> = records.iter().filter(|(level, _)| *level <= Level::Info).collect();
    assert_eq!(loud.len(), 1, "{loud:?}");
    assert_eq!(loud[0].1, "maze_pathfinding::generator");
    assert!(records
        .iter()
        .any(|(level, target)| *level == Level::Debug && target == "maze_pathfinding::solver"));
}
