use maze_pathfinding::{solve, GeneratorSettings, MazeGenerator};

// Grows a 20x20 maze out of every built-in template and prints it with its shortest
// path.

fn main() {
    let generator = MazeGenerator::new();
    let settings = GeneratorSettings::default().with_density(0.35).with_seed(2024);
    for name in generator.registry().names() {
        let (grid, report) = generator.generate_with_report(20, name, &settings).unwrap();
        let path = solve(&grid).unwrap().into_path().unwrap();
        println!("{name}: {report:?}");
        println!("{}", grid.with_path(&path));
    }
}
