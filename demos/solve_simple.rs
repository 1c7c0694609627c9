use maze_pathfinding::{solve, Cell, Grid, Solution};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the entrance
// - E marks the exit

fn main() {
    let mut grid = Grid::new(3).unwrap();
    grid.set(Cell::new(1, 1), true).unwrap();
    println!("{}", grid);
    match solve(&grid).unwrap() {
        Solution::Path(path) => {
            println!("{}", grid.with_path(&path));
            println!("Path:");
            for cell in path {
                println!("{}", cell);
            }
        }
        Solution::Unsolvable => println!("No path"),
    }
}
