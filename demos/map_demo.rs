//! Example: Generate a bounded Voronoi map
//!
//! Demonstrates the configuration builder, generation and cell queries.

use voronoi_map::generation::generate_raw_cells;
use voronoi_map::*;

fn main() {
    println!("Voronoi Map Generation Example");
    println!("==============================\n");

    let config = MapConfigBuilder::new()
        .seed(42)
        .map_size(MapSize::Small)
        .distribution(SiteDistribution::JitteredGrid { jitter: 0.7 })
        .unwrap()
        .lloyd_iterations(3)
        .unwrap()
        .build()
        .unwrap();

    let bounds = config.bounds();
    println!("Configuration:");
    println!("  Seed: {}", config.seed);
    println!("  Map Size: {}", config.map_size.name());
    println!("  Site Count: {}", config.site_count());
    println!("  Rectangle: {} x {}", bounds.width(), bounds.height());
    println!("  Lloyd Iterations: {}", config.lloyd_iterations);
    println!();

    println!("Generating map...");
    let diagram = generate_raw_cells(&config).expect("Failed to generate map");
    println!(
        "Generated {} cells from {} Delaunay faces\n",
        diagram.cells.len(),
        diagram.triangulation.faces().len()
    );

    let fallbacks: Vec<_> = diagram.report.fallbacks().collect();
    println!("Boundary extension fallbacks: {}", fallbacks.len());
    for (cell, reason) in &fallbacks {
        println!("  Cell {cell}: {reason:?}");
    }
    println!("Corner owners:");
    for assignment in &diagram.report.corners {
        println!("  {:?} -> cell {}", assignment.corner, assignment.cell);
    }
    println!();

    let map = VoronoiMap::generate(config).expect("Failed to generate map");

    let total_area: f32 = map.cells().iter().map(|c| c.area()).sum();
    let avg_neighbors =
        map.cells().iter().map(|c| c.neighbor_count()).sum::<usize>() as f32 / map.cell_count() as f32;

    println!("Statistics:");
    println!("  Total cell area: {:.3} (rectangle {:.3})", total_area, bounds.area());
    println!("  Average neighbors per cell: {avg_neighbors:.2}");
    println!(
        "  Boundary cells: {}",
        map.cells().iter().filter(|c| c.is_boundary).count()
    );
    println!();

    println!("Sample cells:");
    for cell in map.cells().iter().take(5) {
        println!(
            "  Cell {}: center=({:.2}, {:.2}), area={:.2}, neighbors={:?}",
            cell.id,
            cell.center.x,
            cell.center.y,
            cell.area(),
            cell.neighbors
        );
    }
    println!();

    let goal = map.cell_count() - 1;
    match map.find_path(0, goal) {
        Ok(Some(path)) => println!("Path from cell 0 to cell {goal}: {path:?}"),
        Ok(None) => println!("Cell {goal} is unreachable from cell 0"),
        Err(err) => println!("Path query failed: {err}"),
    }

    #[cfg(feature = "spatial-index")]
    {
        let probe = Vec2::new(1.5, -2.5);
        println!("Position {probe} is in cell {:?}", map.find_cell_at(probe));
    }

    println!("\nGeneration complete!");
}
