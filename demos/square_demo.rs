//! Example: Four co-circular sites
//!
//! The corners of a square are the classic degenerate input for a Delaunay
//! triangulation. Shows how each co-circular tie-break policy behaves.

use voronoi_map::generation::{generate_cells, DiagramParams};
use voronoi_map::*;

fn main() {
    let sites = [
        Vec2::new(-1.0, -1.0),
        Vec2::new(1.0, -1.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(-1.0, 1.0),
    ];

    for policy in [CocircularPolicy::Perturb, CocircularPolicy::Reject] {
        let params = DiagramParams {
            cocircular: policy,
            ..DiagramParams::new(4.0, 4.0)
        };
        let diagram = generate_cells(&sites, &params).expect("valid input");

        println!("Policy {policy:?}:");
        println!("  Delaunay faces: {}", diagram.triangulation.faces().len());
        for vertex in &diagram.vertices {
            println!("  Voronoi vertex {} at {}", vertex.index, vertex.position);
        }
        if diagram.is_empty() {
            println!("  No cells");
        }
        for cell in &diagram.cells {
            println!("  Cell {} -> {:?}", cell.id, cell.vertices);
        }
        println!();
    }
}
