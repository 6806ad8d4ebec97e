//! Scenario tests for the whole map pipeline.

use approx::assert_relative_eq;
use glam::Vec2;
use voronoi_map::generation::{generate_cells, DiagramParams};
use voronoi_map::*;

fn square_sites() -> Vec<Vec2> {
    vec![
        Vec2::new(-1.0, -1.0),
        Vec2::new(1.0, -1.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(-1.0, 1.0),
    ]
}

#[test]
fn test_square_sites_split_into_quadrants() {
    let diagram = generate_cells(&square_sites(), &DiagramParams::new(4.0, 4.0)).unwrap();

    assert_eq!(diagram.triangulation.faces().len(), 2);
    assert_eq!(diagram.cells.len(), 4);
    for cell in &diagram.cells {
        assert_relative_eq!(geometry::polygon_area(&cell.vertices), 4.0, epsilon = 1e-4);
        assert!(cell.is_boundary);
        assert!(geometry::polygon_contains(&cell.vertices, cell.center));
    }
    assert_eq!(diagram.report.fallbacks().count(), 0);
}

#[test]
fn test_rejecting_cocircular_square_gives_empty_diagram() {
    let params = DiagramParams {
        cocircular: CocircularPolicy::Reject,
        ..DiagramParams::new(4.0, 4.0)
    };
    let diagram = generate_cells(&square_sites(), &params).unwrap();

    assert!(diagram.is_empty());
    assert!(diagram.triangulation.faces().is_empty());
}

#[test]
fn test_duplicate_site_is_rejected() {
    let mut sites = square_sites();
    sites.push(Vec2::new(1.0, 1.0));

    let err = generate_cells(&sites, &DiagramParams::new(4.0, 4.0)).unwrap_err();
    assert!(matches!(err, VoronoiError::DuplicateSite { .. }));
}

#[test]
fn test_short_ray_length_is_rejected() {
    let params = DiagramParams {
        ray_length: 1.0,
        ..DiagramParams::new(4.0, 4.0)
    };

    let err = generate_cells(&square_sites(), &params).unwrap_err();
    assert!(matches!(err, VoronoiError::InvalidConfig(_)));
}

#[test]
fn test_generated_map_covers_rectangle() {
    let config = MapConfigBuilder::new()
        .seed(7)
        .map_size(MapSize::Small)
        .distribution(SiteDistribution::JitteredGrid { jitter: 0.6 })
        .unwrap()
        .lloyd_iterations(2)
        .unwrap()
        .build()
        .unwrap();
    let map = VoronoiMap::generate(config).unwrap();

    assert_eq!(map.cell_count(), MapSize::Small.site_count());
    let total: f32 = map.cells().iter().map(|c| c.area()).sum();
    assert_relative_eq!(total, map.bounds().area(), max_relative = 1e-3);
    assert!(map.cells().iter().filter(|c| !c.is_empty()).all(|c| c.is_convex()));
}

#[test]
fn test_generation_is_deterministic() {
    let build = || {
        let config = MapConfigBuilder::new()
            .seed(1234)
            .map_size(MapSize::Tiny)
            .build()
            .unwrap();
        VoronoiMap::generate(config).unwrap()
    };

    let (a, b) = (build(), build());
    assert_eq!(a.sites(), b.sites());
    assert_eq!(a.cells(), b.cells());
}

#[test]
fn test_path_between_opposite_corners() {
    let config = MapConfigBuilder::new()
        .seed(99)
        .map_size(MapSize::Small)
        .distribution(SiteDistribution::JitteredGrid { jitter: 0.4 })
        .unwrap()
        .build()
        .unwrap();
    let map = VoronoiMap::generate(config).unwrap();
    let goal = map.cell_count() - 1;

    let path = map.find_path(0, goal).unwrap().expect("the cell graph is connected");
    assert_eq!(path.first(), Some(&0));
    assert_eq!(path.last(), Some(&goal));
    for step in path.windows(2) {
        assert!(map.get_cell(step[0]).unwrap().is_neighbor_of(step[1]));
    }

    assert!(matches!(
        map.find_path(0, map.cell_count()),
        Err(VoronoiError::CellNotFound(_))
    ));
}

#[cfg(feature = "spatial-index")]
#[test]
fn test_find_cell_at_matches_polygons() {
    let config = MapConfigBuilder::new()
        .seed(5)
        .map_size(MapSize::Tiny)
        .build()
        .unwrap();
    let map = VoronoiMap::generate(config).unwrap();

    for cell in map.cells().iter().filter(|c| !c.is_empty()) {
        let centroid = cell.centroid().unwrap();
        assert_eq!(map.find_cell_at(centroid), Some(cell.id));
    }
    assert_eq!(map.find_cell_at(Vec2::new(1000.0, 0.0)), None);
}

#[cfg(feature = "serde")]
#[test]
fn test_cell_serde_roundtrip() {
    let config = MapConfigBuilder::new().seed(3).map_size(MapSize::Tiny).build().unwrap();
    let map = VoronoiMap::generate(config).unwrap();

    let json = serde_json::to_string(map.cells()).unwrap();
    let cells: Vec<VoronoiCell> = serde_json::from_str(&json).unwrap();
    assert_eq!(cells, map.cells());
}
