//! Test-only fixtures: small synthetic street grids, POI builders, and a
//! constant `Scorer`, shared by unit, behaviour, and property tests across
//! the workspace.

use geo::Coord;

use crate::{
    Category, Corridor, Edge, Network, Node, NodeId, PoiCatalogue, PointOfInterest, Scorer,
};

/// Degrees between neighbouring grid nodes; roughly 111 m at the equator.
pub const GRID_SPACING_DEG: f64 = 0.001;

/// Identifier of the grid node at `(row, col)` in a grid `cols` wide.
#[must_use]
pub const fn grid_id(row: u64, col: u64, cols: u64) -> NodeId {
    row * cols + col
}

/// Location of the grid node at `(row, col)`.
#[must_use]
pub fn grid_coord(row: u64, col: u64) -> Coord<f64> {
    // Grid sizes in tests stay far below 2^52, so the conversions are exact.
    Coord {
        x: col as f64 * GRID_SPACING_DEG,
        y: row as f64 * GRID_SPACING_DEG,
    }
}

/// Build a `rows` by `cols` street grid near the equator.
///
/// Horizontal and vertical neighbours are joined by unmeasured edges, so
/// every edge costs its haversine length.
///
/// # Panics
/// Panics if the generated grid is rejected, which indicates a bug in this
/// helper.
#[must_use]
pub fn grid_network(rows: u64, cols: u64) -> Network {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();
    for row in 0..rows {
        for col in 0..cols {
            let id = grid_id(row, col, cols);
            nodes.push(Node::new(id, grid_coord(row, col)));
            if col + 1 < cols {
                edges.push(Edge::unmeasured(id, grid_id(row, col + 1, cols)));
            }
            if row + 1 < rows {
                edges.push(Edge::unmeasured(id, grid_id(row + 1, col, cols)));
            }
        }
    }
    Network::new(nodes, edges).expect("grid network is valid")
}

/// A point POI sitting exactly on grid node `(row, col)`.
#[must_use]
pub fn poi_at(name: &str, row: u64, col: u64, category: Category) -> PointOfInterest {
    PointOfInterest::new(name, grid_coord(row, col), category)
}

/// Catalogue with one named POI on each listed grid position.
#[must_use]
pub fn catalogue(entries: &[(&str, u64, u64, Category)]) -> PoiCatalogue {
    entries
        .iter()
        .map(|&(name, row, col, category)| poi_at(name, row, col, category))
        .collect()
}

/// `Scorer` that gives every POI the same score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantScorer(pub f64);

impl Scorer for ConstantScorer {
    fn score(&self, _poi: &PointOfInterest, _corridor: &Corridor) -> f64 {
        Self::sanitise(self.0)
    }
}
