//! Spatial lookups over the network and the POI catalogue.
//!
//! Two R*-trees back the hot paths:
//!
//! - [`NodeLocator`] snaps coordinates to the nearest network node. Nodes
//!   are embedded as unit vectors on the sphere so chord order equals
//!   great-circle order; near-ties are refined with the exact haversine
//!   distance and broken by network order, matching
//!   [`nearest_node_linear`].
//! - [`DensityIndex`] counts POIs within a planar radius for scenic
//!   scoring.
//!
//! [`NodeResolver`] memoises name lookups for one network snapshot.

use std::collections::HashMap;
use std::sync::Mutex;

use geo::Coord;
use log::debug;
use rstar::RTree;
use rstar::primitives::GeomWithData;

use crate::geodesy::{KM_PER_DEGREE, haversine_km, planar_km};
use crate::{Network, NodeId, PoiCatalogue, SolveError};

/// Relative slack on squared chord length treated as a tie.
const TIE_TOLERANCE: f64 = 1e-9;

/// Absolute slack on chord length, in radians, covering rounding in the
/// unit-vector embedding. About 6 micrometres on the ground.
const CHORD_SLACK: f64 = 1e-12;

type NodeEntry = GeomWithData<[f64; 3], usize>;
type PoiEntry = GeomWithData<[f64; 2], usize>;

fn unit_vector(coord: Coord<f64>) -> [f64; 3] {
    let lat = coord.y.to_radians();
    let lon = coord.x.to_radians();
    [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
}

/// Nearest node to `target` by haversine distance using a linear scan.
///
/// Ties go to the node that appears first in the network.
#[must_use]
pub fn nearest_node_linear(network: &Network, target: Coord<f64>) -> Option<NodeId> {
    let mut best: Option<(f64, NodeId)> = None;
    for node in network.nodes() {
        let km = haversine_km(node.location, target);
        if best.is_none_or(|(best_km, _)| km < best_km) {
            best = Some((km, node.id));
        }
    }
    best.map(|(_, id)| id)
}

/// R*-tree accelerated nearest-node queries.
///
/// Results are identical to [`nearest_node_linear`].
///
/// # Examples
/// ```
/// use geo::Coord;
/// use ramble_core::{Network, Node, NodeLocator};
///
/// let network = Network::new(
///     vec![
///         Node::new(1, Coord { x: 0.0, y: 0.0 }),
///         Node::new(2, Coord { x: 0.01, y: 0.0 }),
///     ],
///     Vec::new(),
/// )
/// .expect("valid network");
/// let locator = NodeLocator::new(&network);
/// assert_eq!(locator.nearest(Coord { x: 0.009, y: 0.0 }), Some(2));
/// ```
#[derive(Debug)]
pub struct NodeLocator<'a> {
    network: &'a Network,
    tree: RTree<NodeEntry>,
}

impl<'a> NodeLocator<'a> {
    /// Index every node of `network`.
    #[must_use]
    pub fn new(network: &'a Network) -> Self {
        let entries = network
            .nodes()
            .iter()
            .enumerate()
            .map(|(idx, node)| NodeEntry::new(unit_vector(node.location), idx))
            .collect();
        Self {
            network,
            tree: RTree::bulk_load(entries),
        }
    }

    /// Nearest node to `target`, or `None` for an empty network.
    #[must_use]
    pub fn nearest(&self, target: Coord<f64>) -> Option<NodeId> {
        let query = unit_vector(target);
        let mut candidates = self.tree.nearest_neighbor_iter_with_distance_2(&query);
        let (first, best_d2) = candidates.next()?;
        let band = (best_d2.sqrt() + CHORD_SLACK).powi(2) * (1.0 + TIE_TOLERANCE);

        let mut best = self.refine(first.data, target)?;
        for (entry, d2) in candidates {
            if d2 > band {
                break;
            }
            if let Some(candidate) = self.refine(entry.data, target)
                && (candidate.0, candidate.1) < (best.0, best.1)
            {
                best = candidate;
            }
        }
        self.network.node_at(best.1).map(|node| node.id)
    }

    fn refine(&self, idx: usize, target: Coord<f64>) -> Option<(f64, usize)> {
        let node = self.network.node_at(idx)?;
        Some((haversine_km(node.location, target), idx))
    }

    /// The indexed network.
    #[must_use]
    pub const fn network(&self) -> &'a Network {
        self.network
    }
}

/// Count points of interest near a location.
///
/// Distances use the planar approximation from
/// [`planar_km`](crate::geodesy::planar_km); a POI counts only when it lies
/// strictly inside the radius.
#[derive(Debug)]
pub struct DensityIndex {
    tree: RTree<PoiEntry>,
}

impl DensityIndex {
    /// Index every entry of `pois`, duplicates included.
    #[must_use]
    pub fn new(pois: &PoiCatalogue) -> Self {
        let entries = pois
            .iter()
            .enumerate()
            .map(|(idx, poi)| PoiEntry::new([poi.location.x, poi.location.y], idx))
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Number of POIs strictly within `radius_km` of `center`.
    #[must_use]
    pub fn count_within(&self, center: Coord<f64>, radius_km: f64) -> u32 {
        if !radius_km.is_finite() || radius_km <= 0.0 {
            return 0;
        }
        let radius_deg = radius_km / KM_PER_DEGREE;
        let hits = self
            .tree
            .locate_within_distance([center.x, center.y], radius_deg * radius_deg)
            .filter(|entry| {
                let [x, y] = *entry.geom();
                planar_km(center, Coord { x, y }) < radius_km
            })
            .count();
        u32::try_from(hits).unwrap_or(u32::MAX)
    }

    /// Number of indexed POIs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Report whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

/// Resolve a POI name to its nearest network node without caching.
///
/// # Errors
/// Returns [`SolveError::AttractionNotFound`] when no POI has that name or
/// the network is empty.
pub fn resolve_node(
    network: &Network,
    pois: &PoiCatalogue,
    name: &str,
) -> Result<NodeId, SolveError> {
    pois.find(name)
        .and_then(|poi| nearest_node_linear(network, poi.location))
        .ok_or_else(|| not_found(name))
}

fn not_found(name: &str) -> SolveError {
    SolveError::AttractionNotFound {
        name: name.to_owned(),
    }
}

/// Memoising name-to-node resolver for one network snapshot.
///
/// The cache is keyed by lowercase name and guarded by a `Mutex` so the
/// resolver can be shared across scoring threads. A poisoned lock degrades
/// to uncached lookups.
#[derive(Debug)]
pub struct NodeResolver<'a> {
    pois: &'a PoiCatalogue,
    locator: NodeLocator<'a>,
    cache: Mutex<HashMap<String, Option<NodeId>>>,
}

impl<'a> NodeResolver<'a> {
    /// Build a resolver over `network` and `pois`.
    #[must_use]
    pub fn new(network: &'a Network, pois: &'a PoiCatalogue) -> Self {
        Self {
            pois,
            locator: NodeLocator::new(network),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve `name` to its nearest node.
    ///
    /// # Errors
    /// Returns [`SolveError::AttractionNotFound`] when the name is unknown or
    /// cannot be placed on the network.
    pub fn resolve_name(&self, name: &str) -> Result<NodeId, SolveError> {
        self.lookup(name).ok_or_else(|| not_found(name))
    }

    /// Resolve `name`, returning `None` instead of an error.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<NodeId> {
        let key = name.to_lowercase();
        if let Ok(cache) = self.cache.lock()
            && let Some(hit) = cache.get(&key)
        {
            return *hit;
        }

        let resolved = self
            .pois
            .find(name)
            .and_then(|poi| self.locator.nearest(poi.location));
        if resolved.is_none() {
            debug!("could not place '{name}' on the network");
        }
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(key, resolved);
        }
        resolved
    }

    /// The network this resolver places names on.
    #[must_use]
    pub const fn network(&self) -> &'a Network {
        self.locator.network()
    }

    /// The catalogue names are looked up in.
    #[must_use]
    pub const fn pois(&self) -> &'a PoiCatalogue {
        self.pois
    }
}
