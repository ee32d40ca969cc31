//! Street network snapshot used for routing.
//!
//! The map data provider owns the raw graph; the engine only needs an
//! immutable, validated view with symmetric edge costs. Edge lengths are
//! resolved to kilometres once at construction so searches never branch on
//! missing attributes.

use std::collections::HashMap;

use geo::Coord;
use thiserror::Error;

use crate::geodesy::haversine_km;

/// Identifier of a street network node as issued by the map provider.
pub type NodeId = u64;

/// A street network node.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    /// Provider-issued identifier.
    pub id: NodeId,
    /// Geospatial position.
    pub location: Coord<f64>,
}

impl Node {
    /// Construct a node.
    #[must_use]
    pub const fn new(id: NodeId, location: Coord<f64>) -> Self {
        Self { id, location }
    }
}

/// An undirected street segment.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    /// One endpoint.
    pub from: NodeId,
    /// The other endpoint.
    pub to: NodeId,
    /// Segment length in metres, when the provider supplied one.
    #[cfg_attr(feature = "serde", serde(default))]
    pub length_m: Option<f64>,
}

impl Edge {
    /// Construct an edge with a known length in metres.
    #[must_use]
    pub const fn with_length(from: NodeId, to: NodeId, length_m: f64) -> Self {
        Self {
            from,
            to,
            length_m: Some(length_m),
        }
    }

    /// Construct an edge whose length is derived from its endpoints.
    #[must_use]
    pub const fn unmeasured(from: NodeId, to: NodeId) -> Self {
        Self {
            from,
            to,
            length_m: None,
        }
    }
}

/// Errors returned by [`Network::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetworkError {
    /// Two nodes shared an identifier.
    #[error("node {id} appears more than once")]
    DuplicateNode {
        /// The repeated identifier.
        id: NodeId,
    },
    /// An edge referenced a node that was not supplied.
    #[error("edge {from} -> {to} references unknown node {missing}")]
    UnknownNode {
        /// Edge origin.
        from: NodeId,
        /// Edge destination.
        to: NodeId,
        /// The identifier that could not be found.
        missing: NodeId,
    },
    /// An edge length was negative or not a number.
    #[error("edge {from} -> {to} has invalid length {length_m} m")]
    InvalidLength {
        /// Edge origin.
        from: NodeId,
        /// Edge destination.
        to: NodeId,
        /// Offending length.
        length_m: f64,
    },
}

/// A neighbour reachable over one edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjacent {
    /// Dense index of the neighbouring node.
    pub index: usize,
    /// Edge cost in kilometres.
    pub length_km: f64,
}

/// An immutable street network with dense node indices.
///
/// Nodes keep the order they were supplied in; that order is the fixed
/// iteration order used for deterministic tie-breaking.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use ramble_core::{Edge, Network, Node};
///
/// let network = Network::new(
///     vec![
///         Node::new(1, Coord { x: 0.0, y: 0.0 }),
///         Node::new(2, Coord { x: 0.01, y: 0.0 }),
///     ],
///     vec![Edge::with_length(1, 2, 1000.0)],
/// )
/// .expect("valid network");
///
/// assert_eq!(network.len(), 2);
/// assert_eq!(network.edge_km(1, 2), Some(1.0));
/// assert_eq!(network.edge_km(2, 1), Some(1.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Network {
    nodes: Vec<Node>,
    index: HashMap<NodeId, usize>,
    adjacency: Vec<Vec<Adjacent>>,
}

impl Network {
    /// Validate and build a network from provider nodes and edges.
    ///
    /// Parallel edges keep the shortest length. Self-loops are ignored since
    /// they never shorten a walk.
    ///
    /// # Errors
    /// Returns [`NetworkError`] for duplicate nodes, dangling edges, or
    /// negative/non-finite lengths.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, NetworkError> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (position, node) in nodes.iter().enumerate() {
            if index.insert(node.id, position).is_some() {
                return Err(NetworkError::DuplicateNode { id: node.id });
            }
        }

        let mut adjacency = vec![Vec::new(); nodes.len()];
        for edge in edges {
            let (from_idx, to_idx) = Self::endpoints(&index, &edge)?;
            if from_idx == to_idx {
                continue;
            }
            let length_km = match edge.length_m {
                Some(length_m) if length_m.is_finite() && length_m >= 0.0 => length_m / 1000.0,
                Some(length_m) => {
                    return Err(NetworkError::InvalidLength {
                        from: edge.from,
                        to: edge.to,
                        length_m,
                    });
                }
                None => match (nodes.get(from_idx), nodes.get(to_idx)) {
                    (Some(a), Some(b)) => haversine_km(a.location, b.location),
                    _ => continue,
                },
            };
            link(&mut adjacency, from_idx, to_idx, length_km);
            link(&mut adjacency, to_idx, from_idx, length_km);
        }

        Ok(Self {
            nodes,
            index,
            adjacency,
        })
    }

    fn endpoints(
        index: &HashMap<NodeId, usize>,
        edge: &Edge,
    ) -> Result<(usize, usize), NetworkError> {
        let lookup = |id: NodeId| {
            index.get(&id).copied().ok_or(NetworkError::UnknownNode {
                from: edge.from,
                to: edge.to,
                missing: id,
            })
        };
        Ok((lookup(edge.from)?, lookup(edge.to)?))
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Report whether the network has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in their fixed iteration order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Dense index of `id`, if present.
    #[must_use]
    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Node stored at a dense index.
    #[must_use]
    pub fn node_at(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Location of the node with identifier `id`.
    #[must_use]
    pub fn location(&self, id: NodeId) -> Option<Coord<f64>> {
        self.index_of(id)
            .and_then(|idx| self.node_at(idx))
            .map(|node| node.location)
    }

    /// Neighbours of the node at `index`, in edge insertion order.
    #[must_use]
    pub fn neighbours(&self, index: usize) -> &[Adjacent] {
        self.adjacency.get(index).map_or(&[], Vec::as_slice)
    }

    /// Cost in kilometres of the direct edge between two nodes.
    #[must_use]
    pub fn edge_km(&self, from: NodeId, to: NodeId) -> Option<f64> {
        let from_idx = self.index_of(from)?;
        let to_idx = self.index_of(to)?;
        self.neighbours(from_idx)
            .iter()
            .find(|adjacent| adjacent.index == to_idx)
            .map(|adjacent| adjacent.length_km)
    }

    /// Straight-line distance between two nodes, if both exist.
    #[must_use]
    pub fn straight_line_km(&self, from: NodeId, to: NodeId) -> Option<f64> {
        Some(haversine_km(self.location(from)?, self.location(to)?))
    }
}

fn link(adjacency: &mut [Vec<Adjacent>], from: usize, to: usize, length_km: f64) {
    let Some(list) = adjacency.get_mut(from) else {
        return;
    };
    if let Some(existing) = list.iter_mut().find(|adjacent| adjacent.index == to) {
        existing.length_km = existing.length_km.min(length_km);
    } else {
        list.push(Adjacent {
            index: to,
            length_km,
        });
    }
}
