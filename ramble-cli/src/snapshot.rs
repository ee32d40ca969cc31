//! City snapshots: a street network and its named POIs in one JSON file.
//!
//! ```json
//! {
//!   "nodes": [{ "id": 1, "location": { "x": 4.89, "y": 52.37 } }],
//!   "edges": [{ "from": 1, "to": 2, "length_m": 120.0 }],
//!   "pois": [{ "name": "Rijksmuseum", "location": { "x": 4.885, "y": 52.36 }, "category": "museum" }]
//! }
//! ```

use std::io::BufReader;

use camino::Utf8Path;
use ramble_core::{Edge, Network, Node, PoiCatalogue};
use serde::Deserialize;

use crate::CliError;
use crate::fs::open_utf8_file;

/// Raw snapshot as stored on disk.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct Snapshot {
    pub(crate) nodes: Vec<Node>,
    #[serde(default)]
    pub(crate) edges: Vec<Edge>,
    #[serde(default)]
    pub(crate) pois: PoiCatalogue,
}

impl Snapshot {
    /// Load and decode the snapshot at `path`.
    pub(crate) fn load(path: &Utf8Path) -> Result<Self, CliError> {
        let file = open_utf8_file(path).map_err(|source| CliError::OpenSnapshot {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParseSnapshot {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Build the network, keeping the catalogue as loaded.
    pub(crate) fn into_parts(self, path: &Utf8Path) -> Result<(Network, PoiCatalogue), CliError> {
        let network =
            Network::new(self.nodes, self.edges).map_err(|source| CliError::InvalidNetwork {
                path: path.to_path_buf(),
                source,
            })?;
        log::debug!(
            "loaded {} nodes and {} POIs from {path}",
            network.len(),
            self.pois.len()
        );
        Ok((network, self.pois))
    }
}
