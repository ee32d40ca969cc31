//! Snapshot fixtures shared by the CLI tests.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::json;
use tempfile::TempDir;

pub(super) const START: &str = "Central Station";
pub(super) const END: &str = "Harbour Steps";

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write fixture file");
}

/// A temporary directory holding a small canal-side snapshot.
pub(super) struct SnapshotDir {
    _tmp: TempDir,
    root: Utf8PathBuf,
}

impl SnapshotDir {
    pub(super) fn new() -> Self {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        Self { _tmp: tmp, root }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Write the canal snapshot and return its path.
    pub(super) fn write_canal(&self) -> Utf8PathBuf {
        let path = self.root.join("canal.json");
        let payload = serde_json::to_vec_pretty(&canal_snapshot()).expect("serialise snapshot");
        write_utf8(&path, &payload);
        path
    }

    /// Write raw bytes as `name` and return its path.
    pub(super) fn write_raw(&self, name: &str, contents: &[u8]) -> Utf8PathBuf {
        let path = self.root.join(name);
        write_utf8(&path, contents);
        path
    }
}

/// Five street corners along a canal with an attraction at each.
pub(super) fn canal_snapshot() -> serde_json::Value {
    let nodes: Vec<_> = (0..5_u32)
        .map(|i| {
            json!({
                "id": i + 1,
                "location": { "x": 4.890 + f64::from(i) * 0.002, "y": 52.370 },
            })
        })
        .collect();
    let edges: Vec<_> = (1..5_u32)
        .map(|i| json!({ "from": i, "to": i + 1 }))
        .collect();
    json!({
        "nodes": nodes,
        "edges": edges,
        "pois": [
            { "name": START, "location": { "x": 4.890, "y": 52.370 }, "category": "attraction" },
            { "name": "Canal Museum", "location": { "x": 4.892, "y": 52.3702 }, "category": "museum" },
            { "name": "Print Gallery", "location": { "x": 4.894, "y": 52.3701 }, "category": "gallery" },
            { "name": "Lookout Tower", "location": { "x": 4.896, "y": 52.3702 }, "category": "viewpoint" },
            { "name": END, "location": { "x": 4.898, "y": 52.370 } },
        ],
    })
}
