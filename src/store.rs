//! Content store seam.
//!
//! The engine never talks to a concrete repository; it consumes the
//! [`ContentStore`] trait, which is the path-addressed flattening of a
//! session + node-handle API: look up items, read a node's binary payload,
//! deep-create node trees, set properties, and commit pending changes.
//!
//! Binary files follow the container convention: a [`NodeType::File`] node
//! holds no payload itself; its [`CONTENT_CHILD`] resource node carries the
//! [`PROP_DATA`], [`PROP_MIMETYPE`], and [`PROP_LAST_MODIFIED`] properties.
//!
//! [`MemoryStore`] is the reference implementation: a `BTreeMap` of nodes
//! with pending-change tracking. It backs the test suite and lets embedders
//! run the whole pipeline without a real repository behind it.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Child node holding a file's binary payload.
pub const CONTENT_CHILD: &str = "content";
/// Property carrying the binary payload on a resource node.
pub const PROP_DATA: &str = "data";
/// Property carrying the payload's mimetype.
pub const PROP_MIMETYPE: &str = "mimetype";
/// Property carrying the payload's last-modified timestamp.
pub const PROP_LAST_MODIFIED: &str = "lastModified";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("item not found: {0}")]
    NotFound(String),
    #[error("store I/O failure: {0}")]
    Io(String),
}

/// Node types the engine distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeType {
    /// Container for a binary file; payload lives on its content child.
    File,
    /// Resource node carrying a binary payload directly.
    Resource,
    /// Anything else (folders, custom types).
    #[default]
    Other,
}

/// Handle-free description of a store node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeInfo {
    /// Full path of the node.
    pub path: String,
    /// Leaf name (last path segment).
    pub name: String,
    pub node_type: NodeType,
}

/// Property values a node can carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Binary(Vec<u8>),
    Text(String),
    Timestamp(DateTime<Utc>),
}

/// The store operations the derivative pipeline consumes.
///
/// Implementations are expected to be transactional in the loose sense of
/// the original repository API: mutations accumulate as pending changes
/// until [`save`](ContentStore::save) commits them.
pub trait ContentStore {
    /// Whether an item exists at `path`.
    fn item_exists(&self, path: &str) -> bool;

    /// Look up the node at `path`.
    fn get_item(&self, path: &str) -> Result<NodeInfo, StoreError>;

    /// Read the binary payload ([`PROP_DATA`]) of the node at `path`.
    fn read_binary(&self, path: &str) -> Result<Vec<u8>, StoreError>;

    /// Get the node at `path`, creating it and any missing intermediate
    /// nodes with the given type.
    fn deep_get_or_create(
        &mut self,
        path: &str,
        node_type: NodeType,
    ) -> Result<NodeInfo, StoreError>;

    /// Set a property on the node at `path`.
    fn set_property(
        &mut self,
        path: &str,
        name: &str,
        value: PropertyValue,
    ) -> Result<(), StoreError>;

    /// Whether uncommitted mutations are pending.
    fn has_pending_changes(&self) -> bool;

    /// Commit pending mutations.
    fn save(&mut self) -> Result<(), StoreError>;
}

/// Leaf name of a path (`/a/b/c` → `c`).
pub(crate) fn leaf_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Parent path (`/a/b/c` → `/a/b`); `None` at the root.
pub(crate) fn parent_path(path: &str) -> Option<&str> {
    let trimmed = path.trim_end_matches('/');
    let idx = trimmed.rfind('/')?;
    if idx == 0 { None } else { Some(&trimmed[..idx]) }
}

#[derive(Debug, Default, Clone)]
struct NodeRecord {
    node_type: NodeType,
    properties: BTreeMap<String, PropertyValue>,
}

/// In-memory [`ContentStore`] backed by a path-keyed `BTreeMap`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    nodes: BTreeMap<String, NodeRecord>,
    pending: bool,
    saves: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a node at `path` with the given type, without marking pending
    /// changes. Fixture setup for tests and examples.
    pub fn put_node(&mut self, path: &str, node_type: NodeType) {
        self.nodes
            .entry(path.to_string())
            .or_default()
            .node_type = node_type;
    }

    /// Store a binary file at `path` following the file/content convention.
    pub fn put_file(&mut self, path: &str, data: Vec<u8>) {
        self.put_node(path, NodeType::File);
        let record = self.nodes.entry(format!("{path}/{CONTENT_CHILD}")).or_default();
        record.node_type = NodeType::Resource;
        record
            .properties
            .insert(PROP_DATA.to_string(), PropertyValue::Binary(data));
    }

    /// Read a property from the node at `path`, if present.
    pub fn property(&self, path: &str, name: &str) -> Option<&PropertyValue> {
        self.nodes.get(path)?.properties.get(name)
    }

    /// Number of successful commits.
    pub fn save_count(&self) -> u32 {
        self.saves
    }
}

impl ContentStore for MemoryStore {
    fn item_exists(&self, path: &str) -> bool {
        self.nodes.contains_key(path)
    }

    fn get_item(&self, path: &str) -> Result<NodeInfo, StoreError> {
        let record = self
            .nodes
            .get(path)
            .ok_or_else(|| StoreError::NotFound(path.to_string()))?;
        Ok(NodeInfo {
            path: path.to_string(),
            name: leaf_name(path).to_string(),
            node_type: record.node_type,
        })
    }

    fn read_binary(&self, path: &str) -> Result<Vec<u8>, StoreError> {
        let record = self
            .nodes
            .get(path)
            .ok_or_else(|| StoreError::NotFound(path.to_string()))?;
        match record.properties.get(PROP_DATA) {
            Some(PropertyValue::Binary(bytes)) => Ok(bytes.clone()),
            _ => Err(StoreError::Io(format!("no binary payload at {path}"))),
        }
    }

    fn deep_get_or_create(
        &mut self,
        path: &str,
        node_type: NodeType,
    ) -> Result<NodeInfo, StoreError> {
        // Create ancestors first so a partially-present tree fills in.
        let mut prefix = String::new();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            prefix.push('/');
            prefix.push_str(segment);
            if !self.nodes.contains_key(&prefix) {
                self.nodes.insert(
                    prefix.clone(),
                    NodeRecord {
                        node_type,
                        properties: BTreeMap::new(),
                    },
                );
                self.pending = true;
            }
        }
        self.get_item(path)
    }

    fn set_property(
        &mut self,
        path: &str,
        name: &str,
        value: PropertyValue,
    ) -> Result<(), StoreError> {
        let record = self
            .nodes
            .get_mut(path)
            .ok_or_else(|| StoreError::NotFound(path.to_string()))?;
        record.properties.insert(name.to_string(), value);
        self.pending = true;
        Ok(())
    }

    fn has_pending_changes(&self) -> bool {
        self.pending
    }

    fn save(&mut self) -> Result<(), StoreError> {
        self.pending = false;
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_item_missing_path_is_not_found() {
        let store = MemoryStore::new();
        assert!(!store.item_exists("/nope"));
        assert!(matches!(
            store.get_item("/nope"),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn put_file_follows_content_convention() {
        let mut store = MemoryStore::new();
        store.put_file("/img/a", vec![1, 2, 3]);

        let file = store.get_item("/img/a").unwrap();
        assert_eq!(file.node_type, NodeType::File);
        assert_eq!(file.name, "a");

        let content = store.get_item("/img/a/content").unwrap();
        assert_eq!(content.node_type, NodeType::Resource);
        assert_eq!(store.read_binary("/img/a/content").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn read_binary_on_payloadless_node_is_io() {
        let mut store = MemoryStore::new();
        store.put_node("/folder", NodeType::Other);
        assert!(matches!(
            store.read_binary("/folder"),
            Err(StoreError::Io(_))
        ));
    }

    #[test]
    fn deep_get_or_create_builds_intermediates() {
        let mut store = MemoryStore::new();
        let node = store
            .deep_get_or_create("/a/b/c", NodeType::File)
            .unwrap();
        assert_eq!(node.name, "c");
        assert!(store.item_exists("/a"));
        assert!(store.item_exists("/a/b"));
        assert_eq!(store.get_item("/a/b").unwrap().node_type, NodeType::File);
    }

    #[test]
    fn deep_get_or_create_keeps_existing_nodes() {
        let mut store = MemoryStore::new();
        store.put_node("/a", NodeType::Other);
        store.deep_get_or_create("/a/b", NodeType::File).unwrap();
        // Pre-existing node keeps its type.
        assert_eq!(store.get_item("/a").unwrap().node_type, NodeType::Other);
    }

    #[test]
    fn pending_changes_cleared_by_save() {
        let mut store = MemoryStore::new();
        assert!(!store.has_pending_changes());

        store.deep_get_or_create("/x", NodeType::File).unwrap();
        assert!(store.has_pending_changes());

        store.save().unwrap();
        assert!(!store.has_pending_changes());
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn set_property_round_trips() {
        let mut store = MemoryStore::new();
        store.put_node("/n", NodeType::Resource);
        store
            .set_property("/n", PROP_MIMETYPE, PropertyValue::Text("image/png".into()))
            .unwrap();
        assert_eq!(
            store.property("/n", PROP_MIMETYPE),
            Some(&PropertyValue::Text("image/png".into()))
        );
    }

    #[test]
    fn parent_and_leaf_helpers() {
        assert_eq!(parent_path("/a/b/c"), Some("/a/b"));
        assert_eq!(parent_path("/a"), None);
        assert_eq!(leaf_name("/a/b/c"), "c");
        assert_eq!(leaf_name("c"), "c");
    }
}
